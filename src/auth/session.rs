use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar, SameSite};
use tracing::debug;

use crate::db::DbUser;
use crate::error::TrackerError;
use crate::router::TrackerState;

/// Private (encrypted) cookie holding the logged-in username.
pub const SESSION_COOKIE: &str = "username";

/// Mark the browser as logged in as `username`.
pub fn start_session(jar: PrivateCookieJar, username: &str, secure: bool) -> PrivateCookieJar {
    jar.add(build_cookie(username.to_string(), secure))
}

pub fn end_session(jar: PrivateCookieJar) -> PrivateCookieJar {
    jar.remove(clear_cookie())
}

pub fn session_username(jar: &PrivateCookieJar) -> Option<String> {
    jar.get(SESSION_COOKIE)
        .map(|c| c.value().to_owned())
        .filter(|name| !name.is_empty())
}

fn build_cookie(value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, value))
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Lax)
        .build()
}

fn clear_cookie() -> Cookie<'static> {
    Cookie::build(Cookie::new(SESSION_COOKIE, ""))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .build()
}

/// The user behind the session cookie. Requests without a valid session
/// are redirected to the landing page.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub DbUser);

impl FromRequestParts<TrackerState> for CurrentUser {
    type Rejection = Response;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &TrackerState,
    ) -> Result<Self, Self::Rejection> {
        let jar = PrivateCookieJar::<Key>::from_request_parts(parts, state)
            .await
            .unwrap_or_else(|never| match never {});

        match session_user(state, &jar).await {
            Ok(Some(user)) => Ok(CurrentUser(user)),
            Ok(None) if session_username(&jar).is_some() => {
                debug!("session names an unknown user; clearing it");
                Err((end_session(jar), Redirect::to("/")).into_response())
            }
            Ok(None) => Err(Redirect::to("/").into_response()),
            Err(e) => Err(e.into_response()),
        }
    }
}

/// Look up the account named by the session cookie, if any.
pub async fn session_user(
    state: &TrackerState,
    jar: &PrivateCookieJar,
) -> Result<Option<DbUser>, TrackerError> {
    match session_username(jar) {
        Some(username) => state.storage.find_user_by_username(&username).await,
        None => Ok(None),
    }
}
