use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::auth::{end_session, session_username, start_session};
use crate::error::TrackerError;
use crate::router::TrackerState;
use crate::views;

#[derive(Debug, Default, Deserialize)]
pub struct CredentialsForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Problems with a login or registration attempt that are shown back on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormRejection {
    MissingCredentials,
    UsernameTaken,
    AccountNotFound,
}

impl FormRejection {
    pub fn message(self) -> &'static str {
        match self {
            FormRejection::MissingCredentials => "Please enter a Username/Password",
            FormRejection::UsernameTaken => "User already here",
            // same text for unknown user and wrong password
            FormRejection::AccountNotFound => "We couldn't find your account",
        }
    }
}

impl IntoResponse for FormRejection {
    fn into_response(self) -> Response {
        views::index_page(Some(self.message())).into_response()
    }
}

impl CredentialsForm {
    fn require_filled(&self) -> Result<(), FormRejection> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(FormRejection::MissingCredentials);
        }
        Ok(())
    }
}

/// GET / -> dashboard when logged in, otherwise the login/register page.
pub async fn home(jar: PrivateCookieJar) -> Response {
    if session_username(&jar).is_some() {
        return Redirect::to("/dashboard").into_response();
    }
    views::index_page(None).into_response()
}

/// POST /login
pub async fn login(
    State(state): State<TrackerState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, TrackerError> {
    if let Err(rejection) = form.require_filled() {
        return Ok(rejection.into_response());
    }

    let Some(user) = state.storage.find_user_by_username(&form.username).await? else {
        warn!(username = %form.username, "login for unknown user");
        return Ok(FormRejection::AccountNotFound.into_response());
    };

    if !state.hasher.verify(form.password, user.password_hash).await? {
        warn!(username = %user.username, "login with wrong password");
        return Ok(FormRejection::AccountNotFound.into_response());
    }

    info!(user_id = user.id, "user logged in");
    let jar = start_session(jar, &user.username, state.secure_cookie);
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// POST /register
pub async fn register(
    State(state): State<TrackerState>,
    jar: PrivateCookieJar,
    Form(form): Form<CredentialsForm>,
) -> Result<Response, TrackerError> {
    if let Err(rejection) = form.require_filled() {
        return Ok(rejection.into_response());
    }

    if state
        .storage
        .find_user_by_username(&form.username)
        .await?
        .is_some()
    {
        return Ok(FormRejection::UsernameTaken.into_response());
    }

    let hash = state.hasher.hash(form.password).await?;
    let user = match state.storage.create_user(&form.username, &hash).await {
        Ok(user) => user,
        // lost a race with a concurrent registration
        Err(TrackerError::UsernameTaken(_)) => {
            return Ok(FormRejection::UsernameTaken.into_response());
        }
        Err(e) => return Err(e),
    };

    info!(user_id = user.id, username = %user.username, "user registered");
    let jar = start_session(jar, &user.username, state.secure_cookie);
    Ok((jar, Redirect::to("/dashboard")).into_response())
}

/// GET /logout
pub async fn logout(jar: PrivateCookieJar) -> impl IntoResponse {
    (end_session(jar), Redirect::to("/"))
}
