use axum::{
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use axum_extra::extract::cookie::PrivateCookieJar;

use crate::auth::session_user;
use crate::db::{PageQuery, PageRequest};
use crate::error::TrackerError;
use crate::router::TrackerState;
use crate::views;

/// GET /users
///
/// Public unless `users_require_login` is set.
pub async fn list_users(
    State(state): State<TrackerState>,
    jar: PrivateCookieJar,
    Query(query): Query<PageQuery>,
) -> Result<Response, TrackerError> {
    if state.users_require_login && session_user(&state, &jar).await?.is_none() {
        return Ok(Redirect::to("/").into_response());
    }

    let req = PageRequest::new(query.requested(), state.page_size)?;
    let page = state.storage.list_users(req).await?;
    Ok(views::users_page(&page).into_response())
}
