use axum::{
    Form,
    extract::{Path, Query, State},
    response::{Html, Redirect},
};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::info;

use crate::auth::CurrentUser;
use crate::db::{NewApplication, PageQuery, PageRequest};
use crate::error::TrackerError;
use crate::router::TrackerState;
use crate::views;

/// Field names match the dashboard form. Every field except `salary` is required.
#[derive(Debug, Default, Deserialize)]
pub struct ApplicationForm {
    pub company: Option<String>,
    #[serde(rename = "jobTitle")]
    pub job_title: Option<String>,
    pub salary: Option<String>,
    pub location: Option<String>,
    #[serde(rename = "select-status")]
    pub status: Option<String>,
    #[serde(rename = "application-date")]
    pub date: Option<String>,
}

impl ApplicationForm {
    pub fn into_new_application(self) -> Result<NewApplication, TrackerError> {
        let date = required(self.date, "application-date")?;
        Ok(NewApplication {
            salary: parse_salary(self.salary.as_deref())?,
            application_date: parse_date(&date)?,
            company: required(self.company, "company")?,
            job_title: required(self.job_title, "jobTitle")?,
            location: required(self.location, "location")?,
            application_status: required(self.status, "select-status")?,
        })
    }
}

fn required(value: Option<String>, field: &'static str) -> Result<String, TrackerError> {
    value.ok_or(TrackerError::MissingField(field))
}

/// Absent or blank means unpaid.
pub fn parse_salary(raw: Option<&str>) -> Result<f64, TrackerError> {
    let Some(raw) = raw.map(str::trim).filter(|s| !s.is_empty()) else {
        return Ok(0.0);
    };
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| TrackerError::InvalidSalary(raw.to_string()))
}

/// ISO `YYYY-MM-DD`, as sent by a date input.
pub fn parse_date(raw: &str) -> Result<NaiveDate, TrackerError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| TrackerError::InvalidDate(raw.to_string()))
}

/// GET /dashboard
pub async fn dashboard(
    State(state): State<TrackerState>,
    CurrentUser(user): CurrentUser,
    Query(query): Query<PageQuery>,
) -> Result<Html<String>, TrackerError> {
    let req = PageRequest::new(query.requested(), state.page_size)?;
    let page = state.storage.list_applications(user.id, req).await?;
    Ok(views::dashboard_page(&user.username, &page))
}

/// POST /add_application
pub async fn add_application(
    State(state): State<TrackerState>,
    CurrentUser(user): CurrentUser,
    Form(form): Form<ApplicationForm>,
) -> Result<Redirect, TrackerError> {
    let new_app = form.into_new_application()?;
    let app = state.storage.create_application(user.id, new_app).await?;
    info!(user_id = user.id, application_id = app.id, company = %app.company, "application added");
    Ok(Redirect::to("/dashboard"))
}

/// POST /delete_application/{id}
///
/// Another user's application is reported the same as a missing one.
pub async fn delete_application(
    State(state): State<TrackerState>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<i64>,
) -> Result<Redirect, TrackerError> {
    let app = state
        .storage
        .get_application(id)
        .await?
        .filter(|app| app.user_id == user.id)
        .ok_or(TrackerError::NotFound)?;

    if !state.storage.delete_application(app.id).await? {
        return Err(TrackerError::NotFound);
    }
    info!(user_id = user.id, application_id = app.id, "application deleted");
    Ok(Redirect::to("/dashboard"))
}
