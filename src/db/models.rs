use chrono::NaiveDate;
use sqlx::FromRow;

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbUser {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
}

#[derive(Debug, Clone, PartialEq, FromRow)]
pub struct DbApplication {
    pub id: i64,
    pub user_id: i64,
    pub company: String,
    pub job_title: String,
    pub salary: f64,
    pub location: String,
    pub application_status: String,
    pub application_date: NaiveDate,
}

/// Fields for an application row that does not exist yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewApplication {
    pub company: String,
    pub job_title: String,
    pub salary: f64,
    pub location: String,
    pub application_status: String,
    pub application_date: NaiveDate,
}
