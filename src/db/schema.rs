//! SQL DDL for initializing the tracker database.

/// SQLite schema with:
/// - `users.username` UNIQUE, so duplicate registrations fail at the data layer
/// - `applications.user_id` a required foreign key into `users`
/// - `salary` REAL, 0 meaning unpaid
/// - `application_date` TEXT holding an ISO `YYYY-MM-DD` date
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT NOT NULL UNIQUE,
    password_hash TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS applications (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    company TEXT NOT NULL,
    job_title TEXT NOT NULL,
    salary REAL NOT NULL DEFAULT 0,
    location TEXT NOT NULL,
    application_status TEXT NOT NULL,
    application_date TEXT NOT NULL
);

-- Dashboard lists filter on the owner.
CREATE INDEX IF NOT EXISTS idx_applications_user_id ON applications(user_id);
"#;
