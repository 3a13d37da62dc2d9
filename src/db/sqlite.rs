use crate::db::models::{DbApplication, DbUser, NewApplication};
use crate::db::page::{Page, PageRequest};
use crate::db::schema::SQLITE_INIT;
use crate::error::TrackerError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use tracing::debug;

pub type SqlitePool = Pool<Sqlite>;

#[derive(Clone)]
pub struct TrackerStorage {
    pool: SqlitePool,
}

impl TrackerStorage {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Open (creating the file if absent) and initialize the schema.
    pub async fn connect(database_url: &str) -> Result<Self, TrackerError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;
        let storage = Self::new(pool);
        storage.init_schema().await?;
        Ok(storage)
    }

    /// Initialize the schema by executing the bundled DDL.
    pub async fn init_schema(&self) -> Result<(), TrackerError> {
        // sqlx::query runs one statement at a time
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    /// Insert a user. A clash on the unique username surfaces as `UsernameTaken`.
    pub async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
    ) -> Result<DbUser, TrackerError> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"INSERT INTO users (username, password_hash) VALUES (?, ?)
               RETURNING id, username, password_hash"#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                TrackerError::UsernameTaken(username.to_string())
            }
            other => TrackerError::DatabaseError(other),
        })?;
        debug!(user_id = user.id, "user row inserted");
        Ok(user)
    }

    pub async fn find_user_by_username(
        &self,
        username: &str,
    ) -> Result<Option<DbUser>, TrackerError> {
        let user = sqlx::query_as::<_, DbUser>(
            "SELECT id, username, password_hash FROM users WHERE username = ?",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    /// All users, newest first.
    pub async fn list_users(&self, req: PageRequest) -> Result<Page<DbUser>, TrackerError> {
        let (total,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;
        let items = sqlx::query_as::<_, DbUser>(
            r#"SELECT id, username, password_hash FROM users
               ORDER BY id DESC LIMIT ? OFFSET ?"#,
        )
        .bind(req.limit())
        .bind(req.offset())
        .fetch_all(&self.pool)
        .await?;
        Page::new(items, req, total as u64)
    }

    pub async fn create_application(
        &self,
        user_id: i64,
        app: NewApplication,
    ) -> Result<DbApplication, TrackerError> {
        let row = sqlx::query_as::<_, DbApplication>(
            r#"INSERT INTO applications (
                user_id, company, job_title, salary, location,
                application_status, application_date
            ) VALUES (?, ?, ?, ?, ?, ?, ?)
            RETURNING id, user_id, company, job_title, salary, location,
                application_status, application_date"#,
        )
        .bind(user_id)
        .bind(app.company)
        .bind(app.job_title)
        .bind(app.salary)
        .bind(app.location)
        .bind(app.application_status)
        .bind(app.application_date)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn get_application(&self, id: i64) -> Result<Option<DbApplication>, TrackerError> {
        let row = sqlx::query_as::<_, DbApplication>(
            r#"SELECT id, user_id, company, job_title, salary, location,
               application_status, application_date
               FROM applications WHERE id = ?"#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    /// One user's applications, newest first.
    pub async fn list_applications(
        &self,
        user_id: i64,
        req: PageRequest,
    ) -> Result<Page<DbApplication>, TrackerError> {
        let (total,): (i64,) =
            sqlx::query_as("SELECT COUNT(*) FROM applications WHERE user_id = ?")
                .bind(user_id)
                .fetch_one(&self.pool)
                .await?;
        let items = sqlx::query_as::<_, DbApplication>(
            r#"SELECT id, user_id, company, job_title, salary, location,
               application_status, application_date
               FROM applications WHERE user_id = ?
               ORDER BY id DESC LIMIT ? OFFSET ?"#,
        )
        .bind(user_id)
        .bind(req.limit())
        .bind(req.offset())
        .fetch_all(&self.pool)
        .await?;
        Page::new(items, req, total as u64)
    }

    /// Returns whether a row was removed.
    pub async fn delete_application(&self, id: i64) -> Result<bool, TrackerError> {
        let res = sqlx::query("DELETE FROM applications WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(res.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    async fn memory_storage() -> TrackerStorage {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .unwrap()
            .foreign_keys(true);
        // a single connection keeps every query on the same in-memory database
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .unwrap();
        let storage = TrackerStorage::new(pool);
        storage.init_schema().await.unwrap();
        storage
    }

    fn sample(company: &str) -> NewApplication {
        NewApplication {
            company: company.to_string(),
            job_title: "Engineer".to_string(),
            salary: 1000.0,
            location: "Remote".to_string(),
            application_status: "Applied".to_string(),
            application_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
        }
    }

    #[tokio::test]
    async fn duplicate_username_is_rejected() {
        let storage = memory_storage().await;
        storage.create_user("ada", "hash").await.unwrap();
        let err = storage.create_user("ada", "other").await.unwrap_err();
        assert!(matches!(err, TrackerError::UsernameTaken(name) if name == "ada"));

        let page = storage
            .list_users(PageRequest::new(1, 250).unwrap())
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }

    #[tokio::test]
    async fn applications_list_newest_first_per_user() {
        let storage = memory_storage().await;
        let ada = storage.create_user("ada", "hash").await.unwrap();
        let bob = storage.create_user("bob", "hash").await.unwrap();
        storage.create_application(ada.id, sample("Acme")).await.unwrap();
        storage.create_application(bob.id, sample("Other")).await.unwrap();
        storage.create_application(ada.id, sample("Globex")).await.unwrap();

        let page = storage
            .list_applications(ada.id, PageRequest::new(1, 250).unwrap())
            .await
            .unwrap();
        let companies: Vec<_> = page.items.iter().map(|a| a.company.as_str()).collect();
        assert_eq!(companies, ["Globex", "Acme"]);
        assert_eq!(page.total, 2);
        assert_eq!(
            page.items[0].application_date,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[tokio::test]
    async fn listing_paginates() {
        let storage = memory_storage().await;
        let ada = storage.create_user("ada", "hash").await.unwrap();
        for i in 0..5 {
            storage
                .create_application(ada.id, sample(&format!("c{i}")))
                .await
                .unwrap();
        }
        let second = storage
            .list_applications(ada.id, PageRequest::new(2, 2).unwrap())
            .await
            .unwrap();
        let companies: Vec<_> = second.items.iter().map(|a| a.company.as_str()).collect();
        assert_eq!(companies, ["c2", "c1"]);
        assert!(second.has_next());

        let beyond = storage
            .list_applications(ada.id, PageRequest::new(4, 2).unwrap())
            .await;
        assert!(matches!(beyond, Err(TrackerError::NotFound)));
    }

    #[tokio::test]
    async fn application_requires_existing_user() {
        let storage = memory_storage().await;
        let err = storage.create_application(42, sample("Acme")).await;
        assert!(matches!(err, Err(TrackerError::DatabaseError(_))));
    }

    #[tokio::test]
    async fn delete_reports_missing_rows() {
        let storage = memory_storage().await;
        let ada = storage.create_user("ada", "hash").await.unwrap();
        let app = storage.create_application(ada.id, sample("Acme")).await.unwrap();

        assert!(storage.delete_application(app.id).await.unwrap());
        assert!(storage.get_application(app.id).await.unwrap().is_none());
        assert!(!storage.delete_application(app.id).await.unwrap());
    }
}
