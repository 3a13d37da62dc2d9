//! Database module: models, schema and storage for the tracker.
//!
//! Layout:
//! - `models.rs`: Rust structs mirroring DB rows
//! - `schema.rs`: SQL DDL for initializing the database (SQLite)
//! - `page.rs`: page arithmetic shared by the listing queries
//! - `sqlite.rs`: pool-backed storage with one method per query

pub mod models;
pub mod page;
pub mod schema;
pub mod sqlite;

pub use models::{DbApplication, DbUser, NewApplication};
pub use page::{Page, PageQuery, PageRequest};
pub use schema::SQLITE_INIT;
pub use sqlite::{SqlitePool, TrackerStorage};
