use axum::{
    Router,
    extract::FromRef,
    routing::{get, post},
};
use axum_extra::extract::cookie::Key;
use tracing::warn;

use crate::auth::PasswordHasher;
use crate::config::Config;
use crate::db::TrackerStorage;
use crate::error::TrackerError;
use crate::handlers::{applications, auth, users};

#[derive(Clone)]
pub struct TrackerState {
    pub storage: TrackerStorage,
    pub hasher: PasswordHasher,
    pub key: Key,
    pub secure_cookie: bool,
    pub users_require_login: bool,
    pub page_size: u32,
}

impl TrackerState {
    pub fn new(storage: TrackerStorage, hasher: PasswordHasher, key: Key, cfg: &Config) -> Self {
        Self {
            storage,
            hasher,
            key,
            secure_cookie: cfg.secure_cookie,
            users_require_login: cfg.users_require_login,
            page_size: cfg.page_size,
        }
    }

    /// Connect storage and derive the cookie key from configuration.
    pub async fn from_config(cfg: &Config) -> Result<Self, TrackerError> {
        let storage = TrackerStorage::connect(&cfg.database_url).await?;
        Ok(Self::new(
            storage,
            PasswordHasher::new(),
            session_key(cfg.session_secret.as_deref()),
            cfg,
        ))
    }
}

impl FromRef<TrackerState> for Key {
    fn from_ref(state: &TrackerState) -> Self {
        state.key.clone()
    }
}

/// Cookie key from the configured secret, or a fresh random one.
pub fn session_key(secret: Option<&str>) -> Key {
    match secret.map(|s| Key::try_from(s.as_bytes())) {
        Some(Ok(key)) => key,
        Some(Err(_)) => {
            warn!("session_secret shorter than 64 bytes; using a random key");
            Key::generate()
        }
        None => {
            warn!("no session_secret configured; sessions will not survive a restart");
            Key::generate()
        }
    }
}

pub fn tracker_router(state: TrackerState) -> Router {
    Router::new()
        .route("/", get(auth::home))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", get(auth::logout))
        .route("/dashboard", get(applications::dashboard))
        .route("/add_application", post(applications::add_application))
        .route(
            "/delete_application/{id}",
            post(applications::delete_application),
        )
        .route("/users", get(users::list_users))
        .with_state(state)
}
