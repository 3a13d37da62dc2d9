use figment::{
    Figment,
    providers::{Env, Serialized},
};
use serde::{Deserialize, Serialize};

/// Environment prefix for every configuration key, e.g. `TRACKER_DATABASE_URL`.
pub const ENV_PREFIX: &str = "TRACKER_";

/// Rows shown per page on the dashboard and the user list.
pub const DEFAULT_PAGE_SIZE: u32 = 250;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub listen_addr: String,
    pub loglevel: String,
    /// Key material for the encrypted session cookie; at least 64 bytes.
    /// When unset a random key is generated and sessions die with the process.
    pub session_secret: Option<String>,
    /// Mark the session cookie `Secure`; enable when served behind https.
    pub secure_cookie: bool,
    /// Gate `/users` behind a logged-in session.
    pub users_require_login: bool,
    pub page_size: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite://users.db".to_string(),
            listen_addr: "0.0.0.0:8000".to_string(),
            loglevel: "info".to_string(),
            session_secret: None,
            secure_cookie: false,
            users_require_login: false,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Config {
    /// Defaults overlaid with `TRACKER_*` environment variables.
    pub fn load() -> Result<Self, figment::Error> {
        Self::figment().extract()
    }

    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Config::default())).merge(Env::prefixed(ENV_PREFIX))
    }
}
