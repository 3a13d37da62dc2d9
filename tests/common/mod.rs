use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response, StatusCode, header},
    response::IntoResponse,
};
use axum_extra::extract::cookie::{Cookie, Key, PrivateCookieJar};
use job_tracker::auth::{PasswordHasher, SESSION_COOKIE};
use job_tracker::config::Config;
use job_tracker::db::TrackerStorage;
use job_tracker::router::{TrackerState, tracker_router};
use std::{
    fs,
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use tower::ServiceExt;

/// A router over a throwaway SQLite file plus a tiny cookie store.
pub struct TestApp {
    pub router: Router,
    pub storage: TrackerStorage,
    pub key: Key,
    cookie: Option<String>,
    db_path: PathBuf,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with(Config::default()).await
    }

    pub async fn spawn_with(mut cfg: Config) -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("system time before UNIX_EPOCH")
            .as_nanos();
        let mut db_path = std::env::temp_dir();
        db_path.push(format!(
            "job-tracker-test-{}-{}.sqlite",
            std::process::id(),
            nanos
        ));
        cfg.database_url = format!("sqlite:{}", db_path.display());

        let storage = TrackerStorage::connect(&cfg.database_url)
            .await
            .expect("failed to open test database");
        let hasher = PasswordHasher::with_params(4096, 1, 1).expect("argon2 params");
        let key = Key::generate();
        let state = TrackerState::new(storage.clone(), hasher, key.clone(), &cfg);

        Self {
            router: tracker_router(state),
            storage,
            key,
            cookie: None,
            db_path,
        }
    }

    pub async fn get(&mut self, uri: &str) -> Response<Body> {
        let req = self.request("GET", uri).body(Body::empty()).expect("request");
        self.send(req).await
    }

    pub async fn post_form(&mut self, uri: &str, form: &str) -> Response<Body> {
        let req = self
            .request("POST", uri)
            .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(Body::from(form.to_string()))
            .expect("request");
        self.send(req).await
    }

    pub fn forget_session(&mut self) {
        self.cookie = None;
    }

    /// Carry a session cookie for `username`, sealed with the app's key,
    /// without going through login.
    pub fn use_session_for(&mut self, username: &str) {
        let jar = PrivateCookieJar::new(self.key.clone())
            .add(Cookie::new(SESSION_COOKIE, username.to_string()));
        let resp = jar.into_response();
        let raw = resp
            .headers()
            .get(header::SET_COOKIE)
            .and_then(|v| v.to_str().ok())
            .expect("sealed session cookie");
        let pair = raw.split(';').next().unwrap_or_default().trim();
        self.cookie = Some(pair.to_string());
    }

    pub fn has_session(&self) -> bool {
        self.cookie.is_some()
    }

    pub async fn register(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form(
            "/register",
            &format!("username={username}&password={password}"),
        )
        .await
    }

    pub async fn login(&mut self, username: &str, password: &str) -> Response<Body> {
        self.post_form("/login", &format!("username={username}&password={password}"))
            .await
    }

    pub async fn add_application(&mut self, company: &str, salary: &str) -> Response<Body> {
        self.post_form(
            "/add_application",
            &format!(
                "company={company}&jobTitle=Engineer&salary={salary}&location=Remote\
                 &select-status=Applied&application-date=2024-03-09"
            ),
        )
        .await
    }

    fn request(&self, method: &str, uri: &str) -> axum::http::request::Builder {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }
        builder
    }

    async fn send(&mut self, req: Request<Body>) -> Response<Body> {
        let resp = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("request failed");
        for value in resp.headers().get_all(header::SET_COOKIE) {
            let Ok(raw) = value.to_str() else { continue };
            let pair = raw.split(';').next().unwrap_or_default().trim();
            if pair.starts_with(&format!("{SESSION_COOKIE}=")) {
                let cleared = pair.len() == SESSION_COOKIE.len() + 1 || raw.contains("Max-Age=0");
                self.cookie = (!cleared).then(|| pair.to_string());
            }
        }
        resp
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = fs::remove_file(&self.db_path);
    }
}

pub fn set_cookie_header(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::SET_COOKIE)
        .and_then(|v| v.to_str().ok())
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
}

pub fn assert_redirect(resp: &Response<Body>, to: &str) {
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(resp), Some(to));
}

pub async fn body_text(resp: Response<Body>) -> String {
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    String::from_utf8(body.to_vec()).expect("response body was not utf-8")
}
