//! Account authentication: password hashing and the cookie-backed session.

pub mod password;
pub mod session;

pub use password::PasswordHasher;
pub use session::{
    CurrentUser, SESSION_COOKIE, end_session, session_user, session_username, start_session,
};
