//! One handler per route.

pub mod applications;
pub mod auth;
pub mod users;
