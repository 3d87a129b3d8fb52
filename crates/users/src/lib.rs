//! `quickadmin-users` — user accounts and the service that persists them.

pub mod model;
pub mod service;

pub use model::{STATE_ACTIVE, User};
pub use service::{InMemoryUserService, UserService};
