//! `quickadmin-core` — shared building blocks for the admin backend.
//!
//! This crate holds the response envelope and the generic helpers used by the
//! HTTP layer (sequence utilities, matchers, property comparison, JSON).
//! It has no HTTP or storage concerns.

pub mod error;
pub mod id;
pub mod message;
pub mod util;

pub use error::{JsonError, ObjectError};
pub use id::UserId;
pub use message::SystemMessage;
pub use util::matcher::{MatchMode, Matcher};
pub use util::object::Comparison;
