//! Generic helpers shared by the HTTP layer.

pub mod array;
pub mod json;
pub mod matcher;
pub mod object;
