//! Database access

pub mod queries;

pub use queries::*;
