//! HTTP handlers for student endpoints.

pub mod student;
pub use student::*;
