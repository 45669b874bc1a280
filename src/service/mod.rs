//! StudentService: queries, detail assembly, and transactional writes.

mod student;
mod validation;
pub use student::{init_student_course, StudentService};
pub use validation::{RequestValidator, ValidationMode};
