//! Student, course enrollment, and the composed student detail.

mod course;
mod detail;
pub mod id;
mod student;

pub use course::{ApplicationStatus, StudentCourse, UnknownApplicationStatus};
pub use detail::StudentDetail;
pub use id::parse_id;
pub use student::Student;
