//! Data access for `students` and `students_courses`.
//!
//! Reads go straight through [`StudentRepository`]. Writes happen inside a
//! [`StudentTransaction`] obtained from [`StudentRepository::begin`]; dropping the
//! transaction without calling [`StudentTransaction::commit`] discards every write.

mod memory;
mod postgres;

pub use memory::InMemoryStudentRepository;
pub use postgres::PgStudentRepository;

use crate::error::AppError;
use crate::model::{Student, StudentCourse};
use async_trait::async_trait;

#[async_trait]
pub trait StudentRepository: Send + Sync {
    /// All students, ascending id.
    async fn search(&self) -> Result<Vec<Student>, AppError>;

    async fn search_student(&self, id: i64) -> Result<Option<Student>, AppError>;

    /// All course rows, ascending id.
    async fn search_student_course_list(&self) -> Result<Vec<StudentCourse>, AppError>;

    async fn search_student_course(&self, student_id: i64) -> Result<Vec<StudentCourse>, AppError>;

    /// Non-deleted students whose name contains `name` (case-sensitive, literal match).
    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError>;

    /// Non-deleted students whose email equals `email`.
    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, AppError>;

    async fn begin(&self) -> Result<Box<dyn StudentTransaction>, AppError>;

    /// Cheap liveness probe used by the readiness route.
    async fn ping(&self) -> Result<(), AppError>;
}

#[async_trait]
pub trait StudentTransaction: Send {
    /// Insert with `is_deleted = false`. Returns the assigned id.
    async fn register_student(&mut self, student: &Student) -> Result<i64, AppError>;

    /// Insert one course row as given. Returns the assigned id.
    async fn register_student_course(&mut self, course: &StudentCourse) -> Result<i64, AppError>;

    /// Overwrite every mutable student column by id. Returns rows affected.
    async fn update_student(&mut self, student: &Student) -> Result<u64, AppError>;

    /// Overwrite course name and application status of the row with `course.id`
    /// owned by `student_id`. Returns rows affected.
    async fn update_student_course(&mut self, student_id: i64, course: &StudentCourse) -> Result<u64, AppError>;

    async fn commit(self: Box<Self>) -> Result<(), AppError>;
}

/// Escape `%`, `_` and `\` so user input is matched literally inside a LIKE pattern.
pub(crate) fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
