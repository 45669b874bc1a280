//! In-memory repository for development (`STUDENT_STORE=memory`) and tests.
//!
//! A transaction holds the table lock from `begin` until it is committed or dropped,
//! so writers are serialized and readers wait for the open transaction. Writes go
//! to a private copy that replaces the tables on commit.

use super::{StudentRepository, StudentTransaction};
use crate::error::AppError;
use crate::model::{Student, StudentCourse};
use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

#[derive(Clone, Debug, Default)]
struct Tables {
    students: Vec<Student>,
    courses: Vec<StudentCourse>,
    next_student_id: i64,
    next_course_id: i64,
}

#[derive(Clone, Default)]
pub struct InMemoryStudentRepository {
    tables: Arc<Mutex<Tables>>,
}

impl InMemoryStudentRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StudentRepository for InMemoryStudentRepository {
    async fn search(&self) -> Result<Vec<Student>, AppError> {
        Ok(self.tables.lock().await.students.clone())
    }

    async fn search_student(&self, id: i64) -> Result<Option<Student>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables.students.iter().find(|s| s.id == Some(id)).cloned())
    }

    async fn search_student_course_list(&self) -> Result<Vec<StudentCourse>, AppError> {
        Ok(self.tables.lock().await.courses.clone())
    }

    async fn search_student_course(&self, student_id: i64) -> Result<Vec<StudentCourse>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .courses
            .iter()
            .filter(|c| c.student_id == Some(student_id))
            .cloned()
            .collect())
    }

    async fn find_by_name(&self, name: &str) -> Result<Vec<Student>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .students
            .iter()
            .filter(|s| !s.is_deleted && s.name.contains(name))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Vec<Student>, AppError> {
        let tables = self.tables.lock().await;
        Ok(tables
            .students
            .iter()
            .filter(|s| !s.is_deleted && s.email == email)
            .cloned()
            .collect())
    }

    async fn begin(&self) -> Result<Box<dyn StudentTransaction>, AppError> {
        let guard = Arc::clone(&self.tables).lock_owned().await;
        let working = (*guard).clone();
        Ok(Box::new(InMemoryTransaction { guard, working }))
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

struct InMemoryTransaction {
    guard: OwnedMutexGuard<Tables>,
    working: Tables,
}

#[async_trait]
impl StudentTransaction for InMemoryTransaction {
    async fn register_student(&mut self, student: &Student) -> Result<i64, AppError> {
        self.working.next_student_id += 1;
        let id = self.working.next_student_id;
        self.working.students.push(Student {
            id: Some(id),
            is_deleted: false,
            ..student.clone()
        });
        debug!(id, "staged student insert");
        Ok(id)
    }

    async fn register_student_course(&mut self, course: &StudentCourse) -> Result<i64, AppError> {
        let owner = course
            .student_id
            .ok_or_else(|| AppError::Conflict("student_id must not be null".into()))?;
        if !self.working.students.iter().any(|s| s.id == Some(owner)) {
            return Err(AppError::Conflict(format!(
                "student_id {} does not reference an existing student",
                owner
            )));
        }
        self.working.next_course_id += 1;
        let id = self.working.next_course_id;
        self.working.courses.push(StudentCourse {
            id: Some(id),
            ..course.clone()
        });
        debug!(id, student_id = owner, "staged course insert");
        Ok(id)
    }

    async fn update_student(&mut self, student: &Student) -> Result<u64, AppError> {
        match self.working.students.iter_mut().find(|s| s.id.is_some() && s.id == student.id) {
            Some(row) => {
                *row = student.clone();
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn update_student_course(&mut self, student_id: i64, course: &StudentCourse) -> Result<u64, AppError> {
        let row = self
            .working
            .courses
            .iter_mut()
            .find(|c| c.id.is_some() && c.id == course.id && c.student_id == Some(student_id));
        match row {
            Some(row) => {
                row.course_name = course.course_name.clone();
                row.application_status = course.application_status;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn commit(self: Box<Self>) -> Result<(), AppError> {
        let InMemoryTransaction { mut guard, working } = *self;
        *guard = working;
        Ok(())
    }
}
