//! Student reads, detail assembly, and the transactional register/update workflows.

use crate::converter::convert_student_details;
use crate::error::AppError;
use crate::model::{ApplicationStatus, Student, StudentCourse, StudentDetail};
use crate::repository::StudentRepository;
use chrono::{Local, Months, NaiveDateTime};
use std::sync::Arc;

/// Length of a course from its start.
const COURSE_LENGTH: Months = Months::new(12);

#[derive(Clone)]
pub struct StudentService {
    repository: Arc<dyn StudentRepository>,
}

impl StudentService {
    pub fn new(repository: Arc<dyn StudentRepository>) -> Self {
        StudentService { repository }
    }

    pub fn repository(&self) -> &Arc<dyn StudentRepository> {
        &self.repository
    }

    /// Every student with its courses. Unfiltered, so only suitable for small tables.
    pub async fn search_student_list(&self) -> Result<Vec<StudentDetail>, AppError> {
        let students = self.repository.search().await?;
        let courses = self.repository.search_student_course_list().await?;
        Ok(convert_student_details(students, &courses))
    }

    pub async fn search_student(&self, id: i64) -> Result<StudentDetail, AppError> {
        let student = self
            .repository
            .search_student(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("student {}", id)))?;
        let courses = self.repository.search_student_course(id).await?;
        Ok(StudentDetail::new(student, courses))
    }

    pub async fn search_by_name(&self, name: &str) -> Result<Vec<StudentDetail>, AppError> {
        let students = self.repository.find_by_name(name).await?;
        self.attach_courses(students).await
    }

    pub async fn search_by_email(&self, email: &str) -> Result<Vec<StudentDetail>, AppError> {
        let students = self.repository.find_by_email(email).await?;
        self.attach_courses(students).await
    }

    pub async fn get_all_student_courses(&self) -> Result<Vec<StudentCourse>, AppError> {
        self.repository.search_student_course_list().await
    }

    async fn attach_courses(
        &self,
        students: Vec<Student>,
    ) -> Result<Vec<StudentDetail>, AppError> {
        let mut out = Vec::with_capacity(students.len());
        for student in students {
            let courses = match student.id {
                Some(id) => self.repository.search_student_course(id).await?,
                None => Vec::new(),
            };
            out.push(StudentDetail::new(student, courses));
        }
        Ok(out)
    }

    /// Insert the student, then each course with its derived fields, in one transaction.
    /// Returns the detail with assigned ids and the applied defaults.
    pub async fn register_student(&self, mut detail: StudentDetail) -> Result<StudentDetail, AppError> {
        let mut tx = self.repository.begin().await?;

        let student_id = tx.register_student(&detail.student).await?;
        detail.student.id = Some(student_id);
        detail.student.is_deleted = false;

        for course in detail.student_course_list.iter_mut() {
            init_student_course(course, student_id, Local::now().naive_local());
            course.id = Some(tx.register_student_course(course).await?);
        }

        tx.commit().await?;
        tracing::info!(
            student_id,
            courses = detail.student_course_list.len(),
            "registered student"
        );
        Ok(detail)
    }

    /// Overwrite the student and the name/status of each course, in one transaction.
    /// A row that does not exist, or a course owned by another student, fails the
    /// whole update with `NotFound`.
    pub async fn update_student(&self, detail: &StudentDetail) -> Result<(), AppError> {
        let student_id = detail
            .student
            .id
            .ok_or_else(|| AppError::BadRequest("student.id is required".into()))?;
        let mut tx = self.repository.begin().await?;

        if tx.update_student(&detail.student).await? == 0 {
            return Err(AppError::NotFound(format!("student {}", student_id)));
        }
        for course in &detail.student_course_list {
            let course_id = course
                .id
                .ok_or_else(|| AppError::BadRequest("course id is required".into()))?;
            if tx.update_student_course(student_id, course).await? == 0 {
                return Err(AppError::NotFound(format!("student course {}", course_id)));
            }
        }

        tx.commit().await?;
        tracing::info!(
            student_id,
            courses = detail.student_course_list.len(),
            is_deleted = detail.student.is_deleted,
            "updated student"
        );
        Ok(())
    }
}

/// Link a new course to its student and derive its period: starts at `now`, ends one
/// calendar year later. An absent status becomes provisional; a given one is kept.
pub fn init_student_course(course: &mut StudentCourse, student_id: i64, now: NaiveDateTime) {
    course.student_id = Some(student_id);
    course.course_start_at = Some(now);
    course.course_end_at = Some(now.checked_add_months(COURSE_LENGTH).unwrap_or(now));
    if course.application_status.is_none() {
        course.application_status = Some(ApplicationStatus::ProvisionalApplication);
    }
}
