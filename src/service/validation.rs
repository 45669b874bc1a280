//! Field validation for student detail request bodies. Every failing field is reported.

use crate::error::{AppError, FieldError};
use crate::model::{Student, StudentCourse, StudentDetail};
use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$",
    )
    .expect("static email pattern")
});

const MAX_AGE: i32 = 150;

/// Which write the body is destined for. Updates need ids and an explicit status.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValidationMode {
    Register,
    Update,
}

pub struct RequestValidator;

impl RequestValidator {
    pub fn validate(detail: &StudentDetail, mode: ValidationMode) -> Result<(), AppError> {
        let mut errors = Vec::new();
        validate_student(&detail.student, mode, &mut errors);
        for (i, course) in detail.student_course_list.iter().enumerate() {
            validate_course(i, course, mode, &mut errors);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(AppError::Validation(errors))
        }
    }
}

fn require_not_blank(field: &str, value: &str, errors: &mut Vec<FieldError>) {
    if value.trim().is_empty() {
        errors.push(FieldError::new(field, "must not be blank"));
    }
}

fn validate_student(student: &Student, mode: ValidationMode, errors: &mut Vec<FieldError>) {
    if mode == ValidationMode::Update && student.id.is_none() {
        errors.push(FieldError::new("student.id", "is required"));
    }
    require_not_blank("student.name", &student.name, errors);
    require_not_blank("student.kanaName", &student.kana_name, errors);
    require_not_blank("student.nickname", &student.nickname, errors);
    require_not_blank("student.area", &student.area, errors);
    require_not_blank("student.sex", &student.sex, errors);
    if student.email.trim().is_empty() {
        errors.push(FieldError::new("student.email", "must not be blank"));
    } else if !EMAIL.is_match(&student.email) {
        errors.push(FieldError::new("student.email", "must be a well-formed email address"));
    }
    if let Some(age) = student.age {
        if !(0..=MAX_AGE).contains(&age) {
            errors.push(FieldError::new(
                "student.age",
                format!("must be between 0 and {}", MAX_AGE),
            ));
        }
    }
}

fn validate_course(index: usize, course: &StudentCourse, mode: ValidationMode, errors: &mut Vec<FieldError>) {
    let field = |name: &str| format!("studentCourseList[{}].{}", index, name);
    require_not_blank(&field("courseName"), &course.course_name, errors);
    if mode == ValidationMode::Update {
        if course.id.is_none() {
            errors.push(FieldError::new(field("id"), "is required"));
        }
        if course.application_status.is_none() {
            errors.push(FieldError::new(field("applicationStatus"), "must not be blank"));
        }
    }
}
