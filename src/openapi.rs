//! OpenAPI document for the student endpoints.

use crate::error::{ErrorBody, ErrorDetail, FieldError};
use crate::handlers::student;
use crate::model::{ApplicationStatus, Student, StudentCourse, StudentDetail};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(title = "Student Management API", description = "Students and their course enrollments"),
    paths(
        student::get_student_list,
        student::get_student,
        student::search_by_name,
        student::search_by_email,
        student::register_student,
        student::update_student,
        student::get_student_course_list,
        student::legacy_exception,
    ),
    components(schemas(
        Student,
        StudentCourse,
        StudentDetail,
        ApplicationStatus,
        ErrorBody,
        ErrorDetail,
        FieldError,
    )),
    tags(
        (name = "students", description = "Student and course enrollment management"),
        (name = "legacy", description = "Retired endpoints")
    )
)]
pub struct ApiDoc;
