use crate::model::{Student, StudentCourse};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A student with all of its course enrollments. Assembled on read, never stored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StudentDetail {
    pub student: Student,
    pub student_course_list: Vec<StudentCourse>,
}

impl StudentDetail {
    pub fn new(student: Student, student_course_list: Vec<StudentCourse>) -> Self {
        StudentDetail {
            student,
            student_course_list,
        }
    }
}
