//! Assembles student details from flat student and course rows.

use crate::model::{Student, StudentCourse, StudentDetail};

/// One detail per student, in student order. Each carries the courses whose `student_id`
/// equals the student's id, in the order they appear in `courses`. Courses that match no
/// student are dropped.
pub fn convert_student_details(students: Vec<Student>, courses: &[StudentCourse]) -> Vec<StudentDetail> {
    students
        .into_iter()
        .map(|student| {
            let own: Vec<StudentCourse> = match student.id {
                Some(id) => courses
                    .iter()
                    .filter(|c| c.student_id == Some(id))
                    .cloned()
                    .collect(),
                None => Vec::new(),
            };
            StudentDetail::new(student, own)
        })
        .collect()
}
