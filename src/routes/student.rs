//! Student routes. Paths match the legacy REST surface exactly.

use crate::handlers::student::{
    get_student, get_student_course_list, get_student_list, legacy_exception, register_student,
    search_by_email, search_by_name, update_student,
};
use crate::state::AppState;
use axum::{routing::get, routing::post, routing::put, Router};

pub fn student_routes(state: AppState) -> Router {
    Router::new()
        .route("/studentList", get(get_student_list))
        .route("/studentList/email", get(search_by_email))
        .route("/student/searchByName", get(search_by_name))
        .route("/student/:id", get(get_student))
        .route("/registerStudent", post(register_student))
        .route("/updateStudent", put(update_student))
        .route("/studentCourses", get(get_student_course_list))
        .route("/exception", get(legacy_exception))
        .with_state(state)
}
