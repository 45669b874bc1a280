//! Student endpoints: list, fetch, search, register, update, course list, legacy probe.

use crate::error::{AppError, ErrorBody};
use crate::extractors::JsonBody;
use crate::model::{parse_id, StudentCourse, StudentDetail};
use crate::service::{RequestValidator, ValidationMode};
use crate::state::AppState;
use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

/// Confirmation body returned by a successful update.
pub const UPDATE_SUCCEEDED: &str = "Update processing succeeded.";

/// Fixed message of the retired `/exception` endpoint.
pub const LEGACY_ENDPOINT_MESSAGE: &str = "This API is currently unavailable. It is an outdated URL.";

#[derive(Debug, Deserialize)]
pub struct NameQuery {
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct EmailQuery {
    pub email: String,
}

fn query_params<T>(query: Result<Query<T>, QueryRejection>) -> Result<T, AppError> {
    query
        .map(|Query(params)| params)
        .map_err(|rejection| AppError::BadRequest(rejection.body_text()))
}

#[utoipa::path(
    get,
    path = "/studentList",
    tag = "students",
    responses(
        (status = 200, description = "Every student with its courses", body = Vec<StudentDetail>),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_student_list(State(state): State<AppState>) -> Result<Json<Vec<StudentDetail>>, AppError> {
    Ok(Json(state.service.search_student_list().await?))
}

#[utoipa::path(
    get,
    path = "/student/{id}",
    tag = "students",
    params(("id" = String, Path, description = "Student id, digits only")),
    responses(
        (status = 200, description = "The student with its courses", body = StudentDetail),
        (status = 400, description = "Id is not numeric", body = ErrorBody),
        (status = 404, description = "No such student", body = ErrorBody)
    )
)]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id_str): Path<String>,
) -> Result<Json<StudentDetail>, AppError> {
    let id = parse_id(&id_str)?;
    Ok(Json(state.service.search_student(id).await?))
}

#[utoipa::path(
    get,
    path = "/student/searchByName",
    tag = "students",
    params(("name" = String, Query, description = "Substring of the name, case-sensitive")),
    responses(
        (status = 200, description = "Matching non-deleted students", body = Vec<StudentDetail>),
        (status = 400, description = "Missing name parameter", body = ErrorBody)
    )
)]
pub async fn search_by_name(
    State(state): State<AppState>,
    query: Result<Query<NameQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentDetail>>, AppError> {
    let params = query_params(query)?;
    Ok(Json(state.service.search_by_name(&params.name).await?))
}

#[utoipa::path(
    get,
    path = "/studentList/email",
    tag = "students",
    params(("email" = String, Query, description = "Exact email address")),
    responses(
        (status = 200, description = "Matching non-deleted students", body = Vec<StudentDetail>),
        (status = 400, description = "Missing email parameter", body = ErrorBody)
    )
)]
pub async fn search_by_email(
    State(state): State<AppState>,
    query: Result<Query<EmailQuery>, QueryRejection>,
) -> Result<Json<Vec<StudentDetail>>, AppError> {
    let params = query_params(query)?;
    Ok(Json(state.service.search_by_email(&params.email).await?))
}

#[utoipa::path(
    post,
    path = "/registerStudent",
    tag = "students",
    request_body = StudentDetail,
    responses(
        (status = 200, description = "Registered student with assigned ids and course defaults", body = StudentDetail),
        (status = 400, description = "Field validation failed", body = ErrorBody)
    )
)]
pub async fn register_student(
    State(state): State<AppState>,
    JsonBody(detail): JsonBody<StudentDetail>,
) -> Result<Json<StudentDetail>, AppError> {
    RequestValidator::validate(&detail, ValidationMode::Register)?;
    Ok(Json(state.service.register_student(detail).await?))
}

#[utoipa::path(
    put,
    path = "/updateStudent",
    tag = "students",
    request_body = StudentDetail,
    responses(
        (status = 200, description = "Update applied", body = String, content_type = "text/plain"),
        (status = 400, description = "Field validation failed", body = ErrorBody),
        (status = 404, description = "Student or course id does not exist", body = ErrorBody)
    )
)]
pub async fn update_student(
    State(state): State<AppState>,
    JsonBody(detail): JsonBody<StudentDetail>,
) -> Result<&'static str, AppError> {
    RequestValidator::validate(&detail, ValidationMode::Update)?;
    state.service.update_student(&detail).await?;
    Ok(UPDATE_SUCCEEDED)
}

#[utoipa::path(
    get,
    path = "/studentCourses",
    tag = "students",
    responses(
        (status = 200, description = "Every course enrollment", body = Vec<StudentCourse>),
        (status = 500, description = "Store failure", body = ErrorBody)
    )
)]
pub async fn get_student_course_list(State(state): State<AppState>) -> Result<Json<Vec<StudentCourse>>, AppError> {
    Ok(Json(state.service.get_all_student_courses().await?))
}

/// Retired endpoint kept so old clients get a clear client error.
#[utoipa::path(
    get,
    path = "/exception",
    tag = "legacy",
    responses((status = 400, description = "Always fails", body = String, content_type = "text/plain"))
)]
pub async fn legacy_exception() -> (StatusCode, &'static str) {
    tracing::warn!("legacy /exception endpoint called");
    (StatusCode::BAD_REQUEST, LEGACY_ENDPOINT_MESSAGE)
}
