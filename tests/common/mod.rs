#![allow(dead_code)]

use axum::body::{to_bytes, Body};
use axum::http::{header::{CONTENT_LENGTH, CONTENT_TYPE}, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use std::sync::Arc;
use student_management::{app, AppState, InMemoryStudentRepository, StudentRepository};
use tower::ServiceExt;

pub const BODY_LIMIT: usize = 64 * 1024;

pub fn memory_app() -> Router {
    app_with(Arc::new(InMemoryStudentRepository::new()))
}

pub fn app_with(repository: Arc<dyn StudentRepository>) -> Router {
    app(AppState::new(repository), BODY_LIMIT)
}

pub async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(v) => {
            let text = v.to_string();
            builder
                .header(CONTENT_TYPE, "application/json")
                .header(CONTENT_LENGTH, text.len())
                .body(Body::from(text))
                .unwrap()
        }
        None => builder.body(Body::empty()).unwrap(),
    };
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

pub async fn send_json(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, value)
}

pub fn student_json(name: &str, email: &str) -> Value {
    json!({
        "name": name,
        "kanaName": "カナ",
        "nickname": "nick",
        "email": email,
        "area": "Tokyo",
        "age": 25,
        "sex": "male",
        "remark": "none"
    })
}

pub fn detail_json(name: &str, email: &str, courses: &[&str]) -> Value {
    let list: Vec<Value> = courses.iter().map(|c| json!({ "courseName": c })).collect();
    json!({ "student": student_json(name, email), "studentCourseList": list })
}

/// Register through the API and return the response body.
pub async fn register(app: &Router, name: &str, email: &str, courses: &[&str]) -> Value {
    let (status, body) = send_json(app, Method::POST, "/registerStudent", Some(detail_json(name, email, courses))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    body
}
