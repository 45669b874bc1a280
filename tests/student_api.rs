mod common;

use axum::http::{Method, StatusCode};
use chrono::{Months, NaiveDateTime};
use common::{detail_json, memory_app, register, send, send_json, student_json};
use serde_json::{json, Value};

fn timestamp(v: &Value) -> NaiveDateTime {
    serde_json::from_value(v.clone()).unwrap()
}

#[tokio::test]
async fn register_then_get_applies_course_defaults() {
    let app = memory_app();
    let created = register(&app, "Taro", "taro@example.com", &["Java Standard"]).await;
    let id = created["student"]["id"].as_i64().expect("assigned id");
    assert_eq!(created["student"]["isDeleted"], false);
    assert_eq!(created["studentCourseList"][0]["studentId"], id);

    let (status, fetched) = send_json(&app, Method::GET, &format!("/student/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["student"]["name"], "Taro");
    let courses = fetched["studentCourseList"].as_array().unwrap();
    assert_eq!(courses.len(), 1);
    assert_eq!(courses[0]["courseName"], "Java Standard");
    assert_eq!(courses[0]["applicationStatus"], "provisional application");
    let start = timestamp(&courses[0]["courseStartAt"]);
    let end = timestamp(&courses[0]["courseEndAt"]);
    assert_eq!(Some(end), start.checked_add_months(Months::new(12)));
}

#[tokio::test]
async fn register_keeps_supplied_status() {
    let app = memory_app();
    let body = json!({
        "student": student_json("Hanako", "hanako@example.com"),
        "studentCourseList": [{ "courseName": "AWS", "applicationStatus": "formal application" }]
    });
    let (status, created) = send_json(&app, Method::POST, "/registerStudent", Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["studentCourseList"][0]["applicationStatus"], "formal application");
}

#[tokio::test]
async fn register_rejects_invalid_email_with_field_details() {
    let app = memory_app();
    let (status, body) = send_json(
        &app,
        Method::POST,
        "/registerStudent",
        Some(detail_json("Taro", "invalid-email", &["Java"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "validation_error");
    assert_eq!(body["error"]["details"][0]["field"], "student.email");

    let (_, list) = send_json(&app, Method::GET, "/studentList", None).await;
    assert!(list.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn malformed_bodies_are_bad_requests() {
    let app = memory_app();
    let (status, _) = send(&app, Method::POST, "/registerStudent", Some(json!(["not", "an", "object"]))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let bad_id = json!({ "student": { "id": "テストです" }, "studentCourseList": [] });
    let (status, body) = send_json(&app, Method::PUT, "/updateStudent", Some(bad_id)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
}

#[tokio::test]
async fn list_aggregates_courses_per_student() {
    let app = memory_app();
    register(&app, "A", "a@example.com", &["x", "y"]).await;
    register(&app, "B", "b@example.com", &[]).await;
    register(&app, "C", "c@example.com", &["z"]).await;

    let (status, list) = send_json(&app, Method::GET, "/studentList", None).await;
    assert_eq!(status, StatusCode::OK);
    let list = list.as_array().unwrap();
    let names: Vec<&str> = list.iter().map(|d| d["student"]["name"].as_str().unwrap()).collect();
    assert_eq!(names, ["A", "B", "C"]);
    let counts: Vec<usize> = list
        .iter()
        .map(|d| d["studentCourseList"].as_array().unwrap().len())
        .collect();
    assert_eq!(counts, [2, 0, 1]);

    let (status, courses) = send_json(&app, Method::GET, "/studentCourses", None).await;
    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = courses
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["courseName"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["x", "y", "z"]);
}

#[tokio::test]
async fn search_by_name_returns_matches_in_store_order() {
    let app = memory_app();
    register(&app, "Yamada Taro", "taro@example.com", &["Java"]).await;
    register(&app, "Suzuki Ichiro", "ichiro@example.com", &["AWS"]).await;
    register(&app, "Yamada Hanako", "hanako@example.com", &["Design", "Marketing"]).await;

    let (status, found) = send_json(&app, Method::GET, "/student/searchByName?name=Yamada", None).await;
    assert_eq!(status, StatusCode::OK);
    let found = found.as_array().unwrap();
    assert_eq!(found.len(), 2);
    assert_eq!(found[0]["student"]["name"], "Yamada Taro");
    assert_eq!(found[1]["student"]["name"], "Yamada Hanako");
    assert_eq!(found[0]["studentCourseList"][0]["courseName"], "Java");
    let hanako_courses = found[1]["studentCourseList"].as_array().unwrap();
    assert_eq!(hanako_courses.len(), 2);
    assert!(hanako_courses
        .iter()
        .all(|c| c["studentId"] == found[1]["student"]["id"]));

    let (_, none) = send_json(&app, Method::GET, "/student/searchByName?name=yamada", None).await;
    assert!(none.as_array().unwrap().is_empty(), "search is case-sensitive");
}

#[tokio::test]
async fn search_requires_its_parameter() {
    let app = memory_app();
    let (status, body) = send_json(&app, Method::GET, "/student/searchByName", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "bad_request");
    let (status, _) = send_json(&app, Method::GET, "/studentList/email", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_sets_logical_delete_and_hides_from_search() {
    let app = memory_app();
    let created = register(&app, "Enami Koji", "enami@example.com", &["Java"]).await;
    let id = created["student"]["id"].as_i64().unwrap();

    let (status, found) = send_json(&app, Method::GET, "/studentList/email?email=enami@example.com", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);

    let mut update = created.clone();
    update["student"]["isDeleted"] = json!(true);
    update["studentCourseList"][0]["courseName"] = json!("Java Advanced");
    update["studentCourseList"][0]["applicationStatus"] = json!("in progress");
    let (status, bytes) = send(&app, Method::PUT, "/updateStudent", Some(update)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(String::from_utf8(bytes).unwrap(), "Update processing succeeded.");

    let (_, fetched) = send_json(&app, Method::GET, &format!("/student/{}", id), None).await;
    assert_eq!(fetched["student"]["isDeleted"], true);
    assert_eq!(fetched["studentCourseList"][0]["courseName"], "Java Advanced");
    assert_eq!(fetched["studentCourseList"][0]["applicationStatus"], "in progress");
    assert_eq!(
        fetched["studentCourseList"][0]["courseStartAt"],
        created["studentCourseList"][0]["courseStartAt"]
    );

    let (_, found) = send_json(&app, Method::GET, "/studentList/email?email=enami@example.com", None).await;
    assert!(found.as_array().unwrap().is_empty());
    let (_, found) = send_json(&app, Method::GET, "/student/searchByName?name=Enami", None).await;
    assert!(found.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn update_accepts_legacy_string_ids_and_deleted_alias() {
    let app = memory_app();
    let created = register(&app, "Legacy", "legacy@example.com", &["Java"]).await;
    let id = created["student"]["id"].as_i64().unwrap();
    let course_id = created["studentCourseList"][0]["id"].as_i64().unwrap();

    let mut student = student_json("Legacy", "legacy@example.com");
    student["id"] = json!(id.to_string());
    student["deleted"] = json!(true);
    let body = json!({
        "student": student,
        "studentCourseList": [{
            "id": course_id.to_string(),
            "studentId": id.to_string(),
            "courseName": "Javaコース",
            "applicationStatus": "受講終了"
        }]
    });
    let (status, _) = send(&app, Method::PUT, "/updateStudent", Some(body)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, fetched) = send_json(&app, Method::GET, &format!("/student/{}", id), None).await;
    assert_eq!(fetched["student"]["isDeleted"], true);
    assert_eq!(fetched["studentCourseList"][0]["applicationStatus"], "completed");
}

#[tokio::test]
async fn update_validation_requires_ids_and_status() {
    let app = memory_app();
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/updateStudent",
        Some(detail_json("Nobody", "nobody@example.com", &["Java"])),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let fields: Vec<&str> = body["error"]["details"]
        .as_array()
        .unwrap()
        .iter()
        .map(|d| d["field"].as_str().unwrap())
        .collect();
    assert_eq!(
        fields,
        [
            "student.id",
            "studentCourseList[0].id",
            "studentCourseList[0].applicationStatus"
        ]
    );
}

#[tokio::test]
async fn update_of_unknown_student_is_not_found() {
    let app = memory_app();
    let mut student = student_json("Ghost", "ghost@example.com");
    student["id"] = json!(777);
    let (status, body) = send_json(
        &app,
        Method::PUT,
        "/updateStudent",
        Some(json!({ "student": student, "studentCourseList": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn get_student_checks_id_and_existence() {
    let app = memory_app();
    let (status, _) = send_json(&app, Method::GET, "/student/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (status, body) = send_json(&app, Method::GET, "/student/41", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["message"], "not found: student 41");
}

#[tokio::test]
async fn legacy_exception_endpoint_returns_fixed_400() {
    let app = memory_app();
    let (status, bytes) = send(&app, Method::GET, "/exception", None).await;
    assert!(status.is_client_error());
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "This API is currently unavailable. It is an outdated URL."
    );
}

#[tokio::test]
async fn common_routes_respond() {
    let app = memory_app();
    let (status, health) = send_json(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health["status"], "ok");

    let (status, ready) = send_json(&app, Method::GET, "/ready", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ready["database"], "ok");

    let (status, version) = send_json(&app, Method::GET, "/version", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(version["name"], "student-management");

    let (status, doc) = send_json(&app, Method::GET, "/api-docs/openapi.json", None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(doc["paths"]["/registerStudent"]["post"].is_object());
}

#[tokio::test]
async fn oversized_body_is_rejected() {
    let app = memory_app();
    let mut body = detail_json("Big", "big@example.com", &[]);
    body["student"]["remark"] = json!("x".repeat(common::BODY_LIMIT + 1));
    let (status, _) = send(&app, Method::POST, "/registerStudent", Some(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
}
