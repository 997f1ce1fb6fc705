mod common;

use axum::http::StatusCode;
use common::{
    body_json, create_test_faculty, create_test_student, empty_request, generate_unique_name,
    json_request, multipart_request, png_bytes, setup_test_app,
};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    let (app, _) = setup_test_app(pool);
    let name = generate_unique_name("Hermione");

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/students/{}", faculty.id),
            &json!({ "name": name, "age": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert!(body["id"].as_i64().unwrap() > 0);
    assert_eq!(body["name"], name);
    assert_eq!(body["age"], 12);
    assert_eq!(
        body["faculty"],
        json!({ "id": faculty.id, "name": faculty.name, "color": faculty.color })
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_age_bounds(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    let (app, _) = setup_test_app(pool);
    let uri = format!("/students/{}", faculty.id);

    for (age, expected) in [
        (6, StatusCode::BAD_REQUEST),
        (7, StatusCode::OK),
        (20, StatusCode::OK),
        (21, StatusCode::BAD_REQUEST),
    ] {
        let response = app
            .clone()
            .oneshot(json_request(
                "POST",
                &uri,
                &json!({ "name": generate_unique_name("Student"), "age": age }),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), expected, "age {}", age);
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_blank_name(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/students/{}", faculty.id),
            &json!({ "name": "", "age": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Requirements for student properties: 1. 'name' must contain characters, 2. 'age' should be in range of 7 to 20"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_duplicate_name(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    create_test_student(&pool, "Harry Potter", 11, Some(faculty.id)).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            &format!("/students/{}", faculty.id),
            &json!({ "name": "Harry Potter", "age": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Such a student already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enroll_student_missing_faculty(pool: PgPool) {
    let (app, _) = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "POST",
            "/students/9000",
            &json!({ "name": "Luna Lovegood", "age": 11 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM students")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(count, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_student_not_found(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/students/12345"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body = body_json(response).await;
    assert_eq!(body["error"], "Student not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_keeps_faculty(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    let student = create_test_student(&pool, "Ginny Weasley", 10, Some(faculty.id)).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/students",
            &json!({ "id": student.id, "name": "Ginevra Weasley", "age": 11 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["name"], "Ginevra Weasley");
    assert_eq!(body["age"], 11);
    assert_eq!(body["faculty"]["id"], faculty.id);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_student_rejects_faculty_change(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Gryffindor", "red").await;
    let student = create_test_student(&pool, "Ginny Weasley", 10, Some(faculty.id)).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/students",
            &json!({
                "id": student.id,
                "name": student.name,
                "age": student.age,
                "faculty": { "id": faculty.id }
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = body_json(response).await;
    assert_eq!(
        body["error"],
        "Try '/faculties' resource to edit faculty. If you want to change student's faculty - '/associations'"
    );

    // An explicit null is treated as absent
    let response = app
        .oneshot(json_request(
            "PUT",
            "/students",
            &json!({ "id": student.id, "name": student.name, "age": 12, "faculty": null }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_missing_student(pool: PgPool) {
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/students",
            &json!({ "id": 404, "name": "Nobody", "age": 12 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_delete_student_removes_avatar(pool: PgPool) {
    let student = create_test_student(&pool, "Cedric Diggory", 17, None).await;
    let (app, avatars_dir) = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(multipart_request(
            &format!("/avatars/{}", student.id),
            "avatar",
            "cedric.png",
            "image/png",
            &png_bytes(64, 64),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert!(avatars_dir.join(format!("{}.png", student.id)).exists());

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &format!("/students/{}", student.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let avatars: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM avatars WHERE student_id = $1")
        .bind(student.id)
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(avatars, 0);
    assert!(!avatars_dir.join(format!("{}.png", student.id)).exists());

    let response = app
        .oneshot(empty_request("DELETE", &format!("/students/{}", student.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_age(pool: PgPool) {
    create_test_student(&pool, "Fred Weasley", 13, None).await;
    create_test_student(&pool, "George Weasley", 13, None).await;
    create_test_student(&pool, "Percy Weasley", 15, None).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students/search?age=13"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 2);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students/search?age=9"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .oneshot(empty_request("GET", "/students/search?age=42"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_find_by_age_between_is_inclusive(pool: PgPool) {
    create_test_student(&pool, "First Year", 11, None).await;
    create_test_student(&pool, "Third Year", 13, None).await;
    create_test_student(&pool, "Seventh Year", 17, None).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students/search-between?from=11&to=13"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, vec!["First Year", "Third Year"]);

    let response = app
        .oneshot(empty_request("GET", "/students/search-between?from=5&to=13"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_student_faculty(pool: PgPool) {
    let faculty = create_test_faculty(&pool, "Ravenclaw", "blue").await;
    let member = create_test_student(&pool, "Cho Chang", 14, Some(faculty.id)).await;
    let loner = create_test_student(&pool, "Unsorted", 11, None).await;
    let (app, _) = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(empty_request(
            "GET",
            &format!("/students/{}/faculty", member.id),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["name"], "Ravenclaw");

    let response = app
        .oneshot(empty_request("GET", &format!("/students/{}/faculty", loner.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, serde_json::Value::Null);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_get_all_students(pool: PgPool) {
    let (app, _) = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    create_test_student(&pool, "Dean Thomas", 11, None).await;

    let response = app
        .oneshot(empty_request("GET", "/students"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await.as_array().unwrap().len(), 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_count_and_average_age(pool: PgPool) {
    let (app, _) = setup_test_app(pool.clone());

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students/average-age"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await, json!(0));

    create_test_student(&pool, "Seamus Finnigan", 11, None).await;
    create_test_student(&pool, "Lavender Brown", 12, None).await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/students/count"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!(2));

    // 11.5 rounds down
    let response = app
        .oneshot(empty_request("GET", "/students/average-age"))
        .await
        .unwrap();
    assert_eq!(body_json(response).await, json!(11));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_last_five_students(pool: PgPool) {
    let mut ids = Vec::new();
    for i in 0..7 {
        ids.push(
            create_test_student(&pool, &format!("Student {}", i), 12, None)
                .await
                .id,
        );
    }
    let (app, _) = setup_test_app(pool);

    let response = app
        .oneshot(empty_request("GET", "/students/last-five"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    let returned: Vec<i64> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|s| s["id"].as_i64().unwrap())
        .collect();
    let expected: Vec<i64> = ids.iter().rev().take(5).copied().collect();
    assert_eq!(returned, expected);
}
