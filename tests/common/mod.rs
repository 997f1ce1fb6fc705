#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, Response};
use hogwarts::hogwarts_config::{AvatarConfig, CorsConfig, ServerConfig};
use hogwarts::router::init_router;
use hogwarts::state::AppState;
use http_body_util::BodyExt;
use image::{ImageFormat, RgbaImage};
use serde_json::Value;
use sqlx::PgPool;
use std::io::Cursor;
use std::path::PathBuf;
use uuid::Uuid;

pub const MULTIPART_BOUNDARY: &str = "hogwarts-test-boundary";

pub struct TestFaculty {
    pub id: i64,
    pub name: String,
    pub color: String,
}

pub struct TestStudent {
    pub id: i64,
    pub name: String,
    pub age: i32,
}

/// Builds the router around `pool`, storing avatars in a fresh temp directory.
pub fn setup_test_app(pool: PgPool) -> (axum::Router, PathBuf) {
    dotenvy::dotenv().ok();

    let avatars_dir = std::env::temp_dir().join(format!("hogwarts-avatars-{}", Uuid::new_v4()));
    let avatar_config = AvatarConfig {
        dir: avatars_dir.clone(),
        ..AvatarConfig::default()
    };

    let state = AppState::new(
        pool,
        ServerConfig::default(),
        avatar_config,
        CorsConfig::default(),
    );
    (init_router(state), avatars_dir)
}

pub async fn create_test_faculty(pool: &PgPool, name: &str, color: &str) -> TestFaculty {
    let id: i64 =
        sqlx::query_scalar("INSERT INTO faculties (name, color) VALUES ($1, $2) RETURNING id")
            .bind(name)
            .bind(color)
            .fetch_one(pool)
            .await
            .unwrap();

    TestFaculty {
        id,
        name: name.to_string(),
        color: color.to_string(),
    }
}

pub async fn create_test_student(
    pool: &PgPool,
    name: &str,
    age: i32,
    faculty_id: Option<i64>,
) -> TestStudent {
    let id: i64 = sqlx::query_scalar(
        "INSERT INTO students (name, age, faculty_id) VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(name)
    .bind(age)
    .bind(faculty_id)
    .fetch_one(pool)
    .await
    .unwrap();

    TestStudent {
        id,
        name: name.to_string(),
        age,
    }
}

pub fn generate_unique_name(prefix: &str) -> String {
    format!("{} {}", prefix, Uuid::new_v4())
}

pub fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Single-part multipart body carrying `bytes` under `field`.
pub fn multipart_request(
    uri: &str,
    field: &str,
    filename: &str,
    content_type: &str,
    bytes: &[u8],
) -> Request<Body> {
    let mut body = Vec::new();
    body.extend_from_slice(format!("--{}\r\n", MULTIPART_BOUNDARY).as_bytes());
    body.extend_from_slice(
        format!(
            "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
            field, filename
        )
        .as_bytes(),
    );
    body.extend_from_slice(format!("Content-Type: {}\r\n\r\n", content_type).as_bytes());
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{}--\r\n", MULTIPART_BOUNDARY).as_bytes());

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY),
        )
        .body(Body::from(body))
        .unwrap()
}

/// Encodes a solid-colour PNG of the given size.
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, image::Rgba([180, 30, 30, 255]));
    let mut out = Cursor::new(Vec::new());
    image.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
