#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use schoolhub::{AppState, init_router};
use schoolhub_auth::{Role, create_access_token};
use schoolhub_config::{CorsConfig, JwtConfig};
use schoolhub_db::{
    ClassroomStore, MemoryStore, PgPool, PgStore, SchoolStore, StudentStore, UserStore,
};
use schoolhub_models::{
    Classroom, NewClassroom, NewSchool, NewStudent, NewUser, School, Student, User,
};
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

pub const TEST_SECRET: &str = "test_secret_key_for_testing_purposes";

pub fn jwt_config() -> JwtConfig {
    JwtConfig {
        secret: TEST_SECRET.to_string(),
        access_token_expiry: 3600,
    }
}

/// The full router over a fresh in-memory store.
pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let state = AppState::new(store.clone(), jwt_config(), CorsConfig::default());
        Self {
            router: init_router(state),
            store,
        }
    }

    pub fn token(&self, role: Role) -> String {
        bearer(role)
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        send(&self.router, request).await
    }

    /// Sends `body` as JSON with a bearer token for `role`.
    pub async fn call(
        &self,
        method: &str,
        uri: &str,
        role: Role,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let token = self.token(role);
        self.send(request(method, uri, Some(&token), body)).await
    }

    pub async fn seed_user(&self, role: Role) -> User {
        let id = Uuid::now_v7();
        self.store
            .insert_user(NewUser {
                name: "Test Admin".to_string(),
                email: format!("admin-{id}@school.test"),
                role,
            })
            .await
            .unwrap()
    }

    pub async fn seed_school(&self, admin: Uuid) -> School {
        self.store
            .insert_school(NewSchool {
                name: "Lincoln High School".to_string(),
                address: "123 Main Street, Springfield".to_string(),
                admin,
            })
            .await
            .unwrap()
    }

    pub async fn seed_classroom(&self, school: Uuid) -> Classroom {
        self.store
            .insert_classroom(NewClassroom {
                name: "Room 101".to_string(),
                school,
            })
            .await
            .unwrap()
    }

    pub async fn seed_student(&self, classroom: Uuid, first_name: &str) -> Student {
        self.store
            .insert_student(NewStudent {
                first_name: first_name.to_string(),
                last_name: "Lovelace".to_string(),
                age: 12,
                classroom,
            })
            .await
            .unwrap()
    }
}

/// The full router over PostgreSQL.
pub fn pg_router(pool: PgPool) -> Router {
    let state = AppState::new(
        Arc::new(PgStore::new(pool)),
        jwt_config(),
        CorsConfig::default(),
    );
    init_router(state)
}

pub fn bearer(role: Role) -> String {
    create_access_token(&Uuid::now_v7().to_string(), role, &jwt_config()).unwrap()
}

/// Sends `request` and decodes the body as JSON, falling back to a JSON string.
pub async fn send(router: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()));
    (status, body)
}

pub fn request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

/// The `field` of every entry in a validation error body.
pub fn error_fields(body: &Value) -> Vec<String> {
    body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .map(|error| error["field"].as_str().unwrap().to_string())
        .collect()
}
