#![allow(dead_code)]

use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::http::header;
use actix_web::{test, web, App, Error};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

use todo_api::csv::UploadDir;
use todo_api::routes;
use todo_api::store::{MemoryStore, TodoStore, UserStore};

/// Boundary used by the hand-built multipart bodies below.
pub const BOUNDARY: &str = "---------------------------todoapitestboundary";

pub fn set_jwt_secret() {
    std::env::set_var("JWT_SECRET", "integration-test-secret");
}

/// Builds the full application service on top of an in-memory store, so the
/// suite runs without a database.
pub async fn init_app(
    store: Arc<MemoryStore>,
    upload_dir: PathBuf,
) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
    let todo_store: Arc<dyn TodoStore> = store.clone();
    let user_store: Arc<dyn UserStore> = store;

    test::init_service(
        App::new()
            .app_data(web::Data::from(todo_store))
            .app_data(web::Data::from(user_store))
            .app_data(web::Data::new(UploadDir(upload_dir)))
            .configure(routes::config),
    )
    .await
}

// Helper struct to hold auth details
pub struct TestUser {
    pub user_id: i32,
    pub token: String,
}

/// Registers an account and returns its id and bearer token.
pub async fn register_user(
    app: &impl Service<
        Request,
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
    >,
    name: &str,
    email: &str,
    password: &str,
) -> TestUser {
    let req = test::TestRequest::post()
        .uri("/register")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(
        resp.status().is_success(),
        "failed to register test user, status: {}",
        resp.status()
    );

    let auth: todo_api::auth::AuthResponse = test::read_body_json(resp).await;
    TestUser {
        user_id: auth.user_id,
        token: auth.token,
    }
}

/// Builds a multipart request against `/todos/upload` carrying one field
/// named `file`.
pub fn upload_request(token: &str, filename: &str, content_type: &str, contents: &str) -> Request {
    multipart_request(token, "file", filename, content_type, contents)
}

/// Builds a multipart request against `/todos/upload` with an arbitrary
/// field name, for exercising the "no file uploaded" path.
pub fn multipart_request(
    token: &str,
    field_name: &str,
    filename: &str,
    content_type: &str,
    contents: &str,
) -> Request {
    let body = format!(
        "--{b}\r\n\
         Content-Disposition: form-data; name=\"{field_name}\"; filename=\"{filename}\"\r\n\
         Content-Type: {content_type}\r\n\
         \r\n\
         {contents}\r\n\
         --{b}--\r\n",
        b = BOUNDARY,
    );

    test::TestRequest::post()
        .uri("/todos/upload")
        .append_header((header::AUTHORIZATION, format!("Bearer {}", token)))
        .append_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={}", BOUNDARY),
        ))
        .set_payload(body)
        .to_request()
}
