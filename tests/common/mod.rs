#![allow(dead_code)]

use actix_web::{http::header, test};
use serde_json::json;
use taskmanager::auth::AuthResponse;
use taskmanager::config::JwtSettings;
use taskmanager::AppContext;

pub const TEST_BCRYPT_COST: u32 = 4;

pub fn jwt_settings() -> JwtSettings {
    JwtSettings {
        issuer: "taskmanager".to_string(),
        audience: "taskmanager-clients".to_string(),
        secret_key: "integration_test_secret".to_string(),
        expiry_minutes: 30,
    }
}

pub fn context() -> AppContext {
    AppContext::in_memory(jwt_settings(), TEST_BCRYPT_COST)
}

/// Registers a user through the API, logs in and returns the login response.
pub async fn register_and_login<S, B>(app: &S, email: &str, password: &str) -> AuthResponse
where
    S: actix_web::dev::Service<
        actix_http::Request,
        Response = actix_web::dev::ServiceResponse<B>,
        Error = actix_web::Error,
    >,
    B: actix_web::body::MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/register")
        .set_json(json!({ "name": "Integration", "email": email, "password": password }))
        .to_request();
    let resp = test::call_service(app, req).await;
    assert!(resp.status().is_success(), "registration failed: {}", resp.status());

    let req = test::TestRequest::post()
        .uri("/users/login")
        .set_json(json!({ "email": email, "password": password }))
        .to_request();
    test::call_and_read_body_json(app, req).await
}

pub fn bearer(auth: &AuthResponse) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {}", auth.token))
}
