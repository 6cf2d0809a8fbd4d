use crate::{
    auth::{AuthResponse, LoginRequest, TokenIssuer},
    error::AppError,
    models::UserInput,
    services::UserService,
};
use actix_web::{get, http::header, post, web, HttpResponse, Responder};
use uuid::Uuid;

/// Message returned for every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Retrieves a user by id. Requires a bearer token.
///
/// ## Responses:
/// - `200 OK`: the `User` (without password hash).
/// - `404 Not Found`: no user with that id.
#[get("/{id}")]
pub async fn get_user(
    service: web::Data<UserService>,
    user_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let user_id = user_id.into_inner();
    match service.get_by_id(user_id).await? {
        Some(user) => Ok(HttpResponse::Ok().json(user)),
        None => Err(AppError::NotFound(format!("User {} not found", user_id))),
    }
}

/// Register a new user
///
/// Hashes the submitted password and stores the account. There is no
/// duplicate-email pre-check: a second registration with the same email fails
/// on the database constraint and answers 500.
///
/// ## Responses:
/// - `201 Created`: the created `User`, with `Location: /users/{id}`.
/// - `400 Bad Request`: blank email or malformed body.
#[post("/register")]
pub async fn register(
    service: web::Data<UserService>,
    register_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    let user = service.register(register_data.into_inner()).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/users/{}", user.id)))
        .json(user))
}

/// Login user
///
/// Authenticates a user and returns a signed bearer token.
///
/// ## Responses:
/// - `200 OK`: `AuthResponse` with `token`, `userId` and `email`.
/// - `401 Unauthorized`: "Invalid credentials" for unknown emails and wrong passwords alike.
#[post("/login")]
pub async fn login(
    service: web::Data<UserService>,
    issuer: web::Data<TokenIssuer>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    let user = service
        .login(&login_data.email, &login_data.password)
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.into()))?;

    let token = issuer.issue_token(&user)?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user_id: user.id,
        email: user.email,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtSettings;
    use crate::context::AppContext;
    use actix_web::{http::StatusCode, test, App};
    use serde_json::json;

    fn context() -> AppContext {
        AppContext::in_memory(
            JwtSettings {
                issuer: "taskmanager".to_string(),
                audience: "taskmanager-clients".to_string(),
                secret_key: "users_secret".to_string(),
                expiry_minutes: 5,
            },
            4,
        )
    }

    #[actix_rt::test]
    async fn test_register_validation() {
        let ctx = context();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/users/register")
            .set_json(json!({ "name": "Test", "email": "  ", "password": "password123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Email is required");
    }

    #[actix_rt::test]
    async fn test_login_failure_message() {
        let ctx = context();
        let app = test::init_service(App::new().configure(|cfg| ctx.configure(cfg))).await;

        let req = test::TestRequest::post()
            .uri("/users/login")
            .set_json(json!({ "email": "nobody@example.com", "password": "password123" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], INVALID_CREDENTIALS);
    }
}
