use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// An account. The email address doubles as the login key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: Uuid,
    pub name: String,
    #[validate(custom = "email_required")]
    pub email: String,
    /// bcrypt hash of the password. Never serialized.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
}

/// Body of `POST /users/register`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInput {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    /// Plain-text password; older clients send it as `passwordHash`.
    #[serde(alias = "passwordHash")]
    pub password: String,
}

impl User {
    /// Builds a user from the registration payload and an already computed password hash.
    pub fn new(input: UserInput, password_hash: String) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            name: input.name,
            email: input.email,
            password_hash,
        }
    }
}

fn email_required(email: &str) -> Result<(), ValidationError> {
    if email.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Email is required".into());
        return Err(error);
    }
    Ok(())
}
