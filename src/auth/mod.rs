pub mod extractors;
pub mod middleware;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use extractors::AuthenticatedUser;
pub use middleware::AuthMiddleware;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenIssuer};

/// Represents the payload for a user login request.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response returned after a successful login.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthResponse {
    /// Signed bearer token.
    pub token: String,
    pub user_id: Uuid,
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_auth_response_wire_format() {
        let user_id = Uuid::new_v4();
        let response = AuthResponse {
            token: "abc".to_string(),
            user_id,
            email: "test@example.com".to_string(),
        };

        assert_eq!(
            serde_json::to_value(&response).unwrap(),
            json!({ "token": "abc", "userId": user_id, "email": "test@example.com" })
        );
    }
}
