use crate::config::JwtSettings;
use crate::error::AppError;
use crate::models::User;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Represents the claims encoded within a JWT.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the user's id.
    pub sub: Uuid,
    pub email: String,
    /// Unique token id.
    pub jti: Uuid,
    pub iat: i64,
    pub exp: i64,
    pub iss: String,
    pub aud: String,
}

/// Signs and verifies HS256 bearer tokens with the configured issuer, audience and secret.
#[derive(Clone)]
pub struct TokenIssuer {
    settings: JwtSettings,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl TokenIssuer {
    pub fn new(settings: JwtSettings) -> Self {
        let encoding_key = EncodingKey::from_secret(settings.secret_key.as_bytes());
        let decoding_key = DecodingKey::from_secret(settings.secret_key.as_bytes());
        Self {
            settings,
            encoding_key,
            decoding_key,
        }
    }

    /// Issues a token for `user` that expires after the configured number of minutes.
    pub fn issue_token(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = Duration::try_minutes(self.settings.expiry_minutes)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::InternalServerError(format!(
                    "Token lifetime of {} minutes is out of range",
                    self.settings.expiry_minutes
                ))
            })?;
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            jti: Uuid::new_v4(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
            iss: self.settings.issuer.clone(),
            aud: self.settings.audience.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Checks signature, expiry, issuer and audience.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.settings.issuer.as_str()]);
        validation.set_audience(&[self.settings.audience.as_str()]);

        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))
    }
}
