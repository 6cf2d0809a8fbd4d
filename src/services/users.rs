use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::auth::{hash_password, verify_password};
use crate::error::AppError;
use crate::models::{User, UserInput};
use crate::repository::UserRepository;

/// User use cases: registration with email validation and password hashing, lookups, login.
#[derive(Clone)]
pub struct UserService {
    repository: Arc<dyn UserRepository>,
    bcrypt_cost: u32,
    // Checked against on unknown emails so both login failures cost one bcrypt verify.
    dummy_hash: Arc<str>,
}

const DUMMY_PASSWORD: &str = "dummy-password-for-unknown-users";

impl UserService {
    pub fn new(repository: Arc<dyn UserRepository>, bcrypt_cost: u32) -> Self {
        let dummy_hash = hash_password(DUMMY_PASSWORD, bcrypt_cost).unwrap_or_else(|e| {
            log::error!("Failed to hash dummy password at cost {}: {}", bcrypt_cost, e);
            String::new()
        });

        Self {
            repository,
            bcrypt_cost,
            dummy_hash: dummy_hash.into(),
        }
    }

    pub async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        log::info!("Retrieving user with email: {}", email);
        let user = self.repository.get_by_email(email).await?;
        if user.is_none() {
            log::warn!("User not found with email: {}", email);
        }
        Ok(user)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        log::info!("Retrieving user with ID: {}", id);
        let user = self.repository.get_by_id(id).await?;
        if user.is_none() {
            log::warn!("User not found with ID: {}", id);
        }
        Ok(user)
    }

    /// Stores `user` as given. Fails with a validation error when the email is blank.
    /// A duplicate email surfaces as the repository's error; there is no pre-check.
    pub async fn add(&self, user: &User) -> Result<(), AppError> {
        if let Err(errors) = user.validate() {
            log::warn!("Rejected user {} with empty email", user.id);
            return Err(errors.into());
        }

        log::info!("Adding new user with email: {}", user.email);
        self.repository.insert(user).await
    }

    /// Hashes the submitted password and stores the new user.
    pub async fn register(&self, input: UserInput) -> Result<User, AppError> {
        let password_hash = hash_password(&input.password, self.bcrypt_cost)?;
        let user = User::new(input, password_hash);
        self.add(&user).await?;
        Ok(user)
    }

    /// Returns the user only when `password` matches the stored hash.
    ///
    /// Unknown emails, wrong passwords and stored values that are not bcrypt
    /// hashes all come back as `None`. An unknown email still pays for a
    /// bcrypt verify, so response time does not reveal which emails exist.
    pub async fn login(&self, email: &str, password: &str) -> Result<Option<User>, AppError> {
        log::info!("Attempting login for user with email: {}", email);
        let user = match self.repository.get_by_email(email).await? {
            Some(user) => user,
            None => {
                let _ = verify_password(password, &self.dummy_hash);
                log::warn!("Login failed for {}", email);
                return Ok(None);
            }
        };

        let matches = match verify_password(password, &user.password_hash) {
            Ok(matches) => matches,
            Err(e) => {
                log::warn!("Stored password for user {} is not verifiable: {}", user.id, e);
                false
            }
        };

        if matches {
            log::info!("User {} logged in", user.id);
            Ok(Some(user))
        } else {
            log::warn!("Login failed for {}", email);
            Ok(None)
        }
    }
}
