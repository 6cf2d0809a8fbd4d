//! Persistence for tasks and users.
//!
//! Each repository is a trait so the services can run against Postgres in
//! production and against the in-memory stores in tests. Errors from the
//! backing store are propagated unchanged; nothing is retried.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::{Task, User};

pub use memory::{InMemoryTaskRepository, InMemoryUserRepository};
pub use postgres::{PgTaskRepository, PgUserRepository};

#[async_trait]
pub trait TaskRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Task>, AppError>;

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError>;

    async fn insert(&self, task: &Task) -> Result<(), AppError>;

    /// Overwrites the stored task with the same id. Zero affected rows is not an error.
    async fn update(&self, task: &Task) -> Result<(), AppError>;

    /// Zero affected rows is not an error.
    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError>;

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn insert(&self, user: &User) -> Result<(), AppError>;
}
