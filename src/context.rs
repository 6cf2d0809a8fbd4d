//! Wiring of services, repositories and the token issuer.
//!
//! `AppContext` is built once at startup from a `Config` snapshot and handed to
//! every actix worker; each piece is shared through `web::Data`.

use actix_web::web;
use sqlx::PgPool;
use std::sync::Arc;

use crate::auth::TokenIssuer;
use crate::config::{Config, JwtSettings};
use crate::repository::{
    InMemoryTaskRepository, InMemoryUserRepository, PgTaskRepository, PgUserRepository,
    TaskRepository, UserRepository,
};
use crate::routes;
use crate::services::{TaskService, UserService};

#[derive(Clone)]
pub struct AppContext {
    pub tasks: web::Data<TaskService>,
    pub users: web::Data<UserService>,
    pub tokens: web::Data<TokenIssuer>,
}

impl AppContext {
    pub fn new(
        task_repository: Arc<dyn TaskRepository>,
        user_repository: Arc<dyn UserRepository>,
        jwt: JwtSettings,
        bcrypt_cost: u32,
    ) -> Self {
        Self {
            tasks: web::Data::new(TaskService::new(task_repository)),
            users: web::Data::new(UserService::new(user_repository, bcrypt_cost)),
            tokens: web::Data::new(TokenIssuer::new(jwt)),
        }
    }

    /// Postgres-backed context used by the server binary.
    pub fn postgres(pool: PgPool, config: &Config) -> Self {
        Self::new(
            Arc::new(PgTaskRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
            config.jwt.clone(),
            config.bcrypt_cost,
        )
    }

    /// Context over empty in-memory stores.
    pub fn in_memory(jwt: JwtSettings, bcrypt_cost: u32) -> Self {
        Self::new(
            Arc::new(InMemoryTaskRepository::new()),
            Arc::new(InMemoryUserRepository::new()),
            jwt,
            bcrypt_cost,
        )
    }

    /// Registers the shared state and all API routes.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.tasks.clone())
            .app_data(self.users.clone())
            .app_data(self.tokens.clone());
        routes::config(cfg);
    }
}
