#![doc = "The `taskmanager` library crate."]
#![doc = ""]
#![doc = "Task and user management over HTTP: request handlers call application"]
#![doc = "services, which validate input and delegate to repositories backed by"]
#![doc = "Postgres (or in-memory stores in tests). Login issues signed bearer tokens."]
#![doc = "The server binary (`main.rs`) only loads configuration and wires an `AppContext`."]

pub mod auth;
pub mod config;
pub mod context;
pub mod error;
pub mod models;
pub mod repository;
pub mod routes;
pub mod services;

pub use context::AppContext;
pub use error::AppError;
