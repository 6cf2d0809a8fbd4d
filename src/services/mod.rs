//! Application services sitting between the HTTP handlers and the repositories.

pub mod tasks;
pub mod users;

pub use tasks::TaskService;
pub use users::UserService;
