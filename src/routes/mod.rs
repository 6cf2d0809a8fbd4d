pub mod health;
pub mod tasks;
pub mod users;

use actix_web::web;

use crate::auth::AuthMiddleware;
use crate::error::AppError;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/tasks")
            .wrap(AuthMiddleware)
            .service(tasks::list_tasks)
            .service(tasks::create_task)
            .service(tasks::get_task)
            .service(tasks::update_task)
            .service(tasks::delete_task),
    )
    .service(
        web::scope("/users")
            .wrap(AuthMiddleware)
            .service(users::register)
            .service(users::login)
            .service(users::get_user),
    );
}
