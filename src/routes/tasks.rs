use crate::{
    auth::AuthenticatedUser,
    error::AppError,
    models::{Task, TaskInput, TaskUpdate},
    services::TaskService,
};
use actix_web::{delete, get, http::header, post, put, web, HttpResponse, Responder};
use uuid::Uuid;

/// Lists every task.
///
/// ## Responses:
/// - `200 OK`: JSON array of `Task` objects, possibly empty.
/// - `401 Unauthorized`: missing or invalid bearer token.
#[get("")]
pub async fn list_tasks(
    service: web::Data<TaskService>,
    caller: AuthenticatedUser,
) -> Result<impl Responder, AppError> {
    log::debug!("User {} listing tasks", caller.0.sub);
    let tasks = service.list_all().await?;
    Ok(HttpResponse::Ok().json(tasks))
}

/// Creates a task.
///
/// The body matches `TaskInput`; `id` may be supplied by the client and is
/// generated otherwise. `title` must not be blank.
///
/// ## Responses:
/// - `201 Created`: the created `Task`, with `Location: /tasks/{id}`.
/// - `400 Bad Request`: blank title or malformed body.
/// - `500 Internal Server Error`: database failure (for example a duplicate id).
#[post("")]
pub async fn create_task(
    service: web::Data<TaskService>,
    caller: AuthenticatedUser,
    task_data: web::Json<TaskInput>,
) -> Result<impl Responder, AppError> {
    let task = Task::new(task_data.into_inner());
    log::info!("User {} creating task with title: {}", caller.0.sub, task.title);

    service.add(&task).await?;

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/tasks/{}", task.id)))
        .json(task))
}

/// Retrieves a task by its id.
///
/// ## Responses:
/// - `200 OK`: the `Task`.
/// - `404 Not Found`: no task with that id (empty body).
#[get("/{id}")]
pub async fn get_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    match service.get_by_id(task_id).await? {
        Some(task) => Ok(HttpResponse::Ok().json(task)),
        None => Err(AppError::NotFound(format!("Task {} not found", task_id))),
    }
}

/// Overwrites title, description, due date, status and owner of an existing task.
///
/// ## Responses:
/// - `204 No Content`: task updated.
/// - `404 Not Found`: no task with that id.
#[put("/{id}")]
pub async fn update_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
    task_data: web::Json<TaskUpdate>,
) -> Result<impl Responder, AppError> {
    let task_id = task_id.into_inner();
    let mut task = match service.get_by_id(task_id).await? {
        Some(task) => task,
        None => {
            log::warn!("Task with ID {} not found for update", task_id);
            return Err(AppError::NotFound(format!("Task {} not found", task_id)));
        }
    };

    task.apply(task_data.into_inner());
    service.update(&task).await?;

    Ok(HttpResponse::NoContent().finish())
}

/// Deletes a task. Answers `204 No Content` whether or not the task existed.
#[delete("/{id}")]
pub async fn delete_task(
    service: web::Data<TaskService>,
    task_id: web::Path<Uuid>,
) -> Result<impl Responder, AppError> {
    service.delete_by_id(task_id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
