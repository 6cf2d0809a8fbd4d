use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Task, User};

/// Task storage backed by the `tasks` table.
///
/// Every call checks a connection out of the pool for the duration of a single
/// statement and hands it back afterwards, also on error.
#[derive(Clone)]
pub struct PgTaskRepository {
    pool: PgPool,
}

impl PgTaskRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TaskRepository for PgTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        log::debug!("Selecting all tasks");
        let tasks = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, status, user_id FROM tasks",
        )
        .fetch_all(&self.pool)
        .await?;

        log::info!("Retrieved {} tasks from database", tasks.len());
        Ok(tasks)
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        log::debug!("Selecting task {}", id);
        let task = sqlx::query_as::<_, Task>(
            "SELECT id, title, description, due_date, status, user_id FROM tasks WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        if task.is_none() {
            log::info!("No task found with ID: {}", id);
        }
        Ok(task)
    }

    async fn insert(&self, task: &Task) -> Result<(), AppError> {
        log::debug!("Inserting task {} ({})", task.id, task.title);
        sqlx::query(
            "INSERT INTO tasks (id, title, description, due_date, status, user_id)
             VALUES ($1, $2, $3, $4, $5, $6)",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status)
        .bind(task.user_id)
        .execute(&self.pool)
        .await?;

        log::info!("Inserted task with ID: {}", task.id);
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        log::debug!("Updating task {}", task.id);
        let result = sqlx::query(
            "UPDATE tasks
             SET title = $2, description = $3, due_date = $4, status = $5, user_id = $6
             WHERE id = $1",
        )
        .bind(task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date)
        .bind(task.status)
        .bind(task.user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            log::warn!("No task found to update with ID: {}", task.id);
        } else {
            log::info!("Updated task with ID: {}", task.id);
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        log::debug!("Deleting task {}", id);
        let result = sqlx::query("DELETE FROM tasks WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            log::warn!("No task found to delete with ID: {}", id);
        } else {
            log::info!("Deleted task with ID: {}", id);
        }
        Ok(())
    }
}

/// User storage backed by the `users` table. `email` carries a unique constraint.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        log::debug!("Selecting user {}", id);
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        log::debug!("Selecting user by email {}", email);
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        log::debug!("Inserting user {} ({})", user.id, user.email);
        sqlx::query("INSERT INTO users (id, name, email, password_hash) VALUES ($1, $2, $3, $4)")
            .bind(user.id)
            .bind(&user.name)
            .bind(&user.email)
            .bind(&user.password_hash)
            .execute(&self.pool)
            .await?;

        log::info!("Inserted user with ID: {}", user.id);
        Ok(())
    }
}
