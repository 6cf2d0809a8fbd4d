use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{TaskRepository, UserRepository};
use crate::error::AppError;
use crate::models::{Task, User};

/// In-memory task store for tests and local runs.
#[derive(Debug, Default, Clone)]
pub struct InMemoryTaskRepository {
    tasks: Arc<RwLock<HashMap<Uuid, Task>>>,
}

impl InMemoryTaskRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TaskRepository for InMemoryTaskRepository {
    async fn list(&self) -> Result<Vec<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.values().cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        let tasks = self.tasks.read().await;
        Ok(tasks.get(&id).cloned())
    }

    async fn insert(&self, task: &Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        if tasks.contains_key(&task.id) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key value violates unique constraint \"tasks_pkey\": {}",
                task.id
            )));
        }
        tasks.insert(task.id, task.clone());
        Ok(())
    }

    async fn update(&self, task: &Task) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        match tasks.get_mut(&task.id) {
            Some(stored) => *stored = task.clone(),
            None => log::warn!("No task found to update with ID: {}", task.id),
        }
        Ok(())
    }

    async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        let mut tasks = self.tasks.write().await;
        if tasks.remove(&id).is_none() {
            log::warn!("No task found to delete with ID: {}", id);
        }
        Ok(())
    }
}

/// In-memory user store. Rejects a second user with the same email the way
/// the unique constraint on `users.email` does.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn get_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut users = self.users.write().await;
        if users.contains_key(&user.id) || users.values().any(|u| u.email == user.email) {
            return Err(AppError::DatabaseError(format!(
                "duplicate key value violates unique constraint \"users_email_key\": {}",
                user.email
            )));
        }
        users.insert(user.id, user.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use chrono::Utc;

    fn sample_task() -> Task {
        Task {
            id: Uuid::new_v4(),
            title: "Write report".to_string(),
            description: String::new(),
            due_date: Utc::now(),
            status: TaskStatus::Pending,
            user_id: Uuid::new_v4(),
        }
    }

    #[actix_rt::test]
    async fn test_update_and_delete_tolerate_missing_rows() {
        let repo = InMemoryTaskRepository::new();
        let task = sample_task();

        assert!(repo.update(&task).await.is_ok());
        assert!(repo.delete_by_id(task.id).await.is_ok());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_update_overwrites_existing_task() {
        let repo = InMemoryTaskRepository::new();
        let mut task = sample_task();
        repo.insert(&task).await.unwrap();

        task.status = TaskStatus::Completed;
        repo.update(&task).await.unwrap();

        let stored = repo.get_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.status, TaskStatus::Completed);
    }

    #[actix_rt::test]
    async fn test_duplicate_email_is_rejected() {
        let repo = InMemoryUserRepository::new();
        let first = User {
            id: Uuid::new_v4(),
            name: "A".to_string(),
            email: "a@b.com".to_string(),
            password_hash: "x".to_string(),
        };
        let second = User {
            id: Uuid::new_v4(),
            ..first.clone()
        };

        repo.insert(&first).await.unwrap();
        assert!(matches!(
            repo.insert(&second).await,
            Err(AppError::DatabaseError(_))
        ));
    }
}
