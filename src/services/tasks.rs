use std::sync::Arc;
use uuid::Uuid;
use validator::Validate;

use crate::error::AppError;
use crate::models::Task;
use crate::repository::TaskRepository;

/// Task use cases: title validation on creation, everything else passes straight through.
#[derive(Clone)]
pub struct TaskService {
    repository: Arc<dyn TaskRepository>,
}

impl TaskService {
    pub fn new(repository: Arc<dyn TaskRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_all(&self) -> Result<Vec<Task>, AppError> {
        log::info!("Retrieving all tasks");
        let tasks = self.repository.list().await?;
        log::info!("Retrieved {} tasks", tasks.len());
        Ok(tasks)
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<Option<Task>, AppError> {
        log::info!("Retrieving task with ID: {}", id);
        let task = self.repository.get_by_id(id).await?;
        if task.is_none() {
            log::warn!("Task with ID {} not found", id);
        }
        Ok(task)
    }

    /// Rejects a blank title before anything reaches the repository.
    pub async fn add(&self, task: &Task) -> Result<(), AppError> {
        if let Err(errors) = task.validate() {
            log::warn!("Rejected task {} with empty title", task.id);
            return Err(errors.into());
        }

        log::info!("Adding new task with title: {}", task.title);
        self.repository.insert(task).await
    }

    pub async fn update(&self, task: &Task) -> Result<(), AppError> {
        log::info!("Updating task with ID: {}", task.id);
        self.repository.update(task).await
    }

    pub async fn delete_by_id(&self, id: Uuid) -> Result<(), AppError> {
        log::info!("Deleting task with ID: {}", id);
        self.repository.delete_by_id(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskStatus;
    use crate::repository::InMemoryTaskRepository;
    use chrono::{TimeZone, Utc};
    use pretty_assertions::assert_eq;

    fn service() -> TaskService {
        TaskService::new(Arc::new(InMemoryTaskRepository::new()))
    }

    fn task_titled(title: &str) -> Task {
        Task {
            id: Uuid::new_v4(),
            title: title.to_string(),
            description: "Two litres".to_string(),
            due_date: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            status: TaskStatus::Pending,
            user_id: Uuid::new_v4(),
        }
    }

    #[actix_rt::test]
    async fn test_add_then_get_returns_same_task() {
        let service = service();
        let task = task_titled("Buy milk");

        service.add(&task).await.unwrap();

        assert_eq!(service.get_by_id(task.id).await.unwrap(), Some(task));
    }

    #[actix_rt::test]
    async fn test_add_rejects_blank_title_without_insert() {
        let service = service();

        for title in ["", "   "] {
            let task = task_titled(title);
            match service.add(&task).await {
                Err(AppError::ValidationError(msg)) => assert_eq!(msg, "Title is required"),
                other => panic!("expected validation error, got {:?}", other),
            }
        }

        assert!(service.list_all().await.unwrap().is_empty());
    }

    #[actix_rt::test]
    async fn test_get_unknown_id_is_absent() {
        assert_eq!(service().get_by_id(Uuid::new_v4()).await.unwrap(), None);
    }

    #[actix_rt::test]
    async fn test_delete_unknown_id_succeeds() {
        assert!(service().delete_by_id(Uuid::new_v4()).await.is_ok());
    }

    #[actix_rt::test]
    async fn test_update_is_not_revalidated() {
        let service = service();
        let mut task = task_titled("Buy milk");
        service.add(&task).await.unwrap();

        task.title = String::new();
        service.update(&task).await.unwrap();

        let stored = service.get_by_id(task.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "");
    }
}
