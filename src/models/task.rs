use chrono::{DateTime, NaiveDate, NaiveDateTime, SubsecRound, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use sqlx::FromRow;
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Represents the status of a task.
/// Stored as an `INTEGER` column and sent over the wire as a number.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[serde(try_from = "i32", into = "i32")]
#[repr(i32)]
pub enum TaskStatus {
    /// Task is yet to be started.
    Pending = 0,
    /// Task is currently being worked on.
    InProgress = 1,
    /// Task is completed.
    Completed = 2,
}

impl TryFrom<i32> for TaskStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(TaskStatus::Pending),
            1 => Ok(TaskStatus::InProgress),
            2 => Ok(TaskStatus::Completed),
            other => Err(format!("unknown task status: {}", other)),
        }
    }
}

impl From<TaskStatus> for i32 {
    fn from(status: TaskStatus) -> i32 {
        status as i32
    }
}

/// Represents a task entity as stored in the database and returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Unique identifier for the task.
    pub id: Uuid,
    /// The title of the task. Required on creation.
    #[validate(custom = "title_required")]
    pub title: String,
    pub description: String,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    /// Identifier of the owning user. Not enforced as a foreign key.
    pub user_id: Uuid,
}

/// Body of `POST /tasks`. The client may pick the id; otherwise one is generated.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub id: Option<Uuid>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub user_id: Uuid,
}

/// Body of `PUT /tasks/{id}`. Every field overwrites the stored task.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskUpdate {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(deserialize_with = "deserialize_due_date")]
    pub due_date: DateTime<Utc>,
    pub status: TaskStatus,
    pub user_id: Uuid,
}

impl Task {
    /// Creates a `Task` from the creation payload, generating an id when none was given.
    pub fn new(input: TaskInput) -> Self {
        Self {
            id: input.id.unwrap_or_else(Uuid::new_v4),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            status: input.status,
            user_id: input.user_id,
        }
    }

    /// Overwrites every mutable field with the values from `update`.
    pub fn apply(&mut self, update: TaskUpdate) {
        self.title = update.title;
        self.description = update.description;
        self.due_date = update.due_date;
        self.status = update.status;
        self.user_id = update.user_id;
    }
}

fn title_required(title: &str) -> Result<(), ValidationError> {
    if title.trim().is_empty() {
        let mut error = ValidationError::new("required");
        error.message = Some("Title is required".into());
        return Err(error);
    }
    Ok(())
}

/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.f]` (as UTC) and bare dates (midnight UTC).
fn deserialize_due_date<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_due_date(&raw).ok_or_else(|| serde::de::Error::custom(format!("invalid dueDate: {}", raw)))
}

/// Parses RFC 3339, naive datetimes (read as UTC) and bare dates (midnight UTC).
/// Sub-microsecond digits are dropped to match what `TIMESTAMPTZ` stores.
pub(crate) fn parse_due_date(raw: &str) -> Option<DateTime<Utc>> {
    let parsed = if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        parsed.with_timezone(&Utc)
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        naive.and_utc()
    } else {
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()?
            .and_hms_opt(0, 0, 0)?
            .and_utc()
    };
    Some(parsed.trunc_subsecs(6))
}
