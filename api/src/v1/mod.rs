use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Header carrying the authenticated caller's id on every request.
pub const USER_HEADER: &str = "x-user-id";

/// Visual category a status or priority maps to in the UI.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tone {
    Neutral,
    Info,
    Warning,
    Success,
    Danger,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    #[default]
    Pending,
    InProgress,
    Completed,
}

impl TaskStatus {
    pub fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::InProgress => "In Progress",
            Self::Completed => "Completed",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Pending => Tone::Neutral,
            Self::InProgress => Tone::Warning,
            Self::Completed => Tone::Success,
        }
    }

    /// Lookup by wire tag, falling back to `Pending` on anything unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "in_progress" => Self::InProgress,
            "completed" => Self::Completed,
            _ => Self::Pending,
        }
    }

    /// Targets a task in this status may move to: pending may start or
    /// complete directly, in-progress may complete, completed may reopen.
    pub fn allowed_transitions(self) -> &'static [TaskStatus] {
        match self {
            Self::Pending => &[Self::InProgress, Self::Completed],
            Self::InProgress => &[Self::Completed],
            Self::Completed => &[Self::Pending],
        }
    }

    pub fn can_transition_to(self, target: TaskStatus) -> bool {
        self.allowed_transitions().contains(&target)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    Low,
    #[default]
    Medium,
    High,
}

impl TaskPriority {
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn tone(self) -> Tone {
        match self {
            Self::Low => Tone::Info,
            Self::Medium => Tone::Warning,
            Self::High => Tone::Danger,
        }
    }

    /// Lookup by wire tag, falling back to `Low` on anything unrecognized.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "medium" => Self::Medium,
            "high" => Self::High,
            _ => Self::Low,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub user_id: Uuid,
}

/// Insert command. The store assigns `id` and `created_at`, defaults the
/// status to pending, and stamps `user_id` from the authenticated caller.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewTask {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default)]
    pub due_date: Option<DateTime<Utc>>,
}

/// Partial update command. `None` leaves a field unchanged; for the two
/// optional fields an explicit JSON `null` (`Some(None)`) clears the value.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<DateTime<Utc>>>,
}

impl TaskPatch {
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(description) = &self.description {
            task.description = description.clone();
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(priority) = self.priority {
            task.priority = priority;
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
    }
}
