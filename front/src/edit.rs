use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tasklight_api::v1::{NewTask, Task, TaskPatch, TaskPriority};

use crate::notify::{Notification, Notifier};
use crate::session::Session;
use crate::store::TaskStore;

/// Date-only representation used by the form's due date input.
pub const DATE_INPUT_FORMAT: &str = "%Y-%m-%d";

/// The saved record handed back to the list on a successful submit.
#[derive(Clone, Debug)]
pub enum EditOutcome {
    Created(Task),
    Updated(Task),
}

/// One in-flight create or edit form: working copies of the editable fields
/// and a submitting flag. Performs exactly one create-or-update command.
#[derive(Clone, Debug, Default)]
pub struct TaskEditor {
    seed: Option<Task>,
    pub title: String,
    pub description: String,
    pub priority: TaskPriority,
    pub due_date: String,
    submitting: bool,
}

impl TaskEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populates the form from an existing task. The due date timestamp
    /// collapses back to its date-only input form.
    pub fn for_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            priority: task.priority,
            due_date: match task.due_date {
                Some(due) => due.date_naive().format(DATE_INPUT_FORMAT).to_string(),
                None => String::new(),
            },
            seed: Some(task.clone()),
            submitting: false,
        }
    }

    pub fn is_editing(&self) -> bool {
        self.seed.is_some()
    }

    /// True while a submit is in flight; the submit control stays disabled
    /// so the same form cannot be sent twice.
    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    /// Validates and performs the create-or-update command.
    ///
    /// Returns `None` without touching the store when the trimmed title is
    /// empty, and `None` after an error notification when the command fails,
    /// leaving the field values intact so the user may retry.
    pub async fn submit(
        &mut self,
        store: &impl TaskStore,
        session: &Session,
        notifier: &impl Notifier,
    ) -> Option<EditOutcome> {
        let title = self.title.trim().to_owned();
        if title.is_empty() {
            return None;
        }

        self.submitting = true;
        let result = self.perform(title, store, session).await;
        self.submitting = false;

        match result {
            Ok(outcome) => {
                let message = match outcome {
                    EditOutcome::Created(_) => "Task created successfully",
                    EditOutcome::Updated(_) => "Task updated successfully",
                };
                notifier.notify(Notification::success("Success", message));
                Some(outcome)
            }
            Err(err) => {
                tracing::error!("failed to save task: {err:?}");
                let message = match self.seed {
                    Some(_) => "Failed to update task",
                    None => "Failed to create task",
                };
                notifier.notify(Notification::error("Error", message));
                None
            }
        }
    }

    async fn perform(
        &self,
        title: String,
        store: &impl TaskStore,
        session: &Session,
    ) -> eyre::Result<EditOutcome> {
        let description = match self.description.trim() {
            "" => None,
            text => Some(text.to_owned()),
        };
        let due_date = parse_due_date(&self.due_date)?;

        if let Some(seed) = &self.seed {
            let patch = TaskPatch {
                title: Some(title),
                description: Some(description),
                priority: Some(self.priority),
                due_date: Some(due_date),
                ..Default::default()
            };

            let task = store.update_task(seed.user_id, seed.id, patch).await?;
            Ok(EditOutcome::Updated(task))
        } else {
            let user = (session.current_user()).ok_or_else(|| eyre::eyre!("not signed in"))?;
            let new = NewTask {
                title,
                description,
                priority: self.priority,
                due_date,
            };

            let task = store.insert_task(user, new).await?;
            Ok(EditOutcome::Created(task))
        }
    }
}

/// Empty input means no deadline; anything else is a calendar date stored as
/// the start-of-day instant in UTC.
fn parse_due_date(input: &str) -> eyre::Result<Option<DateTime<Utc>>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }

    let date = NaiveDate::parse_from_str(input, DATE_INPUT_FORMAT)?;
    Ok(Some(date.and_time(NaiveTime::MIN).and_utc()))
}

#[cfg(test)]
mod tests {
    use tasklight_api::v1::TaskStatus;
    use uuid::Uuid;

    use super::*;
    use crate::testing::{sample_task, MemoryStore, RecordingNotifier};

    #[test]
    fn seeded_editor_prefills_all_fields() {
        let mut task = sample_task(Uuid::new_v4(), "write report");
        task.description = Some("first draft".into());
        task.priority = TaskPriority::High;
        task.due_date = Some("2026-09-01T00:00:00Z".parse().unwrap());

        let editor = TaskEditor::for_task(&task);

        assert!(editor.is_editing());
        assert_eq!(editor.title, "write report");
        assert_eq!(editor.description, "first draft");
        assert_eq!(editor.priority, TaskPriority::High);
        assert_eq!(editor.due_date, "2026-09-01");
    }

    #[test]
    fn blank_editor_starts_at_defaults() {
        let editor = TaskEditor::new();

        assert!(!editor.is_editing());
        assert_eq!(editor.title, "");
        assert_eq!(editor.description, "");
        assert_eq!(editor.priority, TaskPriority::Medium);
        assert_eq!(editor.due_date, "");
    }

    #[test]
    fn due_date_parses_to_start_of_day() {
        let parsed = parse_due_date("2026-09-01").unwrap();
        assert_eq!(parsed, Some("2026-09-01T00:00:00Z".parse().unwrap()));

        assert_eq!(parse_due_date("").unwrap(), None);
        assert_eq!(parse_due_date("   ").unwrap(), None);
        assert!(parse_due_date("next tuesday").is_err());
    }

    #[tokio::test]
    async fn empty_title_never_reaches_the_store() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let session = Session::signed_in(Uuid::new_v4());

        let mut editor = TaskEditor::new();
        editor.title = "   ".into();

        let outcome = editor.submit(&store, &session, &notifier).await;

        assert!(outcome.is_none());
        assert_eq!(store.op_count(), 0);
        assert!(notifier.take().is_empty());
        assert!(!editor.is_submitting());
    }

    #[tokio::test]
    async fn create_trims_title_and_normalizes_empty_fields() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let user = Uuid::new_v4();
        let session = Session::signed_in(user);

        let mut editor = TaskEditor::new();
        editor.title = "  Buy milk  ".into();
        editor.description = "   ".into();

        let outcome = editor.submit(&store, &session, &notifier).await;

        let Some(EditOutcome::Created(task)) = outcome else {
            panic!("expected a created task");
        };
        assert_eq!(task.title, "Buy milk");
        assert_eq!(task.description, None);
        assert_eq!(task.status, TaskStatus::Pending);
        assert_eq!(task.priority, TaskPriority::Medium);
        assert_eq!(task.due_date, None);
        assert_eq!(task.user_id, user);
        assert!(!editor.is_submitting());
    }

    #[tokio::test]
    async fn create_without_a_user_fails_with_an_error_notification() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let session = Session::signed_out();

        let mut editor = TaskEditor::new();
        editor.title = "Buy milk".into();

        let outcome = editor.submit(&store, &session, &notifier).await;

        assert!(outcome.is_none());
        assert_eq!(store.task_count(), 0);

        let notifications = notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Failed to create task");
        assert_eq!(editor.title, "Buy milk");
    }

    #[tokio::test]
    async fn failed_update_keeps_the_form_intact() {
        let store = MemoryStore::new();
        let notifier = RecordingNotifier::default();
        let user = Uuid::new_v4();
        let session = Session::signed_in(user);

        let seed = sample_task(user, "write report");
        store.seed([seed.clone()]);

        let mut editor = TaskEditor::for_task(&seed);
        editor.title = "write the report".into();
        store.fail_next();

        let outcome = editor.submit(&store, &session, &notifier).await;

        assert!(outcome.is_none());
        assert_eq!(editor.title, "write the report");
        assert!(!editor.is_submitting());

        let notifications = notifier.take();
        assert_eq!(notifications.len(), 1);
        assert_eq!(notifications[0].message, "Failed to update task");
    }
}
