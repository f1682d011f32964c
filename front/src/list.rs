use tasklight_api::v1::{Task, TaskPatch, TaskStatus};
use uuid::Uuid;

use crate::edit::{EditOutcome, TaskEditor};
use crate::notify::{Notification, Notifier};
use crate::session::Session;
use crate::store::TaskStore;

/// What the view is showing: the task list itself, or a delegated editor.
#[derive(Debug, Default)]
pub enum Mode {
    #[default]
    List,
    Edit(TaskEditor),
}

/// Owns the local view of the current user's tasks and mediates every
/// list-level mutation against the remote store.
///
/// The list is the last successful load, patched in place by subsequent
/// successful mutations. Local state only changes after the store confirms a
/// command, so it never drifts ahead of the remote table.
#[derive(Debug, Default)]
pub struct TaskList {
    tasks: Vec<Task>,
    loading: bool,
    mode: Mode,
}

impl TaskList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn mode(&self) -> &Mode {
        &self.mode
    }

    pub fn editor_mut(&mut self) -> Option<&mut TaskEditor> {
        match &mut self.mode {
            Mode::Edit(editor) => Some(editor),
            Mode::List => None,
        }
    }

    /// Fetches the caller's tasks, newest first, replacing local state
    /// wholesale. A failed load leaves whatever was there before.
    pub async fn load(
        &mut self,
        store: &impl TaskStore,
        session: &Session,
        notifier: &impl Notifier,
    ) {
        self.loading = true;

        let result = match session.current_user() {
            Some(user) => store.list_tasks(user).await,
            None => Err(eyre::eyre!("not signed in")),
        };

        match result {
            Ok(tasks) => self.tasks = tasks,
            Err(err) => {
                tracing::error!("failed to load tasks: {err:?}");
                notifier.notify(Notification::error("Error", "Failed to load tasks"));
            }
        }

        self.loading = false;
    }

    /// Removes one task, remote first. Local state is untouched on failure.
    pub async fn delete(
        &mut self,
        id: Uuid,
        store: &impl TaskStore,
        session: &Session,
        notifier: &impl Notifier,
    ) {
        let result = match session.current_user() {
            Some(user) => store.delete_task(user, id).await,
            None => Err(eyre::eyre!("not signed in")),
        };

        match result {
            Ok(()) => {
                self.tasks.retain(|task| task.id != id);
                notifier.notify(Notification::success("Success", "Task deleted successfully"));
            }
            Err(err) => {
                tracing::error!(id = %id, "failed to delete task: {err:?}");
                notifier.notify(Notification::error("Error", "Failed to delete task"));
            }
        }
    }

    /// Issues a status-only update and patches the matching entry in place,
    /// leaving every other field as it was.
    ///
    /// Transitions outside the allowed set are dropped here. The store does
    /// not enforce the lifecycle, so this guard is the only gate.
    pub async fn change_status(
        &mut self,
        id: Uuid,
        target: TaskStatus,
        store: &impl TaskStore,
        session: &Session,
        notifier: &impl Notifier,
    ) {
        let Some(current) = self.tasks.iter().find(|task| task.id == id) else {
            return;
        };

        if !current.status.can_transition_to(target) {
            tracing::warn!(
                id = %id,
                from = ?current.status,
                to = ?target,
                "ignoring illegal status transition"
            );
            return;
        }

        let result = match session.current_user() {
            Some(user) => store.update_task(user, id, TaskPatch::status(target)).await,
            None => Err(eyre::eyre!("not signed in")),
        };

        match result {
            Ok(_) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) {
                    task.status = target;
                }
                notifier.notify(Notification::success("Success", "Task status updated"));
            }
            Err(err) => {
                tracing::error!(id = %id, "failed to update task status: {err:?}");
                notifier.notify(Notification::error("Error", "Failed to update task"));
            }
        }
    }

    pub fn begin_create(&mut self) {
        self.mode = Mode::Edit(TaskEditor::new());
    }

    pub fn begin_edit(&mut self, task: &Task) {
        self.mode = Mode::Edit(TaskEditor::for_task(task));
    }

    pub fn cancel_edit(&mut self) {
        self.mode = Mode::List;
    }

    /// Drives the delegated editor's submit and merges a saved record back:
    /// created tasks are prepended, updated tasks replace their entry by id.
    /// The editor stays open when the submit produced no saved record.
    pub async fn submit_edit(
        &mut self,
        store: &impl TaskStore,
        session: &Session,
        notifier: &impl Notifier,
    ) {
        let Mode::Edit(editor) = &mut self.mode else {
            return;
        };

        match editor.submit(store, session, notifier).await {
            Some(EditOutcome::Created(task)) => {
                self.tasks.insert(0, task);
                self.mode = Mode::List;
            }
            Some(EditOutcome::Updated(updated)) => {
                if let Some(task) = self.tasks.iter_mut().find(|task| task.id == updated.id) {
                    *task = updated;
                }
                self.mode = Mode::List;
            }
            None => {}
        }
    }
}
