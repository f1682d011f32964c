use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use tasklight_api::v1::{NewTask, Task, TaskPatch, TaskPriority, TaskStatus};
use uuid::Uuid;

use crate::notify::{Notification, Notifier};
use crate::store::TaskStore;

/// Strictly increasing timestamps, so list-ordering assertions never tie.
fn next_created_at() -> DateTime<Utc> {
    static SEQ: AtomicI64 = AtomicI64::new(0);
    Utc::now() + Duration::milliseconds(SEQ.fetch_add(1, Ordering::Relaxed))
}

pub fn sample_task(user: Uuid, title: &str) -> Task {
    Task {
        id: Uuid::new_v4(),
        title: title.into(),
        description: None,
        status: TaskStatus::Pending,
        priority: TaskPriority::Medium,
        due_date: None,
        created_at: next_created_at(),
        user_id: user,
    }
}

/// In-memory stand-in for the remote table, with one-shot failure injection
/// and a command counter for "never reached the store" assertions.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    tasks: HashMap<Uuid, Task>,
    fail_next: bool,
    ops: usize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed(&self, tasks: impl IntoIterator<Item = Task>) {
        let mut inner = self.inner.lock().unwrap();
        for task in tasks {
            inner.tasks.insert(task.id, task);
        }
    }

    /// Makes the next command fail with a generic error.
    pub fn fail_next(&self) {
        self.inner.lock().unwrap().fail_next = true;
    }

    pub fn op_count(&self) -> usize {
        self.inner.lock().unwrap().ops
    }

    pub fn task_count(&self) -> usize {
        self.inner.lock().unwrap().tasks.len()
    }
}

impl Inner {
    fn begin(&mut self) -> eyre::Result<()> {
        self.ops += 1;
        if std::mem::take(&mut self.fail_next) {
            eyre::bail!("injected store failure");
        }
        Ok(())
    }
}

impl TaskStore for MemoryStore {
    async fn list_tasks(&self, user: Uuid) -> eyre::Result<Vec<Task>> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;

        let mut tasks: Vec<_> = inner
            .tasks
            .values()
            .filter(|task| task.user_id == user)
            .cloned()
            .collect();
        tasks.sort_unstable_by(|a, b| a.created_at.cmp(&b.created_at).reverse());
        Ok(tasks)
    }

    async fn insert_task(&self, user: Uuid, new: NewTask) -> eyre::Result<Task> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;

        let task = Task {
            id: Uuid::new_v4(),
            title: new.title,
            description: new.description,
            status: TaskStatus::default(),
            priority: new.priority,
            due_date: new.due_date,
            created_at: next_created_at(),
            user_id: user,
        };
        inner.tasks.insert(task.id, task.clone());
        Ok(task)
    }

    async fn update_task(&self, user: Uuid, id: Uuid, patch: TaskPatch) -> eyre::Result<Task> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;

        let task = match inner.tasks.get_mut(&id) {
            Some(task) if task.user_id == user => task,
            _ => eyre::bail!("task not found"),
        };
        patch.apply(task);
        Ok(task.clone())
    }

    async fn delete_task(&self, user: Uuid, id: Uuid) -> eyre::Result<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.begin()?;

        match inner.tasks.get(&id) {
            Some(task) if task.user_id == user => {}
            _ => eyre::bail!("task not found"),
        }
        inner.tasks.remove(&id);
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    notifications: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    /// Drains everything notified so far.
    pub fn take(&self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications.lock().unwrap())
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        self.notifications.lock().unwrap().push(notification);
    }
}
