use tasklight_api::v1::{NewTask, Task, TaskPatch};
use uuid::Uuid;

/// Typed interface to the remote task table, scoped by the owning user.
///
/// Mirrors the store's command set one to one: list all, insert one returning
/// the inserted record, patch one by id returning the updated record, delete
/// one by id.
#[allow(async_fn_in_trait)]
pub trait TaskStore {
    async fn list_tasks(&self, user: Uuid) -> eyre::Result<Vec<Task>>;

    async fn insert_task(&self, user: Uuid, new: NewTask) -> eyre::Result<Task>;

    async fn update_task(&self, user: Uuid, id: Uuid, patch: TaskPatch) -> eyre::Result<Task>;

    async fn delete_task(&self, user: Uuid, id: Uuid) -> eyre::Result<()>;
}
