use tasklight_api::v1::{NewTask, Task, TaskPatch, USER_HEADER};
use uuid::Uuid;

use crate::store::TaskStore;

/// HTTP client of the back's `/api/v1` task table.
pub struct HttpStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpStore {
    /// `base_url` points at the versioned API root,
    /// e.g. `https://example.com:7890/api/v1`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }
}

impl TaskStore for HttpStore {
    async fn list_tasks(&self, user: Uuid) -> eyre::Result<Vec<Task>> {
        let response = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .header(USER_HEADER, user.to_string())
            .send()
            .await?;

        Ok(response.error_for_status()?.json().await?)
    }

    async fn insert_task(&self, user: Uuid, new: NewTask) -> eyre::Result<Task> {
        let response = self
            .client
            .post(format!("{}/tasks", self.base_url))
            .header(USER_HEADER, user.to_string())
            .json(&new)
            .send()
            .await?;

        Ok(response.error_for_status()?.json().await?)
    }

    async fn update_task(&self, user: Uuid, id: Uuid, patch: TaskPatch) -> eyre::Result<Task> {
        let response = self
            .client
            .patch(format!("{}/tasks/{}", self.base_url, id))
            .header(USER_HEADER, user.to_string())
            .json(&patch)
            .send()
            .await?;

        Ok(response.error_for_status()?.json().await?)
    }

    async fn delete_task(&self, user: Uuid, id: Uuid) -> eyre::Result<()> {
        let response = self
            .client
            .delete(format!("{}/tasks/{}", self.base_url, id))
            .header(USER_HEADER, user.to_string())
            .send()
            .await?;

        response.error_for_status()?;

        Ok(())
    }
}
