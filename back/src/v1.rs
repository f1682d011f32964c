use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Path, State},
    http::{request::Parts, StatusCode},
    routing::{delete, get, patch, post},
    Json, Router,
};
use chrono::Utc;
use tasklight_api::v1::{NewTask, Task, TaskPatch, USER_HEADER};
use tracing::info;
use uuid::Uuid;

use crate::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/tasks", get(get_tasks))
        .route("/tasks", post(add_task))
        .route("/tasks/:id", patch(update_task))
        .route("/tasks/:id", delete(delete_task))
}

/// The authenticated caller. Verification lives elsewhere; here the identity
/// arrives as a UUID in the `x-user-id` header, and a missing or malformed
/// header is rejected with 401.
pub struct CurrentUser(pub Uuid);

#[axum::async_trait]
impl<S: Send + Sync> FromRequestParts<S> for CurrentUser {
    type Rejection = StatusCode;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(USER_HEADER)
            .and_then(|value| value.to_str().ok())
            .ok_or(StatusCode::UNAUTHORIZED)?;

        let id = header.parse().map_err(|_| StatusCode::UNAUTHORIZED)?;
        Ok(Self(id))
    }
}

async fn get_tasks(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
) -> Json<Vec<Task>> {
    let tasks = state.tasks.lock().await;
    let mut tasks: Vec<_> = tasks
        .values()
        .filter(|task| task.user_id == user)
        .cloned()
        .collect();
    tasks.sort_unstable_by(|a, b| a.created_at.cmp(&b.created_at).reverse());
    Json(tasks)
}

async fn add_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Json(new): Json<NewTask>,
) -> Json<Task> {
    let task = Task {
        id: Uuid::new_v4(),
        title: new.title,
        description: new.description,
        status: Default::default(),
        priority: new.priority,
        due_date: new.due_date,
        created_at: Utc::now(),
        user_id: user,
    };

    let mut tasks = state.tasks.lock().await;
    tasks.insert(task.id, task.clone());

    info!(
        id = %task.id,
        title = %task.title,
        user = %user,
        "created task"
    );

    Json(task)
}

async fn update_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
    Json(task_patch): Json<TaskPatch>,
) -> Result<Json<Task>, StatusCode> {
    let mut tasks = state.tasks.lock().await;

    let task = match tasks.get_mut(&id) {
        Some(task) if task.user_id == user => task,
        _ => return Err(StatusCode::NOT_FOUND),
    };

    task_patch.apply(task);

    info!(
        id = %task.id,
        status = ?task.status,
        "updated task"
    );

    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<Arc<AppState>>,
    CurrentUser(user): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, StatusCode> {
    let mut tasks = state.tasks.lock().await;

    match tasks.get(&id) {
        Some(task) if task.user_id == user => {}
        _ => return Err(StatusCode::NOT_FOUND),
    }

    tasks.remove(&id);
    info!(id = %id, "deleted task");

    Ok(StatusCode::NO_CONTENT)
}
