//! Task creation and the task's subtask listing
//!
//! The client never chooses `id_usuario`: it is null under the admin policy
//! and the token's user under the owner policy.

use agenda_shared::auth::AuthUser;
use agenda_shared::models::subtask::Subtask;
use agenda_shared::models::task::{CreateTaskRequest, Task};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::Utc;

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// `POST {base}/tasks` - failures include the cause as `detalle`
pub async fn create(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    ApiJson(req): ApiJson<CreateTaskRequest>,
) -> ApiResult<(StatusCode, Json<Task>)> {
    let owner = state.policy.owner_for_new(user.as_ref(), None)?;
    let new = req.into_new(owner, Utc::now());

    crud::insert::<Task, _>(&state, &new, true).await
}

/// `GET {base}/tasks/:id/subtasks`
pub async fn subtasks(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<Subtask>>> {
    let task = crud::load_authorized::<Task>(&state, &id, user.as_ref()).await?;

    match state.repo::<Subtask>().query_by_field("id_tarea", task.id.as_str()).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            crud::log_failure::<Subtask>("query", Some(&task.id), &e);
            Ok(Json(Vec::new()))
        }
    }
}
