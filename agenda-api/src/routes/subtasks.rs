use agenda_shared::models::subtask::{CreateSubtaskRequest, Subtask};
use axum::{extract::State, http::StatusCode, Json};

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// `POST {base}/subtasks` - `nombre` and `id_tarea` are required, `completado`
/// defaults to false. The parent task is not checked for existence.
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateSubtaskRequest>,
) -> ApiResult<(StatusCode, Json<Subtask>)> {
    let new = req.validate()?;
    crud::insert::<Subtask, _>(&state, &new, false).await
}
