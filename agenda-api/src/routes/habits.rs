use agenda_shared::auth::AuthUser;
use agenda_shared::models::habit::{CreateHabitRequest, Habit};
use axum::{extract::State, http::StatusCode, Json};

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

pub async fn create(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    ApiJson(mut req): ApiJson<CreateHabitRequest>,
) -> ApiResult<(StatusCode, Json<Habit>)> {
    let owner = state
        .policy
        .owner_for_new(user.as_ref(), req.id_usuario.take())?;
    let new = req.validate(owner)?;

    crud::insert::<Habit, _>(&state, &new, false).await
}
