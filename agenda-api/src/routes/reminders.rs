use agenda_shared::auth::AuthUser;
use agenda_shared::models::reminder::{CreateReminderRequest, Reminder};
use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// `POST {base}/reminders` - no required fields; `fecha_creacion` is set
/// by the server and `id_habito` defaults to null
pub async fn create(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    ApiJson(mut req): ApiJson<CreateReminderRequest>,
) -> ApiResult<(StatusCode, Json<Reminder>)> {
    let owner = state
        .policy
        .owner_for_new(user.as_ref(), req.id_usuario.take())?;
    let new = req.into_new(owner, Utc::now());

    crud::insert::<Reminder, _>(&state, &new, false).await
}
