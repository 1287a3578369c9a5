//! Authentication endpoints
//!
//! `POST {base}/auth/login` with `{email, password}` answers
//! `{message, token, user: {id, nombre, email}}`.
//!
//! Registration lives at `POST {base}/users` (see `users`).

use agenda_shared::auth::service::{LoginRequest, LoginResponse};
use axum::{extract::State, Json};

use crate::{app::AppState, error::ApiResult, extract::ApiJson};

pub async fn login(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    let response = state.auth.login(req).await?;
    Ok(Json(response))
}
