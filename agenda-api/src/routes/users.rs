//! User registration and update
//!
//! Listing, search, get and delete use the generic handlers in `crud`.

use agenda_shared::models::user::{CreateUserRequest, PublicUser, UpdateUserRequest, User};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// `POST {base}/users` - public registration
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateUserRequest>,
) -> ApiResult<(StatusCode, Json<PublicUser>)> {
    let user = state.auth.register(req).await?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// `PUT {base}/users/:id` - a new password is hashed before it is stored
///
/// The user must exist before the email check or the hashing runs.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(req): ApiJson<UpdateUserRequest>,
) -> ApiResult<Json<User>> {
    crud::load_authorized::<User>(&state, &id, None).await?;

    let patch = state.auth.prepare_update(&id, req).await?;
    crud::apply_update::<User>(&state, &id, &patch).await.map(Json)
}
