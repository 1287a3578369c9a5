use agenda_shared::models::category::{Category, CreateCategoryRequest};
use axum::{extract::State, http::StatusCode, Json};

use super::crud;
use crate::{app::AppState, error::ApiResult, extract::ApiJson};

/// `POST {base}/categories` - `nombre` is required
pub async fn create(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<CreateCategoryRequest>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let new = req.validate()?;
    crud::insert::<Category, _>(&state, &new, false).await
}
