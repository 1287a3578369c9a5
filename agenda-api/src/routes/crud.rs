//! Generic resource handlers
//!
//! Mounted per resource as `get(crud::list::<Category>)` and so on.
//!
//! Store failures never surface as 500 here: listings degrade to `[]` and
//! single-document operations to 404, with the cause logged.

use std::collections::HashMap;

use agenda_shared::auth::AuthUser;
use agenda_shared::models::{Category, Habit, Reminder, Resource, Subtask, Task, User};
use agenda_shared::repository::AccessError;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use serde::de::DeserializeOwned;
use tracing::error;

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    extract::ApiJson,
};

/// HTTP-facing messages of a resource
pub trait Endpoint: Resource {
    const NOT_FOUND: &'static str;
    const CREATE_FAILED: &'static str;
}

impl Endpoint for Category {
    const NOT_FOUND: &'static str = "Categoría no encontrada";
    const CREATE_FAILED: &'static str = "Error al crear la categoría";
}

impl Endpoint for Task {
    const NOT_FOUND: &'static str = "Tarea no encontrada";
    const CREATE_FAILED: &'static str = "Error al crear la tarea";
}

impl Endpoint for Subtask {
    const NOT_FOUND: &'static str = "Subtarea no encontrada";
    const CREATE_FAILED: &'static str = "Error al crear la subtarea";
}

impl Endpoint for Habit {
    const NOT_FOUND: &'static str = "Hábito no encontrado";
    const CREATE_FAILED: &'static str = "Error al crear el hábito";
}

impl Endpoint for Reminder {
    const NOT_FOUND: &'static str = "Recordatorio no encontrado";
    const CREATE_FAILED: &'static str = "Error al crear el recordatorio";
}

impl Endpoint for User {
    const NOT_FOUND: &'static str = "Usuario no encontrado";
    const CREATE_FAILED: &'static str = "Error al crear el usuario";
}

fn not_found<R: Endpoint>() -> ApiError {
    ApiError::NotFound(R::NOT_FOUND.to_string())
}

/// Owner filter for listings; only owned resources are scoped.
pub(crate) fn scope_for<'a, R: Endpoint>(
    state: &AppState,
    user: Option<&'a AuthUser>,
) -> ApiResult<Option<&'a str>> {
    if R::OWNER_FIELD.is_none() {
        return Ok(None);
    }
    Ok(state.policy.scope(user)?)
}

/// Fetches a document and applies the ownership check.
///
/// Store errors are logged and reported as not found.
pub(crate) async fn load_authorized<R: Endpoint>(
    state: &AppState,
    id: &str,
    user: Option<&AuthUser>,
) -> ApiResult<R> {
    let item = match state.repo::<R>().get_by_id(id).await {
        Ok(Some(item)) => item,
        Ok(None) => return Err(not_found::<R>()),
        Err(e) => {
            log_failure::<R>("get", Some(id), &e);
            return Err(not_found::<R>());
        }
    };

    if R::OWNER_FIELD.is_some() {
        state.policy.authorize(user, item.owner_id())?;
    }
    Ok(item)
}

pub(crate) fn log_failure<R: Resource>(operation: &str, id: Option<&str>, err: &AccessError) {
    error!(
        collection = R::COLLECTION,
        operation,
        id = id.unwrap_or("-"),
        error = %err,
        "Store operation failed"
    );
}

/// `GET /` - every document in scope
pub async fn list<R: Endpoint>(
    State(state): State<AppState>,
    user: Option<AuthUser>,
) -> ApiResult<Json<Vec<R>>> {
    let scope = scope_for::<R>(&state, user.as_ref())?;

    match state.repo::<R>().list_scoped(scope).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            log_failure::<R>("list", None, &e);
            Ok(Json(Vec::new()))
        }
    }
}

/// `GET /search?<field>=` - case-insensitive substring match on the
/// resource's search field
pub async fn search<R: Endpoint>(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Query(params): Query<HashMap<String, String>>,
) -> ApiResult<Json<Vec<R>>> {
    let scope = scope_for::<R>(&state, user.as_ref())?;
    let query = params.get(R::SEARCH_FIELD).map(String::as_str);

    match state.repo::<R>().search(query, scope).await {
        Ok(items) => Ok(Json(items)),
        Err(e) => {
            log_failure::<R>("search", None, &e);
            Ok(Json(Vec::new()))
        }
    }
}

/// `GET /:id`
pub async fn get_one<R: Endpoint>(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<Json<R>> {
    load_authorized::<R>(&state, &id, user.as_ref()).await.map(Json)
}

/// `PUT /:id` - merges the allow-listed fields of the body and returns the
/// stored document
pub async fn update<R>(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
    ApiJson(patch): ApiJson<R::Patch>,
) -> ApiResult<Json<R>>
where
    R: Endpoint,
    R::Patch: DeserializeOwned,
{
    if R::OWNER_FIELD.is_some() {
        load_authorized::<R>(&state, &id, user.as_ref()).await?;
    }

    apply_update::<R>(&state, &id, &patch).await.map(Json)
}

pub(crate) async fn apply_update<R: Endpoint>(
    state: &AppState,
    id: &str,
    patch: &R::Patch,
) -> ApiResult<R> {
    match state.repo::<R>().update(id, patch).await {
        Ok(Some(item)) => Ok(item),
        Ok(None) => Err(not_found::<R>()),
        Err(e) => {
            log_failure::<R>("update", Some(id), &e);
            Err(not_found::<R>())
        }
    }
}

/// `DELETE /:id` - 204 with an empty body
pub async fn delete<R: Endpoint>(
    State(state): State<AppState>,
    user: Option<AuthUser>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    if R::OWNER_FIELD.is_some() {
        load_authorized::<R>(&state, &id, user.as_ref()).await?;
    }

    match state.repo::<R>().delete_by_id(&id).await {
        Ok(Some(_)) => Ok(StatusCode::NO_CONTENT),
        Ok(None) => Err(not_found::<R>()),
        Err(e) => {
            log_failure::<R>("delete", Some(&id), &e);
            Err(not_found::<R>())
        }
    }
}

/// Inserts a prepared document, answering 201 or a 500 with the
/// resource's create-failure message.
pub(crate) async fn insert<R, N>(
    state: &AppState,
    new: &N,
    with_detail: bool,
) -> ApiResult<(StatusCode, Json<R>)>
where
    R: Endpoint,
    N: serde::Serialize + Sync,
{
    match state.repo::<R>().create(new).await {
        Ok(item) => Ok((StatusCode::CREATED, Json(item))),
        Err(e) => {
            log_failure::<R>("create", None, &e);
            Err(ApiError::InternalError {
                message: R::CREATE_FAILED.to_string(),
                detail: with_detail.then(|| e.to_string()),
            })
        }
    }
}
