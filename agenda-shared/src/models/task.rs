//! Tasks
//!
//! `estado` and `prioridad` are free-form strings; only their defaults are
//! fixed. `id_usuario` is stamped by the access policy, never taken from
//! the request body.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    fields::{nullable, timestamp},
    Resource,
};

pub const DEFAULT_ESTADO: &str = "pendiente";
pub const DEFAULT_PRIORIDAD: &str = "normal";

fn default_estado() -> String {
    DEFAULT_ESTADO.to_string()
}

fn default_prioridad() -> String {
    DEFAULT_PRIORIDAD.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    #[serde(default = "default_estado")]
    pub estado: String,
    #[serde(default = "default_prioridad")]
    pub prioridad: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id_categoria: Option<String>,
    #[serde(default)]
    pub id_usuario: Option<String>,
}

impl Resource for Task {
    const COLLECTION: &'static str = "tasks";
    const SEARCH_FIELD: &'static str = "titulo";
    const OWNER_FIELD: Option<&'static str> = Some("id_usuario");
    type Patch = TaskPatch;

    fn search_text(&self) -> Option<&str> {
        self.titulo.as_deref()
    }

    fn owner_id(&self) -> Option<&str> {
        self.id_usuario.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateTaskRequest {
    #[serde(default)]
    pub titulo: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
    #[serde(default)]
    pub prioridad: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id_categoria: Option<String>,
}

impl CreateTaskRequest {
    /// Applies server defaults. Empty `estado`/`prioridad` count as unset.
    pub fn into_new(self, owner: Option<String>, now: DateTime<Utc>) -> NewTask {
        NewTask {
            titulo: self.titulo,
            descripcion: self.descripcion,
            estado: self
                .estado
                .filter(|s| !s.is_empty())
                .unwrap_or_else(default_estado),
            prioridad: self
                .prioridad
                .filter(|s| !s.is_empty())
                .unwrap_or_else(default_prioridad),
            fecha_creacion: now,
            fecha_vencimiento: self.fecha_vencimiento,
            id_categoria: self.id_categoria.filter(|s| !s.is_empty()),
            id_usuario: owner,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewTask {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub descripcion: Option<String>,
    pub estado: String,
    pub prioridad: String,
    pub fecha_creacion: DateTime<Utc>,
    pub fecha_vencimiento: Option<DateTime<Utc>>,
    pub id_categoria: Option<String>,
    pub id_usuario: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub titulo: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub descripcion: Option<Option<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estado: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prioridad: Option<String>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha_vencimiento: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_categoria: Option<Option<String>>,
}
