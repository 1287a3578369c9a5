use serde::{Deserialize, Serialize};

use super::{required, Resource, ValidationError};

pub const FIELDS_REQUIRED: &str = "nombre e id_tarea son obligatorios";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    /// Parent task id (weak reference)
    #[serde(default)]
    pub id_tarea: String,
    #[serde(default)]
    pub completado: bool,
}

impl Resource for Subtask {
    const COLLECTION: &'static str = "subtasks";
    const SEARCH_FIELD: &'static str = "nombre";
    type Patch = SubtaskPatch;

    fn search_text(&self) -> Option<&str> {
        Some(&self.nombre)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateSubtaskRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub id_tarea: Option<String>,
    #[serde(default)]
    pub completado: Option<bool>,
}

impl CreateSubtaskRequest {
    pub fn validate(self) -> Result<NewSubtask, ValidationError> {
        Ok(NewSubtask {
            nombre: required(self.nombre, FIELDS_REQUIRED)?,
            id_tarea: required(self.id_tarea, FIELDS_REQUIRED)?,
            completado: self.completado.unwrap_or(false),
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewSubtask {
    pub nombre: String,
    pub id_tarea: String,
    pub completado: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SubtaskPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_tarea: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completado: Option<bool>,
}
