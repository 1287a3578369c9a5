use serde::{Deserialize, Serialize};

use super::{fields::nullable, required, Resource, ValidationError};

pub const NOMBRE_REQUIRED: &str = "El nombre es obligatorio";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Habit {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    /// Free-form, e.g. "diario" or "semanal"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub periodo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_recordatorio: Option<String>,
}

impl Resource for Habit {
    const COLLECTION: &'static str = "habits";
    const SEARCH_FIELD: &'static str = "nombre";
    const OWNER_FIELD: Option<&'static str> = Some("id_usuario");
    type Patch = HabitPatch;

    fn search_text(&self) -> Option<&str> {
        Some(&self.nombre)
    }

    fn owner_id(&self) -> Option<&str> {
        self.id_usuario.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateHabitRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub periodo: Option<String>,
    #[serde(default)]
    pub id_usuario: Option<String>,
    #[serde(default)]
    pub id_recordatorio: Option<String>,
}

impl CreateHabitRequest {
    /// `owner` is what the access policy resolved from the token and
    /// `id_usuario`.
    pub fn validate(self, owner: Option<String>) -> Result<NewHabit, ValidationError> {
        Ok(NewHabit {
            nombre: required(self.nombre, NOMBRE_REQUIRED)?,
            periodo: self.periodo,
            id_usuario: owner,
            id_recordatorio: self.id_recordatorio,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewHabit {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub periodo: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_recordatorio: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HabitPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub periodo: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_recordatorio: Option<Option<String>>,
}
