use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{
    fields::{nullable, timestamp},
    Resource,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cuerpo: Option<String>,
    #[serde(default)]
    pub fecha_hora: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<String>,
    #[serde(default)]
    pub id_habito: Option<String>,
}

impl Resource for Reminder {
    const COLLECTION: &'static str = "reminders";
    const SEARCH_FIELD: &'static str = "nombre";
    const OWNER_FIELD: Option<&'static str> = Some("id_usuario");
    type Patch = ReminderPatch;

    fn search_text(&self) -> Option<&str> {
        self.nombre.as_deref()
    }

    fn owner_id(&self) -> Option<&str> {
        self.id_usuario.as_deref()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReminderRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub cuerpo: Option<String>,
    #[serde(default, deserialize_with = "timestamp::deserialize")]
    pub fecha_hora: Option<DateTime<Utc>>,
    #[serde(default)]
    pub id_usuario: Option<String>,
    #[serde(default)]
    pub id_habito: Option<String>,
}

impl CreateReminderRequest {
    pub fn into_new(self, owner: Option<String>, now: DateTime<Utc>) -> NewReminder {
        NewReminder {
            nombre: self.nombre,
            cuerpo: self.cuerpo,
            fecha_hora: self.fecha_hora,
            fecha_creacion: now,
            id_usuario: owner,
            id_habito: self.id_habito,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewReminder {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cuerpo: Option<String>,
    pub fecha_hora: Option<DateTime<Utc>>,
    pub fecha_creacion: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id_usuario: Option<String>,
    pub id_habito: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReminderPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub cuerpo: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "timestamp::deserialize_patch",
        skip_serializing_if = "Option::is_none"
    )]
    pub fecha_hora: Option<Option<DateTime<Utc>>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub id_habito: Option<Option<String>>,
}
