//! User accounts
//!
//! The password hash is stored under `contraseña` and is never serialized
//! back out: [`User`] skips it and [`PublicUser`] does not carry it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{required, Resource, ValidationError};

pub const FIELDS_REQUIRED: &str = "Nombre, email y password son campos obligatorios.";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default)]
    pub email: String,
    #[serde(rename = "contraseña", default, skip_serializing)]
    pub password_hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fecha_creacion: Option<DateTime<Utc>>,
}

impl User {
    pub fn to_public(&self) -> PublicUser {
        PublicUser {
            id: self.id.clone(),
            nombre: self.nombre.clone(),
            email: self.email.clone(),
        }
    }
}

impl Resource for User {
    const COLLECTION: &'static str = "users";
    const SEARCH_FIELD: &'static str = "nombre";
    type Patch = UserPatch;

    fn search_text(&self) -> Option<&str> {
        Some(&self.nombre)
    }
}

/// Projection returned by registration and login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PublicUser {
    pub id: String,
    pub nombre: String,
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Registration input after presence checks, password still in clear
#[derive(Debug, Clone)]
pub struct Registration {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

impl CreateUserRequest {
    pub fn validate(self) -> Result<Registration, ValidationError> {
        Ok(Registration {
            nombre: required(self.nombre, FIELDS_REQUIRED)?,
            email: required(self.email, FIELDS_REQUIRED)?,
            password: required(self.password, FIELDS_REQUIRED)?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewUser {
    pub nombre: String,
    pub email: String,
    #[serde(rename = "contraseña")]
    pub password_hash: String,
    pub fecha_creacion: DateTime<Utc>,
}

/// Client-facing update body; `password` is hashed before it is stored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUserRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

/// Stored form of a user update
#[derive(Debug, Clone, Default, Serialize)]
pub struct UserPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "contraseña", skip_serializing_if = "Option::is_none")]
    pub password_hash: Option<String>,
}
