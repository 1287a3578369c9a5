//! Registration and login
//!
//! Unknown email and wrong password produce the same
//! [`AuthServiceError::InvalidCredentials`], so callers cannot tell which
//! emails exist.

use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::jwt::{create_token, Claims, JwtError};
use super::password::{hash_password_blocking, verify_password_blocking, PasswordError};
use crate::models::user::{
    CreateUserRequest, NewUser, PublicUser, UpdateUserRequest, User, UserPatch,
};
use crate::models::ValidationError;
use crate::repository::{AccessError, Repository};
use crate::store::DocumentStore;

pub const LOGIN_SUCCESS: &str = "Login exitoso";

#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("El email ya está registrado")]
    EmailTaken,

    #[error("Email y contraseña son obligatorios.")]
    MissingCredentials,

    #[error("Email o contraseña incorrectos.")]
    InvalidCredentials,

    #[error(transparent)]
    Access(#[from] AccessError),

    #[error(transparent)]
    Password(#[from] PasswordError),

    #[error(transparent)]
    Token(#[from] JwtError),
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
    pub user: PublicUser,
}

#[derive(Clone)]
pub struct AuthService {
    users: Repository<User>,
    secret: Arc<str>,
}

impl AuthService {
    pub fn new(store: Arc<dyn DocumentStore>, secret: impl Into<Arc<str>>) -> Self {
        Self {
            users: Repository::new(store),
            secret: secret.into(),
        }
    }

    /// Creates a user after checking the email is free.
    ///
    /// The check and the insert are separate store calls; two concurrent
    /// registrations with one email can both succeed.
    pub async fn register(&self, request: CreateUserRequest) -> Result<PublicUser, AuthServiceError> {
        let registration = request.validate()?;

        if self.users.find_by_email(&registration.email).await?.is_some() {
            return Err(AuthServiceError::EmailTaken);
        }

        let password_hash = hash_password_blocking(registration.password).await?;
        let user = self
            .users
            .create(&NewUser {
                nombre: registration.nombre,
                email: registration.email,
                password_hash,
                fecha_creacion: Utc::now(),
            })
            .await?;

        info!(user_id = %user.id, "User registered");
        Ok(user.to_public())
    }

    pub async fn login(&self, request: LoginRequest) -> Result<LoginResponse, AuthServiceError> {
        let (email, password) = match (request.email, request.password) {
            (Some(e), Some(p)) if !e.is_empty() && !p.is_empty() => (e, p),
            _ => return Err(AuthServiceError::MissingCredentials),
        };

        let user = self
            .users
            .find_by_email(&email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        let matches = match verify_password_blocking(password, user.password_hash.clone()).await {
            Ok(matches) => matches,
            Err(PasswordError::InvalidHash(reason)) => {
                warn!(user_id = %user.id, reason = %reason, "Stored password hash is unusable");
                false
            }
            Err(e) => return Err(e.into()),
        };

        if !matches {
            return Err(AuthServiceError::InvalidCredentials);
        }

        let token = create_token(&Claims::new(user.id.clone(), user.email.clone()), &self.secret)?;
        info!(user_id = %user.id, "User logged in");

        Ok(LoginResponse {
            message: LOGIN_SUCCESS.to_string(),
            token,
            user: user.to_public(),
        })
    }

    /// Turns a client update into the stored patch for user `id`.
    ///
    /// A new password is hashed; a new email must not belong to another user.
    pub async fn prepare_update(
        &self,
        id: &str,
        request: UpdateUserRequest,
    ) -> Result<UserPatch, AuthServiceError> {
        if let Some(email) = request.email.as_deref() {
            if let Some(existing) = self.users.find_by_email(email).await? {
                if existing.id != id {
                    return Err(AuthServiceError::EmailTaken);
                }
            }
        }

        let password_hash = match request.password.filter(|p| !p.is_empty()) {
            Some(password) => Some(hash_password_blocking(password).await?),
            None => None,
        };

        Ok(UserPatch {
            nombre: request.nombre,
            email: request.email,
            password_hash,
        })
    }
}
