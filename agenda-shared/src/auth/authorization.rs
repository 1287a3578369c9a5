//! Ownership policy for user-owned resources (tasks, habits, reminders)
//!
//! The data model is the same whichever policy is active; only the checks
//! differ. [`AdminMode`] is the default and performs none.

use std::sync::Arc;

use super::middleware::AuthUser;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthzError {
    #[error("No autorizado para acceder a este recurso")]
    NotOwner,

    #[error("Acceso denegado. Token requerido.")]
    Unauthenticated,
}

pub trait AccessPolicy: Send + Sync + std::fmt::Debug {
    fn name(&self) -> &'static str;

    /// Whether owned-resource routes sit behind the bearer middleware
    fn requires_authentication(&self) -> bool;

    /// Owner filter applied to listings and searches; `None` means no filter
    fn scope<'a>(&self, user: Option<&'a AuthUser>) -> Result<Option<&'a str>, AuthzError>;

    /// Checks access to an existing document owned by `owner`
    fn authorize(&self, user: Option<&AuthUser>, owner: Option<&str>) -> Result<(), AuthzError>;

    /// Owner recorded on a new document, given what the client asked for
    fn owner_for_new(
        &self,
        user: Option<&AuthUser>,
        requested: Option<String>,
    ) -> Result<Option<String>, AuthzError>;
}

/// No ownership checks; documents keep whatever owner the client supplied.
#[derive(Debug, Clone, Copy, Default)]
pub struct AdminMode;

impl AccessPolicy for AdminMode {
    fn name(&self) -> &'static str {
        "admin"
    }

    fn requires_authentication(&self) -> bool {
        false
    }

    fn scope<'a>(&self, _user: Option<&'a AuthUser>) -> Result<Option<&'a str>, AuthzError> {
        Ok(None)
    }

    fn authorize(&self, _user: Option<&AuthUser>, _owner: Option<&str>) -> Result<(), AuthzError> {
        Ok(())
    }

    fn owner_for_new(
        &self,
        _user: Option<&AuthUser>,
        requested: Option<String>,
    ) -> Result<Option<String>, AuthzError> {
        Ok(requested)
    }
}

/// Each user sees and changes only documents stamped with their id.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOnly;

impl AccessPolicy for OwnerOnly {
    fn name(&self) -> &'static str {
        "owner"
    }

    fn requires_authentication(&self) -> bool {
        true
    }

    fn scope<'a>(&self, user: Option<&'a AuthUser>) -> Result<Option<&'a str>, AuthzError> {
        user.map(|u| Some(u.id.as_str()))
            .ok_or(AuthzError::Unauthenticated)
    }

    fn authorize(&self, user: Option<&AuthUser>, owner: Option<&str>) -> Result<(), AuthzError> {
        let user = user.ok_or(AuthzError::Unauthenticated)?;
        if owner == Some(user.id.as_str()) {
            Ok(())
        } else {
            Err(AuthzError::NotOwner)
        }
    }

    fn owner_for_new(
        &self,
        user: Option<&AuthUser>,
        _requested: Option<String>,
    ) -> Result<Option<String>, AuthzError> {
        user.map(|u| Some(u.id.clone()))
            .ok_or(AuthzError::Unauthenticated)
    }
}

/// Resolves a policy by its configured name (`admin` or `owner`).
pub fn policy_from_name(name: &str) -> Option<Arc<dyn AccessPolicy>> {
    match name.trim().to_ascii_lowercase().as_str() {
        "admin" => Some(Arc::new(AdminMode)),
        "owner" => Some(Arc::new(OwnerOnly)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ana() -> AuthUser {
        AuthUser {
            id: "ana".into(),
            email: "ana@example.com".into(),
        }
    }

    #[test]
    fn test_admin_mode_allows_everything() {
        let policy = AdminMode;
        assert!(!policy.requires_authentication());
        assert_eq!(policy.scope(None), Ok(None));
        assert_eq!(policy.authorize(None, Some("someone")), Ok(()));
        assert_eq!(
            policy.owner_for_new(None, Some("client".into())),
            Ok(Some("client".into()))
        );
    }

    #[test]
    fn test_owner_only_scopes_to_token_user() {
        let policy = OwnerOnly;
        let user = ana();

        assert!(policy.requires_authentication());
        assert_eq!(policy.scope(Some(&user)), Ok(Some("ana")));
        assert_eq!(policy.scope(None), Err(AuthzError::Unauthenticated));
    }

    #[test]
    fn test_owner_only_authorize() {
        let policy = OwnerOnly;
        let user = ana();

        assert_eq!(policy.authorize(Some(&user), Some("ana")), Ok(()));
        assert_eq!(
            policy.authorize(Some(&user), Some("bob")),
            Err(AuthzError::NotOwner)
        );
        assert_eq!(policy.authorize(Some(&user), None), Err(AuthzError::NotOwner));
    }

    #[test]
    fn test_owner_only_stamps_token_user() {
        let user = ana();
        assert_eq!(
            OwnerOnly.owner_for_new(Some(&user), Some("bob".into())),
            Ok(Some("ana".into()))
        );
    }

    #[test]
    fn test_policy_from_name() {
        assert_eq!(policy_from_name("admin").map(|p| p.name()), Some("admin"));
        assert_eq!(policy_from_name(" Owner ").map(|p| p.name()), Some("owner"));
        assert!(policy_from_name("root").is_none());
    }
}
