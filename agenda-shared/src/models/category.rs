use serde::{Deserialize, Serialize};

use super::{fields::nullable, required, Resource, ValidationError};

pub const NOMBRE_REQUIRED: &str = "El nombre es obligatorio";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(default)]
    pub nombre: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icono: Option<String>,
}

impl Resource for Category {
    const COLLECTION: &'static str = "categories";
    const SEARCH_FIELD: &'static str = "nombre";
    type Patch = CategoryPatch;

    fn search_text(&self) -> Option<&str> {
        Some(&self.nombre)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateCategoryRequest {
    #[serde(default)]
    pub nombre: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub icono: Option<String>,
}

impl CreateCategoryRequest {
    pub fn validate(self) -> Result<NewCategory, ValidationError> {
        Ok(NewCategory {
            nombre: required(self.nombre, NOMBRE_REQUIRED)?,
            color: self.color,
            icono: self.icono,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCategory {
    pub nombre: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icono: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CategoryPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nombre: Option<String>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub color: Option<Option<String>>,
    #[serde(
        default,
        deserialize_with = "nullable::deserialize",
        skip_serializing_if = "Option::is_none"
    )]
    pub icono: Option<Option<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_requires_nombre() {
        let err = CreateCategoryRequest::default().validate().unwrap_err();
        assert_eq!(err.to_string(), NOMBRE_REQUIRED);
    }

    #[test]
    fn test_unset_optionals_are_omitted() {
        let category = Category {
            id: "1".into(),
            nombre: "Ocio".into(),
            color: None,
            icono: None,
        };
        assert_eq!(
            serde_json::to_value(&category).unwrap(),
            json!({"id": "1", "nombre": "Ocio"})
        );
    }

    #[test]
    fn test_patch_ignores_unknown_and_keeps_nulls() {
        let patch: CategoryPatch = serde_json::from_value(json!({
            "id": "forged",
            "color": null,
            "extra": true
        }))
        .unwrap();

        assert_eq!(serde_json::to_value(&patch).unwrap(), json!({"color": null}));
    }
}
