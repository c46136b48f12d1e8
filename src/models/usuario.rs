use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// User account in list shape (LEFT JOIN against Personas — accounts may
/// exist without an identity record). The stored credential is never part
/// of this struct, so it cannot leak through serialization.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Usuario {
    pub id_usuario: i64,
    pub usuario: String,
    pub rol: String,
    pub id_persona: Option<i64>,
    pub nombres: Option<String>,
    pub apellidos: Option<String>,
    pub dni: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateUsuario {
    pub id_persona: i64,
    #[validate(length(min = 1, message = "usuario is required"))]
    pub usuario: String,
    #[serde(rename = "contraseña", alias = "password")]
    #[validate(length(min = 1, message = "contraseña is required"))]
    pub contrasena: String,
    #[validate(length(min = 1, message = "rol is required"))]
    pub rol: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateUsuario {
    pub id_persona: i64,
    #[validate(length(min = 1, message = "usuario is required"))]
    pub usuario: String,
    #[serde(default, rename = "contraseña", alias = "password")]
    pub contrasena: Option<String>,
    #[validate(length(min = 1, message = "rol is required"))]
    pub rol: String,
}

impl UpdateUsuario {
    /// Merge rule: an absent or blank contraseña keeps the stored hash; a
    /// present one is re-hashed and replaces it.
    pub fn nueva_contrasena(&self) -> Option<&str> {
        self.contrasena
            .as_deref()
            .filter(|contrasena| !contrasena.is_empty())
    }
}
