use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::normalize;

/// Root identity record. Every Paciente, Doctor and Usuario points at one.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Persona {
    pub id_persona: i64,
    pub nombres: String,
    pub apellidos: String,
    pub dni: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub fecha_nacimiento: Option<String>,
}

/// Create/update payload; updates overwrite every mutable field.
#[derive(Debug, Deserialize, Validate)]
pub struct PersonaInput {
    #[validate(length(min = 1, message = "nombres is required"))]
    pub nombres: String,
    #[validate(length(min = 1, message = "apellidos is required"))]
    pub apellidos: String,
    #[validate(length(min = 1, message = "dni is required"))]
    pub dni: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    #[validate(custom = "crate::models::validate_fecha")]
    pub fecha_nacimiento: Option<String>,
}

impl PersonaInput {
    pub fn normalized(mut self) -> Self {
        self.telefono = normalize(self.telefono);
        self.direccion = normalize(self.direccion);
        self.fecha_nacimiento = normalize(self.fecha_nacimiento);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn blank_required_fields_fail_validation() {
        let input = PersonaInput {
            nombres: "".into(),
            apellidos: "Diaz".into(),
            dni: "12345678".into(),
            telefono: None,
            direccion: None,
            fecha_nacimiento: None,
        };
        assert!(input.validate().is_err());
    }

    #[test]
    fn optional_fields_normalize_to_none() {
        let input = PersonaInput {
            nombres: "Ana".into(),
            apellidos: "Diaz".into(),
            dni: "12345678".into(),
            telefono: Some("".into()),
            direccion: Some("  ".into()),
            fecha_nacimiento: None,
        }
        .normalized();
        assert_eq!(input.telefono, None);
        assert_eq!(input.direccion, None);
    }

    #[test]
    fn malformed_birth_date_fails_validation() {
        let input = PersonaInput {
            nombres: "Ana".into(),
            apellidos: "Diaz".into(),
            dni: "12345678".into(),
            telefono: None,
            direccion: None,
            fecha_nacimiento: Some("not-a-date".into()),
        };
        assert!(input.validate().is_err());
    }
}
