use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::normalize;

/// Status every new appointment is created with. Estado is otherwise free
/// text; no transition rules are enforced.
pub const ESTADO_DEFAULT: &str = "Scheduled";

/// Appointment row in list shape: both participants joined through their
/// Persona records for display names.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Cita {
    pub id_cita: i64,
    pub id_paciente: i64,
    pub id_doctor: i64,
    pub fecha: String,
    pub hora: String,
    pub motivo: Option<String>,
    pub estado: String,
    pub paciente_nombres: String,
    pub paciente_apellidos: String,
    pub doctor_nombres: String,
    pub doctor_apellidos: String,
}

/// Create payload. Estado is not accepted from the client; creation always
/// stores [`ESTADO_DEFAULT`].
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCita {
    pub id_paciente: i64,
    pub id_doctor: i64,
    #[validate(custom = "crate::models::validate_fecha")]
    pub fecha: String,
    #[validate(custom = "crate::models::validate_hora")]
    pub hora: String,
    pub motivo: Option<String>,
}

impl CreateCita {
    pub fn normalized(mut self) -> Self {
        self.motivo = normalize(self.motivo);
        self
    }
}

/// Update payload. All fields overwrite except estado, which merges.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateCita {
    pub id_paciente: i64,
    pub id_doctor: i64,
    #[validate(custom = "crate::models::validate_fecha")]
    pub fecha: String,
    #[validate(custom = "crate::models::validate_hora")]
    pub hora: String,
    pub motivo: Option<String>,
    #[serde(default)]
    pub estado: Option<String>,
}

impl UpdateCita {
    pub fn normalized(mut self) -> Self {
        self.motivo = normalize(self.motivo);
        self
    }

    /// Merge rule: an absent or blank estado keeps the stored value
    /// (COALESCE in the update statement); a present one overwrites it.
    pub fn estado_override(&self) -> Option<&str> {
        self.estado
            .as_deref()
            .map(str::trim)
            .filter(|estado| !estado.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(estado: Option<&str>) -> UpdateCita {
        UpdateCita {
            id_paciente: 1,
            id_doctor: 1,
            fecha: "2024-05-01".into(),
            hora: "10:30".into(),
            motivo: None,
            estado: estado.map(str::to_string),
        }
    }

    #[test]
    fn absent_estado_keeps_stored_value() {
        assert_eq!(update(None).estado_override(), None);
        assert_eq!(update(Some("")).estado_override(), None);
        assert_eq!(update(Some("  ")).estado_override(), None);
    }

    #[test]
    fn present_estado_overwrites() {
        assert_eq!(update(Some("Attended")).estado_override(), Some("Attended"));
    }

    #[test]
    fn missing_estado_field_deserializes_as_none() {
        let payload: UpdateCita = serde_json::from_str(
            r#"{"id_paciente":1,"id_doctor":1,"fecha":"2024-05-01","hora":"10:30"}"#,
        )
        .unwrap();
        assert_eq!(payload.estado, None);
        assert_eq!(payload.motivo, None);
    }
}
