use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::normalize;

/// Medical-history entry in list shape, both participants joined for
/// display names. Append-mostly: entries record one clinical encounter.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Historial {
    pub id_historial: i64,
    pub id_paciente: i64,
    pub id_doctor: i64,
    pub fecha: String,
    pub diagnostico: String,
    pub tratamiento: Option<String>,
    pub receta: Option<String>,
    pub paciente_nombres: String,
    pub paciente_apellidos: String,
    pub doctor_nombres: String,
    pub doctor_apellidos: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct HistorialInput {
    pub id_paciente: i64,
    pub id_doctor: i64,
    #[validate(custom = "crate::models::validate_fecha")]
    pub fecha: String,
    #[validate(length(min = 1, message = "diagnostico is required"))]
    pub diagnostico: String,
    pub tratamiento: Option<String>,
    pub receta: Option<String>,
}

impl HistorialInput {
    pub fn normalized(mut self) -> Self {
        self.tratamiento = normalize(self.tratamiento);
        self.receta = normalize(self.receta);
        self
    }
}
