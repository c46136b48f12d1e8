use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::normalize;

/// Patient row in list shape: joined against Personas for the display
/// fields the client renders.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Paciente {
    pub id_paciente: i64,
    pub id_persona: i64,
    pub nombres: String,
    pub apellidos: String,
    pub dni: String,
    pub tipo_sangre: Option<String>,
    pub alergias: Option<String>,
}

/// Create/update payload. `id_persona` must resolve to an existing Persona
/// and at most one Paciente may exist per Persona; both are enforced by the
/// schema and surface as conflicts.
#[derive(Debug, Deserialize)]
pub struct PacienteInput {
    pub id_persona: i64,
    pub tipo_sangre: Option<String>,
    pub alergias: Option<String>,
}

impl PacienteInput {
    pub fn normalized(mut self) -> Self {
        self.tipo_sangre = normalize(self.tipo_sangre);
        self.alergias = normalize(self.alergias);
        self
    }
}
