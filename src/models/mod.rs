//! Request/response models for the API.
//!
//! Row structs serialize with the exact wire field names the client scripts
//! read; request DTOs carry the validation and merge rules per entity.

pub mod cita;
pub mod doctor;
pub mod historial;
pub mod paciente;
pub mod persona;
pub mod usuario;

use chrono::{NaiveDate, NaiveTime};
use validator::ValidationError;

/// Optional text inputs normalize to NULL, never an empty string, so the
/// display layer can key off absence alone.
pub(crate) fn normalize(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Dates travel as `YYYY-MM-DD`.
pub(crate) fn validate_fecha(value: &str) -> Result<(), ValidationError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| ValidationError::new("fecha"))
}

/// Times travel as `HH:MM` or `HH:MM:SS`.
pub(crate) fn validate_hora(value: &str) -> Result<(), ValidationError> {
    NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map(|_| ())
        .map_err(|_| ValidationError::new("hora"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn normalize_drops_blank_values() {
        assert_eq!(normalize(None), None);
        assert_eq!(normalize(Some("".into())), None);
        assert_eq!(normalize(Some("   ".into())), None);
        assert_eq!(normalize(Some("B+".into())), Some("B+".into()));
    }

    #[test_case("2024-05-01" ; "iso date")]
    #[test_case("1999-12-31" ; "end of year")]
    fn fecha_accepts_iso_dates(value: &str) {
        assert!(validate_fecha(value).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("01/05/2024" ; "slash format")]
    #[test_case("2024-13-01" ; "month out of range")]
    #[test_case("mañana" ; "free text")]
    fn fecha_rejects_everything_else(value: &str) {
        assert!(validate_fecha(value).is_err());
    }

    #[test_case("09:30" ; "short form")]
    #[test_case("23:59:59" ; "with seconds")]
    fn hora_accepts_clock_times(value: &str) {
        assert!(validate_hora(value).is_ok());
    }

    #[test_case("" ; "empty")]
    #[test_case("25:00" ; "hour out of range")]
    #[test_case("9am" ; "free text")]
    fn hora_rejects_everything_else(value: &str) {
        assert!(validate_hora(value).is_err());
    }
}
