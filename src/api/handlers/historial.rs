//! /api/historial — medical-history entries per clinical encounter.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::historial::{Historial, HistorialInput};

const SELECT: &str = "SELECT h.id_historial, h.id_paciente, h.id_doctor, h.fecha, h.diagnostico, h.tratamiento, h.receta, \
            per_pac.nombres AS paciente_nombres, per_pac.apellidos AS paciente_apellidos, \
            per_doc.nombres AS doctor_nombres, per_doc.apellidos AS doctor_apellidos \
     FROM Historial_medico h \
     INNER JOIN Pacientes pac ON h.id_paciente = pac.id_paciente \
     INNER JOIN Personas per_pac ON pac.id_persona = per_pac.id_persona \
     INNER JOIN Doctores doc ON h.id_doctor = doc.id_doctor \
     INNER JOIN Personas per_doc ON doc.id_persona = per_doc.id_persona";

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Historial> =
        sqlx::query_as(&format!("{SELECT} ORDER BY h.fecha DESC, h.id_historial DESC"))
            .fetch_all(db.pool())
            .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    db: web::Data<Database>,
    payload: web::Json<HistorialInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    let result = sqlx::query(
        "INSERT INTO Historial_medico (id_paciente, id_doctor, fecha, diagnostico, tratamiento, receta) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(input.id_paciente)
    .bind(input.id_doctor)
    .bind(&input.fecha)
    .bind(&input.diagnostico)
    .bind(&input.tratamiento)
    .bind(&input.receta)
    .execute(db.pool())
    .await?;

    let row: Historial = sqlx::query_as(&format!("{SELECT} WHERE h.id_historial = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_historial = row.id_historial, "historial entry created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_historial = *id))]
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<HistorialInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    sqlx::query(
        "UPDATE Historial_medico \
         SET id_paciente = ?, id_doctor = ?, fecha = ?, diagnostico = ?, tratamiento = ?, receta = ? \
         WHERE id_historial = ?",
    )
    .bind(input.id_paciente)
    .bind(input.id_doctor)
    .bind(&input.fecha)
    .bind(&input.diagnostico)
    .bind(&input.tratamiento)
    .bind(&input.receta)
    .bind(*id)
    .execute(db.pool())
    .await?;

    let row: Option<Historial> = sqlx::query_as(&format!("{SELECT} WHERE h.id_historial = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_historial = *id))]
pub async fn delete(
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Historial_medico WHERE id_historial = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("historial entry deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
