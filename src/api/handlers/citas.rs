//! /api/citas — appointments between a Paciente and a Doctor.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::cita::{Cita, CreateCita, UpdateCita, ESTADO_DEFAULT};

const SELECT: &str = "SELECT c.id_cita, c.id_paciente, c.id_doctor, c.fecha, c.hora, c.motivo, c.estado, \
            per_pac.nombres AS paciente_nombres, per_pac.apellidos AS paciente_apellidos, \
            per_doc.nombres AS doctor_nombres, per_doc.apellidos AS doctor_apellidos \
     FROM Citas c \
     INNER JOIN Pacientes pac ON c.id_paciente = pac.id_paciente \
     INNER JOIN Personas per_pac ON pac.id_persona = per_pac.id_persona \
     INNER JOIN Doctores doc ON c.id_doctor = doc.id_doctor \
     INNER JOIN Personas per_doc ON doc.id_persona = per_doc.id_persona";

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Cita> = sqlx::query_as(&format!("{SELECT} ORDER BY c.fecha DESC, c.hora DESC"))
        .fetch_all(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    db: web::Data<Database>,
    payload: web::Json<CreateCita>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    // estado always starts at the fixed default, whatever the client sent
    let result = sqlx::query(
        "INSERT INTO Citas (id_paciente, id_doctor, fecha, hora, motivo, estado) VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(input.id_paciente)
    .bind(input.id_doctor)
    .bind(&input.fecha)
    .bind(&input.hora)
    .bind(&input.motivo)
    .bind(ESTADO_DEFAULT)
    .execute(db.pool())
    .await?;

    let row: Cita = sqlx::query_as(&format!("{SELECT} WHERE c.id_cita = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_cita = row.id_cita, "cita created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_cita = *id))]
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<UpdateCita>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    sqlx::query(
        "UPDATE Citas \
         SET id_paciente = ?, id_doctor = ?, fecha = ?, hora = ?, motivo = ?, estado = COALESCE(?, estado) \
         WHERE id_cita = ?",
    )
    .bind(input.id_paciente)
    .bind(input.id_doctor)
    .bind(&input.fecha)
    .bind(&input.hora)
    .bind(&input.motivo)
    .bind(input.estado_override())
    .bind(*id)
    .execute(db.pool())
    .await?;

    let row: Option<Cita> = sqlx::query_as(&format!("{SELECT} WHERE c.id_cita = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_cita = *id))]
pub async fn delete(
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Citas WHERE id_cita = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("cita deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
