//! /api/doctores — care providers attached to a Persona.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::doctor::{Doctor, DoctorInput};

const SELECT: &str = "SELECT d.id_doctor, d.id_persona, per.nombres, per.apellidos, per.dni, d.especialidad, d.nro_colegiatura \
     FROM Doctores d \
     INNER JOIN Personas per ON d.id_persona = per.id_persona";

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Doctor> = sqlx::query_as(&format!("{SELECT} ORDER BY d.id_doctor DESC"))
        .fetch_all(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    db: web::Data<Database>,
    payload: web::Json<DoctorInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;

    let result = sqlx::query("INSERT INTO Doctores (id_persona, especialidad, nro_colegiatura) VALUES (?, ?, ?)")
        .bind(input.id_persona)
        .bind(&input.especialidad)
        .bind(&input.nro_colegiatura)
        .execute(db.pool())
        .await?;

    let row: Doctor = sqlx::query_as(&format!("{SELECT} WHERE d.id_doctor = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_doctor = row.id_doctor, "doctor created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_doctor = *id))]
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<DoctorInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;

    sqlx::query("UPDATE Doctores SET id_persona = ?, especialidad = ?, nro_colegiatura = ? WHERE id_doctor = ?")
        .bind(input.id_persona)
        .bind(&input.especialidad)
        .bind(&input.nro_colegiatura)
        .bind(*id)
        .execute(db.pool())
        .await?;

    let row: Option<Doctor> = sqlx::query_as(&format!("{SELECT} WHERE d.id_doctor = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_doctor = *id))]
pub async fn delete(
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Doctores WHERE id_doctor = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("doctor deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
