//! /api/pacientes — patient roles attached to a Persona.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};

use crate::db::Database;
use crate::error::ApiError;
use crate::models::paciente::{Paciente, PacienteInput};

const SELECT: &str = "SELECT p.id_paciente, p.id_persona, per.nombres, per.apellidos, per.dni, p.tipo_sangre, p.alergias \
     FROM Pacientes p \
     INNER JOIN Personas per ON p.id_persona = per.id_persona";

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Paciente> = sqlx::query_as(&format!("{SELECT} ORDER BY p.id_paciente DESC"))
        .fetch_all(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    db: web::Data<Database>,
    payload: web::Json<PacienteInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner().normalized();

    let result = sqlx::query("INSERT INTO Pacientes (id_persona, tipo_sangre, alergias) VALUES (?, ?, ?)")
        .bind(input.id_persona)
        .bind(&input.tipo_sangre)
        .bind(&input.alergias)
        .execute(db.pool())
        .await?;

    let row: Paciente = sqlx::query_as(&format!("{SELECT} WHERE p.id_paciente = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_paciente = row.id_paciente, "paciente created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_paciente = *id))]
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<PacienteInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner().normalized();

    sqlx::query("UPDATE Pacientes SET id_persona = ?, tipo_sangre = ?, alergias = ? WHERE id_paciente = ?")
        .bind(input.id_persona)
        .bind(&input.tipo_sangre)
        .bind(&input.alergias)
        .bind(*id)
        .execute(db.pool())
        .await?;

    let row: Option<Paciente> = sqlx::query_as(&format!("{SELECT} WHERE p.id_paciente = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_paciente = *id))]
pub async fn delete(
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Pacientes WHERE id_paciente = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("paciente deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
