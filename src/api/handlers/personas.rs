//! /api/personas — identity records.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::db::Database;
use crate::error::ApiError;
use crate::models::persona::{Persona, PersonaInput};

const SELECT: &str = "SELECT id_persona, nombres, apellidos, dni, telefono, direccion, fecha_nacimiento FROM Personas";

pub async fn list(db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Persona> = sqlx::query_as(&format!("{SELECT} ORDER BY id_persona DESC"))
        .fetch_all(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    db: web::Data<Database>,
    payload: web::Json<PersonaInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    let result = sqlx::query(
        "INSERT INTO Personas (nombres, apellidos, dni, telefono, direccion, fecha_nacimiento) \
         VALUES (?, ?, ?, ?, ?, ?)",
    )
    .bind(&input.nombres)
    .bind(&input.apellidos)
    .bind(&input.dni)
    .bind(&input.telefono)
    .bind(&input.direccion)
    .bind(&input.fecha_nacimiento)
    .execute(db.pool())
    .await?;

    let row: Persona = sqlx::query_as(&format!("{SELECT} WHERE id_persona = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_persona = row.id_persona, "persona created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_persona = *id))]
pub async fn update(
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<PersonaInput>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;
    let input = input.normalized();

    sqlx::query(
        "UPDATE Personas \
         SET nombres = ?, apellidos = ?, dni = ?, telefono = ?, direccion = ?, fecha_nacimiento = ? \
         WHERE id_persona = ?",
    )
    .bind(&input.nombres)
    .bind(&input.apellidos)
    .bind(&input.dni)
    .bind(&input.telefono)
    .bind(&input.direccion)
    .bind(&input.fecha_nacimiento)
    .bind(*id)
    .execute(db.pool())
    .await?;

    // an unknown id yields null, not an error
    let row: Option<Persona> = sqlx::query_as(&format!("{SELECT} WHERE id_persona = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_persona = *id))]
pub async fn delete(
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Personas WHERE id_persona = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("persona deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
