//! /api/usuarios — account management. The one family that requires an
//! authenticated session on every operation.

use actix_web::{web, HttpResponse};
use serde_json::json;
use tracing::{info, instrument};
use validator::Validate;

use crate::api::middleware::AuthUser;
use crate::auth;
use crate::db::Database;
use crate::error::ApiError;
use crate::models::usuario::{CreateUsuario, UpdateUsuario, Usuario};

const SELECT: &str = "SELECT u.id_usuario, u.usuario, u.rol, u.id_persona, p.nombres, p.apellidos, p.dni \
     FROM Usuarios u \
     LEFT JOIN Personas p ON u.id_persona = p.id_persona";

pub async fn list(_user: AuthUser, db: web::Data<Database>) -> Result<HttpResponse, ApiError> {
    let rows: Vec<Usuario> = sqlx::query_as(&format!("{SELECT} ORDER BY u.id_usuario DESC"))
        .fetch_all(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(rows))
}

#[instrument(skip_all)]
pub async fn create(
    _user: AuthUser,
    db: web::Data<Database>,
    payload: web::Json<CreateUsuario>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;

    let hash = auth::hash_password(&input.contrasena)?;
    let result = sqlx::query(
        "INSERT INTO Usuarios (id_persona, usuario, contrasena, rol) VALUES (?, ?, ?, ?)",
    )
    .bind(input.id_persona)
    .bind(&input.usuario)
    .bind(&hash)
    .bind(&input.rol)
    .execute(db.pool())
    .await?;

    let row: Usuario = sqlx::query_as(&format!("{SELECT} WHERE u.id_usuario = ?"))
        .bind(result.last_insert_rowid())
        .fetch_one(db.pool())
        .await?;

    info!(id_usuario = row.id_usuario, "usuario created");
    Ok(HttpResponse::Created().json(row))
}

#[instrument(skip_all, fields(id_usuario = *id))]
pub async fn update(
    _user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
    payload: web::Json<UpdateUsuario>,
) -> Result<HttpResponse, ApiError> {
    let input = payload.into_inner();
    input.validate().map_err(ApiError::from_validation)?;

    // the credential only changes when a replacement was supplied
    match input.nueva_contrasena() {
        Some(plain) => {
            let hash = auth::hash_password(plain)?;
            sqlx::query(
                "UPDATE Usuarios SET id_persona = ?, usuario = ?, contrasena = ?, rol = ? WHERE id_usuario = ?",
            )
            .bind(input.id_persona)
            .bind(&input.usuario)
            .bind(&hash)
            .bind(&input.rol)
            .bind(*id)
            .execute(db.pool())
            .await?;
        }
        None => {
            sqlx::query(
                "UPDATE Usuarios SET id_persona = ?, usuario = ?, rol = ? WHERE id_usuario = ?",
            )
            .bind(input.id_persona)
            .bind(&input.usuario)
            .bind(&input.rol)
            .bind(*id)
            .execute(db.pool())
            .await?;
        }
    }

    let row: Option<Usuario> = sqlx::query_as(&format!("{SELECT} WHERE u.id_usuario = ?"))
        .bind(*id)
        .fetch_optional(db.pool())
        .await?;
    Ok(HttpResponse::Ok().json(row))
}

#[instrument(skip_all, fields(id_usuario = *id))]
pub async fn delete(
    _user: AuthUser,
    db: web::Data<Database>,
    id: web::Path<i64>,
) -> Result<HttpResponse, ApiError> {
    sqlx::query("DELETE FROM Usuarios WHERE id_usuario = ?")
        .bind(*id)
        .execute(db.pool())
        .await?;
    info!("usuario deleted");
    Ok(HttpResponse::Ok().json(json!({ "ok": true })))
}
