//! Authentication: credential hashing and the login/logout/auth-check
//! endpoints.
//!
//! Passwords are stored as salted argon2 hashes and verified with the
//! constant-time comparison the `argon2` crate provides. Login failures do
//! not distinguish an unknown username from a wrong password.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie};
use actix_web::{web, HttpRequest, HttpResponse};
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use serde::Deserialize;
use serde_json::json;
use sqlx::FromRow;
use tracing::{info, instrument};

use crate::api::middleware::MaybeUser;
use crate::config::Config;
use crate::db::Database;
use crate::error::ApiError;
use crate::session::{CurrentUser, Sessions, SESSION_COOKIE};

pub fn hash_password(plain: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| ApiError::Internal(format!("password hashing failed: {err}")))
}

pub fn verify_password(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

/// Login payload. Accepts the original wire names as well as the
/// English aliases, so both client generations keep working.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default, alias = "username")]
    pub usuario: Option<String>,
    #[serde(default, rename = "contraseña", alias = "password")]
    pub contrasena: Option<String>,
}

#[derive(Debug, FromRow)]
struct CredentialRow {
    id_usuario: i64,
    usuario: String,
    contrasena: String,
    rol: String,
    id_persona: Option<i64>,
    nombres: Option<String>,
    apellidos: Option<String>,
}

#[instrument(skip_all)]
pub async fn login(
    db: web::Data<Database>,
    sessions: web::Data<Sessions>,
    config: web::Data<Config>,
    payload: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let usuario = payload.usuario.as_deref().map(str::trim).unwrap_or("");
    let contrasena = payload.contrasena.as_deref().unwrap_or("");
    if usuario.is_empty() || contrasena.is_empty() {
        return Err(ApiError::Validation(
            "usuario and contraseña are required".into(),
        ));
    }

    let row: Option<CredentialRow> = sqlx::query_as(
        "SELECT u.id_usuario, u.usuario, u.contrasena, u.rol, u.id_persona, p.nombres, p.apellidos \
         FROM Usuarios u \
         LEFT JOIN Personas p ON u.id_persona = p.id_persona \
         WHERE u.usuario = ?",
    )
    .bind(usuario)
    .fetch_optional(db.pool())
    .await?;

    let row = match row {
        Some(row) if verify_password(contrasena, &row.contrasena) => row,
        _ => return Err(ApiError::InvalidCredentials),
    };

    let user = CurrentUser {
        id_usuario: row.id_usuario,
        usuario: row.usuario,
        rol: row.rol,
        id_persona: row.id_persona,
        nombres: row.nombres,
        apellidos: row.apellidos,
    };
    let token = sessions.insert(user.clone());
    info!(id_usuario = user.id_usuario, "session established");

    let cookie = Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .max_age(CookieDuration::hours(config.session.ttl_hours))
        .finish();

    Ok(HttpResponse::Ok().cookie(cookie).json(json!({
        "ok": true,
        "usuario": {
            "id_usuario": user.id_usuario,
            "usuario": user.usuario,
            "rol": user.rol,
            "nombres": user.nombres,
            "apellidos": user.apellidos,
        },
    })))
}

pub async fn auth_check(user: MaybeUser) -> HttpResponse {
    match user.0 {
        Some(user) => HttpResponse::Ok().json(json!({ "ok": true, "usuario": user })),
        None => HttpResponse::Ok().json(json!({ "ok": false })),
    }
}

pub async fn logout(req: HttpRequest, sessions: web::Data<Sessions>) -> HttpResponse {
    if let Some(cookie) = req.cookie(SESSION_COOKIE) {
        sessions.destroy(cookie.value());
    }

    let mut removal = Cookie::new(SESSION_COOKIE, "");
    removal.set_path("/");
    removal.make_removal();
    HttpResponse::Ok().cookie(removal).json(json!({ "ok": true }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify_round_trips() {
        let hash = hash_password("s3cret").unwrap();
        assert_ne!(hash, "s3cret");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password("s3cret", &hash));
    }

    #[test]
    fn wrong_password_fails_verification() {
        let hash = hash_password("s3cret").unwrap();
        assert!(!verify_password("other", &hash));
    }

    #[test]
    fn hashes_are_salted() {
        let a = hash_password("s3cret").unwrap();
        let b = hash_password("s3cret").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_stored_value_never_verifies() {
        assert!(!verify_password("s3cret", "not-a-phc-string"));
    }

    #[test]
    fn login_request_accepts_both_field_spellings() {
        let original: LoginRequest =
            serde_json::from_str(r#"{"usuario":"ana","contraseña":"x"}"#).unwrap();
        assert_eq!(original.usuario.as_deref(), Some("ana"));
        assert_eq!(original.contrasena.as_deref(), Some("x"));

        let english: LoginRequest =
            serde_json::from_str(r#"{"username":"ana","password":"x"}"#).unwrap();
        assert_eq!(english.usuario.as_deref(), Some("ana"));
        assert_eq!(english.contrasena.as_deref(), Some("x"));
    }
}
