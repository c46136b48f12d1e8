//! Route table and page gates.

use actix_files::NamedFile;
use actix_web::error::JsonPayloadError;
use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde_json::json;

use crate::api::handlers::{citas, doctores, historial, pacientes, personas, usuarios};
use crate::api::middleware::MaybeUser;
use crate::auth;
use crate::config::Config;
use crate::error::ApiError;

/// Register every route on the app.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().error_handler(json_error_handler))
        // Operational
        .route("/api/health", web::get().to(health))
        // Authentication
        .route("/api/login", web::post().to(auth::login))
        .route("/api/auth-check", web::get().to(auth::auth_check))
        .route("/api/logout", web::post().to(auth::logout))
        // Entity CRUD
        .service(
            web::scope("/api/personas")
                .route("", web::get().to(personas::list))
                .route("", web::post().to(personas::create))
                .route("/{id}", web::put().to(personas::update))
                .route("/{id}", web::delete().to(personas::delete)),
        )
        .service(
            web::scope("/api/pacientes")
                .route("", web::get().to(pacientes::list))
                .route("", web::post().to(pacientes::create))
                .route("/{id}", web::put().to(pacientes::update))
                .route("/{id}", web::delete().to(pacientes::delete)),
        )
        .service(
            web::scope("/api/doctores")
                .route("", web::get().to(doctores::list))
                .route("", web::post().to(doctores::create))
                .route("/{id}", web::put().to(doctores::update))
                .route("/{id}", web::delete().to(doctores::delete)),
        )
        .service(
            web::scope("/api/citas")
                .route("", web::get().to(citas::list))
                .route("", web::post().to(citas::create))
                .route("/{id}", web::put().to(citas::update))
                .route("/{id}", web::delete().to(citas::delete)),
        )
        .service(
            web::scope("/api/historial")
                .route("", web::get().to(historial::list))
                .route("", web::post().to(historial::create))
                .route("/{id}", web::put().to(historial::update))
                .route("/{id}", web::delete().to(historial::delete)),
        )
        .service(
            web::scope("/api/usuarios")
                .route("", web::get().to(usuarios::list))
                .route("", web::post().to(usuarios::create))
                .route("/{id}", web::put().to(usuarios::update))
                .route("/{id}", web::delete().to(usuarios::delete)),
        )
        // Session-gated pages
        .route("/", web::get().to(protected_page))
        .route("/personas", web::get().to(protected_page))
        .route("/doctores", web::get().to(protected_page))
        .route("/usuario", web::get().to(protected_page))
        .route("/historial", web::get().to(protected_page))
        .route("/usuarios", web::get().to(protected_page))
        .route("/login", web::get().to(login_page));
}

/// Keep the 400 JSON shape for malformed bodies and missing required
/// fields caught at deserialization time.
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
    ApiError::Validation(err.to_string()).into()
}

async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

const PAGES: &[(&str, &str)] = &[
    ("/", "index.html"),
    ("/personas", "personas.html"),
    ("/doctores", "doctores.html"),
    ("/usuario", "usuario.html"),
    ("/historial", "historial.html"),
    ("/usuarios", "usuarios.html"),
];

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// Serve a page to an authenticated session, otherwise bounce to /login.
async fn protected_page(
    user: MaybeUser,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    if user.0.is_none() {
        return Ok(redirect("/login"));
    }
    let file = PAGES
        .iter()
        .find(|(path, _)| *path == req.path())
        .map(|(_, file)| *file)
        .ok_or_else(|| ApiError::NotFound("page not found".into()))?;
    serve_page(&config.server.static_dir, file, &req).await
}

/// The login page itself redirects home when a session already exists.
async fn login_page(
    user: MaybeUser,
    config: web::Data<Config>,
    req: HttpRequest,
) -> Result<HttpResponse, ApiError> {
    if user.0.is_some() {
        return Ok(redirect("/"));
    }
    serve_page(&config.server.static_dir, "login.html", &req).await
}

async fn serve_page(
    static_dir: &str,
    file: &str,
    req: &HttpRequest,
) -> Result<HttpResponse, ApiError> {
    let path = std::path::Path::new(static_dir).join(file);
    let named = NamedFile::open_async(path)
        .await
        .map_err(|_| ApiError::NotFound(format!("{file} not found")))?;
    Ok(named.into_response(req))
}
