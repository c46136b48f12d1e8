//! Database module for Clinisys
//!
//! This module handles database connections and operations.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::{AdminConfig, DatabaseConfig};

/// Database connection pool
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection.
    ///
    /// Foreign-key enforcement is switched on for every connection; a write
    /// that references a missing Persona/Paciente/Doctor must fail rather
    /// than silently store a dangling id.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let options = SqliteConnectOptions::from_str(&config.url)?
            .create_if_missing(true)
            .foreign_keys(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .connect_with(options)
            .await?;

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("./migrations").run(&self.pool).await
    }

    /// Create the bootstrap admin account when no users exist yet.
    ///
    /// User management is only reachable with an authenticated session, so a
    /// fresh database needs one account to log in with.
    pub async fn seed_admin(&self, admin: &AdminConfig) -> anyhow::Result<()> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM Usuarios")
            .fetch_one(&self.pool)
            .await?;
        if count > 0 {
            return Ok(());
        }

        let hash = crate::auth::hash_password(&admin.contrasena)?;
        sqlx::query("INSERT INTO Usuarios (id_persona, usuario, contrasena, rol) VALUES (NULL, ?, ?, 'admin')")
            .bind(&admin.usuario)
            .bind(&hash)
            .execute(&self.pool)
            .await?;

        info!(usuario = %admin.usuario, "seeded bootstrap admin account");
        Ok(())
    }
}
