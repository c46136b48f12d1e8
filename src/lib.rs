//! Clinisys core library
//!
//! This module exports the core functionality of the Clinisys platform:
//! the HTTP API, the persistence layer, and the session-based auth gate.

pub mod api;
pub mod auth;
pub mod db;
pub mod error;
pub mod models;
pub mod session;

/// Application configuration
pub mod config {
    use serde::Deserialize;

    #[derive(Debug, Clone, Deserialize, Default)]
    pub struct Config {
        #[serde(default)]
        pub server: ServerConfig,
        #[serde(default)]
        pub database: DatabaseConfig,
        #[serde(default)]
        pub session: SessionConfig,
        #[serde(default)]
        pub admin: AdminConfig,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ServerConfig {
        #[serde(default = "default_host")]
        pub host: String,
        #[serde(default = "default_port")]
        pub port: u16,
        #[serde(default = "default_static_dir")]
        pub static_dir: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct DatabaseConfig {
        #[serde(default = "default_db_url")]
        pub url: String,
        #[serde(default = "default_max_connections")]
        pub max_connections: u32,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct SessionConfig {
        #[serde(default = "default_ttl_hours")]
        pub ttl_hours: i64,
    }

    /// Bootstrap account created on first start when the Usuarios table is
    /// empty. Every user-management endpoint requires a session, so an empty
    /// table would otherwise lock the system out.
    #[derive(Debug, Clone, Deserialize)]
    pub struct AdminConfig {
        #[serde(default = "default_admin_usuario")]
        pub usuario: String,
        #[serde(default = "default_admin_contrasena")]
        pub contrasena: String,
    }

    fn default_host() -> String {
        "127.0.0.1".into()
    }

    fn default_port() -> u16 {
        3000
    }

    fn default_static_dir() -> String {
        "public".into()
    }

    fn default_db_url() -> String {
        "sqlite://clinisys.db".into()
    }

    fn default_max_connections() -> u32 {
        5
    }

    fn default_ttl_hours() -> i64 {
        24
    }

    fn default_admin_usuario() -> String {
        "admin".into()
    }

    fn default_admin_contrasena() -> String {
        "admin".into()
    }

    impl Default for ServerConfig {
        fn default() -> Self {
            Self {
                host: default_host(),
                port: default_port(),
                static_dir: default_static_dir(),
            }
        }
    }

    impl Default for DatabaseConfig {
        fn default() -> Self {
            Self {
                url: default_db_url(),
                max_connections: default_max_connections(),
            }
        }
    }

    impl Default for SessionConfig {
        fn default() -> Self {
            Self {
                ttl_hours: default_ttl_hours(),
            }
        }
    }

    impl Default for AdminConfig {
        fn default() -> Self {
            Self {
                usuario: default_admin_usuario(),
                contrasena: default_admin_contrasena(),
            }
        }
    }

    /// Load configuration from file and environment
    pub fn load_config() -> Result<Config, config::ConfigError> {
        let env = std::env::var("CLINISYS_ENV").unwrap_or_else(|_| "development".into());

        config::Config::builder()
            // Start with default settings
            .add_source(config::File::with_name("config/default").required(false))
            // Override with environment-specific settings
            .add_source(config::File::with_name(&format!("config/{}", env)).required(false))
            // Override with environment variables
            .add_source(config::Environment::with_prefix("CLINISYS").separator("__"))
            .build()?
            .try_deserialize()
    }
}
