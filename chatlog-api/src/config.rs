use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use sqlx::postgres::{PgConnectOptions, PgSslMode};
use std::env;
use std::path::Path;
use std::str::FromStr;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Postgres connection settings. Persistence is enabled only when a host or
/// a full connection URL is present.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DatabaseConfig {
    pub host: Option<String>,
    pub port: u16,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    /// Schema holding `n8n_chat_histories` and `usuarios`.
    pub schema: String,
    pub max_connections: u32,
    pub ssl_mode: String,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct CorsConfig {
    /// Empty means any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LoggingConfig {
    pub level: String,
}

impl ApiConfig {
    /// Layers defaults, config files, `CHATLOG_*` variables and finally the
    /// standard libpq variables (`PGHOST`, `PGUSER`, ...) plus `PORT`.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.port", 5432)?
            .set_default("database.schema", "beta")?
            .set_default("database.max_connections", 5)?
            .set_default("database.ssl_mode", "prefer")?
            .set_default("logging.level", "info")?;

        // Try to load from chatlog-api.toml in current directory
        if let Ok(current_dir) = env::current_dir() {
            builder =
                builder.add_source(File::from(current_dir.join("chatlog-api.toml")).required(false));
        }

        // Then ~/.config/chatlog/api.toml
        if let Some(config_dir) = dirs::config_dir() {
            builder = builder
                .add_source(File::from(config_dir.join("chatlog").join("api.toml")).required(false));
        }

        if let Some(path) = explicit_path {
            builder = builder.add_source(File::from(path.to_path_buf()));
        }

        let settings = builder
            .add_source(
                Environment::with_prefix("CHATLOG")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .set_override_option("database.host", env::var("PGHOST").ok())?
            .set_override_option("database.port", env::var("PGPORT").ok())?
            .set_override_option("database.user", env::var("PGUSER").ok())?
            .set_override_option("database.password", env::var("PGPASSWORD").ok())?
            .set_override_option("database.name", env::var("PGDATABASE").ok())?
            .set_override_option("database.url", env::var("DATABASE_URL").ok())?
            .set_override_option("server.port", env::var("PORT").ok())?
            .build()?;

        let config: ApiConfig = settings.try_deserialize()?;
        config.database.validate()?;
        Ok(config)
    }
}

impl DatabaseConfig {
    pub fn is_configured(&self) -> bool {
        self.url.is_some() || self.host.is_some()
    }

    /// Connection options, or `None` when no datastore is configured.
    pub fn connect_options(&self) -> Result<Option<PgConnectOptions>, sqlx::Error> {
        let mut options = match (&self.url, &self.host) {
            (Some(url), _) => PgConnectOptions::from_str(url)?,
            (None, Some(host)) => PgConnectOptions::new().host(host).port(self.port),
            (None, None) => return Ok(None),
        };

        if let Some(user) = &self.user {
            options = options.username(user);
        }
        if let Some(password) = &self.password {
            options = options.password(password);
        }
        if let Some(name) = &self.name {
            options = options.database(name);
        }

        Ok(Some(options.ssl_mode(PgSslMode::from_str(&self.ssl_mode)?)))
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if !is_sql_identifier(&self.schema) {
            return Err(ConfigError::Message(format!(
                "database.schema must be a plain SQL identifier, got {:?}",
                self.schema
            )));
        }
        PgSslMode::from_str(&self.ssl_mode)
            .map_err(|e| ConfigError::Message(format!("Invalid database.ssl_mode: {e}")))?;
        Ok(())
    }
}

fn is_sql_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    }
}
