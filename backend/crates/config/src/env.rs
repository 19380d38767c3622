use persona_common::error::{PersonaError, PersonaResult};
use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub database_url: String,
    pub db_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub log_level: String,
    pub run_migrations: bool,
    pub enrichment: EnrichmentConfig,
}

/// Endpoints and time budgets for the three demographic providers.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrichmentConfig {
    pub age_url: String,
    pub gender_url: String,
    pub nationality_url: String,
    /// Applied to every single provider call.
    pub request_timeout_secs: u64,
    /// Applied to the joined lookup as a whole.
    pub total_timeout_secs: u64,
    pub enrich_on_rename: bool,
}

impl AppConfig {
    /// Load configuration from environment variables.
    /// Loads `.env` and `config.env` if present, then reads the vars.
    pub fn from_env() -> PersonaResult<Self> {
        // Best-effort env file load; ignore if missing
        let _ = dotenvy::dotenv();
        let _ = dotenvy::from_filename("config.env");

        Ok(Self {
            database_url: database_url()?,
            db_max_connections: parse_var_or("DB_MAX_CONNECTIONS", 10)?,
            host: get_var_or("HOST", "0.0.0.0"),
            port: parse_var_or("PORT", 8080)?,
            log_level: get_var_or("LOG_LEVEL", "info"),
            run_migrations: parse_var_or("RUN_MIGRATIONS", true)?,
            enrichment: EnrichmentConfig::from_env()?,
        })
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl EnrichmentConfig {
    pub fn from_env() -> PersonaResult<Self> {
        Ok(Self {
            age_url: get_var_or("AGE_API_URL", "https://api.agify.io"),
            gender_url: get_var_or("GENDER_API_URL", "https://api.genderize.io"),
            nationality_url: get_var_or("NATIONALITY_API_URL", "https://api.nationalize.io"),
            request_timeout_secs: parse_var_or("ENRICH_REQUEST_TIMEOUT_SECS", 5)?,
            total_timeout_secs: parse_var_or("ENRICH_TOTAL_TIMEOUT_SECS", 10)?,
            enrich_on_rename: parse_var_or("ENRICH_ON_RENAME", false)?,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn total_timeout(&self) -> Duration {
        Duration::from_secs(self.total_timeout_secs)
    }
}

/// `DATABASE_URL` wins; otherwise the URL is assembled from the discrete
/// `DB_*` variables, of which `DB_USER` and `DB_NAME` are mandatory.
fn database_url() -> PersonaResult<String> {
    if let Ok(url) = env::var("DATABASE_URL") {
        return Ok(url);
    }

    let user = env::var("DB_USER").map_err(|_| {
        PersonaError::Config("DATABASE_URL or DB_USER/DB_NAME must be set".to_string())
    })?;
    let name = get_var("DB_NAME")?;
    let password = get_var_or("DB_PASSWORD", "");
    let host = get_var_or("DB_HOST", "localhost");
    let port = get_var_or("DB_PORT", "5432");

    let credentials = if password.is_empty() {
        user
    } else {
        format!("{user}:{password}")
    };
    Ok(format!("postgres://{credentials}@{host}:{port}/{name}"))
}

fn get_var(key: &str) -> PersonaResult<String> {
    env::var(key).map_err(|_| PersonaError::Config(format!("{key} is required but not set")))
}

fn get_var_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_owned())
}

fn parse_var_or<T>(key: &str, default: T) -> PersonaResult<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| PersonaError::Config(format!("invalid {key}: {e}"))),
        Err(_) => Ok(default),
    }
}
