use anyhow::{Context, Result};

const DEFAULT_TRASH_RETENTION_DAYS: i64 = 7;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub api_keys: String,
    pub trash_retention_days: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let trash_retention_days = match std::env::var("TRASH_RETENTION_DAYS") {
            Ok(raw) => raw
                .parse()
                .context("TRASH_RETENTION_DAYS must be a number")?,
            Err(_) => DEFAULT_TRASH_RETENTION_DAYS,
        };

        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("PORT must be a number")?
                .parse()?,
            database_url: std::env::var("DATABASE_URL")
                .context("Cannot load DATABASE_URL env variable")?,
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
            trash_retention_days,
        })
    }
}
