use crate::error::ConfigError;
use std::time::Duration;

pub const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434/api/generate";
pub const DEFAULT_MODEL: &str = "propbot";
pub const DEFAULT_TIMEOUT_SECS: u64 = 90;
pub const DEFAULT_SNAPSHOT_MAX_CHARS: usize = 32_000;
const DEFAULT_DB_PORT: u16 = 3306;

/// MySQL connection settings
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub user: String,
    pub password: String,
    pub host: String,
    pub port: u16,
    pub name: String,
}

/// Generation service settings
#[derive(Debug, Clone)]
pub struct GenerationSettings {
    pub url: String,
    pub model: String,
    pub timeout: Duration,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Process-wide configuration, read once at startup and never mutated
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database: DatabaseSettings,
    pub generation: GenerationSettings,
    /// `None` means the snapshot is never truncated
    pub snapshot_max_chars: Option<usize>,
}

impl AppConfig {
    /// Load `.env` if present, then read the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();
        let config = Self::from_lookup(|key| std::env::var(key).ok())?;
        config.log_summary();
        Ok(config)
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| -> Result<String, ConfigError> {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let database = DatabaseSettings {
            user: required("DB_USER")?,
            password: lookup("DB_PASSWORD").unwrap_or_default(),
            host: required("DB_HOST")?,
            port: parse_or("DB_PORT", lookup("DB_PORT"), DEFAULT_DB_PORT)?,
            name: required("DB_NAME")?,
        };

        let url = lookup("OLLAMA_URL")
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_OLLAMA_URL.to_string());
        reqwest::Url::parse(&url).map_err(|e| ConfigError::Invalid {
            name: "OLLAMA_URL",
            reason: e.to_string(),
        })?;

        let timeout_secs = parse_or(
            "OLLAMA_TIMEOUT_SECS",
            lookup("OLLAMA_TIMEOUT_SECS"),
            DEFAULT_TIMEOUT_SECS,
        )?;
        if timeout_secs == 0 {
            return Err(ConfigError::Invalid {
                name: "OLLAMA_TIMEOUT_SECS",
                reason: "must be greater than zero".to_string(),
            });
        }

        let generation = GenerationSettings {
            url,
            model: lookup("OLLAMA_MODEL")
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            timeout: Duration::from_secs(timeout_secs),
        };

        let max_chars = parse_or(
            "SNAPSHOT_MAX_CHARS",
            lookup("SNAPSHOT_MAX_CHARS"),
            DEFAULT_SNAPSHOT_MAX_CHARS,
        )?;

        Ok(Self {
            database,
            generation,
            snapshot_max_chars: (max_chars > 0).then_some(max_chars),
        })
    }

    fn log_summary(&self) {
        tracing::info!("Config loaded:");
        tracing::info!(
            "  DB: {}@{}:{}/{} (password {})",
            self.database.user,
            self.database.host,
            self.database.port,
            self.database.name,
            if self.database.password.is_empty() { "<not set>" } else { "<set>" }
        );
        tracing::info!("  OLLAMA_URL: {}", self.generation.url);
        tracing::info!("  OLLAMA_MODEL: {}", self.generation.model);
        tracing::info!("  OLLAMA_TIMEOUT_SECS: {}", self.generation.timeout.as_secs());
        match self.snapshot_max_chars {
            Some(n) => tracing::info!("  SNAPSHOT_MAX_CHARS: {}", n),
            None => tracing::info!("  SNAPSHOT_MAX_CHARS: unbounded"),
        }
    }
}

fn parse_or<T>(name: &'static str, raw: Option<String>, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(v) => v.parse().map_err(|e: T::Err| ConfigError::Invalid {
            name,
            reason: format!("{:?}: {}", v, e),
        }),
    }
}
