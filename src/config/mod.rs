//! Configuration layer: typed settings with layered precedence (file → env).

use std::num::NonZeroU32;
use std::str::FromStr;
use std::time::Duration;

use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "attimo";
const DEFAULT_DB_MAX_CONNECTIONS: u32 = 8;
const DEFAULT_COMMENT_TTL_SECS: u64 = 10;

#[derive(Debug, Clone)]
pub struct Settings {
    pub logging: LoggingSettings,
    pub database: DatabaseSettings,
    pub cache: CacheSettings,
}

#[derive(Debug, Clone, Copy)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: Option<String>,
    pub max_connections: NonZeroU32,
}

#[derive(Debug, Clone, Copy)]
pub struct CacheSettings {
    /// Lifetime of the comment cache entries. Staleness up to this bound is
    /// the accepted consistency model; there is no invalidation on write.
    pub comment_ttl: Duration,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment).
pub fn load() -> Result<Settings, LoadError> {
    let builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false))
        .add_source(Environment::with_prefix("ATTIMO").separator("__"));

    let raw: RawSettings = builder.build()?.try_deserialize()?;
    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    logging: RawLoggingSettings,
    database: RawDatabaseSettings,
    cache: RawCacheSettings,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawDatabaseSettings {
    url: Option<String>,
    max_connections: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawCacheSettings {
    comment_ttl_seconds: Option<u64>,
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        Ok(Self {
            logging: build_logging_settings(raw.logging)?,
            database: build_database_settings(raw.database)?,
            cache: build_cache_settings(raw.cache)?,
        })
    }
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_database_settings(database: RawDatabaseSettings) -> Result<DatabaseSettings, LoadError> {
    let url = database.url.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    });

    let max_connections = NonZeroU32::new(
        database
            .max_connections
            .unwrap_or(DEFAULT_DB_MAX_CONNECTIONS),
    )
    .ok_or_else(|| LoadError::invalid("database.max_connections", "must be greater than zero"))?;

    Ok(DatabaseSettings {
        url,
        max_connections,
    })
}

fn build_cache_settings(cache: RawCacheSettings) -> Result<CacheSettings, LoadError> {
    let secs = cache
        .comment_ttl_seconds
        .unwrap_or(DEFAULT_COMMENT_TTL_SECS);
    if secs == 0 {
        return Err(LoadError::invalid(
            "cache.comment_ttl_seconds",
            "must be greater than zero",
        ));
    }

    Ok(CacheSettings {
        comment_ttl: Duration::from_secs(secs),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_apply_when_nothing_is_configured() {
        let settings = Settings::from_raw(RawSettings::default()).unwrap();

        assert_eq!(settings.logging.level, LevelFilter::INFO);
        assert!(matches!(settings.logging.format, LogFormat::Compact));
        assert!(settings.database.url.is_none());
        assert_eq!(settings.database.max_connections.get(), 8);
        assert_eq!(settings.cache.comment_ttl, Duration::from_secs(10));
    }

    #[test]
    fn json_flag_selects_json_format() {
        let raw = RawSettings {
            logging: RawLoggingSettings {
                level: Some("debug".to_string()),
                json: Some(true),
            },
            ..RawSettings::default()
        };
        let settings = Settings::from_raw(raw).unwrap();

        assert_eq!(settings.logging.level, LevelFilter::DEBUG);
        assert!(matches!(settings.logging.format, LogFormat::Json));
    }

    #[test]
    fn unparsable_level_is_rejected() {
        let raw = RawSettings {
            logging: RawLoggingSettings {
                level: Some("chatty".to_string()),
                json: None,
            },
            ..RawSettings::default()
        };

        assert!(matches!(
            Settings::from_raw(raw),
            Err(LoadError::Invalid { key: "logging.level", .. })
        ));
    }

    #[test]
    fn blank_database_url_is_treated_as_unset() {
        let raw = RawSettings {
            database: RawDatabaseSettings {
                url: Some("   ".to_string()),
                max_connections: None,
            },
            ..RawSettings::default()
        };

        assert!(Settings::from_raw(raw).unwrap().database.url.is_none());
    }

    #[test]
    fn zero_ttl_is_rejected() {
        let raw = RawSettings {
            cache: RawCacheSettings {
                comment_ttl_seconds: Some(0),
            },
            ..RawSettings::default()
        };

        assert!(matches!(
            Settings::from_raw(raw),
            Err(LoadError::Invalid { key: "cache.comment_ttl_seconds", .. })
        ));
    }
}
