use std::fmt;

use thiserror::Error;

use super::models::{Config, QueryConfig};

const SLOW_SEARCH_TIMEOUT_MS: u64 = 30_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigGuardRailError {
    #[error("page_size_min ({min}) must not exceed page_size_max ({max})")]
    InvertedPageBounds { min: u32, max: u32 },
    #[error("{field} must be at least 1")]
    ZeroValue { field: &'static str },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub message: String,
    pub hint: Option<String>,
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.hint {
            Some(hint) => write!(f, "{} (hint: {hint})", self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ConfigWarnings {
    pub items: Vec<ConfigWarning>,
}

impl ConfigWarnings {
    pub fn push<S: Into<String>>(&mut self, message: S) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: None,
        });
    }

    pub fn push_with_hint<S: Into<String>, H: Into<String>>(&mut self, message: S, hint: H) {
        self.items.push(ConfigWarning {
            message: message.into(),
            hint: Some(hint.into()),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn extend(&mut self, other: ConfigWarnings) {
        self.items.extend(other.items);
    }

    pub fn iter(&self) -> impl Iterator<Item = &ConfigWarning> {
        self.items.iter()
    }

    pub fn contains(&self, needle: &str) -> bool {
        self.items.iter().any(|item| item.message.contains(needle))
    }
}

pub fn apply_guard_rails(config: &Config) -> Result<ConfigWarnings, ConfigGuardRailError> {
    let mut warnings = ConfigWarnings::default();

    validate_query(&config.query, &mut warnings)?;

    match &config.database.url {
        None => warnings.push_with_hint(
            "DATABASE_URL not configured; films are kept in an in-memory store and lost on restart",
            "Set DATABASE_URL or [database].url to persist the catalog in Postgres",
        ),
        Some(_) if config.database.max_connections == 0 => {
            return Err(ConfigGuardRailError::ZeroValue {
                field: "database.max_connections",
            });
        }
        Some(_) => {}
    }

    if config.search.enabled {
        if config.search.timeout_ms == 0 {
            return Err(ConfigGuardRailError::ZeroValue {
                field: "search.timeout_ms",
            });
        }
        if config.search.timeout_ms > SLOW_SEARCH_TIMEOUT_MS {
            warnings.push(format!(
                "search timeout of {}ms is unusually long; clients may give up first",
                config.search.timeout_ms
            ));
        }
    } else {
        warnings.push_with_hint(
            "Search is disabled; requests with a search term answer 503",
            "Set REELSHELF_SEARCH_ENABLED=true to enable the in-process index",
        );
    }

    Ok(warnings)
}

fn validate_query(
    query: &QueryConfig,
    warnings: &mut ConfigWarnings,
) -> Result<(), ConfigGuardRailError> {
    if query.page_size_min == 0 {
        return Err(ConfigGuardRailError::ZeroValue {
            field: "query.page_size_min",
        });
    }

    if query.page_size_min > query.page_size_max {
        return Err(ConfigGuardRailError::InvertedPageBounds {
            min: query.page_size_min,
            max: query.page_size_max,
        });
    }

    if !(query.page_size_min..=query.page_size_max).contains(&query.page_size_default) {
        warnings.push(format!(
            "page_size_default ({}) lies outside [{}, {}] and will be clamped",
            query.page_size_default, query.page_size_min, query.page_size_max
        ));
    }

    Ok(())
}
