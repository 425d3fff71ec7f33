pub mod sources;

use std::{path::PathBuf, time::Duration};

use reelshelf_core::{
    query::{PageBounds, QueryPolicy, SortDirection},
    search::MatchMode,
};

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
pub const DEFAULT_SEARCH_TIMEOUT_MS: u64 = 2_000;

/// Fully resolved runtime configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub query: QueryConfig,
    pub search: SearchConfig,
    pub metadata: ConfigMetadata,
}

impl Config {
    pub fn query_policy(&self) -> QueryPolicy {
        QueryPolicy {
            page_bounds: self.query.page_bounds(),
            default_direction: self.query.default_direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: None,
            max_connections: DEFAULT_MAX_CONNECTIONS,
            run_migrations: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryConfig {
    pub page_size_min: u32,
    pub page_size_max: u32,
    pub page_size_default: u32,
    pub default_direction: SortDirection,
}

impl QueryConfig {
    pub fn page_bounds(&self) -> PageBounds {
        PageBounds::new(
            self.page_size_min,
            self.page_size_max,
            self.page_size_default,
        )
    }
}

impl Default for QueryConfig {
    fn default() -> Self {
        let bounds = PageBounds::default();
        Self {
            page_size_min: bounds.min,
            page_size_max: bounds.max,
            page_size_default: bounds.default,
            default_direction: SortDirection::Asc,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchConfig {
    /// When false, requests with a search term are answered with 503.
    pub enabled: bool,
    pub fuzzy: bool,
    pub timeout_ms: u64,
}

impl SearchConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub fn match_mode(&self) -> MatchMode {
        if self.fuzzy {
            MatchMode::Fuzzy
        } else {
            MatchMode::Substring
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            fuzzy: true,
            timeout_ms: DEFAULT_SEARCH_TIMEOUT_MS,
        }
    }
}

/// Where the configuration came from.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigMetadata {
    pub config_path: Option<PathBuf>,
    pub env_file_loaded: bool,
}
