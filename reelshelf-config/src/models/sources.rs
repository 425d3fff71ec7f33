use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw configuration as defined in a TOML file.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct FileConfig {
    #[serde(default)]
    pub server: FileServerConfig,
    #[serde(default)]
    pub database: FileDatabaseConfig,
    #[serde(default)]
    pub query: FileQueryConfig,
    #[serde(default)]
    pub search: FileSearchConfig,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileServerConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileDatabaseConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_connections: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub run_migrations: Option<bool>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileQueryConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_min: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_max: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size_default: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_direction: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct FileSearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enabled: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fuzzy: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeout_ms: Option<u64>,
}

/// Environment-derived configuration values.
#[derive(Debug, Default, Clone)]
pub struct EnvConfig {
    pub config_path: Option<PathBuf>,
    pub server_host: Option<String>,
    pub server_port: Option<u16>,
    pub database_url: Option<String>,
    pub database_max_connections: Option<u32>,
    pub run_migrations: Option<bool>,
    pub page_size_min: Option<u32>,
    pub page_size_max: Option<u32>,
    pub page_size_default: Option<u32>,
    pub default_direction: Option<String>,
    pub search_enabled: Option<bool>,
    pub search_fuzzy: Option<bool>,
    pub search_timeout_ms: Option<u64>,
}

impl EnvConfig {
    pub fn gather() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Unparseable numbers and
    /// booleans are ignored.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());

        Self {
            config_path: var("REELSHELF_CONFIG").map(PathBuf::from),
            server_host: var("SERVER_HOST"),
            server_port: parse_var(&var, "SERVER_PORT"),
            database_url: var("DATABASE_URL"),
            database_max_connections: parse_var(&var, "DATABASE_MAX_CONNECTIONS"),
            run_migrations: parse_var_bool(&var, "REELSHELF_RUN_MIGRATIONS"),
            page_size_min: parse_var(&var, "REELSHELF_PAGE_SIZE_MIN"),
            page_size_max: parse_var(&var, "REELSHELF_PAGE_SIZE_MAX"),
            page_size_default: parse_var(&var, "REELSHELF_PAGE_SIZE_DEFAULT"),
            default_direction: var("REELSHELF_DEFAULT_DIRECTION"),
            search_enabled: parse_var_bool(&var, "REELSHELF_SEARCH_ENABLED"),
            search_fuzzy: parse_var_bool(&var, "REELSHELF_SEARCH_FUZZY"),
            search_timeout_ms: parse_var(&var, "REELSHELF_SEARCH_TIMEOUT_MS"),
        }
    }
}

fn parse_var<T, F>(var: &F, name: &str) -> Option<T>
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    var(name).and_then(|raw| raw.trim().parse().ok())
}

fn parse_var_bool<F>(var: &F, name: &str) -> Option<bool>
where
    F: Fn(&str) -> Option<String>,
{
    var(name).and_then(|raw| parse_bool(&raw))
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
