//! Configuration loading for Reelshelf.
//!
//! Values are resolved in layers: a `.env` file (if any) is merged into the
//! process environment, an optional TOML file supplies the base, and
//! environment variables override it. Validation runs last and either
//! rejects the result or attaches [`ConfigWarnings`] for the operator.

pub mod loader;
pub mod models;
pub mod validation;

pub use loader::{ConfigLoad, ConfigLoadError, ConfigLoader, ConfigLoaderOptions};
pub use models::sources::{EnvConfig, FileConfig};
pub use models::{
    Config, ConfigMetadata, DatabaseConfig, QueryConfig, SearchConfig, ServerConfig,
};
pub use validation::{ConfigGuardRailError, ConfigWarning, ConfigWarnings};
