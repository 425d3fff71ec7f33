//! Record persistence behind the [`CatalogStore`] port.
//!
//! Two adapters ship with the crate: an in-process map used by tests and the
//! no-database server mode, and the Postgres store.

pub mod memory;
#[cfg(feature = "database")]
pub mod postgres;
pub mod ports;

pub use memory::InMemoryCatalogStore;
#[cfg(feature = "database")]
pub use postgres::PostgresCatalogStore;
pub use ports::{CatalogStore, StoreQuery};
