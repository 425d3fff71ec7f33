//! Use cases that change the catalog.

pub mod writer;

pub use writer::{CatalogWriter, FilmUpdate, NewFilm};
