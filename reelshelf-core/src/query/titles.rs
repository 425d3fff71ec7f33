//! Sort-key derivation shared with the model crate.

pub use reelshelf_model::titles::orderable_title;
