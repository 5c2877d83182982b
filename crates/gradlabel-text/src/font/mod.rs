//! Font loading and matching module

mod database;
mod face;
mod matching;

pub use database::FontDatabase;
pub use face::FontMetrics;
pub use matching::FontQuery;

/// Unique identifier for a loaded font
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct FontId(pub fontdb::ID);
