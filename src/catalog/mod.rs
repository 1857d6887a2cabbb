/// Film catalog module
///
/// This module handles:
/// - Canonicalizing free-text names for comparison (normalize.rs)
/// - The manufacturer -> film -> aliases table (data.rs)
/// - Loading the table and answering alias queries (alias.rs)

pub mod alias;
pub mod data;
pub mod normalize;

pub use alias::{AliasCatalog, CatalogHandle};
pub use data::{FilmCatalogEntry, ManufacturerCatalogEntry};
pub use normalize::normalize;
