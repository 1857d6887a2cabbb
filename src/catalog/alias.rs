use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{debug, warn};

use super::data::{CatalogDocument, FilmCatalogEntry, ManufacturerCatalogEntry};
use super::normalize::normalize;
use crate::error::CatalogError;

/// The manufacturer -> film -> aliases table.
///
/// Lookups are exact equality on normalized strings. When several films
/// of one manufacturer share a normalized name the first listed wins;
/// keeping aliases unique is up to whoever edits the catalog.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AliasCatalog {
    manufacturers: Vec<ManufacturerCatalogEntry>,
}

impl AliasCatalog {
    pub fn new(manufacturers: Vec<ManufacturerCatalogEntry>) -> Self {
        Self { manufacturers }
    }

    /// A catalog with no manufacturers; every `find` misses
    pub fn empty() -> Self {
        Self::default()
    }

    /// Read and parse the catalog source at `path`
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let json = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_json(&json).map_err(|source| CatalogError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a catalog document held in memory
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let doc: CatalogDocument = serde_json::from_str(json)?;
        Ok(Self::new(doc.manufacturers))
    }

    /// Load the catalog, degrading to an empty one if the source is
    /// missing or corrupt. Resolution then relies on filename guessing.
    pub fn load_or_empty(path: &Path) -> Self {
        match Self::load(path) {
            Ok(catalog) => {
                debug!(
                    manufacturers = catalog.manufacturers.len(),
                    "📚 Loaded film catalog from {}",
                    path.display()
                );
                catalog
            }
            Err(e) => {
                warn!("⚠️  Film catalog unavailable, continuing with an empty catalog: {e}");
                Self::empty()
            }
        }
    }

    pub fn is_empty(&self) -> bool {
        self.manufacturers.is_empty()
    }

    /// Every manufacturer in catalog order
    pub fn manufacturers(&self) -> &[ManufacturerCatalogEntry] {
        &self.manufacturers
    }

    /// Films of the manufacturer whose normalized name matches, if any
    pub fn films_of(&self, manufacturer: &str) -> Option<&[FilmCatalogEntry]> {
        self.manufacturer(manufacturer).map(|entry| entry.films.as_slice())
    }

    /// Find the film a user meant by `film_name`.
    ///
    /// The manufacturer must match exactly after normalization. The film
    /// name is matched against each film's canonical filename and aliases,
    /// also normalized, first hit wins.
    pub fn find(
        &self,
        manufacturer: &str,
        film_name: &str,
    ) -> Option<(&ManufacturerCatalogEntry, &FilmCatalogEntry)> {
        let entry = self.manufacturer(manufacturer)?;
        let wanted = normalize(film_name);
        if wanted.is_empty() {
            return None;
        }

        entry
            .films
            .iter()
            .find(|film| film.names().any(|name| normalize(name) == wanted))
            .map(|film| (entry, film))
    }

    fn manufacturer(&self, manufacturer: &str) -> Option<&ManufacturerCatalogEntry> {
        let wanted = normalize(manufacturer);
        if wanted.is_empty() {
            return None;
        }
        self.manufacturers
            .iter()
            .find(|entry| normalize(&entry.name) == wanted)
    }
}

/// Loads the catalog on first use and keeps it for the life of the handle.
///
/// Hosts create one handle at startup and share it; there is no global.
#[derive(Debug)]
pub struct CatalogHandle {
    path: PathBuf,
    catalog: OnceLock<AliasCatalog>,
}

impl CatalogHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            catalog: OnceLock::new(),
        }
    }

    /// A handle that is already loaded, never touching the filesystem
    pub fn preloaded(catalog: AliasCatalog) -> Self {
        let cell = OnceLock::new();
        let _ = cell.set(catalog);
        Self {
            path: PathBuf::new(),
            catalog: cell,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The catalog, loading it on the first call
    pub fn get(&self) -> &AliasCatalog {
        self.catalog
            .get_or_init(|| AliasCatalog::load_or_empty(&self.path))
    }
}
