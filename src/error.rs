use std::path::PathBuf;

/// The alias catalog could not be read or parsed.
///
/// Callers normally never see this: `AliasCatalog::load_or_empty` turns it
/// into an empty catalog and resolution falls through to filename guessing.
#[derive(thiserror::Error, Debug)]
pub enum CatalogError {
    #[error("catalog source {path} could not be read: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalog source {path} is malformed: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Failures surfaced by the image store.
///
/// Mirror writes never produce one of these, they are logged and dropped.
#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("invalid manufacturer namespace {0:?}")]
    InvalidNamespace(String),
    #[error("failed to encode image as JPEG: {0}")]
    Encode(#[from] image::ImageError),
    #[error("failed to write {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to remove {path}: {source}")]
    RemoveFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
    #[error(transparent)]
    Preferences(#[from] PreferencesError),
}

#[derive(thiserror::Error, Debug)]
pub enum PreferencesError {
    #[error("failed to create preferences directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("preferences database error: {0}")]
    Sql(#[from] rusqlite::Error),
}

/// A crop request that cannot produce a usable region.
///
/// Every variant means the same thing to the caller: keep the uncropped image.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq)]
pub enum CropError {
    #[error("viewport has no area")]
    EmptyViewport,
    #[error("source image has no pixels")]
    EmptySource,
    #[error("crop collapsed to {width}x{height} after clamping")]
    DegenerateCrop { width: f64, height: f64 },
}
