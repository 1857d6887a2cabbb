use std::path::{Path, PathBuf};

/// JPEG quality for stored user photos (0-100).
/// 95 keeps images crisp at 2x/3x density in the widget.
pub const JPEG_QUALITY: u8 = 95;

/// Directory holding user photos, both in the primary root and the shared container
pub const USER_IMAGES_DIR: &str = "UserImages";

/// Directory in the shared container holding the bundled artwork copy
pub const DEFAULT_IMAGES_DIR: &str = "DefaultImages";

/// File name of the alias catalog, also used for its shared-container copy
pub const CATALOG_FILE_NAME: &str = "manufacturers.json";

/// Length of the random hex suffix appended to stored identifiers
pub const SUFFIX_HEX_LEN: usize = 8;

const APP_DIR: &str = "film-shelf";

/// Every filesystem location the core reads from or writes to.
///
/// Constructed once at startup and handed to `ImageStore`, the bundles
/// and the bootstrap sync.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locations {
    /// Root of the app's private data; user photos live in `<primary_root>/UserImages`
    pub primary_root: PathBuf,
    /// Root of the container shared with the widget process
    pub shared_container: PathBuf,
    /// Flat directory of bundled `<manufacturer>_<film>.png` artwork
    pub bundle_root: PathBuf,
    /// Alias catalog source shipped with the app
    pub catalog_file: PathBuf,
    /// SQLite file holding persisted one-time flags
    pub preferences_db: PathBuf,
}

impl Locations {
    /// Default locations for the current user.
    ///
    /// - Linux: ~/.local/share/film-shelf/
    /// - macOS: ~/Library/Application Support/film-shelf/
    /// - Windows: %APPDATA%\film-shelf\
    ///
    /// Returns None when neither a data nor a home directory can be determined.
    pub fn default_for_user() -> Option<Self> {
        let base = dirs::data_dir().or_else(dirs::home_dir)?;
        Some(Self::rooted_at(base.join(APP_DIR)))
    }

    /// The standard layout under an arbitrary root directory
    pub fn rooted_at(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            primary_root: root.join("app"),
            shared_container: root.join("shared"),
            bundle_root: root.join("bundle"),
            catalog_file: root.join("bundle").join(CATALOG_FILE_NAME),
            preferences_db: root.join("app").join("preferences.db"),
        }
    }

    /// `<primary_root>/UserImages`
    pub fn user_images(&self) -> PathBuf {
        self.primary_root.join(USER_IMAGES_DIR)
    }

    /// `<shared_container>/UserImages`
    pub fn shared_user_images(&self) -> PathBuf {
        self.shared_container.join(USER_IMAGES_DIR)
    }

    /// `<shared_container>/DefaultImages`
    pub fn shared_default_images(&self) -> PathBuf {
        self.shared_container.join(DEFAULT_IMAGES_DIR)
    }

    /// `<shared_container>/manufacturers.json`
    pub fn shared_catalog_file(&self) -> PathBuf {
        self.shared_container.join(CATALOG_FILE_NAME)
    }
}
