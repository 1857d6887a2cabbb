use std::fs;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use image::codecs::jpeg::JpegEncoder;
use image::DynamicImage;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::assets::UserPhotoIndex;
use crate::catalog::normalize;
use crate::config::{Locations, JPEG_QUALITY, SUFFIX_HEX_LEN};
use crate::crop::OrientedImage;
use crate::error::StoreError;

/// Extensions recognized as stored photos (compared case-insensitively)
const PHOTO_EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];

/// Slug used when a film name has no letters or digits at all
const FALLBACK_SLUG: &str = "film";

/// Durable storage for user photos.
///
/// Layout: `<primary>/<manufacturer>/<identifier>.jpg`, with a byte-identical
/// copy under `<mirror>/<manufacturer>/<identifier>.jpg` for the widget.
/// This is the only writer of both trees. Reads only ever use the primary.
#[derive(Debug, Clone)]
pub struct ImageStore {
    primary: PathBuf,
    mirror: PathBuf,
}

/// A stored photo found by `ImageStore::entries`, not yet decoded
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct StoredImageEntry {
    pub manufacturer: String,
    pub identifier: String,
    pub path: PathBuf,
}

/// A decoded stored photo yielded by `ImageStore::list_all`
#[derive(Debug, Clone)]
pub struct StoredImage {
    pub identifier: String,
    pub manufacturer: String,
    pub image: DynamicImage,
}

impl ImageStore {
    /// Store rooted at `UserImages` in the primary root and the shared container
    pub fn new(locations: &Locations) -> Self {
        Self::with_roots(locations.user_images(), locations.shared_user_images())
    }

    pub fn with_roots(primary: impl Into<PathBuf>, mirror: impl Into<PathBuf>) -> Self {
        Self {
            primary: primary.into(),
            mirror: mirror.into(),
        }
    }

    pub fn primary_root(&self) -> &Path {
        &self.primary
    }

    pub fn mirror_root(&self) -> &Path {
        &self.mirror
    }

    /// Encode `image` as JPEG and store it for `manufacturer`.
    ///
    /// Returns the generated identifier: the film name slug plus a random
    /// 8-hex suffix (e.g., "hp5plus_3fa9c01b"). The mirror copy is best
    /// effort; if it fails the save still succeeds.
    pub fn save(
        &self,
        image: &DynamicImage,
        manufacturer: &str,
        film_name: &str,
    ) -> Result<String, StoreError> {
        check_segment(manufacturer)?;

        let bytes = encode_jpeg(image)?;
        let dir = self.primary.join(manufacturer);
        fs::create_dir_all(&dir).map_err(|source| StoreError::WriteFailed {
            path: dir.clone(),
            source,
        })?;

        let identifier = self.unused_identifier(&dir, film_name);
        let path = dir.join(format!("{identifier}.jpg"));
        fs::write(&path, &bytes).map_err(|source| StoreError::WriteFailed {
            path: path.clone(),
            source,
        })?;

        info!(
            "📸 Saved photo {}/{} ({}KB)",
            manufacturer,
            identifier,
            bytes.len() / 1024
        );

        if let Err(e) = self.write_mirror(manufacturer, &identifier, &bytes) {
            warn!(
                "⚠️  Mirror copy of {}/{} failed, widget will not see it yet: {}",
                manufacturer, identifier, e
            );
        }

        Ok(identifier)
    }

    /// Store a captured photo, baking its orientation into the pixels first
    pub fn save_capture(
        &self,
        capture: OrientedImage,
        manufacturer: &str,
        film_name: &str,
    ) -> Result<String, StoreError> {
        let upright = capture.into_upright();
        self.save(&upright, manufacturer, film_name)
    }

    /// Decode a stored photo from the primary directory
    pub fn load(&self, identifier: &str, manufacturer: &str) -> Option<DynamicImage> {
        let path = self.locate(identifier, manufacturer)?;
        match image::open(&path) {
            Ok(img) => Some(img),
            Err(e) => {
                warn!("⚠️  Failed to decode stored photo {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Path of a stored photo in the primary directory, if it exists
    pub fn locate(&self, identifier: &str, manufacturer: &str) -> Option<PathBuf> {
        find_photo(&self.primary, identifier, manufacturer)
    }

    /// Remove a photo and its mirror copy, then prune manufacturer folders
    /// left empty in either tree.
    ///
    /// Deleting something that is already gone is not an error.
    pub fn delete(&self, identifier: &str, manufacturer: &str) -> Result<(), StoreError> {
        if check_segment(manufacturer).is_err() || check_segment(identifier).is_err() {
            debug!(
                "Ignoring delete of invalid photo name {:?}/{:?}",
                manufacturer, identifier
            );
            return Ok(());
        }

        let dir = self.primary.join(manufacturer);
        for path in photo_paths(&dir, identifier) {
            match fs::remove_file(&path) {
                Ok(()) => info!("🗑️  Deleted photo {}", path.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(source) => return Err(StoreError::RemoveFailed { path, source }),
            }
        }
        if let Err(e) = remove_dir_if_empty(&dir) {
            warn!("⚠️  Could not prune {}: {}", dir.display(), e);
        }

        let mirror_dir = self.mirror.join(manufacturer);
        for path in photo_paths(&mirror_dir, identifier) {
            if let Err(e) = fs::remove_file(&path) {
                if e.kind() != ErrorKind::NotFound {
                    warn!("⚠️  Could not remove mirror copy {}: {}", path.display(), e);
                }
            }
        }
        if let Err(e) = remove_dir_if_empty(&mirror_dir) {
            warn!("⚠️  Could not prune {}: {}", mirror_dir.display(), e);
        }

        Ok(())
    }

    /// Every stored photo, sorted by manufacturer then identifier, without decoding
    pub fn entries(&self) -> Vec<StoredImageEntry> {
        let mut entries: Vec<StoredImageEntry> = WalkDir::new(&self.primary)
            .min_depth(2)
            .max_depth(2)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.into_path();
                if !has_photo_extension(&path) {
                    return None;
                }
                let identifier = path.file_stem()?.to_str()?.to_string();
                let manufacturer = path.parent()?.file_name()?.to_str()?.to_string();
                Some(StoredImageEntry {
                    manufacturer,
                    identifier,
                    path,
                })
            })
            .collect();

        entries.sort();
        entries
    }

    /// Every stored photo, sorted by manufacturer then identifier.
    ///
    /// Decoding happens as the iterator advances. Files that fail to decode
    /// are skipped.
    pub fn list_all(&self) -> impl Iterator<Item = StoredImage> {
        self.entries().into_iter().filter_map(|entry| match image::open(&entry.path) {
            Ok(image) => Some(StoredImage {
                identifier: entry.identifier,
                manufacturer: entry.manufacturer,
                image,
            }),
            Err(e) => {
                warn!("⚠️  Skipping undecodable photo {}: {}", entry.path.display(), e);
                None
            }
        })
    }

    fn unused_identifier(&self, dir: &Path, film_name: &str) -> String {
        let mut identifier = generate_identifier(film_name);
        // A clash needs two equal 32-bit suffixes; retry a few times anyway
        for _ in 0..4 {
            if photo_paths(dir, &identifier).is_empty() {
                break;
            }
            identifier = generate_identifier(film_name);
        }
        identifier
    }

    fn write_mirror(&self, manufacturer: &str, identifier: &str, bytes: &[u8]) -> io::Result<()> {
        let dir = self.mirror.join(manufacturer);
        fs::create_dir_all(&dir)?;
        fs::write(dir.join(format!("{identifier}.jpg")), bytes)
    }
}

impl UserPhotoIndex for ImageStore {
    fn contains(&self, namespace: &str, identifier: &str) -> bool {
        self.locate(identifier, namespace).is_some()
    }
}

/// `<slug>_<8 hex>` where slug is the normalized film name
pub fn generate_identifier(film_name: &str) -> String {
    let slug = normalize(film_name);
    let slug = if slug.is_empty() { FALLBACK_SLUG.to_string() } else { slug };
    let suffix: u32 = rand::random();
    format!("{slug}_{suffix:0width$x}", width = SUFFIX_HEX_LEN)
}

fn encode_jpeg(image: &DynamicImage) -> Result<Vec<u8>, StoreError> {
    // JPEG has no alpha channel
    let rgb = image.to_rgb8();
    let mut bytes = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut bytes, JPEG_QUALITY);
    encoder.encode_image(&rgb)?;
    Ok(bytes)
}

/// Manufacturer names and identifiers become single path components
fn check_segment(segment: &str) -> Result<(), StoreError> {
    if segment.is_empty() || segment == "." || segment == ".." || segment.contains(['/', '\\']) {
        return Err(StoreError::InvalidNamespace(segment.to_string()));
    }
    Ok(())
}

fn has_photo_extension(path: &Path) -> bool {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .is_some_and(|ext| PHOTO_EXTENSIONS.contains(&ext.as_str()))
}

/// Files in `dir` whose stem is `identifier` and whose extension is a photo
/// extension in any case (e.g., "x.jpg", "x.JPEG", "x.Jpg")
fn photo_paths(dir: &Path, identifier: &str) -> Vec<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .filter(|path| has_photo_extension(path))
        .filter(|path| path.file_stem().is_some_and(|stem| stem == identifier))
        .collect()
}

fn find_photo(root: &Path, identifier: &str, manufacturer: &str) -> Option<PathBuf> {
    check_segment(manufacturer).ok()?;
    check_segment(identifier).ok()?;
    photo_paths(&root.join(manufacturer), identifier).into_iter().next()
}

/// Remove `dir` if it has no entries. A missing directory counts as removed.
fn remove_dir_if_empty(dir: &Path) -> io::Result<()> {
    let mut entries = match fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(()),
        Err(e) => return Err(e),
    };
    if entries.next().is_some() {
        return Ok(());
    }
    match fs::remove_dir(dir) {
        Ok(()) => {
            debug!("Pruned empty folder {}", dir.display());
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e),
    }
}
