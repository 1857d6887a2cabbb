//! Read-only roots of bundled `<manufacturer>_<film>.png` artwork.
//!
//! The app reads a flat directory. The widget reads the bootstrap copy in the
//! shared container, grouped by manufacturer. Both answer the same question:
//! where is the file for this stem, if it exists.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

/// Extension of every bundled artwork file
pub const BUNDLE_EXTENSION: &str = "png";

/// A source of bundled artwork addressed by stem (file name without extension)
pub trait AssetBundle {
    /// Path of the asset for `stem`, if it exists
    fn locate(&self, stem: &str) -> Option<PathBuf>;

    fn contains(&self, stem: &str) -> bool {
        self.locate(stem).is_some()
    }
}

impl<B: AssetBundle + ?Sized> AssetBundle for &B {
    fn locate(&self, stem: &str) -> Option<PathBuf> {
        (**self).locate(stem)
    }
}

/// One bundled artwork file, split into its manufacturer prefix and stem
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct BundleEntry {
    /// Text before the first underscore (e.g., "kodak")
    pub manufacturer: String,
    /// Whole file name without extension (e.g., "kodak_tmax_400")
    pub stem: String,
    pub path: PathBuf,
}

/// Split a stem at its first underscore. Film names may contain more.
pub fn split_stem(stem: &str) -> Option<(&str, &str)> {
    match stem.split_once('_') {
        Some((manufacturer, film)) if !manufacturer.is_empty() && !film.is_empty() => {
            Some((manufacturer, film))
        }
        _ => None,
    }
}

fn is_plain_stem(stem: &str) -> bool {
    !stem.is_empty() && !stem.contains(['/', '\\']) && stem != "." && stem != ".."
}

/// The extension matches `BUNDLE_EXTENSION` in any case ("png", "PNG", "Png")
fn has_bundle_extension(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.to_string_lossy().eq_ignore_ascii_case(BUNDLE_EXTENSION))
}

/// The artwork file directly under `dir` whose stem is exactly `stem`.
/// Stems compare case-sensitively, extensions do not.
fn find_artwork(dir: &Path, stem: &str) -> Option<PathBuf> {
    WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .map(|e| e.into_path())
        .find(|path| {
            has_bundle_extension(path) && path.file_stem().is_some_and(|s| s == stem)
        })
}

/// The app bundle: every asset sits directly under one root
#[derive(Debug, Clone)]
pub struct FlatBundle {
    root: PathBuf,
}

impl FlatBundle {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Every `<manufacturer>_<film>.png` under the root, sorted by manufacturer then stem.
    /// Files without an underscore are not artwork and are skipped.
    pub fn entries(&self) -> Vec<BundleEntry> {
        let mut entries: Vec<BundleEntry> = WalkDir::new(&self.root)
            .min_depth(1)
            .max_depth(1)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_type().is_file())
            .filter_map(|e| {
                let path = e.into_path();
                if !has_bundle_extension(&path) {
                    return None;
                }
                let stem = path.file_stem()?.to_str()?.to_string();
                let (manufacturer, _) = split_stem(&stem)?;
                Some(BundleEntry {
                    manufacturer: manufacturer.to_string(),
                    stem,
                    path,
                })
            })
            .collect();

        entries.sort();
        entries
    }

    /// Entries whose manufacturer prefix equals `manufacturer`, ignoring ASCII case.
    /// Used by catalog pickers.
    pub fn entries_for(&self, manufacturer: &str) -> Vec<BundleEntry> {
        self.entries()
            .into_iter()
            .filter(|entry| entry.manufacturer.eq_ignore_ascii_case(manufacturer))
            .collect()
    }
}

impl AssetBundle for FlatBundle {
    fn locate(&self, stem: &str) -> Option<PathBuf> {
        if !is_plain_stem(stem) {
            return None;
        }
        find_artwork(&self.root, stem)
    }
}

/// The bootstrap copy in the shared container:
/// `<root>/<manufacturer>/<manufacturer>_<film>.png`
#[derive(Debug, Clone)]
pub struct SharedDefaultImages {
    root: PathBuf,
}

impl SharedDefaultImages {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Where the bootstrap sync places the copy of `stem`; always a lowercase extension
    pub fn destination(&self, manufacturer: &str, stem: &str) -> PathBuf {
        self.root
            .join(manufacturer)
            .join(format!("{stem}.{BUNDLE_EXTENSION}"))
    }
}

impl AssetBundle for SharedDefaultImages {
    fn locate(&self, stem: &str) -> Option<PathBuf> {
        if !is_plain_stem(stem) {
            return None;
        }
        let (manufacturer, _) = split_stem(stem)?;
        find_artwork(&self.root.join(manufacturer), stem)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(path, b"png").unwrap();
    }

    #[test]
    fn test_split_stem_at_first_underscore() {
        assert_eq!(split_stem("kodak_tmax_400"), Some(("kodak", "tmax_400")));
        assert_eq!(split_stem("kodak"), None);
        assert_eq!(split_stem("_tmax"), None);
        assert_eq!(split_stem("kodak_"), None);
    }

    #[test]
    fn test_flat_bundle_entries() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("kodak_tmax_400.png"));
        touch(&dir.path().join("ilford_hp5.png"));
        touch(&dir.path().join("Kodak_Portra160.png"));
        touch(&dir.path().join("icon.png"));
        touch(&dir.path().join("manufacturers.json"));

        let bundle = FlatBundle::new(dir.path());
        let stems: Vec<String> = bundle.entries().into_iter().map(|e| e.stem).collect();

        assert_eq!(stems, vec!["Kodak_Portra160", "ilford_hp5", "kodak_tmax_400"]);
        assert_eq!(bundle.entries_for("KODAK").len(), 2);
    }

    #[test]
    fn test_flat_bundle_locate() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ilford_hp5.png"));

        let bundle = FlatBundle::new(dir.path());
        assert!(bundle.contains("ilford_hp5"));
        assert!(!bundle.contains("ilford_delta100"));
        assert!(!bundle.contains("../ilford_hp5"));
    }

    #[test]
    fn test_shared_default_images_locate() {
        let dir = tempfile::tempdir().unwrap();
        let shared = SharedDefaultImages::new(dir.path());
        touch(&shared.destination("kodak", "kodak_tmax_400"));

        assert_eq!(
            shared.locate("kodak_tmax_400"),
            Some(dir.path().join("kodak").join("kodak_tmax_400.png"))
        );
        assert!(!shared.contains("kodak"));
    }

    #[test]
    fn test_locate_ignores_extension_case() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("ilford_hp5.PNG"));
        touch(&dir.path().join("kodak").join("kodak_gold200.Png"));

        let flat = FlatBundle::new(dir.path());
        assert_eq!(flat.entries().len(), 1);
        assert_eq!(
            flat.locate("ilford_hp5"),
            Some(dir.path().join("ilford_hp5.PNG"))
        );
        // Stems stay case-sensitive
        assert!(!flat.contains("ilford_HP5"));

        let shared = SharedDefaultImages::new(dir.path());
        assert_eq!(
            shared.locate("kodak_gold200"),
            Some(dir.path().join("kodak").join("kodak_gold200.Png"))
        );
    }
}
