//! One-time copy of bundled artwork and the alias catalog into the shared
//! container, so the widget can resolve images without its own bundle.
//!
//! Guarded by a persisted flag. Bumping `BOOTSTRAP_FLAG` (and moving the old
//! name into `LEGACY_BOOTSTRAP_FLAGS`) makes every install run it again once.

use std::fs;
use std::io;
use std::path::Path;

use tracing::{debug, info, warn};

use super::preferences::Preferences;
use crate::assets::bundle::{FlatBundle, SharedDefaultImages};
use crate::config::Locations;
use crate::error::StoreError;

/// Flag marking the current version of the copy as done
pub const BOOTSTRAP_FLAG: &str = "default_images_copied_v2";

/// Flags of earlier versions, cleared on every run
pub const LEGACY_BOOTSTRAP_FLAGS: &[&str] = &["default_images_copied"];

/// What a bootstrap run did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BootstrapOutcome {
    /// The flag was already set, nothing was touched
    AlreadyDone,
    Copied(SyncReport),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SyncReport {
    pub images_copied: usize,
    pub images_failed: usize,
    pub catalog_copied: bool,
}

/// Run the bootstrap copy unless this version already ran.
///
/// Individual copy failures are logged and counted; the flag is still set
/// so a broken file does not retrigger the whole copy on every launch.
/// Copies overwrite, so a run interrupted before the flag is set simply
/// repeats next time.
pub fn copy_default_images_to_shared_container(
    locations: &Locations,
    prefs: &Preferences,
) -> Result<BootstrapOutcome, StoreError> {
    for legacy in LEGACY_BOOTSTRAP_FLAGS {
        prefs.clear(legacy)?;
    }

    if prefs.is_set(BOOTSTRAP_FLAG)? {
        debug!("Default images already copied ({})", BOOTSTRAP_FLAG);
        return Ok(BootstrapOutcome::AlreadyDone);
    }

    let report = sync_default_images(
        &FlatBundle::new(&locations.bundle_root),
        &SharedDefaultImages::new(locations.shared_default_images()),
        &locations.catalog_file,
        &locations.shared_catalog_file(),
    );

    prefs.set(BOOTSTRAP_FLAG)?;

    info!(
        "✅ Copied {} default images to shared container ({} failed, catalog copied: {})",
        report.images_copied, report.images_failed, report.catalog_copied
    );

    Ok(BootstrapOutcome::Copied(report))
}

/// Copy every bundled artwork file into `<manufacturer>/` folders under
/// `shared`, plus the catalog file. Not guarded by any flag.
pub fn sync_default_images(
    bundle: &FlatBundle,
    shared: &SharedDefaultImages,
    catalog_src: &Path,
    catalog_dest: &Path,
) -> SyncReport {
    let mut report = SyncReport::default();

    for entry in bundle.entries() {
        let dest = shared.destination(&entry.manufacturer, &entry.stem);
        match copy_file(&entry.path, &dest) {
            Ok(()) => report.images_copied += 1,
            Err(e) => {
                warn!(
                    "⚠️  Failed to copy {} to {}: {}",
                    entry.path.display(),
                    dest.display(),
                    e
                );
                report.images_failed += 1;
            }
        }
    }

    match copy_file(catalog_src, catalog_dest) {
        Ok(()) => report.catalog_copied = true,
        Err(e) => warn!("⚠️  Failed to copy catalog {}: {}", catalog_src.display(), e),
    }

    report
}

fn copy_file(src: &Path, dest: &Path) -> io::Result<()> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::copy(src, dest)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::AssetBundle;
    use crate::catalog::AliasCatalog;

    fn bundled_locations(dir: &Path) -> Locations {
        let locations = Locations::rooted_at(dir);
        fs::create_dir_all(&locations.bundle_root).unwrap();
        for stem in ["kodak_tmax_400", "kodak_portra160", "ilford_hp5"] {
            fs::write(locations.bundle_root.join(format!("{stem}.png")), stem.as_bytes()).unwrap();
        }
        fs::write(
            &locations.catalog_file,
            r#"{ "manufacturers": [ { "name": "Ilford", "films": [ { "filename": "hp5", "aliases": [] } ] } ] }"#,
        )
        .unwrap();
        locations
    }

    #[test]
    fn test_copies_grouped_by_first_underscore() {
        let dir = tempfile::tempdir().unwrap();
        let locations = bundled_locations(dir.path());
        let prefs = Preferences::open_in_memory().unwrap();

        let outcome = copy_default_images_to_shared_container(&locations, &prefs).unwrap();

        assert_eq!(
            outcome,
            BootstrapOutcome::Copied(SyncReport {
                images_copied: 3,
                images_failed: 0,
                catalog_copied: true,
            })
        );
        let shared = locations.shared_default_images();
        assert_eq!(
            fs::read(shared.join("kodak").join("kodak_tmax_400.png")).unwrap(),
            b"kodak_tmax_400"
        );
        assert!(shared.join("ilford").join("ilford_hp5.png").is_file());
        assert!(!shared.join("kodak_tmax").exists());

        // The widget can resolve from the copy alone
        let widget_catalog = AliasCatalog::load(&locations.shared_catalog_file()).unwrap();
        assert!(widget_catalog.find("ilford", "HP5").is_some());
        assert!(SharedDefaultImages::new(&shared).contains("kodak_portra160"));
    }

    #[test]
    fn test_runs_once() {
        let dir = tempfile::tempdir().unwrap();
        let locations = bundled_locations(dir.path());
        let prefs = Preferences::open_in_memory().unwrap();

        copy_default_images_to_shared_container(&locations, &prefs).unwrap();
        fs::remove_dir_all(locations.shared_default_images()).unwrap();

        let second = copy_default_images_to_shared_container(&locations, &prefs).unwrap();
        assert_eq!(second, BootstrapOutcome::AlreadyDone);
        assert!(!locations.shared_default_images().exists());
    }

    #[test]
    fn test_legacy_flag_does_not_skip() {
        let dir = tempfile::tempdir().unwrap();
        let locations = bundled_locations(dir.path());
        let prefs = Preferences::open_in_memory().unwrap();
        prefs.set("default_images_copied").unwrap();

        let outcome = copy_default_images_to_shared_container(&locations, &prefs).unwrap();

        assert!(matches!(outcome, BootstrapOutcome::Copied(_)));
        assert!(!prefs.is_set("default_images_copied").unwrap());
        assert!(prefs.is_set(BOOTSTRAP_FLAG).unwrap());
    }

    #[test]
    fn test_missing_catalog_still_sets_flag() {
        let dir = tempfile::tempdir().unwrap();
        let locations = bundled_locations(dir.path());
        fs::remove_file(&locations.catalog_file).unwrap();
        let prefs = Preferences::open_in_memory().unwrap();

        let outcome = copy_default_images_to_shared_container(&locations, &prefs).unwrap();

        match outcome {
            BootstrapOutcome::Copied(report) => {
                assert_eq!(report.images_copied, 3);
                assert!(!report.catalog_copied);
            }
            other => panic!("expected a copy, got {other:?}"),
        }
        assert!(prefs.is_set(BOOTSTRAP_FLAG).unwrap());
    }

    #[test]
    fn test_sync_overwrites_partial_copies() {
        let dir = tempfile::tempdir().unwrap();
        let locations = bundled_locations(dir.path());
        let shared = SharedDefaultImages::new(locations.shared_default_images());
        let partial = shared.destination("ilford", "ilford_hp5");
        fs::create_dir_all(partial.parent().unwrap()).unwrap();
        fs::write(&partial, b"ilf").unwrap();

        sync_default_images(
            &FlatBundle::new(&locations.bundle_root),
            &shared,
            &locations.catalog_file,
            &locations.shared_catalog_file(),
        );

        assert_eq!(fs::read(&partial).unwrap(), b"ilford_hp5");
    }
}
