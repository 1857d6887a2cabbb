/// Storage module
///
/// This module handles:
/// - User photos under manufacturer folders, mirrored for the widget (images.rs)
/// - Persisted one-time flags (preferences.rs)
/// - Copying bundled artwork and the catalog into the shared container (bootstrap.rs)
/// - Running store work off the interactive thread (background.rs)

pub mod background;
pub mod bootstrap;
pub mod images;
pub mod preferences;

pub use bootstrap::{copy_default_images_to_shared_container, BootstrapOutcome};
pub use images::{ImageStore, StoredImage, StoredImageEntry};
pub use preferences::Preferences;
