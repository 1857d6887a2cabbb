//! Film Shelf core
//!
//! This crate handles the parts of the film inventory that carry real logic:
//! - Resolving a (manufacturer, film name) pair to an image asset (catalog/, assets/)
//! - Storing user photos with a mirrored copy for the widget (store/)
//! - Turning a selection drawn over a camera preview into a pixel crop (crop/)
//!
//! Everything else (lists, steppers, settings) is UI that consumes these results.

pub mod assets;
pub mod catalog;
pub mod config;
pub mod crop;
pub mod error;
pub mod store;

pub use assets::{AssetLoader, AssetOrigin, AssetReference, AssetResolver, ImageSource};
pub use catalog::{AliasCatalog, CatalogHandle};
pub use config::Locations;
pub use crop::{Orientation, OrientedImage, PixelRect, Rect, Size};
pub use error::{CatalogError, CropError, PreferencesError, StoreError};
pub use store::{ImageStore, Preferences};
