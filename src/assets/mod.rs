/// Asset resolution module
///
/// This module handles:
/// - The persisted image-source tag of a film record (source.rs)
/// - Read-only roots of bundled artwork (bundle.rs)
/// - Mapping (manufacturer, film name, source, image name) to an asset (resolver.rs)
/// - Decoding a resolved asset into pixels (loader.rs)

pub mod bundle;
pub mod loader;
pub mod resolver;
pub mod source;

pub use bundle::{AssetBundle, BundleEntry, FlatBundle, SharedDefaultImages};
pub use loader::AssetLoader;
pub use resolver::{AssetOrigin, AssetReference, AssetResolver, UserPhotoIndex};
pub use source::ImageSource;
