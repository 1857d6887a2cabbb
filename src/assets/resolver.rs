use tracing::debug;

use super::bundle::{split_stem, AssetBundle};
use super::source::ImageSource;
use crate::catalog::normalize::{capitalized, strip_non_alphanumerics};
use crate::catalog::AliasCatalog;

/// Separator in "<manufacturer>/<filename>" image names of custom images
pub const NAMESPACE_SEPARATOR: char = '/';

/// Which tier produced an asset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetOrigin {
    /// Bundled artwork found from the manufacturer and film name
    BundleDefault,
    /// A photo stored by `ImageStore`
    UserCaptured,
    /// Bundled artwork the user picked explicitly
    UserSelectedFromCatalog,
}

/// The concrete asset to load for a film.
///
/// Recomputed on every query and never persisted; film records only keep
/// their `ImageSource` and image name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AssetReference {
    /// Manufacturer namespace the identifier lives in
    pub namespace: String,
    /// Stored-photo identifier or bundled asset stem
    pub identifier: String,
    pub origin: AssetOrigin,
}

/// Lookup of stored user photos, implemented by `ImageStore`
pub trait UserPhotoIndex {
    fn contains(&self, namespace: &str, identifier: &str) -> bool;
}

impl<U: UserPhotoIndex + ?Sized> UserPhotoIndex for &U {
    fn contains(&self, namespace: &str, identifier: &str) -> bool {
        (**self).contains(namespace, identifier)
    }
}

/// Maps a film record to the asset that should be shown for it.
///
/// Pure over the catalog, the bundle and the user photo index: no writes,
/// no errors. A missing asset is `None` and the caller shows a placeholder.
#[derive(Debug)]
pub struct AssetResolver<'a, B, U> {
    catalog: &'a AliasCatalog,
    bundle: B,
    user_photos: U,
}

impl<'a, B: AssetBundle, U: UserPhotoIndex> AssetResolver<'a, B, U> {
    pub fn new(catalog: &'a AliasCatalog, bundle: B, user_photos: U) -> Self {
        Self {
            catalog,
            bundle,
            user_photos,
        }
    }

    /// Resolve a film record to its asset.
    ///
    /// # Arguments
    /// * `manufacturer` - Manufacturer as stored on the film record
    /// * `film_name` - Film name as the user typed it
    /// * `source` - Which tier the record uses
    /// * `image_name` - The record's explicit image name, if any
    pub fn resolve(
        &self,
        manufacturer: &str,
        film_name: &str,
        source: ImageSource,
        image_name: Option<&str>,
    ) -> Option<AssetReference> {
        match source {
            ImageSource::Custom => self.resolve_custom(manufacturer, image_name?),
            ImageSource::Catalog => self.resolve_catalog(image_name?),
            ImageSource::AutoDetected => self.resolve_auto(manufacturer, film_name),
            ImageSource::None => None,
        }
    }

    fn resolve_custom(&self, manufacturer: &str, image_name: &str) -> Option<AssetReference> {
        let (namespace, identifier) = match image_name.split_once(NAMESPACE_SEPARATOR) {
            Some((namespace, identifier)) => (namespace, identifier),
            None => (manufacturer, image_name),
        };

        if !self.user_photos.contains(namespace, identifier) {
            debug!("No stored photo {}/{}", namespace, identifier);
            return None;
        }

        Some(AssetReference {
            namespace: namespace.to_string(),
            identifier: identifier.to_string(),
            origin: AssetOrigin::UserCaptured,
        })
    }

    fn resolve_catalog(&self, stem: &str) -> Option<AssetReference> {
        if !self.bundle.contains(stem) {
            debug!("Catalog image {} is not bundled", stem);
            return None;
        }
        Some(bundled(stem, AssetOrigin::UserSelectedFromCatalog))
    }

    fn resolve_auto(&self, manufacturer: &str, film_name: &str) -> Option<AssetReference> {
        if let Some((entry, film)) = self.catalog.find(manufacturer, film_name) {
            let candidates = [
                format!("{}_{}", entry.name, film.canonical_filename),
                format!("{}_{}", entry.name.to_lowercase(), film.canonical_filename),
            ];
            if let Some(stem) = candidates.iter().find(|stem| self.bundle.contains(stem)) {
                return Some(bundled(stem, AssetOrigin::BundleDefault));
            }
            debug!(
                "Catalog matched {} {} but no artwork is bundled, guessing filenames",
                entry.name, film.canonical_filename
            );
        }

        guessed_stems(manufacturer, film_name)
            .into_iter()
            .find(|stem| self.bundle.contains(stem))
            .map(|stem| bundled(&stem, AssetOrigin::BundleDefault))
    }
}

fn bundled(stem: &str, origin: AssetOrigin) -> AssetReference {
    let namespace = split_stem(stem).map_or(stem, |(manufacturer, _)| manufacturer);
    AssetReference {
        namespace: namespace.to_string(),
        identifier: stem.to_string(),
        origin,
    }
}

/// Candidate bundled stems for an uncatalogued film, in the order they are tried.
///
/// Bundled filenames were authored with inconsistent casing, so every
/// known convention is tried. The order decides which file wins when
/// several exist and must not change without re-checking the full bundle.
pub fn guessed_stems(manufacturer: &str, film_name: &str) -> Vec<String> {
    let manufacturer = strip_non_alphanumerics(manufacturer);
    let film = strip_non_alphanumerics(film_name);
    if manufacturer.is_empty() || film.is_empty() {
        return Vec::new();
    }

    let m_lower = manufacturer.to_lowercase();
    let m_capitalized = capitalized(&manufacturer);
    let f_lower = film.to_lowercase();
    let f_capitalized = capitalized(&film);
    let f_upper = film.to_uppercase();

    let pairs = [
        (&m_lower, &f_lower),
        (&m_lower, &f_capitalized),
        (&m_lower, &f_upper),
        (&m_lower, &film),
        (&m_capitalized, &f_lower),
        (&m_capitalized, &f_capitalized),
        (&m_capitalized, &f_upper),
    ];

    let mut stems: Vec<String> = Vec::with_capacity(pairs.len());
    for (m, f) in pairs {
        let stem = format!("{m}_{f}");
        if !stems.contains(&stem) {
            stems.push(stem);
        }
    }
    stems
}
