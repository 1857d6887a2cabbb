use image::DynamicImage;
use tracing::warn;

use super::bundle::AssetBundle;
use super::resolver::{AssetOrigin, AssetReference};
use crate::store::ImageStore;

/// Decodes a resolved `AssetReference` into pixels.
///
/// User photos come from the store's primary directory, everything else
/// from the bundle the resolver checked.
#[derive(Debug)]
pub struct AssetLoader<'a, B> {
    store: &'a ImageStore,
    bundle: B,
}

impl<'a, B: AssetBundle> AssetLoader<'a, B> {
    pub fn new(store: &'a ImageStore, bundle: B) -> Self {
        Self { store, bundle }
    }

    /// Decode the asset, or None if it vanished or cannot be decoded
    pub fn load(&self, reference: &AssetReference) -> Option<DynamicImage> {
        match reference.origin {
            AssetOrigin::UserCaptured => {
                self.store.load(&reference.identifier, &reference.namespace)
            }
            AssetOrigin::BundleDefault | AssetOrigin::UserSelectedFromCatalog => {
                let path = self.bundle.locate(&reference.identifier)?;
                match image::open(&path) {
                    Ok(img) => Some(img),
                    Err(e) => {
                        warn!("⚠️  Failed to decode bundled image {}: {}", path.display(), e);
                        None
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{AssetResolver, FlatBundle, ImageSource};
    use crate::catalog::AliasCatalog;
    use crate::config::Locations;
    use image::{ImageFormat, Rgb, RgbImage};

    #[test]
    fn test_load_bundled_and_user_assets() {
        let dir = tempfile::tempdir().unwrap();
        let locations = Locations::rooted_at(dir.path());
        std::fs::create_dir_all(&locations.bundle_root).unwrap();

        let artwork = RgbImage::from_pixel(8, 4, Rgb([200, 30, 30]));
        artwork
            .save_with_format(
                locations.bundle_root.join("ilford_hp5.png"),
                ImageFormat::Png,
            )
            .unwrap();

        let store = ImageStore::new(&locations);
        let photo = DynamicImage::ImageRgb8(RgbImage::from_pixel(16, 16, Rgb([10, 120, 10])));
        let identifier = store.save(&photo, "Ilford", "HP5 Plus").unwrap();

        let catalog = AliasCatalog::empty();
        let bundle = FlatBundle::new(&locations.bundle_root);
        let resolver = AssetResolver::new(&catalog, &bundle, &store);
        let loader = AssetLoader::new(&store, &bundle);

        let auto = resolver
            .resolve("Ilford", "HP5", ImageSource::AutoDetected, None)
            .unwrap();
        let img = loader.load(&auto).unwrap();
        assert_eq!((img.width(), img.height()), (8, 4));

        let custom = resolver
            .resolve("Ilford", "HP5 Plus", ImageSource::Custom, Some(identifier.as_str()))
            .unwrap();
        let img = loader.load(&custom).unwrap();
        assert_eq!((img.width(), img.height()), (16, 16));
    }
}
