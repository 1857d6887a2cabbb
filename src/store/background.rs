/// Store operations for async hosts
///
/// Each wrapper moves one blocking store call onto tokio's blocking pool so
/// an interactive thread never waits on disk. No ordering is promised between
/// concurrent calls; two saves never collide thanks to the random suffix.

use image::DynamicImage;
use tokio::task;

use super::images::{ImageStore, StoredImage};
use crate::error::StoreError;

/// `ImageStore::save` on the blocking pool
pub async fn save_in_background(
    store: ImageStore,
    image: DynamicImage,
    manufacturer: String,
    film_name: String,
) -> Result<String, StoreError> {
    task::spawn_blocking(move || store.save(&image, &manufacturer, &film_name)).await?
}

/// `ImageStore::delete` on the blocking pool
pub async fn delete_in_background(
    store: ImageStore,
    identifier: String,
    manufacturer: String,
) -> Result<(), StoreError> {
    task::spawn_blocking(move || store.delete(&identifier, &manufacturer)).await?
}

/// `ImageStore::list_all`, fully decoded on the blocking pool
pub async fn list_in_background(store: ImageStore) -> Result<Vec<StoredImage>, StoreError> {
    Ok(task::spawn_blocking(move || store.list_all().collect()).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Locations;
    use image::{Rgb, RgbImage};

    #[tokio::test]
    async fn test_concurrent_saves_do_not_collide() {
        let dir = tempfile::tempdir().unwrap();
        let store = ImageStore::new(&Locations::rooted_at(dir.path()));
        let image = DynamicImage::ImageRgb8(RgbImage::from_pixel(32, 32, Rgb([90, 90, 200])));

        let (first, second) = tokio::join!(
            save_in_background(store.clone(), image.clone(), "Kodak".into(), "Tri-X".into()),
            save_in_background(store.clone(), image, "Kodak".into(), "Tri-X".into()),
        );
        let (first, second) = (first.unwrap(), second.unwrap());
        assert_ne!(first, second);

        let listed = list_in_background(store.clone()).await.unwrap();
        assert_eq!(listed.len(), 2);

        delete_in_background(store.clone(), first, "Kodak".into()).await.unwrap();
        delete_in_background(store.clone(), second, "Kodak".into()).await.unwrap();
        assert!(list_in_background(store).await.unwrap().is_empty());
    }
}
