use image::DynamicImage;

/// How a photo's raw pixels must be transformed to display upright.
///
/// Values follow the EXIF orientation tag (1-8). Cropping happens on raw
/// pixels; the tag is carried to the output so it still renders upright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Orientation {
    #[default]
    Up,
    UpMirrored,
    Down,
    DownMirrored,
    LeftMirrored,
    Right,
    RightMirrored,
    Left,
}

impl Orientation {
    /// Unknown tags are treated as `Up`
    pub fn from_exif(value: u32) -> Self {
        match value {
            2 => Self::UpMirrored,
            3 => Self::Down,
            4 => Self::DownMirrored,
            5 => Self::LeftMirrored,
            6 => Self::Right,
            7 => Self::RightMirrored,
            8 => Self::Left,
            _ => Self::Up,
        }
    }

    pub fn to_exif(self) -> u32 {
        match self {
            Self::Up => 1,
            Self::UpMirrored => 2,
            Self::Down => 3,
            Self::DownMirrored => 4,
            Self::LeftMirrored => 5,
            Self::Right => 6,
            Self::RightMirrored => 7,
            Self::Left => 8,
        }
    }

    /// Whether displaying upright swaps width and height
    pub fn swaps_dimensions(self) -> bool {
        matches!(
            self,
            Self::LeftMirrored | Self::Right | Self::RightMirrored | Self::Left
        )
    }

    /// Rotate/flip raw pixels so they display upright
    #[must_use]
    pub fn apply(self, img: DynamicImage) -> DynamicImage {
        match self {
            Self::Up => img,
            Self::UpMirrored => img.fliph(),
            Self::Down => img.rotate180(),
            Self::DownMirrored => img.flipv(),
            Self::LeftMirrored => img.fliph().rotate270(),
            Self::Right => img.rotate90(),
            Self::RightMirrored => img.fliph().rotate90(),
            Self::Left => img.rotate270(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_exif_tags() {
        for tag in 1..=8 {
            assert_eq!(Orientation::from_exif(tag).to_exif(), tag);
        }
        assert_eq!(Orientation::from_exif(0), Orientation::Up);
        assert_eq!(Orientation::from_exif(42), Orientation::Up);
    }

    #[test]
    fn test_right_rotates_clockwise() {
        let mut raw = RgbImage::new(4, 2);
        raw.put_pixel(0, 0, Rgb([255, 0, 0]));

        let upright = Orientation::Right.apply(DynamicImage::ImageRgb8(raw)).to_rgb8();

        assert_eq!(upright.dimensions(), (2, 4));
        // Top-left of the raw sensor ends up top-right
        assert_eq!(upright.get_pixel(1, 0), &Rgb([255, 0, 0]));
        assert!(Orientation::Right.swaps_dimensions());
    }
}
