use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Where a film record's image comes from.
///
/// Stored next to the film record as a string tag and decoded here, at the
/// persistence edge. Business logic only ever sees the enum.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ImageSource {
    /// A photo the user captured, stored by `ImageStore`
    #[serde(rename = "custom")]
    Custom,
    /// Bundled artwork the user picked from the catalog
    #[serde(rename = "catalog")]
    Catalog,
    /// Bundled artwork found from the manufacturer and film name
    #[default]
    #[serde(rename = "autoDetected")]
    AutoDetected,
    /// The user explicitly chose no image
    #[serde(rename = "none")]
    None,
}

impl ImageSource {
    /// The persisted string form
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageSource::Custom => "custom",
            ImageSource::Catalog => "catalog",
            ImageSource::AutoDetected => "autoDetected",
            ImageSource::None => "none",
        }
    }
}

impl fmt::Display for ImageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown image source tag {0:?}")]
pub struct UnknownImageSource(pub String);

impl FromStr for ImageSource {
    type Err = UnknownImageSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "custom" => Ok(ImageSource::Custom),
            "catalog" => Ok(ImageSource::Catalog),
            "autoDetected" => Ok(ImageSource::AutoDetected),
            "none" => Ok(ImageSource::None),
            other => Err(UnknownImageSource(other.to_string())),
        }
    }
}
