/// Data structures for the alias catalog
///
/// These mirror the catalog source document one to one and are
/// immutable once loaded.

use serde::{Deserialize, Serialize};

/// Root of the catalog source document
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct CatalogDocument {
    pub manufacturers: Vec<ManufacturerCatalogEntry>,
}

/// A manufacturer and every film it makes
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ManufacturerCatalogEntry {
    /// Display form (e.g., "Kodak", "Ilford")
    pub name: String,
    #[serde(default)]
    pub films: Vec<FilmCatalogEntry>,
}

/// A single film stock
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FilmCatalogEntry {
    /// Asset stem without manufacturer prefix or extension (e.g., "tmax400").
    /// Also counts as an alias.
    #[serde(rename = "filename")]
    pub canonical_filename: String,
    /// ISO speed, if the catalog knows it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<u32>,
    /// Film type (e.g., "bw", "color", "slide")
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub film_type: Option<String>,
    /// Alternate spellings users might type
    #[serde(default)]
    pub aliases: Vec<String>,
}

impl FilmCatalogEntry {
    /// The canonical filename followed by every alias
    pub fn names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.canonical_filename.as_str())
            .chain(self.aliases.iter().map(String::as_str))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_optional_fields() {
        let json = r#"{
            "manufacturers": [
                {
                    "name": "Ilford",
                    "films": [
                        { "filename": "HP5", "speed": 400, "type": "bw", "aliases": ["hp5plus"] },
                        { "filename": "Delta100" }
                    ]
                }
            ]
        }"#;

        let doc: CatalogDocument = serde_json::from_str(json).unwrap();
        let films = &doc.manufacturers[0].films;

        assert_eq!(films[0].speed, Some(400));
        assert_eq!(films[0].film_type.as_deref(), Some("bw"));
        assert_eq!(films[1].speed, None);
        assert!(films[1].aliases.is_empty());
        assert_eq!(films[0].names().collect::<Vec<_>>(), vec!["HP5", "hp5plus"]);
    }
}
