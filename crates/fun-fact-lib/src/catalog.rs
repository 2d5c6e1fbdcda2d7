//! Point-of-interest catalog
//!
//! The catalog is a static JSON document of the form
//! `{ "locations": [ { id, title, latitude, longitude, category } ] }`.
//! It is read once per session and never modified afterwards.

use crate::{Coordinate, Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::PathBuf;
use std::sync::Arc;

/// Catalog compiled into the binary
const BUNDLED_CATALOG: &str = include_str!("../data/locations.json");

/// A named, geolocated place the map can be directed to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PointOfInterest {
    pub id: String,
    pub title: String,
    pub latitude: f64,
    pub longitude: f64,
    pub category: String,
}

impl PointOfInterest {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.longitude, self.latitude)
    }
}

#[derive(Deserialize)]
struct CatalogDocument {
    locations: Vec<PointOfInterest>,
}

/// Ordered, immutable list of points of interest
///
/// Cloning is cheap: the records are shared.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    locations: Arc<[PointOfInterest]>,
}

impl Catalog {
    /// Build a catalog from records, rejecting duplicate ids and invalid coordinates
    pub fn new(locations: Vec<PointOfInterest>) -> Result<Self> {
        let mut seen_ids = HashSet::with_capacity(locations.len());
        for location in &locations {
            if !seen_ids.insert(location.id.as_str()) {
                return Err(Error::InvalidCatalog(format!(
                    "duplicate id {:?}",
                    location.id
                )));
            }
            if !location.coordinate().is_valid() {
                return Err(Error::InvalidCatalog(format!(
                    "{:?} has invalid coordinates ({}, {})",
                    location.id, location.latitude, location.longitude
                )));
            }
        }

        Ok(Self {
            locations: locations.into(),
        })
    }

    /// Parse a catalog document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let document: CatalogDocument = serde_json::from_str(json)?;
        Self::new(document.locations)
    }

    /// The catalog bundled with the application
    pub fn bundled() -> Result<Self> {
        Self::from_json_str(BUNDLED_CATALOG)
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PointOfInterest> {
        self.locations.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &PointOfInterest> {
        self.locations.iter()
    }

    /// Position of the entry with the given id
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.locations.iter().position(|location| location.id == id)
    }

    /// Sorted, deduplicated category tags
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = self
            .locations
            .iter()
            .map(|location| location.category.as_str())
            .collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }
}

/// Where the catalog is read from at startup
#[derive(Debug, Clone, Default, PartialEq)]
pub enum CatalogSource {
    /// The document compiled into the binary
    #[default]
    Bundled,
    /// A JSON file on disk
    File(PathBuf),
}

impl CatalogSource {
    pub async fn load(&self) -> Result<Catalog> {
        profiling::scope!("CatalogSource::load");

        match self {
            Self::Bundled => Catalog::bundled(),
            Self::File(path) => {
                let json = tokio::fs::read_to_string(path).await?;
                Catalog::from_json_str(&json)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VASA_ONLY: &str = r#"{
        "locations": [
            {"id": "1", "title": "Vasa Museum", "latitude": 59.328, "longitude": 18.091, "category": "museum"}
        ]
    }"#;

    #[test]
    fn test_bundled_catalog_loads() {
        let catalog = Catalog::bundled().unwrap();
        assert!(!catalog.is_empty());
        assert_eq!(catalog.get(0).unwrap().title, "Vasa Museum");
        assert!(catalog.categories().contains(&"museum"));
    }

    #[test]
    fn test_parse_single_entry() {
        let catalog = Catalog::from_json_str(VASA_ONLY).unwrap();
        assert_eq!(catalog.len(), 1);
        let vasa = catalog.get(0).unwrap();
        assert_eq!(vasa.id, "1");
        assert_eq!(vasa.category, "museum");
        assert_eq!(vasa.coordinate(), Coordinate::new(18.091, 59.328));
        assert_eq!(catalog.position_of("1"), Some(0));
        assert_eq!(catalog.position_of("2"), None);
    }

    #[test]
    fn test_empty_locations_is_valid() {
        let catalog = Catalog::from_json_str(r#"{"locations": []}"#).unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.get(0).is_none());
    }

    #[test]
    fn test_malformed_json_is_an_error() {
        assert!(matches!(
            Catalog::from_json_str("{\"locations\": [}"),
            Err(Error::Json(_))
        ));
        assert!(matches!(
            Catalog::from_json_str(r#"{"places": []}"#),
            Err(Error::Json(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_rejected() {
        let json = r#"{"locations": [
            {"id": "1", "title": "A", "latitude": 1.0, "longitude": 1.0, "category": "x"},
            {"id": "1", "title": "B", "latitude": 2.0, "longitude": 2.0, "category": "x"}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[test]
    fn test_out_of_range_coordinates_rejected() {
        let json = r#"{"locations": [
            {"id": "1", "title": "A", "latitude": 95.0, "longitude": 1.0, "category": "x"}
        ]}"#;
        assert!(matches!(
            Catalog::from_json_str(json),
            Err(Error::InvalidCatalog(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let source = CatalogSource::File(PathBuf::from("/definitely/not/here/locations.json"));
        assert!(matches!(source.load().await, Err(Error::Io(_))));
    }

    #[tokio::test]
    async fn test_file_source_reads_document() {
        let path = std::env::temp_dir().join(format!(
            "fun-fact-lib-catalog-{}.json",
            std::process::id()
        ));
        tokio::fs::write(&path, VASA_ONLY).await.unwrap();

        let catalog = CatalogSource::File(path.clone()).load().await.unwrap();
        assert_eq!(catalog.len(), 1);

        let _ = tokio::fs::remove_file(&path).await;
    }
}
