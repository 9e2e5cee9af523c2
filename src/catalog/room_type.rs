// src/catalog/room_type.rs

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Index of a room type within its catalog.
///
/// Ids are only meaningful against the catalog that produced them; room
/// nodes store these instead of holding references into the catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomTypeId(pub(crate) usize);

impl RoomTypeId {
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for RoomTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "type#{}", self.0)
    }
}

/// One room-type entry: a name plus the capability flags that drive the
/// connectivity rules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomTypeDescriptor {
    pub name: String,
    #[serde(default)]
    pub is_entrance: bool,
    #[serde(default)]
    pub is_corridor: bool,
    #[serde(default)]
    pub is_boss_room: bool,
    #[serde(default)]
    pub is_none: bool,
    #[serde(default = "default_displayable")]
    pub displayable: bool,
}

fn default_displayable() -> bool {
    true
}

/// Catalog rejected at load time. These are configuration errors, not
/// runtime errors; callers should fail fast.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("room type catalog is empty")]
    Empty,
    #[error("room type at index {index} has an empty name")]
    BlankName { index: usize },
    #[error("catalog must contain exactly one placeholder (is_none) type, found {found}")]
    PlaceholderCount { found: usize },
    #[error("catalog must contain exactly one entrance type, found {found}")]
    EntranceCount { found: usize },
    #[error("failed to parse room type catalog: {0}")]
    Parse(#[from] serde_json::Error),
}

/// The immutable list of room-type descriptors supplied to the graph.
///
/// Validated once on construction; afterwards lookups cannot fail for ids
/// handed out by this catalog.
#[derive(Debug, Clone)]
pub struct RoomTypeCatalog {
    types: Vec<RoomTypeDescriptor>,
    none_type: RoomTypeId,
    entrance_type: RoomTypeId,
}

impl RoomTypeCatalog {
    pub fn new(types: Vec<RoomTypeDescriptor>) -> Result<Self, CatalogError> {
        if types.is_empty() {
            return Err(CatalogError::Empty);
        }
        if let Some(index) = types.iter().position(|t| t.name.trim().is_empty()) {
            return Err(CatalogError::BlankName { index });
        }

        let none_slots: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_none)
            .map(|(i, _)| i)
            .collect();
        if none_slots.len() != 1 {
            return Err(CatalogError::PlaceholderCount {
                found: none_slots.len(),
            });
        }

        let entrance_slots: Vec<usize> = types
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_entrance)
            .map(|(i, _)| i)
            .collect();
        if entrance_slots.len() != 1 {
            return Err(CatalogError::EntranceCount {
                found: entrance_slots.len(),
            });
        }

        Ok(Self {
            none_type: RoomTypeId(none_slots[0]),
            entrance_type: RoomTypeId(entrance_slots[0]),
            types,
        })
    }

    /// Parse a catalog from a JSON array of descriptors, then validate it.
    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let types: Vec<RoomTypeDescriptor> = serde_json::from_str(json)?;
        Self::new(types)
    }

    pub fn get(&self, id: RoomTypeId) -> Option<&RoomTypeDescriptor> {
        self.types.get(id.0)
    }

    /// The placeholder ("unassigned") type. Guaranteed to exist.
    pub fn none_type(&self) -> RoomTypeId {
        self.none_type
    }

    /// The entrance type. Guaranteed to exist.
    pub fn entrance_type(&self) -> RoomTypeId {
        self.entrance_type
    }

    pub fn find(&self, name: &str) -> Option<RoomTypeId> {
        self.types
            .iter()
            .position(|t| t.name == name)
            .map(RoomTypeId)
    }

    /// Entries eligible for the editor's room-type picker.
    pub fn display_entries(&self) -> Vec<(RoomTypeId, &str)> {
        self.types
            .iter()
            .enumerate()
            .filter(|(_, t)| t.displayable)
            .map(|(i, t)| (RoomTypeId(i), t.name.as_str()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (RoomTypeId, &RoomTypeDescriptor)> {
        self.types
            .iter()
            .enumerate()
            .map(|(i, t)| (RoomTypeId(i), t))
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(name: &str) -> RoomTypeDescriptor {
        RoomTypeDescriptor {
            name: name.to_string(),
            is_entrance: false,
            is_corridor: false,
            is_boss_room: false,
            is_none: false,
            displayable: true,
        }
    }

    fn sample_types() -> Vec<RoomTypeDescriptor> {
        vec![
            RoomTypeDescriptor {
                is_none: true,
                displayable: false,
                ..descriptor("None")
            },
            RoomTypeDescriptor {
                is_entrance: true,
                displayable: false,
                ..descriptor("Entrance")
            },
            RoomTypeDescriptor {
                is_corridor: true,
                displayable: false,
                ..descriptor("Corridor")
            },
            descriptor("Small Room"),
            RoomTypeDescriptor {
                is_boss_room: true,
                ..descriptor("Boss Room")
            },
        ]
    }

    #[test]
    fn test_valid_catalog() {
        let catalog = RoomTypeCatalog::new(sample_types()).unwrap();
        assert_eq!(catalog.len(), 5);
        assert_eq!(catalog.iter().count(), 5);
        assert_eq!(catalog.get(catalog.none_type()).unwrap().name, "None");
        assert_eq!(
            catalog.get(catalog.entrance_type()).unwrap().name,
            "Entrance"
        );
    }

    #[test]
    fn test_empty_catalog_rejected() {
        assert!(matches!(
            RoomTypeCatalog::new(Vec::new()),
            Err(CatalogError::Empty)
        ));
    }

    #[test]
    fn test_blank_name_rejected() {
        let mut types = sample_types();
        types[3].name = "  ".to_string();
        assert!(matches!(
            RoomTypeCatalog::new(types),
            Err(CatalogError::BlankName { index: 3 })
        ));
    }

    #[test]
    fn test_missing_placeholder_rejected() {
        let mut types = sample_types();
        types[0].is_none = false;
        assert!(matches!(
            RoomTypeCatalog::new(types),
            Err(CatalogError::PlaceholderCount { found: 0 })
        ));
    }

    #[test]
    fn test_duplicate_placeholder_rejected() {
        let mut types = sample_types();
        types[3].is_none = true;
        assert!(matches!(
            RoomTypeCatalog::new(types),
            Err(CatalogError::PlaceholderCount { found: 2 })
        ));
    }

    #[test]
    fn test_duplicate_entrance_rejected() {
        let mut types = sample_types();
        types[4].is_entrance = true;
        assert!(matches!(
            RoomTypeCatalog::new(types),
            Err(CatalogError::EntranceCount { found: 2 })
        ));
    }

    #[test]
    fn test_from_json() {
        let json = r#"[
            {"name": "None", "is_none": true, "displayable": false},
            {"name": "Entrance", "is_entrance": true, "displayable": false},
            {"name": "Corridor", "is_corridor": true, "displayable": false},
            {"name": "Small Room"}
        ]"#;
        let catalog = RoomTypeCatalog::from_json(json).unwrap();
        assert_eq!(catalog.len(), 4);
        let room = catalog.find("Small Room").unwrap();
        let desc = catalog.get(room).unwrap();
        assert!(desc.displayable);
        assert!(!desc.is_corridor);
    }

    #[test]
    fn test_from_json_parse_error() {
        assert!(matches!(
            RoomTypeCatalog::from_json("not json"),
            Err(CatalogError::Parse(_))
        ));
    }

    #[test]
    fn test_display_entries_filters_hidden_types() {
        let catalog = RoomTypeCatalog::new(sample_types()).unwrap();
        let names: Vec<&str> = catalog.display_entries().iter().map(|(_, n)| *n).collect();
        assert_eq!(names, vec!["Small Room", "Boss Room"]);
    }

    #[test]
    fn test_find_unknown_name() {
        let catalog = RoomTypeCatalog::new(sample_types()).unwrap();
        assert!(catalog.find("Vault").is_none());
    }
}
