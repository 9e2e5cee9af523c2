// src/catalog/mod.rs
mod room_type;

pub use self::room_type::{CatalogError, RoomTypeCatalog, RoomTypeDescriptor, RoomTypeId};
