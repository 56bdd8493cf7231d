//! Core data structures for the DummyRPG map editor
//!
//! This crate provides the fundamental types for representing tile-based maps:
//! - `Coord` / `TileAspect` - Cell addressing and the chipset cell painted into it
//! - `GridLayer` - Dense row-major cell storage (`GraphicLayer`, `BlockingLayer`)
//! - `Floor` - One level of a map: a blocking layer, z-ordered graphic layers, characters
//! - `Map` - A sequence of floors plus chipset/music metadata
//! - `map_file` - The binary `.map` / `.blk` formats read by the game player

mod aspect;
mod character;
mod floor;
mod layer;
mod map;
pub mod map_file;

pub use aspect::{ChipsetId, Coord, TileAspect};
pub use character::{CharacterId, CharacterPlacement};
pub use floor::Floor;
pub use layer::{BlockingLayer, CellValue, GraphicLayer, GridLayer};
pub use map::{Map, MapSettings, MapSettingsError};
pub use map_file::MapFileError;

/// Size in pixels of one grid cell, shared by graphic and blocking layers
pub const CELL_SIZE: u16 = 16;

/// Largest accepted map width or height, in cells
pub const MAX_MAP_SIZE: u16 = 1024;
