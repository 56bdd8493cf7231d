//! Cell coordinates and tile aspects

use serde::{Deserialize, Serialize};

/// Identifier of a chipset (tileset image) within a project
pub type ChipsetId = u8;

/// A cell position on a layer grid (not a pixel position)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coord {
    pub x: u16,
    pub y: u16,
}

impl Coord {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Top-left pixel of this cell for the given cell size
    pub fn to_pixels(self, cell_size: u16) -> (u32, u32) {
        (
            u32::from(self.x) * u32::from(cell_size),
            u32::from(self.y) * u32::from(cell_size),
        )
    }
}

impl From<(u16, u16)> for Coord {
    fn from((x, y): (u16, u16)) -> Self {
        Self { x, y }
    }
}

/// Which cell of which chipset is drawn into a graphic layer cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileAspect {
    pub chipset_x: u8,
    pub chipset_y: u8,
    pub chipset_id: ChipsetId,
}

impl TileAspect {
    /// Marks a cell with no tile
    pub const UNDEFINED: TileAspect = TileAspect {
        chipset_x: u8::MAX,
        chipset_y: u8::MAX,
        chipset_id: u8::MAX,
    };

    pub const fn new(chipset_id: ChipsetId, chipset_x: u8, chipset_y: u8) -> Self {
        Self {
            chipset_x,
            chipset_y,
            chipset_id,
        }
    }

    pub fn is_undefined(&self) -> bool {
        *self == Self::UNDEFINED
    }
}

impl Default for TileAspect {
    fn default() -> Self {
        Self::UNDEFINED
    }
}
