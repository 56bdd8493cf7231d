//! Tile selection in the chipset palette

use dummyrpg_core::{ChipsetId, TileAspect, CELL_SIZE};

use crate::commands::GraphicPatch;
use crate::geometry::{GridGeometry, PixelPoint, PixelRect};

/// Rectangle of chipset cells used by the pen, in cell units
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSelection {
    pub chipset_id: ChipsetId,
    pub x: u8,
    pub y: u8,
    pub width: u8,
    pub height: u8,
}

impl TileSelection {
    pub fn new(chipset_id: ChipsetId, x: u8, y: u8, width: u8, height: u8) -> Self {
        Self {
            chipset_id,
            x,
            y,
            width,
            height,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Aspect painted at offset `(dx, dy)` of a pen stroke; the selection repeats
    pub fn aspect_for(&self, dx: u16, dy: u16) -> TileAspect {
        if self.is_empty() {
            return TileAspect::UNDEFINED;
        }
        let x = u16::from(self.x) + dx % u16::from(self.width);
        let y = u16::from(self.y) + dy % u16::from(self.height);
        TileAspect::new(
            self.chipset_id,
            u8::try_from(x).unwrap_or(u8::MAX),
            u8::try_from(y).unwrap_or(u8::MAX),
        )
    }

    /// Tile the selection over a `width * height` patch
    pub fn tile_patch(&self, width: u16, height: u16) -> GraphicPatch {
        let mut content = Vec::with_capacity(usize::from(width) * usize::from(height));
        for y in 0..height {
            for x in 0..width {
                content.push(self.aspect_for(x, y));
            }
        }
        GraphicPatch {
            width,
            height,
            content,
        }
    }
}

/// Tracks the rectangle being dragged over the chipset image
#[derive(Debug, Clone)]
pub struct ChipsetSelection {
    chipset_id: ChipsetId,
    image: GridGeometry,
    anchor: Option<PixelPoint>,
    rect: Option<PixelRect>,
}

impl Default for ChipsetSelection {
    fn default() -> Self {
        Self::new(0, 0, 0)
    }
}

impl ChipsetSelection {
    /// Selection over a chipset image of `width * height` cells
    pub fn new(chipset_id: ChipsetId, width: u16, height: u16) -> Self {
        Self {
            chipset_id,
            image: GridGeometry::new(width, height, CELL_SIZE),
            anchor: None,
            rect: None,
        }
    }

    /// Switch to another chipset image, dropping the current selection
    pub fn set_chipset(&mut self, chipset_id: ChipsetId, width: u16, height: u16) {
        *self = Self::new(chipset_id, width, height);
    }

    pub fn chipset_id(&self) -> ChipsetId {
        self.chipset_id
    }

    /// Start a selection on the cell under `point`
    pub fn begin(&mut self, point: PixelPoint) {
        let point = self.image.clamp_point(point);
        self.anchor = Some(point);
        self.rect = Some(self.image.snap_rect(PixelRect::new(point, point)));
    }

    /// Grow the selection from the starting cell to the cell under `point`
    pub fn drag_to(&mut self, point: PixelPoint) {
        if let Some(anchor) = self.anchor {
            self.rect = Some(self.image.snap_rect(PixelRect::new(anchor, point)));
        }
    }

    /// Finish dragging and return the selected cells
    pub fn end(&mut self) -> Option<TileSelection> {
        self.anchor = None;
        self.selection()
    }

    pub fn is_dragging(&self) -> bool {
        self.anchor.is_some()
    }

    /// Selection in pixels, as drawn over the chipset
    pub fn pixel_rect(&self) -> Option<PixelRect> {
        self.rect
    }

    pub fn selection(&self) -> Option<TileSelection> {
        let cells = self.image.cell_rect(self.rect?)?;
        Some(TileSelection::new(
            self.chipset_id,
            u8::try_from(cells.origin.x).ok()?,
            u8::try_from(cells.origin.y).ok()?,
            u8::try_from(cells.width).ok()?,
            u8::try_from(cells.height).ok()?,
        ))
    }

    pub fn clear(&mut self) {
        self.anchor = None;
        self.rect = None;
    }
}
