//! Reversible editing commands, history, clipboard and keyboard shortcuts
//!
//! Every paint, erase, cut and paste writes a rectangular [`Patch`] into one
//! layer through a [`PatchCommand`], which remembers what it overwrote so the
//! edit can be undone.

pub mod clipboard;
pub mod history;
pub mod shortcuts;

pub use clipboard::MapClipboard;
pub use history::CommandHistory;
pub use shortcuts::{shortcut_action, EditorAction, Key, KeyChord};

use dummyrpg_core::{CellValue, Coord, GridLayer, Map, TileAspect};

use crate::geometry::CellRect;
use crate::layers::{LayerKind, LayerRef};

/// A row-major rectangle of cell values
#[derive(Debug, Clone, PartialEq)]
pub struct Patch<T> {
    pub width: u16,
    pub height: u16,
    pub content: Vec<T>,
}

/// Patch of tile aspects for graphic layers
pub type GraphicPatch = Patch<TileAspect>;

/// Patch of collision flags for blocking layers
pub type BlockingPatch = Patch<bool>;

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self {
            width: 0,
            height: 0,
            content: Vec::new(),
        }
    }
}

impl<T: CellValue> Patch<T> {
    /// A `width * height` patch with every cell set to `value`
    pub fn filled(width: u16, height: u16, value: T) -> Self {
        Self {
            width,
            height,
            content: vec![value; usize::from(width) * usize::from(height)],
        }
    }

    /// A patch of empty values, used for erasing
    pub fn erase(width: u16, height: u16) -> Self {
        Self::filled(width, height, T::empty())
    }

    /// Build a patch from row-major content; `None` if the length doesn't match
    pub fn from_content(width: u16, height: u16, content: Vec<T>) -> Option<Self> {
        (content.len() == usize::from(width) * usize::from(height)).then_some(Self {
            width,
            height,
            content,
        })
    }

    /// Read `cells` out of `layer`; cells outside the layer read as empty
    pub fn copy_from(layer: &GridLayer<T>, cells: CellRect) -> Self {
        let mut content = Vec::with_capacity(usize::from(cells.width) * usize::from(cells.height));
        for dy in 0..cells.height {
            for dx in 0..cells.width {
                let coord = offset(cells.origin, dx, dy);
                let value = coord.and_then(|c| layer.get(c)).unwrap_or_else(T::empty);
                content.push(value);
            }
        }
        Self {
            width: cells.width,
            height: cells.height,
            content,
        }
    }

    /// True when the patch covers no cell
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn get(&self, x: u16, y: u16) -> Option<T> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.content
            .get(usize::from(y) * usize::from(self.width) + usize::from(x))
            .copied()
    }
}

fn offset(origin: Coord, dx: u16, dy: u16) -> Option<Coord> {
    Some(Coord::new(
        origin.x.checked_add(dx)?,
        origin.y.checked_add(dy)?,
    ))
}

/// Writes a patch at a cell origin and restores the overwritten cells on undo
///
/// Only cells inside the layer's current bounds are touched, both when
/// executing and when undoing, so a command recorded before a resize stays safe.
#[derive(Debug, Clone, PartialEq)]
pub struct PatchCommand<T> {
    origin: Coord,
    to_draw: Patch<T>,
    /// Values found under the patch on the last execute; `None` where the cell was off-layer
    replaced: Vec<Option<T>>,
    description: &'static str,
}

impl<T: CellValue> PatchCommand<T> {
    pub fn new(origin: Coord, to_draw: Patch<T>, description: &'static str) -> Self {
        let replaced = vec![None; to_draw.content.len()];
        Self {
            origin,
            to_draw,
            replaced,
            description,
        }
    }

    pub fn origin(&self) -> Coord {
        self.origin
    }

    pub fn patch(&self) -> &Patch<T> {
        &self.to_draw
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    /// Patch-relative cell index and layer coordinate of every cell that is on the layer
    fn cells_on_layer(&self, width: u16, height: u16) -> Vec<(usize, Coord)> {
        let mut cells = Vec::new();
        for dy in 0..self.to_draw.height {
            for dx in 0..self.to_draw.width {
                let Some(coord) = offset(self.origin, dx, dy) else {
                    continue;
                };
                if coord.x < width && coord.y < height {
                    let index = usize::from(dy) * usize::from(self.to_draw.width) + usize::from(dx);
                    cells.push((index, coord));
                }
            }
        }
        cells
    }

    /// Area of the patch clipped to a `width * height` layer
    fn clipped_rect(&self, width: u16, height: u16) -> CellRect {
        let clip = |origin: u16, len: u16, limit: u16| -> u16 {
            if origin >= limit {
                0
            } else {
                len.min(limit - origin)
            }
        };
        CellRect::new(
            self.origin,
            clip(self.origin.x, self.to_draw.width, width),
            clip(self.origin.y, self.to_draw.height, height),
        )
    }

    /// Capture the cells under the patch, then write the patch; returns the touched area
    pub fn execute(&mut self, layer: &mut GridLayer<T>) -> CellRect {
        self.replaced.iter_mut().for_each(|r| *r = None);

        for (index, coord) in self.cells_on_layer(layer.width(), layer.height()) {
            if let Some(slot) = self.replaced.get_mut(index) {
                *slot = layer.get(coord);
            }
            if let Some(value) = self.to_draw.content.get(index) {
                layer.set(coord, *value);
            }
        }
        self.clipped_rect(layer.width(), layer.height())
    }

    /// Restore the cells captured by the last execute; returns the touched area
    pub fn undo(&self, layer: &mut GridLayer<T>) -> CellRect {
        for (index, coord) in self.cells_on_layer(layer.width(), layer.height()) {
            if let Some(Some(value)) = self.replaced.get(index) {
                layer.set(coord, *value);
            }
        }
        self.clipped_rect(layer.width(), layer.height())
    }
}

/// A reversible edit on either kind of layer
#[derive(Debug, Clone, PartialEq)]
pub enum EditCommand {
    Graphic(PatchCommand<TileAspect>),
    Blocking(PatchCommand<bool>),
}

impl EditCommand {
    pub fn graphic(origin: Coord, patch: GraphicPatch, description: &'static str) -> Self {
        EditCommand::Graphic(PatchCommand::new(origin, patch, description))
    }

    pub fn blocking(origin: Coord, patch: BlockingPatch, description: &'static str) -> Self {
        EditCommand::Blocking(PatchCommand::new(origin, patch, description))
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            EditCommand::Graphic(_) => LayerKind::Graphic,
            EditCommand::Blocking(_) => LayerKind::Blocking,
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            EditCommand::Graphic(cmd) => cmd.description(),
            EditCommand::Blocking(cmd) => cmd.description(),
        }
    }

    /// Apply to `target`; `None` when the target is missing or of the other kind
    pub fn execute(&mut self, map: &mut Map, target: LayerRef) -> Option<CellRect> {
        match self {
            EditCommand::Graphic(cmd) => Some(cmd.execute(target.graphic_mut(map)?)),
            EditCommand::Blocking(cmd) => Some(cmd.execute(target.blocking_mut(map)?)),
        }
    }

    /// Revert on `target`; `None` when the target is missing or of the other kind
    pub fn undo(&self, map: &mut Map, target: LayerRef) -> Option<CellRect> {
        match self {
            EditCommand::Graphic(cmd) => Some(cmd.undo(target.graphic_mut(map)?)),
            EditCommand::Blocking(cmd) => Some(cmd.undo(target.blocking_mut(map)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dummyrpg_core::{BlockingLayer, GraphicLayer};

    fn grass() -> TileAspect {
        TileAspect::new(1, 0, 0)
    }

    #[test]
    fn test_patch_construction() {
        let patch = GraphicPatch::filled(2, 3, grass());
        assert_eq!(patch.content.len(), 6);
        assert_eq!(patch.get(1, 2), Some(grass()));
        assert_eq!(patch.get(2, 0), None);

        assert!(BlockingPatch::default().is_empty());
        assert!(BlockingPatch::from_content(2, 2, vec![true; 3]).is_none());
        assert!(BlockingPatch::erase(3, 1).content.iter().all(|b| !b));
    }

    #[test]
    fn test_copy_from_reads_empty_off_layer() {
        let mut layer = BlockingLayer::new(3, 3);
        layer.set(Coord::new(2, 2), true);

        let patch = Patch::copy_from(&layer, CellRect::new(Coord::new(2, 2), 2, 2));

        assert_eq!(patch.content, vec![true, false, false, false]);
    }

    #[test]
    fn test_paint_and_undo() {
        let mut layer = GraphicLayer::new(8, 8);
        let mut cmd = PatchCommand::new(Coord::new(2, 2), GraphicPatch::filled(2, 2, grass()), "Paint");

        let touched = cmd.execute(&mut layer);

        assert_eq!(touched, CellRect::new(Coord::new(2, 2), 2, 2));
        for y in 0..8 {
            for x in 0..8 {
                let value = layer.get(Coord::new(x, y)).unwrap();
                if (2..4).contains(&x) && (2..4).contains(&y) {
                    assert_eq!(value, grass());
                } else {
                    assert!(value.is_undefined());
                }
            }
        }

        cmd.undo(&mut layer);
        assert_eq!(layer, GraphicLayer::new(8, 8));
    }

    #[test]
    fn test_patch_clipped_at_layer_edge() {
        let mut layer = BlockingLayer::new(4, 4);
        let mut cmd = PatchCommand::new(Coord::new(3, 2), BlockingPatch::filled(3, 3, true), "Paint");

        let touched = cmd.execute(&mut layer);

        assert_eq!(touched, CellRect::new(Coord::new(3, 2), 1, 2));
        assert_eq!(layer.cells().iter().filter(|b| **b).count(), 2);

        cmd.undo(&mut layer);
        assert!(layer.cells().iter().all(|b| !b));
    }

    #[test]
    fn test_undo_after_shrink_skips_missing_cells() {
        let mut layer = GraphicLayer::new(6, 6);
        layer.set(Coord::new(1, 1), TileAspect::new(0, 5, 5));
        let mut cmd = PatchCommand::new(Coord::new(1, 1), GraphicPatch::filled(4, 4, grass()), "Paint");
        cmd.execute(&mut layer);

        layer.resize(3, 3);
        let touched = cmd.undo(&mut layer);

        assert_eq!(touched, CellRect::new(Coord::new(1, 1), 2, 2));
        assert_eq!(layer.get(Coord::new(1, 1)), Some(TileAspect::new(0, 5, 5)));
        assert!(layer.get(Coord::new(2, 2)).unwrap().is_undefined());
    }

    #[test]
    fn test_undo_after_grow_leaves_uncaptured_cells() {
        let mut layer = BlockingLayer::new(2, 2);
        let mut cmd = PatchCommand::new(Coord::new(1, 1), BlockingPatch::filled(2, 2, true), "Paint");
        cmd.execute(&mut layer);

        layer.resize(4, 4);
        layer.set(Coord::new(2, 2), true);
        cmd.undo(&mut layer);

        // (1,1) was captured and restored, (2,2) was never written by the command
        assert_eq!(layer.get(Coord::new(1, 1)), Some(false));
        assert_eq!(layer.get(Coord::new(2, 2)), Some(true));
    }

    #[test]
    fn test_origin_off_layer_touches_nothing() {
        let mut layer = BlockingLayer::new(2, 2);
        let mut cmd = PatchCommand::new(Coord::new(5, 0), BlockingPatch::filled(1, 1, true), "Paint");

        let touched = cmd.execute(&mut layer);

        assert!(touched.is_empty());
        assert!(layer.cells().iter().all(|b| !b));
    }

    #[test]
    fn test_edit_command_kind_mismatch() {
        let mut map = Map::new("Test", 4, 4, "test.png");
        let mut cmd = EditCommand::blocking(Coord::new(0, 0), BlockingPatch::filled(1, 1, true), "Paint");
        let graphic = LayerRef::Graphic {
            floor: 0,
            position: 0,
        };

        assert_eq!(cmd.execute(&mut map, graphic), None);
        assert_eq!(cmd.kind(), LayerKind::Blocking);

        let blocking = LayerRef::Blocking { floor: 0 };
        assert!(cmd.execute(&mut map, blocking).is_some());
        assert_eq!(
            map.floor(0).unwrap().blocking_layer().get(Coord::new(0, 0)),
            Some(true)
        );
        cmd.undo(&mut map, blocking);
        assert_eq!(
            map.floor(0).unwrap().blocking_layer().get(Coord::new(0, 0)),
            Some(false)
        );
    }
}
