//! Copied layer regions

use dummyrpg_core::Map;

use super::{BlockingPatch, GraphicPatch, Patch};
use crate::geometry::CellRect;
use crate::layers::{LayerKind, LayerRef};

/// Holds one graphic patch and one blocking patch, independently
///
/// Copying from a graphic layer leaves the blocking patch alone and vice versa.
/// Pasting reads the patch without consuming it.
#[derive(Debug, Clone, Default)]
pub struct MapClipboard {
    graphic: GraphicPatch,
    blocking: BlockingPatch,
}

impl MapClipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy `cells` of `layer` into the matching clipboard; false if the layer is missing
    pub fn copy_region(&mut self, map: &Map, layer: LayerRef, cells: CellRect) -> bool {
        match layer.kind() {
            LayerKind::Graphic => match layer.graphic(map) {
                Some(source) => {
                    self.graphic = Patch::copy_from(source, cells);
                    true
                }
                None => false,
            },
            LayerKind::Blocking => match layer.blocking(map) {
                Some(source) => {
                    self.blocking = Patch::copy_from(source, cells);
                    true
                }
                None => false,
            },
        }
    }

    pub fn graphic(&self) -> &GraphicPatch {
        &self.graphic
    }

    pub fn blocking(&self) -> &BlockingPatch {
        &self.blocking
    }

    pub fn set_graphic(&mut self, patch: GraphicPatch) {
        self.graphic = patch;
    }

    pub fn set_blocking(&mut self, patch: BlockingPatch) {
        self.blocking = patch;
    }

    /// Whether there is something to paste on a layer of `kind`
    pub fn has_content(&self, kind: LayerKind) -> bool {
        match kind {
            LayerKind::Graphic => !self.graphic.is_empty(),
            LayerKind::Blocking => !self.blocking.is_empty(),
        }
    }

    pub fn clear(&mut self) {
        self.graphic = GraphicPatch::default();
        self.blocking = BlockingPatch::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dummyrpg_core::{Coord, TileAspect};

    #[test]
    fn test_clipboards_are_independent() {
        let mut map = Map::new("Test", 4, 4, "test.png");
        map.floor_mut(0)
            .unwrap()
            .graphic_layer_mut(0)
            .unwrap()
            .set(Coord::new(1, 1), TileAspect::new(2, 3, 4));
        map.floor_mut(0)
            .unwrap()
            .blocking_layer_mut()
            .set(Coord::new(0, 0), true);

        let mut clipboard = MapClipboard::new();
        assert!(!clipboard.has_content(LayerKind::Graphic));

        let graphic = LayerRef::Graphic {
            floor: 0,
            position: 0,
        };
        assert!(clipboard.copy_region(&map, graphic, CellRect::new(Coord::new(1, 1), 2, 1)));
        assert!(clipboard.has_content(LayerKind::Graphic));
        assert!(!clipboard.has_content(LayerKind::Blocking));
        assert_eq!(
            clipboard.graphic().content,
            vec![TileAspect::new(2, 3, 4), TileAspect::UNDEFINED]
        );

        let blocking = LayerRef::Blocking { floor: 0 };
        assert!(clipboard.copy_region(&map, blocking, CellRect::new(Coord::new(0, 0), 1, 2)));
        assert_eq!(clipboard.blocking().content, vec![true, false]);
        assert_eq!(clipboard.graphic().width, 2);

        clipboard.clear();
        assert!(!clipboard.has_content(LayerKind::Graphic));
        assert!(!clipboard.has_content(LayerKind::Blocking));
    }

    #[test]
    fn test_copy_from_missing_layer() {
        let map = Map::new("Test", 4, 4, "test.png");
        let mut clipboard = MapClipboard::new();
        let missing = LayerRef::Graphic {
            floor: 0,
            position: 9,
        };

        assert!(!clipboard.copy_region(&map, missing, CellRect::new(Coord::new(0, 0), 1, 1)));
        assert!(!clipboard.has_content(LayerKind::Graphic));
    }
}
