//! Layer references used to select what is being edited

use dummyrpg_core::{BlockingLayer, GraphicLayer, Map, CELL_SIZE};

use crate::geometry::GridGeometry;

/// Kind of cell a layer stores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerKind {
    Graphic,
    Blocking,
}

/// Identifies one editable layer inside a map
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayerRef {
    /// Graphic layer at z `position` on `floor`
    Graphic { floor: usize, position: i8 },
    /// The blocking layer of `floor`
    Blocking { floor: usize },
}

impl LayerRef {
    pub fn floor(&self) -> usize {
        match self {
            LayerRef::Graphic { floor, .. } | LayerRef::Blocking { floor } => *floor,
        }
    }

    pub fn kind(&self) -> LayerKind {
        match self {
            LayerRef::Graphic { .. } => LayerKind::Graphic,
            LayerRef::Blocking { .. } => LayerKind::Blocking,
        }
    }

    /// Whether the referenced layer exists in `map`
    pub fn exists_in(&self, map: &Map) -> bool {
        self.dimensions(map).is_some()
    }

    /// Width and height in cells of the referenced layer
    pub fn dimensions(&self, map: &Map) -> Option<(u16, u16)> {
        let floor = map.floor(self.floor())?;
        match *self {
            LayerRef::Graphic { position, .. } => floor
                .graphic_layer(position)
                .map(|l| (l.width(), l.height())),
            LayerRef::Blocking { .. } => {
                let layer = floor.blocking_layer();
                Some((layer.width(), layer.height()))
            }
        }
    }

    /// Grid used for snapping on this layer
    ///
    /// Blocking layers hold one cell per tile, so both kinds share the tile grid step.
    pub fn geometry(&self, map: &Map) -> Option<GridGeometry> {
        self.dimensions(map)
            .map(|(width, height)| GridGeometry::new(width, height, CELL_SIZE))
    }

    pub(crate) fn graphic_mut<'a>(&self, map: &'a mut Map) -> Option<&'a mut GraphicLayer> {
        match *self {
            LayerRef::Graphic { floor, position } => map.floor_mut(floor)?.graphic_layer_mut(position),
            LayerRef::Blocking { .. } => None,
        }
    }

    pub(crate) fn graphic<'a>(&self, map: &'a Map) -> Option<&'a GraphicLayer> {
        match *self {
            LayerRef::Graphic { floor, position } => map.floor(floor)?.graphic_layer(position),
            LayerRef::Blocking { .. } => None,
        }
    }

    pub(crate) fn blocking_mut<'a>(&self, map: &'a mut Map) -> Option<&'a mut BlockingLayer> {
        match *self {
            LayerRef::Blocking { floor } => Some(map.floor_mut(floor)?.blocking_layer_mut()),
            LayerRef::Graphic { .. } => None,
        }
    }

    pub(crate) fn blocking<'a>(&self, map: &'a Map) -> Option<&'a BlockingLayer> {
        match *self {
            LayerRef::Blocking { floor } => Some(map.floor(floor)?.blocking_layer()),
            LayerRef::Graphic { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_layer_ref_resolution() {
        let mut map = Map::new("Test", 6, 4, "test.png");
        map.add_floor();

        let ground = LayerRef::Graphic {
            floor: 0,
            position: 0,
        };
        let missing = LayerRef::Graphic {
            floor: 1,
            position: 0,
        };
        let blocking = LayerRef::Blocking { floor: 1 };

        assert!(ground.exists_in(&map));
        assert!(!missing.exists_in(&map));
        assert!(!LayerRef::Blocking { floor: 2 }.exists_in(&map));
        assert_eq!(blocking.dimensions(&map), Some((6, 4)));
        assert_eq!(blocking.kind(), LayerKind::Blocking);
        assert_eq!(blocking.floor(), 1);

        assert!(ground.graphic_mut(&mut map).is_some());
        assert!(ground.blocking_mut(&mut map).is_none());
        assert!(blocking.blocking(&map).is_some());
        assert!(blocking.graphic(&map).is_none());
    }

    #[test]
    fn test_geometry_uses_cell_size() {
        let map = Map::new("Test", 6, 4, "test.png");
        let geometry = LayerRef::Blocking { floor: 0 }.geometry(&map).unwrap();

        assert_eq!(geometry, GridGeometry::new(6, 4, CELL_SIZE));
    }
}
