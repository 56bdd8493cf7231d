//! Floor: one vertical level of a map

use crate::{BlockingLayer, CharacterId, CharacterPlacement, Coord, GraphicLayer};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A floor owns one blocking layer, graphic layers keyed by z position, and
/// the characters standing on it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Floor {
    blocking_layer: BlockingLayer,
    graphic_layers: BTreeMap<i8, GraphicLayer>,
    #[serde(default)]
    characters: Vec<CharacterPlacement>,
    #[serde(default = "default_visible")]
    visible: bool,
}

fn default_visible() -> bool {
    true
}

impl Floor {
    /// Create a floor for a map of `width * height` tiles, with no graphic layers
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            blocking_layer: BlockingLayer::new(width, height),
            graphic_layers: BTreeMap::new(),
            characters: Vec::new(),
            visible: true,
        }
    }

    /// Map dimensions this floor was built for
    pub fn dimensions(&self) -> (u16, u16) {
        (self.blocking_layer.width(), self.blocking_layer.height())
    }

    /// Add an empty graphic layer at `position`; false if the position is taken
    pub fn add_graphic_layer(&mut self, position: i8) -> bool {
        if self.graphic_layers.contains_key(&position) {
            return false;
        }
        let (width, height) = self.dimensions();
        self.graphic_layers
            .insert(position, GraphicLayer::new(width, height));
        true
    }

    /// Insert a prebuilt graphic layer, replacing any layer at `position`
    pub fn insert_graphic_layer(&mut self, position: i8, layer: GraphicLayer) {
        self.graphic_layers.insert(position, layer);
    }

    pub fn remove_graphic_layer(&mut self, position: i8) -> Option<GraphicLayer> {
        self.graphic_layers.remove(&position)
    }

    pub fn graphic_layer(&self, position: i8) -> Option<&GraphicLayer> {
        self.graphic_layers.get(&position)
    }

    pub fn graphic_layer_mut(&mut self, position: i8) -> Option<&mut GraphicLayer> {
        self.graphic_layers.get_mut(&position)
    }

    /// Graphic layers in ascending z order
    pub fn graphic_layers(&self) -> impl Iterator<Item = (i8, &GraphicLayer)> {
        self.graphic_layers.iter().map(|(pos, layer)| (*pos, layer))
    }

    pub fn graphic_layer_count(&self) -> usize {
        self.graphic_layers.len()
    }

    pub fn blocking_layer(&self) -> &BlockingLayer {
        &self.blocking_layer
    }

    pub fn blocking_layer_mut(&mut self) -> &mut BlockingLayer {
        &mut self.blocking_layer
    }

    pub(crate) fn set_blocking_layer(&mut self, layer: BlockingLayer) {
        self.blocking_layer = layer;
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    pub fn characters(&self) -> &[CharacterPlacement] {
        &self.characters
    }

    /// Character standing on `coord`, if any
    pub fn character_at(&self, coord: Coord) -> Option<&CharacterPlacement> {
        self.characters.iter().find(|c| c.coord == coord)
    }

    /// Place a character; refused when `coord` is off the floor or already occupied
    pub fn place_character(&mut self, character_id: CharacterId, coord: Coord) -> bool {
        if !self.blocking_layer.contains(coord) || self.character_at(coord).is_some() {
            return false;
        }
        self.characters
            .push(CharacterPlacement::new(character_id, coord));
        true
    }

    pub fn remove_character_at(&mut self, coord: Coord) -> Option<CharacterPlacement> {
        self.characters
            .iter()
            .position(|c| c.coord == coord)
            .map(|pos| self.characters.remove(pos))
    }

    /// Resize every layer; characters left outside the new bounds are dropped
    pub fn resize(&mut self, width: u16, height: u16) {
        self.blocking_layer.resize(width, height);
        for layer in self.graphic_layers.values_mut() {
            layer.resize(width, height);
        }
        self.characters
            .retain(|c| c.coord.x < width && c.coord.y < height);
    }
}
