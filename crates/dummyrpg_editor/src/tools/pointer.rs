//! Press, move and release handling over the map view

use dummyrpg_core::{CharacterId, CELL_SIZE};

use crate::geometry::{GridGeometry, PixelPoint, PixelRect};
use crate::session::MapEditor;

/// What a pointer press over the map currently means
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PointerMode {
    #[default]
    Idle,
    /// Button held since `first`
    Dragging { first: PixelPoint },
    /// The next release places this character
    PlacingCharacter(CharacterId),
}

impl MapEditor {
    pub fn pointer_pressed(&mut self, point: PixelPoint) {
        if let PointerMode::PlacingCharacter(_) = self.pointer {
            return;
        }
        self.pointer = PointerMode::Dragging { first: point };
        self.preview_tool(PixelRect::new(point, point));
    }

    pub fn pointer_moved(&mut self, point: PixelPoint) {
        if let PointerMode::Dragging { first } = self.pointer {
            self.preview_tool(PixelRect::new(first, point));
        }
    }

    pub fn pointer_released(&mut self, point: PixelPoint) {
        match self.pointer {
            PointerMode::Dragging { first } => {
                self.pointer = PointerMode::Idle;
                self.use_tool(PixelRect::new(first, point));
            }
            PointerMode::PlacingCharacter(character_id) => {
                if self.place_character(character_id, point) {
                    self.pointer = PointerMode::Idle;
                }
            }
            PointerMode::Idle => {}
        }
    }

    /// Make the next pointer release place `character_id` on the current floor
    pub fn begin_character_placement(&mut self, character_id: CharacterId) {
        self.pointer = PointerMode::PlacingCharacter(character_id);
    }

    pub fn pointer_mode(&self) -> PointerMode {
        self.pointer
    }

    fn place_character(&mut self, character_id: CharacterId, point: PixelPoint) -> bool {
        let grid = GridGeometry::new(self.map.width(), self.map.height(), CELL_SIZE);
        let coord = grid.cell_at(point);
        let floor_index = self.current_floor;
        let Some(floor) = self.map.floor_mut(floor_index) else {
            return false;
        };
        if !floor.place_character(character_id, coord) {
            log::debug!(
                "Cannot place character {} at ({}, {}) on floor {}",
                character_id,
                coord.x,
                coord.y,
                floor_index
            );
            return false;
        }
        self.observer.modified();
        true
    }
}
