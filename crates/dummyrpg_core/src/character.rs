//! Character placements on a floor

use crate::Coord;
use serde::{Deserialize, Serialize};

/// Index of a character definition in the project's game data
pub type CharacterId = u32;

/// A character placed on a floor cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPlacement {
    pub character_id: CharacterId,
    pub coord: Coord,
}

impl CharacterPlacement {
    pub fn new(character_id: CharacterId, coord: Coord) -> Self {
        Self {
            character_id,
            coord,
        }
    }
}
