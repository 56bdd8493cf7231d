//! Map containing floors, plus chipset and music metadata

use crate::{Floor, MAX_MAP_SIZE};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A map: an ordered sequence of floors sharing one width and height
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Map {
    pub id: Uuid,
    pub name: String,
    width: u16,
    height: u16,
    pub chipset: String,
    #[serde(default)]
    pub music: String,
    floors: Vec<Floor>,
}

impl Map {
    /// Create a map with a single floor holding one graphic layer at position 0
    pub fn new(name: impl Into<String>, width: u16, height: u16, chipset: impl Into<String>) -> Self {
        let mut floor = Floor::new(width, height);
        floor.add_graphic_layer(0);
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            chipset: chipset.into(),
            music: String::new(),
            floors: vec![floor],
        }
    }

    /// Create a map with no floors at all (used when reading map files)
    pub fn empty(name: impl Into<String>, width: u16, height: u16) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            width,
            height,
            chipset: String::new(),
            music: String::new(),
            floors: Vec::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    pub fn set_chipset(&mut self, chipset: impl Into<String>) {
        self.chipset = chipset.into();
    }

    pub fn set_music(&mut self, music: impl Into<String>) {
        self.music = music.into();
    }

    /// Append a new empty floor sized to the map and return its index
    pub fn add_floor(&mut self) -> usize {
        self.floors.push(Floor::new(self.width, self.height));
        self.floors.len() - 1
    }

    /// Append a prebuilt floor, resized to the map's dimensions if needed
    pub fn push_floor(&mut self, mut floor: Floor) -> usize {
        if floor.dimensions() != (self.width, self.height) {
            floor.resize(self.width, self.height);
        }
        self.floors.push(floor);
        self.floors.len() - 1
    }

    pub fn floor(&self, index: usize) -> Option<&Floor> {
        self.floors.get(index)
    }

    pub fn floor_mut(&mut self, index: usize) -> Option<&mut Floor> {
        self.floors.get_mut(index)
    }

    pub fn floors(&self) -> &[Floor] {
        &self.floors
    }

    pub fn floor_count(&self) -> usize {
        self.floors.len()
    }

    /// Resize every layer of every floor
    ///
    /// Not undoable: cells past the new bounds are lost for good.
    pub fn resize(&mut self, width: u16, height: u16) {
        if (width, height) == (self.width, self.height) {
            return;
        }
        log::info!(
            "Resizing map '{}' from {}x{} to {}x{}",
            self.name,
            self.width,
            self.height,
            width,
            height
        );
        for floor in &mut self.floors {
            floor.resize(width, height);
        }
        self.width = width;
        self.height = height;
    }

    /// Current settings, as shown in the map properties dialog
    pub fn settings(&self) -> MapSettings {
        MapSettings {
            name: self.name.clone(),
            width: self.width,
            height: self.height,
            chipset: self.chipset.clone(),
            music: self.music.clone(),
        }
    }

    /// Validate and apply edited settings, resizing when the dimensions change
    pub fn apply_settings(&mut self, settings: &MapSettings) -> Result<(), MapSettingsError> {
        settings.validate()?;
        self.set_name(settings.name.clone());
        self.set_chipset(settings.chipset.clone());
        self.set_music(settings.music.clone());
        self.resize(settings.width, settings.height);
        Ok(())
    }
}

/// Editable map properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MapSettings {
    pub name: String,
    pub width: u16,
    pub height: u16,
    pub chipset: String,
    #[serde(default)]
    pub music: String,
}

impl MapSettings {
    pub fn validate(&self) -> Result<(), MapSettingsError> {
        if self.name.trim().is_empty() {
            return Err(MapSettingsError::EmptyName);
        }
        if self.chipset.trim().is_empty() {
            return Err(MapSettingsError::EmptyChipset);
        }
        if self.width == 0 || self.width > MAX_MAP_SIZE {
            return Err(MapSettingsError::WidthOutOfRange(self.width));
        }
        if self.height == 0 || self.height > MAX_MAP_SIZE {
            return Err(MapSettingsError::HeightOutOfRange(self.height));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MapSettingsError {
    EmptyName,
    EmptyChipset,
    WidthOutOfRange(u16),
    HeightOutOfRange(u16),
}

impl std::fmt::Display for MapSettingsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapSettingsError::EmptyName => write!(f, "You must enter a map name"),
            MapSettingsError::EmptyChipset => write!(f, "You must enter a tileset filename"),
            MapSettingsError::WidthOutOfRange(w) => {
                write!(f, "Map width must be between 1 and {}, got {}", MAX_MAP_SIZE, w)
            }
            MapSettingsError::HeightOutOfRange(h) => {
                write!(f, "Map height must be between 1 and {}, got {}", MAX_MAP_SIZE, h)
            }
        }
    }
}

impl std::error::Error for MapSettingsError {}
