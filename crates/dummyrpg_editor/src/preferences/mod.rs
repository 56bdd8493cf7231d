//! Editor preferences persisted between sessions

mod file;

pub use file::PreferencesError;

use serde::{Deserialize, Serialize};

use crate::tools::ToolMode;

/// How many recently opened maps are remembered
pub const MAX_RECENT_MAPS: usize = 10;

/// A map opened in a previous session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentMap {
    /// Directory holding the `.map` / `.blk` files
    pub dir: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
#[serde(default)]
pub struct EditorPreferences {
    pub show_grid: bool,
    pub default_tool: ToolMode,
    /// Read through `MapEditor::blocking_overlay`
    pub show_blocking_overlay: bool,
    /// Only read by the GUI adapter when drawing the chipset palette
    pub dark_chipset_background: bool,
    /// Most recent first
    pub recent_maps: Vec<RecentMap>,
}

impl Default for EditorPreferences {
    fn default() -> Self {
        Self {
            show_grid: true,
            default_tool: ToolMode::Pen,
            show_blocking_overlay: true,
            dark_chipset_background: false,
            recent_maps: Vec::new(),
        }
    }
}

impl EditorPreferences {
    /// Move (or insert) a map at the front of the recent list
    pub fn add_recent_map(&mut self, dir: impl Into<String>, name: impl Into<String>) {
        let recent = RecentMap {
            dir: dir.into(),
            name: name.into(),
        };
        self.recent_maps.retain(|r| *r != recent);
        self.recent_maps.insert(0, recent);
        self.recent_maps.truncate(MAX_RECENT_MAPS);
    }

    pub fn remove_recent_map(&mut self, dir: &str, name: &str) {
        self.recent_maps
            .retain(|r| !(r.dir == dir && r.name == name));
    }

    pub fn clear_recent_maps(&mut self) {
        self.recent_maps.clear();
    }
}
