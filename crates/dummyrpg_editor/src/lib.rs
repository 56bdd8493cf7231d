//! dummyrpg_editor - Map editing kernel for the DummyRPG editor
//!
//! This crate holds everything the map view needs that isn't drawing:
//! - Active layer selection and grid snapping
//! - Undo/redo through reversible patch commands
//! - Copy/cut/paste with separate graphic and blocking clipboards
//! - Pen, eraser, selection and paste tools driven by pointer events
//! - Keyboard shortcuts and editor preferences
//!
//! # Usage
//!
//! ```rust,ignore
//! use dummyrpg_core::Map;
//! use dummyrpg_editor::{EditorPreferences, LayerRef, MapEditor, PixelPoint};
//!
//! let prefs = EditorPreferences::load();
//! let mut editor = MapEditor::new(Map::new("village", 40, 30, "chipset.png"), &prefs);
//! editor.set_active_layer(LayerRef::Graphic { floor: 0, position: 0 });
//! editor.pointer_pressed(PixelPoint::new(10, 10));
//! editor.pointer_released(PixelPoint::new(70, 40));
//! editor.undo();
//! ```
//!
//! The GUI layer wraps `MapEditor` and implements [`EditorObserver`] to learn
//! which cells to redraw.

pub mod commands;
pub mod geometry;
pub mod layers;
pub mod notify;
pub mod preferences;
pub mod session;
pub mod tools;

pub use dummyrpg_core;

pub use commands::{
    BlockingPatch, CommandHistory, EditCommand, EditorAction, GraphicPatch, Key, KeyChord,
    MapClipboard, Patch, PatchCommand,
};
pub use geometry::{CellRect, GridGeometry, PixelPoint, PixelRect};
pub use layers::{LayerKind, LayerRef};
pub use notify::{EditorObserver, NullObserver};
pub use preferences::{EditorPreferences, PreferencesError, RecentMap};
pub use session::MapEditor;
pub use tools::{ChipsetSelection, PointerMode, TileSelection, ToolMode, ToolPreview};
