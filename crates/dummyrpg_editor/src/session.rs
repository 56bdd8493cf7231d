//! The editing session for one open map
//!
//! `MapEditor` owns the map together with everything that only makes sense
//! while it is being edited: the active layer, the command history, the
//! clipboard, the current tool and the pointer state. All editing entry
//! points degrade to no-ops when no layer is active.

use std::path::Path;

use dummyrpg_core::{Coord, Map, MapFileError, MapSettings, MapSettingsError};

use crate::commands::{
    shortcut_action, BlockingPatch, CommandHistory, EditCommand, EditorAction, GraphicPatch,
    KeyChord, MapClipboard,
};
use crate::geometry::{CellRect, GridGeometry, PixelRect};
use crate::layers::{LayerKind, LayerRef};
use crate::notify::{EditorObserver, NullObserver};
use crate::preferences::EditorPreferences;
use crate::tools::{PointerMode, TileSelection, ToolMode, ToolPreview};

#[cfg_attr(feature = "bevy", derive(bevy::prelude::Resource))]
pub struct MapEditor {
    pub(crate) map: Map,
    pub(crate) active: Option<LayerRef>,
    history: CommandHistory,
    clipboard: MapClipboard,
    pub(crate) tool: ToolMode,
    pub(crate) tile_selection: Option<TileSelection>,
    /// Snapped selection rectangle, in pixels of the active layer
    selection: Option<PixelRect>,
    preview: ToolPreview,
    pub(crate) pointer: PointerMode,
    pub(crate) current_floor: usize,
    show_grid: bool,
    show_blocking_overlay: bool,
    pub(crate) observer: Box<dyn EditorObserver>,
}

impl MapEditor {
    pub fn new(map: Map, preferences: &EditorPreferences) -> Self {
        Self {
            map,
            active: None,
            history: CommandHistory::new(),
            clipboard: MapClipboard::new(),
            tool: preferences.default_tool,
            tile_selection: None,
            selection: None,
            preview: ToolPreview::None,
            pointer: PointerMode::Idle,
            current_floor: 0,
            show_grid: preferences.show_grid,
            show_blocking_overlay: preferences.show_blocking_overlay,
            observer: Box::new(NullObserver),
        }
    }

    /// Load `<name>.map` / `<name>.blk` from `dir` and start editing it
    ///
    /// The map moves to the front of the recent list, or leaves it when it
    /// cannot be read.
    pub fn open(
        dir: &Path,
        name: &str,
        preferences: &mut EditorPreferences,
    ) -> Result<Self, MapFileError> {
        let dir_name = dir.to_string_lossy();
        match Map::load(dir, name) {
            Ok(map) => {
                preferences.add_recent_map(dir_name, name);
                Ok(Self::new(map, preferences))
            }
            Err(e) => {
                preferences.remove_recent_map(&dir_name, name);
                Err(e)
            }
        }
    }

    pub fn with_observer(mut self, observer: impl EditorObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn map(&self) -> &Map {
        &self.map
    }

    pub fn into_map(self) -> Map {
        self.map
    }

    // Active layer

    /// Make `layer` the editable layer; false if it doesn't exist
    ///
    /// Switching layers discards the whole undo/redo history.
    pub fn set_active_layer(&mut self, layer: LayerRef) -> bool {
        if !layer.exists_in(&self.map) {
            return false;
        }
        log::debug!("Active layer set to {:?}", layer);
        self.active = Some(layer);
        self.current_floor = layer.floor();
        self.reset_layer_session();
        true
    }

    pub fn clear_active_layer(&mut self) {
        self.active = None;
        self.reset_layer_session();
    }

    fn reset_layer_session(&mut self) {
        self.history.clear();
        self.pointer = PointerMode::Idle;
        self.set_selection(None);
        self.set_preview(ToolPreview::None);
        self.observer.history_changed(false, false);
    }

    pub fn active_layer(&self) -> Option<LayerRef> {
        self.active
    }

    /// Cell grid of the active layer
    pub fn geometry(&self) -> Option<GridGeometry> {
        self.active?.geometry(&self.map)
    }

    // Command engine

    /// Execute `command` on the active layer and record it, dropping any redo entries
    pub fn do_command(&mut self, mut command: EditCommand) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        let Some(cells) = command.execute(&mut self.map, target) else {
            return false;
        };
        let discarded = self.history.push(command);
        if discarded > 0 {
            log::debug!("Discarded {} redo entries", discarded);
        }
        self.notify_edit(target, cells);
        true
    }

    pub fn undo(&mut self) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        let Some(command) = self.history.step_back() else {
            return false;
        };
        let Some(cells) = command.undo(&mut self.map, target) else {
            return false;
        };
        self.notify_edit(target, cells);
        true
    }

    pub fn redo(&mut self) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        let Some(command) = self.history.step_forward() else {
            return false;
        };
        let Some(cells) = command.execute(&mut self.map, target) else {
            return false;
        };
        self.notify_edit(target, cells);
        true
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    fn notify_edit(&self, layer: LayerRef, cells: CellRect) {
        if !cells.is_empty() {
            self.observer.region_repainted(layer, cells);
        }
        self.observer.modified();
        self.observer
            .history_changed(self.history.can_undo(), self.history.can_redo());
    }

    // Clipboard

    /// Copy the selected cells of the active layer
    pub fn copy(&mut self) -> bool {
        match self.selected_cells() {
            Some(cells) => self.copy_region(cells),
            None => false,
        }
    }

    /// Copy then erase the selected cells
    pub fn cut(&mut self) -> bool {
        match self.selected_cells() {
            Some(cells) => self.cut_region(cells),
            None => false,
        }
    }

    pub fn copy_region(&mut self, cells: CellRect) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        if cells.is_empty() {
            return false;
        }
        self.clipboard.copy_region(&self.map, target, cells)
    }

    pub fn cut_region(&mut self, cells: CellRect) -> bool {
        self.copy_region(cells) && self.erase_region(cells, "Cut")
    }

    /// Write the clipboard of the active layer's kind at `origin`
    ///
    /// The clipboard is left untouched, so pasting again repeats the same content.
    pub fn paste(&mut self, origin: Coord) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        if !self.clipboard.has_content(target.kind()) {
            return false;
        }
        let command = match target.kind() {
            LayerKind::Graphic => {
                EditCommand::graphic(origin, self.clipboard.graphic().clone(), "Paste")
            }
            LayerKind::Blocking => {
                EditCommand::blocking(origin, self.clipboard.blocking().clone(), "Paste")
            }
        };
        self.do_command(command)
    }

    pub fn clipboard(&self) -> &MapClipboard {
        &self.clipboard
    }

    pub(crate) fn erase_region(&mut self, cells: CellRect, description: &'static str) -> bool {
        let Some(target) = self.active else {
            return false;
        };
        let command = match target.kind() {
            LayerKind::Graphic => EditCommand::graphic(
                cells.origin,
                GraphicPatch::erase(cells.width, cells.height),
                description,
            ),
            LayerKind::Blocking => EditCommand::blocking(
                cells.origin,
                BlockingPatch::erase(cells.width, cells.height),
                description,
            ),
        };
        self.do_command(command)
    }

    // Selection and preview

    pub fn selection(&self) -> Option<PixelRect> {
        self.selection
    }

    /// Cells under the selection rectangle
    pub fn selected_cells(&self) -> Option<CellRect> {
        self.geometry()?.cell_rect(self.selection?)
    }

    pub(crate) fn set_selection(&mut self, selection: Option<PixelRect>) {
        if self.selection != selection {
            self.selection = selection;
            self.observer.selection_changed(selection);
        }
    }

    pub fn select_all(&mut self) {
        if let Some(geometry) = self.geometry() {
            self.set_selection(Some(geometry.full_rect()));
        }
    }

    pub fn preview(&self) -> &ToolPreview {
        &self.preview
    }

    pub(crate) fn set_preview(&mut self, preview: ToolPreview) {
        if self.preview != preview {
            self.preview = preview;
            self.observer.preview_changed(&self.preview);
        }
    }

    // Tools

    pub fn tool(&self) -> ToolMode {
        self.tool
    }

    /// Switch tools, dropping the selection rectangle and any preview
    pub fn set_tool(&mut self, tool: ToolMode) {
        self.tool = tool;
        self.pointer = PointerMode::Idle;
        self.set_selection(None);
        self.set_preview(ToolPreview::None);
    }

    pub fn tile_selection(&self) -> Option<TileSelection> {
        self.tile_selection
    }

    /// Chipset cells the pen paints with
    pub fn set_tile_selection(&mut self, selection: Option<TileSelection>) {
        self.tile_selection = selection.filter(|s| !s.is_empty());
    }

    // Map structure

    pub fn current_floor(&self) -> usize {
        self.current_floor
    }

    pub fn set_current_floor(&mut self, floor: usize) -> bool {
        if floor >= self.map.floor_count() {
            return false;
        }
        self.current_floor = floor;
        true
    }

    /// Resize the whole map; not undoable, history is kept
    pub fn resize_map(&mut self, width: u16, height: u16) -> Result<(), MapSettingsError> {
        let settings = MapSettings {
            width,
            height,
            ..self.map.settings()
        };
        self.apply_map_settings(&settings)
    }

    pub fn apply_map_settings(&mut self, settings: &MapSettings) -> Result<(), MapSettingsError> {
        let resized = (settings.width, settings.height) != (self.map.width(), self.map.height());
        self.map.apply_settings(settings)?;
        if resized {
            self.set_selection(None);
            self.set_preview(ToolPreview::None);
        }
        self.observer.modified();
        Ok(())
    }

    pub fn add_floor(&mut self) -> usize {
        let index = self.map.add_floor();
        self.observer.modified();
        index
    }

    pub fn add_graphic_layer(&mut self, floor: usize, position: i8) -> bool {
        let added = self
            .map
            .floor_mut(floor)
            .is_some_and(|f| f.add_graphic_layer(position));
        if added {
            self.observer.modified();
        }
        added
    }

    pub fn set_floor_visible(&mut self, floor: usize, visible: bool) -> bool {
        match self.map.floor_mut(floor) {
            Some(f) => {
                f.set_visible(visible);
                true
            }
            None => false,
        }
    }

    /// Save the map into `dir`, reporting failures to the observer
    ///
    /// A successful save puts the map at the front of the recent list.
    pub fn save(&self, dir: &Path, preferences: &mut EditorPreferences) -> bool {
        match self.map.save(dir) {
            Ok(()) => {
                preferences.add_recent_map(dir.to_string_lossy(), self.map.name.as_str());
                true
            }
            Err(e) => {
                log::warn!("Failed to save map '{}': {}", self.map.name, e);
                self.observer
                    .error_reported(&format!("Failed to save map '{}': {}", self.map.name, e));
                false
            }
        }
    }

    // Actions

    pub fn apply_action(&mut self, action: EditorAction) {
        match action {
            EditorAction::Undo => {
                self.undo();
            }
            EditorAction::Redo => {
                self.redo();
            }
            EditorAction::Copy => {
                self.copy();
            }
            EditorAction::Cut => {
                self.cut();
            }
            EditorAction::Paste => self.set_tool(ToolMode::Paste),
            EditorAction::SelectAll => self.select_all(),
            EditorAction::EraseSelection => {
                if let Some(cells) = self.selected_cells() {
                    self.erase_region(cells, "Erase");
                    self.set_selection(None);
                }
            }
            EditorAction::ClearSelection => {
                self.pointer = PointerMode::Idle;
                self.set_selection(None);
                self.set_preview(ToolPreview::None);
            }
            EditorAction::SetTool(tool) => self.set_tool(tool),
            EditorAction::ToggleGrid => self.toggle_grid(),
        }
    }

    /// Run the action bound to `chord`, if any
    pub fn handle_key(&mut self, chord: KeyChord) -> bool {
        match shortcut_action(chord) {
            Some(action) => {
                self.apply_action(action);
                true
            }
            None => false,
        }
    }

    // Grid

    pub fn show_grid(&self) -> bool {
        self.show_grid
    }

    pub fn toggle_grid(&mut self) {
        self.show_grid = !self.show_grid;
    }

    pub fn show_blocking_overlay(&self) -> bool {
        self.show_blocking_overlay
    }

    pub fn set_show_blocking_overlay(&mut self, show: bool) {
        self.show_blocking_overlay = show;
    }

    /// Blocking layer of the current floor to tint over the graphic layers
    ///
    /// `None` when the overlay is off or while the blocking layer itself is
    /// being edited.
    pub fn blocking_overlay(&self) -> Option<LayerRef> {
        if !self.show_blocking_overlay {
            return None;
        }
        let layer = LayerRef::Blocking {
            floor: self.current_floor,
        };
        if self.active == Some(layer) || !layer.exists_in(&self.map) {
            return None;
        }
        Some(layer)
    }

    /// Grid to draw over the map, when enabled and a layer is active
    pub fn grid_overlay(&self) -> Option<GridGeometry> {
        if !self.show_grid {
            return None;
        }
        self.geometry()
    }
}
