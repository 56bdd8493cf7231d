//! Editor tools - pen, eraser, selection and paste
//!
//! Turns a pixel drag region into commands on the active layer. Regions are
//! snapped to the layer grid and clamped to the layer before anything else.

pub mod chipset;
mod pointer;

pub use chipset::{ChipsetSelection, TileSelection};
pub use pointer::PointerMode;

use serde::{Deserialize, Serialize};

use crate::commands::{BlockingPatch, EditCommand, GraphicPatch};
use crate::geometry::PixelRect;
use crate::layers::LayerKind;
use crate::session::MapEditor;

/// Available drawing tools
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ToolMode {
    #[default]
    Pen,
    Eraser,
    Selection,
    Paste,
}

impl ToolMode {
    pub fn label(&self) -> &'static str {
        match self {
            ToolMode::Pen => "Pen",
            ToolMode::Eraser => "Eraser",
            ToolMode::Selection => "Selection",
            ToolMode::Paste => "Paste",
        }
    }
}

/// Uncommitted preview drawn over the map while dragging
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ToolPreview {
    #[default]
    None,
    /// Tiles the pen would paint over `area`
    Tiles { area: PixelRect, patch: GraphicPatch },
    /// Flat highlight of the cells the pen would block
    BlockingFill(PixelRect),
}

impl MapEditor {
    /// Show what the current tool would do over `region` without touching the map
    pub fn preview_tool(&mut self, region: PixelRect) {
        let Some(layer) = self.active else {
            return;
        };
        let Some(geometry) = self.geometry() else {
            return;
        };
        let area = geometry.snap_rect(region);

        match self.tool {
            ToolMode::Pen => {
                let preview = match layer.kind() {
                    LayerKind::Graphic => {
                        match (self.tile_selection, geometry.cell_rect(area)) {
                            (Some(selection), Some(cells)) => ToolPreview::Tiles {
                                area,
                                patch: selection.tile_patch(cells.width, cells.height),
                            },
                            _ => ToolPreview::None,
                        }
                    }
                    LayerKind::Blocking => ToolPreview::BlockingFill(area),
                };
                self.set_preview(preview);
            }
            ToolMode::Eraser | ToolMode::Selection => self.set_selection(Some(area)),
            ToolMode::Paste => {}
        }
    }

    /// Commit the current tool over `region`
    ///
    /// Returns true when a command was recorded.
    pub fn use_tool(&mut self, region: PixelRect) -> bool {
        let Some(layer) = self.active else {
            return false;
        };
        let Some(geometry) = self.geometry() else {
            return false;
        };
        let area = geometry.snap_rect(region);

        match self.tool {
            ToolMode::Pen => {
                self.set_preview(ToolPreview::None);
                let Some(cells) = geometry.cell_rect(area) else {
                    return false;
                };
                let command = match layer.kind() {
                    LayerKind::Graphic => {
                        let Some(selection) = self.tile_selection else {
                            return false;
                        };
                        EditCommand::graphic(
                            cells.origin,
                            selection.tile_patch(cells.width, cells.height),
                            "Paint",
                        )
                    }
                    LayerKind::Blocking => EditCommand::blocking(
                        cells.origin,
                        BlockingPatch::filled(cells.width, cells.height, true),
                        "Block",
                    ),
                };
                self.do_command(command)
            }
            ToolMode::Eraser => {
                self.set_selection(None);
                match geometry.cell_rect(area) {
                    Some(cells) => self.erase_region(cells, "Erase"),
                    None => false,
                }
            }
            ToolMode::Selection => {
                self.set_selection(Some(area));
                false
            }
            ToolMode::Paste => {
                // Anchored where the pointer was released
                let anchor = geometry.clamp_point(geometry.snap_point(region.bottom_right()));
                self.paste(geometry.cell_at(anchor))
            }
        }
    }
}
