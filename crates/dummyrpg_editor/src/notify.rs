//! Outgoing notifications for the GUI layer

use crate::geometry::{CellRect, PixelRect};
use crate::layers::LayerRef;
use crate::tools::ToolPreview;

/// Receives what the editing session wants the GUI to know
///
/// Every method defaults to doing nothing, so adapters only implement what
/// they display.
pub trait EditorObserver: Send + Sync {
    /// Cells of `layer` changed and must be redrawn
    fn region_repainted(&self, _layer: LayerRef, _cells: CellRect) {}

    /// The map has unsaved modifications
    fn modified(&self) {}

    fn history_changed(&self, _can_undo: bool, _can_redo: bool) {}

    fn preview_changed(&self, _preview: &ToolPreview) {}

    fn selection_changed(&self, _selection: Option<PixelRect>) {}

    /// Something the user should be told about failed
    fn error_reported(&self, _message: &str) {}
}

/// Observer that ignores everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullObserver;

impl EditorObserver for NullObserver {}

#[cfg(test)]
pub(crate) mod recording {
    use std::sync::{Arc, Mutex};

    use super::*;

    #[derive(Debug, Clone, PartialEq)]
    pub enum Notification {
        Repainted(LayerRef, CellRect),
        Modified,
        History { can_undo: bool, can_redo: bool },
        Preview(ToolPreview),
        Selection(Option<PixelRect>),
        Error(String),
    }

    /// Shares its log with the test through an `Arc`
    #[derive(Debug, Clone, Default)]
    pub struct RecordingObserver {
        log: Arc<Mutex<Vec<Notification>>>,
    }

    impl RecordingObserver {
        pub fn take(&self) -> Vec<Notification> {
            self.log
                .lock()
                .map(|mut log| std::mem::take(&mut *log))
                .unwrap_or_default()
        }

        fn push(&self, notification: Notification) {
            if let Ok(mut log) = self.log.lock() {
                log.push(notification);
            }
        }
    }

    impl EditorObserver for RecordingObserver {
        fn region_repainted(&self, layer: LayerRef, cells: CellRect) {
            self.push(Notification::Repainted(layer, cells));
        }

        fn modified(&self) {
            self.push(Notification::Modified);
        }

        fn history_changed(&self, can_undo: bool, can_redo: bool) {
            self.push(Notification::History { can_undo, can_redo });
        }

        fn preview_changed(&self, preview: &ToolPreview) {
            self.push(Notification::Preview(preview.clone()));
        }

        fn selection_changed(&self, selection: Option<PixelRect>) {
            self.push(Notification::Selection(selection));
        }

        fn error_reported(&self, message: &str) {
            self.push(Notification::Error(message.to_string()));
        }
    }
}
