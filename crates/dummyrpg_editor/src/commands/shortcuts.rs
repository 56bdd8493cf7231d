//! Keyboard shortcut handling

use crate::tools::ToolMode;

/// Keys the map editor reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    A,
    C,
    E,
    G,
    P,
    S,
    V,
    X,
    Y,
    Z,
    Delete,
    Backspace,
    Escape,
}

/// A key press with its modifiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyChord {
    pub key: Key,
    pub ctrl: bool,
    pub shift: bool,
}

impl KeyChord {
    pub fn plain(key: Key) -> Self {
        Self {
            key,
            ctrl: false,
            shift: false,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: false,
        }
    }

    pub fn ctrl_shift(key: Key) -> Self {
        Self {
            key,
            ctrl: true,
            shift: true,
        }
    }
}

/// Something the editor can be asked to do from a menu or shortcut
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorAction {
    Undo,
    Redo,
    Copy,
    Cut,
    /// Switch to the paste tool; the paste happens on the next click
    Paste,
    SelectAll,
    EraseSelection,
    ClearSelection,
    SetTool(ToolMode),
    ToggleGrid,
}

/// Map a key chord to an editor action
pub fn shortcut_action(chord: KeyChord) -> Option<EditorAction> {
    if chord.ctrl {
        return match chord.key {
            // Ctrl+Shift+Z or Ctrl+Y - Redo
            Key::Z if chord.shift => Some(EditorAction::Redo),
            Key::Y => Some(EditorAction::Redo),
            Key::Z => Some(EditorAction::Undo),
            Key::C => Some(EditorAction::Copy),
            Key::X => Some(EditorAction::Cut),
            Key::V => Some(EditorAction::Paste),
            Key::A => Some(EditorAction::SelectAll),
            _ => None,
        };
    }

    match chord.key {
        Key::P => Some(EditorAction::SetTool(ToolMode::Pen)),
        Key::E => Some(EditorAction::SetTool(ToolMode::Eraser)),
        Key::S => Some(EditorAction::SetTool(ToolMode::Selection)),
        Key::G => Some(EditorAction::ToggleGrid),
        Key::Delete | Key::Backspace => Some(EditorAction::EraseSelection),
        Key::Escape => Some(EditorAction::ClearSelection),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ctrl_shortcuts() {
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::Z)), Some(EditorAction::Undo));
        assert_eq!(shortcut_action(KeyChord::ctrl_shift(Key::Z)), Some(EditorAction::Redo));
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::Y)), Some(EditorAction::Redo));
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::C)), Some(EditorAction::Copy));
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::X)), Some(EditorAction::Cut));
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::V)), Some(EditorAction::Paste));
        assert_eq!(shortcut_action(KeyChord::ctrl(Key::P)), None);
    }

    #[test]
    fn test_plain_shortcuts() {
        assert_eq!(
            shortcut_action(KeyChord::plain(Key::E)),
            Some(EditorAction::SetTool(ToolMode::Eraser))
        );
        assert_eq!(shortcut_action(KeyChord::plain(Key::G)), Some(EditorAction::ToggleGrid));
        assert_eq!(
            shortcut_action(KeyChord::plain(Key::Backspace)),
            Some(EditorAction::EraseSelection)
        );
        assert_eq!(shortcut_action(KeyChord::plain(Key::Z)), None);
    }
}
