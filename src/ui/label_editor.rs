//! Inline editing of a table label
//!
//! Clicking the label swaps it for a text field. Enter or blur commits, Escape
//! reverts. Input is normalized on every keystroke.

use crate::core::validation::normalize_identifier;
use crate::core::NodeId;

use super::keyboard::Key;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum LabelEditor {
    #[default]
    Idle,
    Editing { node: NodeId, draft: String },
}

impl LabelEditor {
    pub fn is_editing(&self) -> bool {
        matches!(self, LabelEditor::Editing { .. })
    }

    pub fn node(&self) -> Option<NodeId> {
        match self {
            LabelEditor::Editing { node, .. } => Some(*node),
            LabelEditor::Idle => None,
        }
    }

    pub fn draft(&self) -> Option<&str> {
        match self {
            LabelEditor::Editing { draft, .. } => Some(draft.as_str()),
            LabelEditor::Idle => None,
        }
    }

    pub fn begin(&mut self, node: NodeId, current_label: &str) {
        *self = LabelEditor::Editing {
            node,
            draft: current_label.to_string(),
        };
    }

    pub fn input(&mut self, text: &str) {
        if let LabelEditor::Editing { draft, .. } = self {
            *draft = normalize_identifier(text);
        }
    }

    /// Leave editing. Yields `(node, new label)` only when the label changed.
    pub fn commit(&mut self, current_label: &str) -> Option<(NodeId, String)> {
        match std::mem::take(self) {
            LabelEditor::Editing { node, draft } if draft != current_label => Some((node, draft)),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        *self = LabelEditor::Idle;
    }

    /// Enter commits, Escape reverts, anything else is typing
    pub fn key(&mut self, key: &Key, current_label: &str) -> Option<(NodeId, String)> {
        match key {
            Key::Enter => self.commit(current_label),
            Key::Escape => {
                self.cancel();
                None
            }
            _ => None,
        }
    }
}
