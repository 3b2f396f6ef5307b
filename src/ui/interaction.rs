//! Interaction controller
//!
//! Turns canvas gestures into graph mutations and owns the transient UI state:
//! current selection, the open context menu and its anchor, the attribute editor
//! dialog and the inline label editor. None of this state is part of the diagram.

use serde::{Deserialize, Serialize};

use crate::core::{Column, Diagram, NodeId, SchemaError};

use super::attribute_editor::AttributeEditor;
use super::keyboard::Key;
use super::label_editor::LabelEditor;
use super::listeners::{EventHost, ListenerRegistration};

/// Screen point an overlay is positioned at
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    pub x: f64,
    pub y: f64,
}

impl AnchorPoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Row of a table card a gesture landed on
#[derive(Clone, Debug, PartialEq)]
pub enum RowTarget {
    Column(String),
    /// The synthetic "new attribute" row at the bottom of the card
    NewRow,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MenuAction {
    AddAttribute,
    DeleteAttribute,
    DeleteTable,
    DeleteRelationship,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ContextMenu {
    Column { anchor: AnchorPoint },
    Node { anchor: AnchorPoint },
    Edge { anchor: AnchorPoint },
}

impl ContextMenu {
    pub fn anchor(&self) -> AnchorPoint {
        match self {
            ContextMenu::Column { anchor }
            | ContextMenu::Node { anchor }
            | ContextMenu::Edge { anchor } => *anchor,
        }
    }

    pub fn actions(&self) -> &'static [MenuAction] {
        match self {
            ContextMenu::Column { .. } => &[MenuAction::AddAttribute, MenuAction::DeleteAttribute],
            ContextMenu::Node { .. } => &[
                MenuAction::AddAttribute,
                MenuAction::DeleteAttribute,
                MenuAction::DeleteTable,
            ],
            ContextMenu::Edge { .. } => &[MenuAction::DeleteRelationship],
        }
    }
}

/// Column picked by a right-click or double-click, with its owning table
#[derive(Clone, Debug, PartialEq)]
pub struct SelectedAttribute {
    pub node: NodeId,
    pub column: Column,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Selection {
    pub node: Option<NodeId>,
    pub edge: Option<String>,
    pub attribute: Option<SelectedAttribute>,
}

/// Gesture reported by the canvas
#[derive(Clone, Debug, PartialEq)]
pub enum Gesture {
    RowDoubleClick {
        node: NodeId,
        row: RowTarget,
    },
    RowContextMenu {
        node: NodeId,
        row: RowTarget,
        anchor: AnchorPoint,
    },
    NodeClick {
        node: NodeId,
    },
    NodeContextMenu {
        node: NodeId,
        anchor: AnchorPoint,
    },
    NodeDrag {
        node: NodeId,
        position: (f64, f64),
    },
    EdgeClick {
        edge: String,
    },
    EdgeContextMenu {
        edge: String,
        anchor: AnchorPoint,
    },
    Connect {
        source: NodeId,
        target: NodeId,
        source_handle: Option<String>,
        target_handle: Option<String>,
    },
    LabelClick {
        node: NodeId,
    },
    LabelInput {
        text: String,
    },
    LabelBlur,
    KeyDown(Key),
    /// Click that did not land inside an open context menu
    ClickOutside,
    MenuSelect(MenuAction),
}

#[derive(Debug, Default)]
pub struct InteractionController {
    diagram: Diagram,
    selection: Selection,
    context_menu: Option<ContextMenu>,
    editor: Option<AttributeEditor>,
    label_editor: LabelEditor,
    listeners: ListenerRegistration,
}

impl InteractionController {
    pub fn new(diagram: Diagram) -> Self {
        Self {
            diagram,
            ..Self::default()
        }
    }

    pub fn diagram(&self) -> &Diagram {
        &self.diagram
    }

    pub fn into_diagram(self) -> Diagram {
        self.diagram
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn context_menu(&self) -> Option<&ContextMenu> {
        self.context_menu.as_ref()
    }

    pub fn editor(&self) -> Option<&AttributeEditor> {
        self.editor.as_ref()
    }

    /// Field edits inside the open dialog
    pub fn editor_mut(&mut self) -> Option<&mut AttributeEditor> {
        self.editor.as_mut()
    }

    pub fn label_editor(&self) -> &LabelEditor {
        &self.label_editor
    }

    // ===== Mount lifecycle =====

    pub fn mount(&mut self, host: &mut dyn EventHost) -> bool {
        self.listeners.mount(host)
    }

    pub fn unmount(&mut self, host: &mut dyn EventHost) -> bool {
        self.listeners.unmount(host)
    }

    pub fn is_mounted(&self) -> bool {
        self.listeners.is_mounted()
    }

    // ===== Toolbar =====

    pub fn add_table(&mut self) -> NodeId {
        self.diagram.add_table()
    }

    pub fn save(&self, pretty: bool, label: Option<&str>) -> Result<String, SchemaError> {
        self.diagram.save(pretty, label)
    }

    // ===== Gestures =====

    pub fn handle(&mut self, gesture: Gesture) {
        match gesture {
            Gesture::RowDoubleClick { node, row } => self.open_editor(node, &row),
            Gesture::RowContextMenu { node, row, anchor } => {
                if let Some(column) = self.resolve_row(node, &row) {
                    self.selection.attribute = Some(SelectedAttribute { node, column });
                    self.context_menu = Some(ContextMenu::Column { anchor });
                }
            }
            Gesture::NodeClick { node } => {
                if self.diagram.table(node).is_some() {
                    self.selection.node = Some(node);
                }
            }
            Gesture::NodeContextMenu { node, anchor } => {
                if self.diagram.table(node).is_some() {
                    self.selection.node = Some(node);
                    self.context_menu = Some(ContextMenu::Node { anchor });
                }
            }
            Gesture::NodeDrag { node, position } => {
                self.diagram.move_table(node, position);
            }
            Gesture::EdgeClick { edge } => {
                if self.diagram.toggle_cardinality(&edge).is_some() {
                    self.selection.edge = Some(edge);
                }
            }
            Gesture::EdgeContextMenu { edge, anchor } => {
                if self.diagram.relationship(&edge).is_some() {
                    self.selection.edge = Some(edge);
                    self.context_menu = Some(ContextMenu::Edge { anchor });
                }
            }
            Gesture::Connect {
                source,
                target,
                source_handle,
                target_handle,
            } => {
                self.diagram
                    .connect_handles(source, target, source_handle, target_handle);
            }
            Gesture::LabelClick { node } => {
                // Leaving one label for another commits it, as a blur would
                self.finish_label(None);
                if let Some(table) = self.diagram.table(node) {
                    self.label_editor.begin(node, &table.label);
                }
            }
            Gesture::LabelInput { text } => self.label_editor.input(&text),
            Gesture::LabelBlur => self.finish_label(None),
            Gesture::KeyDown(key) => self.handle_key(key),
            Gesture::ClickOutside => self.context_menu = None,
            Gesture::MenuSelect(action) => self.run_menu_action(action),
        }
    }

    // ===== Attribute editor =====

    /// Apply the dialog's working copy and close it
    pub fn save_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.save().apply(&mut self.diagram);
        }
        self.selection.attribute = None;
    }

    /// Delete the attribute the dialog was opened on and close it
    pub fn delete_in_editor(&mut self) {
        if let Some(editor) = self.editor.take() {
            editor.delete().apply(&mut self.diagram);
        }
        self.selection.attribute = None;
    }

    pub fn cancel_editor(&mut self) {
        self.editor = None;
        self.selection.attribute = None;
    }

    fn open_editor(&mut self, node: NodeId, row: &RowTarget) {
        let Some(column) = self.resolve_row(node, row) else {
            return;
        };
        self.selection.attribute = Some(SelectedAttribute {
            node,
            column: column.clone(),
        });
        self.editor = Some(AttributeEditor::open(node, column));
    }

    fn resolve_row(&self, node: NodeId, row: &RowTarget) -> Option<Column> {
        let table = self.diagram.table(node)?;
        match row {
            RowTarget::Column(column_id) => table.column(column_id).cloned(),
            RowTarget::NewRow => Some(Column::draft()),
        }
    }

    // ===== Keyboard and menus =====

    fn handle_key(&mut self, key: Key) {
        if self.label_editor.is_editing() {
            self.finish_label(Some(&key));
            return;
        }
        if self.editor.is_some() {
            // Keys typed into the dialog belong to the dialog
            if key == Key::Escape {
                self.cancel_editor();
            }
            return;
        }
        if key == Key::Delete {
            self.delete_selection();
        }
    }

    fn finish_label(&mut self, key: Option<&Key>) {
        let Some(node) = self.label_editor.node() else {
            return;
        };
        let current = self
            .diagram
            .table(node)
            .map(|t| t.label.clone())
            .unwrap_or_default();

        let rename = match key {
            Some(key) => self.label_editor.key(key, &current),
            None => self.label_editor.commit(&current),
        };
        if let Some((node, label)) = rename {
            self.diagram.rename_table(node, &label);
        }
    }

    /// Delete key: the selected table wins over the selected relationship
    fn delete_selection(&mut self) {
        if let Some(node) = self.selection.node.take() {
            self.diagram.delete_table(node);
        } else if let Some(edge) = self.selection.edge.take() {
            self.diagram.disconnect(&edge);
        }
        self.context_menu = None;
        self.prune_selection();
    }

    fn run_menu_action(&mut self, action: MenuAction) {
        let Some(menu) = self.context_menu else {
            tracing::debug!(?action, "Menu action ignored: no menu open");
            return;
        };
        if !menu.actions().contains(&action) {
            tracing::debug!(?action, ?menu, "Menu action ignored: not offered by this menu");
            return;
        }

        match action {
            MenuAction::AddAttribute => {
                let owner = match menu {
                    ContextMenu::Node { .. } => self.selection.node,
                    ContextMenu::Column { .. } => self.selection.attribute.as_ref().map(|a| a.node),
                    ContextMenu::Edge { .. } => None,
                };
                if let Some(node) = owner.filter(|n| self.diagram.table(*n).is_some()) {
                    let editor = AttributeEditor::blank(node);
                    self.selection.attribute = Some(SelectedAttribute {
                        node,
                        column: editor.form().clone(),
                    });
                    self.editor = Some(editor);
                }
            }
            MenuAction::DeleteAttribute => {
                if let Some(attribute) = self.selection.attribute.take() {
                    self.diagram
                        .delete_column(attribute.node, &attribute.column.id);
                }
                self.editor = None;
            }
            MenuAction::DeleteTable => {
                if let Some(node) = self.selection.node.take() {
                    self.diagram.delete_table(node);
                }
            }
            MenuAction::DeleteRelationship => {
                if let Some(edge) = self.selection.edge.take() {
                    self.diagram.disconnect(&edge);
                }
            }
        }

        self.context_menu = None;
        self.prune_selection();
    }

    /// Drop selection entries whose target no longer exists
    fn prune_selection(&mut self) {
        if self
            .selection
            .node
            .is_some_and(|n| self.diagram.table(n).is_none())
        {
            self.selection.node = None;
        }
        if self
            .selection
            .edge
            .as_deref()
            .is_some_and(|e| self.diagram.relationship(e).is_none())
        {
            self.selection.edge = None;
        }
        if self
            .selection
            .attribute
            .as_ref()
            .is_some_and(|a| self.diagram.table(a.node).is_none())
        {
            self.selection.attribute = None;
        }
        if self
            .editor
            .as_ref()
            .is_some_and(|e| self.diagram.table(e.node()).is_none())
        {
            self.editor = None;
        }
    }
}
