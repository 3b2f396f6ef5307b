//! Interaction layer: gesture handling, dialogs and render records

pub mod attribute_editor;
pub mod interaction;
pub mod keyboard;
pub mod label_editor;
pub mod listeners;
pub mod table_view;

pub use attribute_editor::{AttributeEditor, EditorCommand};
pub use interaction::{
    AnchorPoint, ContextMenu, Gesture, InteractionController, MenuAction, RowTarget,
    SelectedAttribute, Selection,
};
pub use keyboard::Key;
pub use label_editor::LabelEditor;
pub use listeners::{EventHost, ListenerId, ListenerKind, ListenerRegistration};
pub use table_view::{ColumnRow, EdgeView, Handle, HandleKind, HandleSide, TableView, edge_views, table_views};
