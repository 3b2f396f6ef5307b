//! Render records handed to the canvas library
//!
//! The canvas draws what these records describe and reports gestures back by
//! node id, edge id, column id and handle id. Nothing here is stored state.

use serde::Serialize;

use crate::core::{Cardinality, Column, Diagram, EdgeStyle, NodeId, Relationship, TableNode};

/// Text shown for the placeholder row at the bottom of every table
pub const NEW_ROW_TEXT: &str = "...";

/// Offsets of the two handle slots along each side
pub const HANDLE_OFFSETS: [&str; 2] = ["25%", "75%"];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HandleSide {
    Bottom,
    Left,
    Top,
    Right,
}

impl HandleSide {
    pub const ALL: [HandleSide; 4] = [
        HandleSide::Bottom,
        HandleSide::Left,
        HandleSide::Top,
        HandleSide::Right,
    ];

    fn initial(&self) -> char {
        match self {
            HandleSide::Bottom => 'b',
            HandleSide::Left => 'l',
            HandleSide::Top => 't',
            HandleSide::Right => 'r',
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum HandleKind {
    Source,
    Target,
}

/// Connection point on a table's border
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Handle {
    pub id: String,
    pub side: HandleSide,
    pub offset: &'static str,
    pub kind: HandleKind,
}

/// One row of a table card
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ColumnRow {
    /// `None` for the placeholder row
    pub column_id: Option<String>,
    pub text: String,
    pub badges: String,
    pub is_new: bool,
}

impl ColumnRow {
    fn from_column(column: &Column) -> Self {
        Self {
            column_id: Some(column.id.clone()),
            text: column.name.clone(),
            badges: badges(column),
            is_new: false,
        }
    }

    fn placeholder() -> Self {
        Self {
            column_id: None,
            text: NEW_ROW_TEXT.to_string(),
            badges: String::new(),
            is_new: true,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TableView {
    pub id: NodeId,
    pub label: String,
    pub position: (f64, f64),
    pub rows: Vec<ColumnRow>,
    pub handles: Vec<Handle>,
}

impl TableView {
    pub fn from_table(table: &TableNode) -> Self {
        let mut rows: Vec<ColumnRow> = table.columns.iter().map(ColumnRow::from_column).collect();
        rows.push(ColumnRow::placeholder());

        Self {
            id: table.id,
            label: table.label.clone(),
            position: table.position,
            rows,
            handles: handles(&table.label),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EdgeView {
    pub id: String,
    pub source: NodeId,
    pub target: NodeId,
    pub label: &'static str,
    pub style: EdgeStyle,
    pub source_handle: Option<String>,
    pub target_handle: Option<String>,
}

impl EdgeView {
    pub fn from_relationship(relationship: &Relationship) -> Self {
        let cardinality: Cardinality = relationship.cardinality;
        Self {
            id: relationship.id.clone(),
            source: relationship.source,
            target: relationship.target,
            label: cardinality.label(),
            style: cardinality.style(),
            source_handle: relationship.source_handle.clone(),
            target_handle: relationship.target_handle.clone(),
        }
    }
}

/// Badge text: `[type]` then `[U]`, `[FK]`, `[PK]` for the flags that are set
pub fn badges(column: &Column) -> String {
    let mut out = String::new();
    if let Some(data_type) = column.data_type {
        out.push_str(&format!("[{}]", data_type));
    }
    if column.unique {
        out.push_str(" [U]");
    }
    if column.fk {
        out.push_str(" [FK]");
    }
    if column.pk {
        out.push_str(" [PK]");
    }
    out
}

/// Sixteen handles: per side and slot, one target then one source
pub fn handles(label: &str) -> Vec<Handle> {
    let mut out = Vec::with_capacity(HandleSide::ALL.len() * HANDLE_OFFSETS.len() * 2);
    for side in HandleSide::ALL {
        for (slot, &offset) in HANDLE_OFFSETS.iter().enumerate() {
            let base = format!("{}-{}{}", label, side.initial(), slot + 1);
            out.push(Handle {
                id: format!("{}-t", base),
                side,
                offset,
                kind: HandleKind::Target,
            });
            out.push(Handle {
                id: format!("{}-s", base),
                side,
                offset,
                kind: HandleKind::Source,
            });
        }
    }
    out
}

pub fn table_views(diagram: &Diagram) -> Vec<TableView> {
    diagram.tables().into_iter().map(TableView::from_table).collect()
}

pub fn edge_views(diagram: &Diagram) -> Vec<EdgeView> {
    diagram
        .relationships()
        .into_iter()
        .map(EdgeView::from_relationship)
        .collect()
}
