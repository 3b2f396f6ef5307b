//! Diagram model: the single owner of the table graph
//!
//! Readers get shared access to tables and relationships. Every write goes through
//! the mutation methods in `graph_ops`, each of which leaves the graph consistent
//! before returning.

use chrono::{DateTime, Utc};
use petgraph::graph::{EdgeIndex, NodeIndex};
use serde::{Deserialize, Serialize};

use super::error::SchemaError;
use super::schema::{Column, ColumnType, NodeId, Relationship, SchemaGraph, TableNode};

#[derive(Clone, Debug, Default)]
pub struct Diagram {
    pub(crate) graph: SchemaGraph,
    /// Next relationship sequence number; never reused
    pub(crate) next_edge_sequence: u64,
}

impl Diagram {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starter diagram with three unconnected tables
    pub fn demo() -> Self {
        let mut diagram = Self::new();

        diagram.insert_table(
            TableNode::new(NodeId(1), "user")
                .with_position(50.0, 50.0)
                .add_column(Column::identity(NodeId(1)))
                .add_column(Column::new("col-username", "username", ColumnType::Varchar)),
        );
        diagram.insert_table(
            TableNode::new(NodeId(2), "role")
                .with_position(350.0, 50.0)
                .add_column(Column::identity(NodeId(2)))
                .add_column(Column::new("col-code", "code", ColumnType::Varchar)),
        );

        let mut username_fk = Column::new("col-username-fk", "username", ColumnType::Varchar)
            .primary_key();
        username_fk.fk = true;
        diagram.insert_table(
            TableNode::new(NodeId(3), "user_role")
                .with_position(200.0, 300.0)
                .add_column(Column::identity(NodeId(3)))
                .add_column(username_fk)
                .add_column(Column::new("col-role-code", "role_code", ColumnType::Varchar)),
        );

        diagram
    }

    pub(crate) fn insert_table(&mut self, table: TableNode) -> NodeIndex {
        self.graph.add_node(table)
    }

    pub fn graph(&self) -> &SchemaGraph {
        &self.graph
    }

    pub fn table_count(&self) -> usize {
        self.graph.node_count()
    }

    pub fn relationship_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// Tables in display order.
    ///
    /// New tables always receive an identifier above every existing one, so
    /// ascending identifier order is insertion order even after slots are reused.
    pub fn tables(&self) -> Vec<&TableNode> {
        let mut tables: Vec<&TableNode> = self
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .collect();
        tables.sort_by_key(|t| t.id);
        tables
    }

    /// Relationships in creation order
    pub fn relationships(&self) -> Vec<&Relationship> {
        let mut edges: Vec<&Relationship> = self
            .graph
            .edge_indices()
            .filter_map(|idx| self.graph.edge_weight(idx))
            .collect();
        edges.sort_by_key(|r| r.sequence);
        edges
    }

    pub fn table(&self, id: NodeId) -> Option<&TableNode> {
        self.node_index(id)
            .and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn relationship(&self, id: &str) -> Option<&Relationship> {
        self.edge_index(id)
            .and_then(|idx| self.graph.edge_weight(idx))
    }

    pub fn find_table_by_label(&self, label: &str) -> Option<NodeId> {
        self.graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .find(|t| t.label == label)
            .map(|t| t.id)
    }

    /// Relationship between an ordered pair of tables, if any
    pub fn relationship_between(&self, source: NodeId, target: NodeId) -> Option<&Relationship> {
        let (s, t) = (self.node_index(source)?, self.node_index(target)?);
        self.graph
            .find_edge(s, t)
            .and_then(|idx| self.graph.edge_weight(idx))
    }

    pub(crate) fn node_index(&self, id: NodeId) -> Option<NodeIndex> {
        self.graph
            .node_indices()
            .find(|&idx| self.graph.node_weight(idx).is_some_and(|t| t.id == id))
    }

    pub(crate) fn edge_index(&self, id: &str) -> Option<EdgeIndex> {
        self.graph
            .edge_indices()
            .find(|&idx| self.graph.edge_weight(idx).is_some_and(|r| r.id == id))
    }

    pub(crate) fn table_mut(&mut self, id: NodeId) -> Option<&mut TableNode> {
        let idx = self.node_index(id)?;
        self.graph.node_weight_mut(idx)
    }

    /// Capture the current graph for diagnostic output
    pub fn snapshot(&self) -> DiagramSnapshot {
        DiagramSnapshot {
            tables: self.tables().into_iter().cloned().collect(),
            relationships: self.relationships().into_iter().cloned().collect(),
            captured_at: Utc::now(),
        }
    }

    /// Write the whole diagram to the log as JSON and return the text.
    ///
    /// No file or wire format is implied; persistence belongs to the embedding application.
    pub fn save(&self, pretty: bool, label: Option<&str>) -> Result<String, SchemaError> {
        let snapshot = self.snapshot();
        let json = snapshot.to_json(pretty)?;
        tracing::info!(
            label = label.unwrap_or("diagram"),
            tables = snapshot.tables.len(),
            relationships = snapshot.relationships.len(),
            "Diagram saved: {}",
            json
        );
        Ok(json)
    }
}

/// Serializable copy of the diagram at one instant
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct DiagramSnapshot {
    pub tables: Vec<TableNode>,
    pub relationships: Vec<Relationship>,
    pub captured_at: DateTime<Utc>,
}

impl DiagramSnapshot {
    pub fn to_json(&self, pretty: bool) -> Result<String, SchemaError> {
        let json = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_diagram_is_empty() {
        let diagram = Diagram::new();
        assert_eq!(diagram.table_count(), 0);
        assert_eq!(diagram.relationship_count(), 0);
        assert!(diagram.tables().is_empty());
    }

    #[test]
    fn test_demo_diagram() {
        let diagram = Diagram::demo();
        let labels: Vec<&str> = diagram.tables().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, vec!["user", "role", "user_role"]);
        assert_eq!(diagram.relationship_count(), 0);

        let user_role = diagram.table(NodeId(3)).unwrap();
        assert_eq!(user_role.position, (200.0, 300.0));
        assert!(user_role.columns[1].pk && user_role.columns[1].fk);
    }

    #[test]
    fn test_find_table_by_label() {
        let diagram = Diagram::demo();
        assert_eq!(diagram.find_table_by_label("role"), Some(NodeId(2)));
        assert_eq!(diagram.find_table_by_label("missing"), None);
    }

    #[test]
    fn test_snapshot_json_contains_tables() {
        let diagram = Diagram::demo();
        let json = diagram.snapshot().to_json(false).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["tables"].as_array().unwrap().len(), 3);
        assert_eq!(value["tables"][0]["label"], "user");
        assert_eq!(value["tables"][0]["columns"][0]["data_type"], "bigint");
        assert!(value["relationships"].as_array().unwrap().is_empty());
        assert!(value.get("captured_at").is_some());
    }

    #[test]
    fn test_snapshot_deserializes_back() {
        let diagram = Diagram::demo();
        let json = diagram.snapshot().to_json(true).unwrap();
        let parsed: DiagramSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.tables, diagram.snapshot().tables);
    }

    #[test]
    fn test_save_returns_json() {
        let json = Diagram::demo().save(false, Some("unit")).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.contains("\"user_role\""));
    }
}
