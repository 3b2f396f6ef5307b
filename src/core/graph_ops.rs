//! Graph mutation engine
//!
//! Every operation is total: an invocation that cannot apply (unknown identifier,
//! duplicate edge, missing primary key) leaves the diagram untouched and logs the
//! reason at debug level. Return values report what happened; none of them is an error.

use uuid::Uuid;

use super::diagram::Diagram;
use super::schema::{
    CascadeRule, Cardinality, Column, NodeId, Relationship, TableNode, derived_column_name,
};
use super::validation::normalize_identifier;

/// Position given to tables created from the toolbar
pub const NEW_TABLE_POSITION: (f64, f64) = (0.0, 0.0);

impl Diagram {
    /// Append a table with the next free identifier and a seeded identity column
    pub fn add_table(&mut self) -> NodeId {
        let id = self
            .graph
            .node_indices()
            .filter_map(|idx| self.graph.node_weight(idx))
            .map(|t| t.id.0)
            .max()
            .map_or(NodeId(1), |max| NodeId(max + 1));

        let (x, y) = NEW_TABLE_POSITION;
        self.insert_table(
            TableNode::new(id, format!("Table{}", id))
                .with_position(x, y)
                .add_column(Column::identity(id)),
        );

        tracing::info!(table = %id, "Table added");
        id
    }

    /// Connect two tables; see [`Diagram::connect_handles`]
    pub fn connect(&mut self, source: NodeId, target: NodeId) -> Option<String> {
        self.connect_handles(source, target, None, None)
    }

    /// Create a relationship from `source` to `target`.
    ///
    /// The target receives a derived foreign-key column named
    /// `{source label}_{source pk name}` right after its identity column.
    /// Returns the new relationship id, or `None` when the pair is already
    /// connected or the source has no primary key.
    pub fn connect_handles(
        &mut self,
        source: NodeId,
        target: NodeId,
        source_handle: Option<String>,
        target_handle: Option<String>,
    ) -> Option<String> {
        let (Some(source_idx), Some(target_idx)) = (self.node_index(source), self.node_index(target))
        else {
            tracing::debug!(%source, %target, "Connect ignored: unknown table");
            return None;
        };

        if self.graph.find_edge(source_idx, target_idx).is_some() {
            tracing::debug!(%source, %target, "Connect ignored: relationship already exists");
            return None;
        }

        let source_table = self.graph.node_weight(source_idx)?;
        let Some(pk) = source_table.primary_key() else {
            tracing::debug!(%source, %target, "Connect ignored: source has no primary key");
            return None;
        };

        let relationship = Relationship::new(source, target, self.next_edge_sequence)
            .with_handles(source_handle, target_handle);

        let fk_column = Column {
            id: format!("fk-{}-{}", pk.id, Uuid::new_v4().simple()),
            name: derived_column_name(&source_table.label, &pk.name),
            pk: false,
            fk: true,
            on_update: Some(CascadeRule::Cascade),
            on_delete: Some(CascadeRule::Cascade),
            derived_from: Some(relationship.id.clone()),
            ..pk.clone()
        };
        let fk_name = fk_column.name.clone();

        let target_table = self.graph.node_weight_mut(target_idx)?;
        let at = target_table.columns.len().min(1);
        target_table.columns.insert(at, fk_column);

        let id = relationship.id.clone();
        self.graph.add_edge(source_idx, target_idx, relationship);
        self.next_edge_sequence += 1;

        tracing::info!(relationship = %id, %source, %target, column = %fk_name, "Tables connected");
        Some(id)
    }

    /// Flip 1-1 and 1-N. Returns the new cardinality.
    pub fn toggle_cardinality(&mut self, edge_id: &str) -> Option<Cardinality> {
        let Some(idx) = self.edge_index(edge_id) else {
            tracing::debug!(relationship = edge_id, "Toggle ignored: unknown relationship");
            return None;
        };
        let relationship = self.graph.edge_weight_mut(idx)?;
        relationship.cardinality = relationship.cardinality.toggled();

        tracing::debug!(relationship = edge_id, cardinality = %relationship.cardinality, "Cardinality toggled");
        Some(relationship.cardinality)
    }

    /// Remove a relationship together with the foreign-key column it derived.
    ///
    /// The derived column is found through its back-reference; a column the user
    /// has since turned into a plain attribute (`fk == false`) is kept. Foreign keys that
    /// carry no back-reference fall back to the `{source label}_{source pk name}`
    /// convention, which needs the source table to still exist.
    pub fn disconnect(&mut self, edge_id: &str) -> Option<Relationship> {
        let Some(idx) = self.edge_index(edge_id) else {
            tracing::debug!(relationship = edge_id, "Disconnect ignored: unknown relationship");
            return None;
        };
        let relationship = self.graph.remove_edge(idx)?;

        let fallback_name = self
            .table(relationship.source)
            .and_then(|s| s.primary_key().map(|pk| derived_column_name(&s.label, &pk.name)));

        if let Some(target) = self.table_mut(relationship.target) {
            let before = target.columns.len();
            let id = relationship.id.as_str();
            target
                .columns
                .retain(|c| !(c.fk && c.derived_from.as_deref() == Some(id)));

            if target.columns.len() == before
                && let Some(name) = fallback_name
            {
                target
                    .columns
                    .retain(|c| !(c.fk && c.derived_from.is_none() && c.name == name));
            }

            if target.columns.len() == before {
                tracing::debug!(relationship = %relationship.id, "No derived column left to remove");
            }
        }

        tracing::info!(relationship = %relationship.id, "Relationship removed");
        Some(relationship)
    }

    /// Remove a table and every relationship touching it.
    ///
    /// Incident relationships are dropped directly; derived columns they created on
    /// neighbouring tables are left in place.
    pub fn delete_table(&mut self, node: NodeId) -> Option<TableNode> {
        let Some(idx) = self.node_index(node) else {
            tracing::debug!(table = %node, "Delete ignored: unknown table");
            return None;
        };

        let incident = self
            .relationships()
            .iter()
            .filter(|r| r.source == node || r.target == node)
            .count();
        let removed = self.graph.remove_node(idx)?;

        tracing::info!(table = %node, relationships = incident, "Table deleted");
        Some(removed)
    }

    /// Append a column. The name is normalized; an empty or clashing id is replaced.
    pub fn add_column(&mut self, node: NodeId, draft: Column) -> Option<String> {
        let Some(table) = self.table_mut(node) else {
            tracing::debug!(table = %node, "Add column ignored: unknown table");
            return None;
        };

        let mut column = draft;
        column.name = normalize_identifier(&column.name);
        if column.id.is_empty() || table.has_column_id(&column.id) {
            column.id = Column::fresh_id();
        }

        let id = column.id.clone();
        tracing::debug!(table = %node, column = %column.name, "Column added");
        table.columns.push(column);
        Some(id)
    }

    /// Replace a column in place, keeping its identity and back-reference
    pub fn edit_column(&mut self, node: NodeId, column_id: &str, values: Column) -> bool {
        let Some(table) = self.table_mut(node) else {
            tracing::debug!(table = %node, "Edit column ignored: unknown table");
            return false;
        };
        let Some(pos) = table.column_position(column_id) else {
            tracing::debug!(table = %node, column = column_id, "Edit column ignored: unknown column");
            return false;
        };

        let current = &table.columns[pos];
        let updated = Column {
            id: current.id.clone(),
            name: normalize_identifier(&values.name),
            derived_from: current.derived_from.clone(),
            ..values
        };
        table.columns[pos] = updated;

        tracing::debug!(table = %node, column = column_id, "Column updated");
        true
    }

    /// Remove one column. Relationships are not consulted.
    pub fn delete_column(&mut self, node: NodeId, column_id: &str) -> Option<Column> {
        let table = self.table_mut(node)?;
        let Some(pos) = table.column_position(column_id) else {
            tracing::debug!(table = %node, column = column_id, "Delete column ignored: unknown column");
            return None;
        };

        let removed = table.columns.remove(pos);
        tracing::debug!(table = %node, column = %removed.name, "Column deleted");
        Some(removed)
    }

    /// Normalize and set a table label. Derived columns elsewhere keep their names.
    pub fn rename_table(&mut self, node: NodeId, new_label: &str) -> bool {
        let label = normalize_identifier(new_label);
        let Some(table) = self.table_mut(node) else {
            tracing::debug!(table = %node, "Rename ignored: unknown table");
            return false;
        };

        tracing::info!(table = %node, from = %table.label, to = %label, "Table renamed");
        table.label = label;
        true
    }

    /// Drag update; positions are not snapped
    pub fn move_table(&mut self, node: NodeId, position: (f64, f64)) -> bool {
        match self.table_mut(node) {
            Some(table) => {
                table.position = position;
                true
            }
            None => false,
        }
    }
}
