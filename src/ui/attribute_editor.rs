//! Attribute editor: modal form over one working copy of a column
//!
//! The form never touches the diagram directly. Save and Delete turn the working
//! copy into an [`EditorCommand`] that the controller applies; Cancel drops it.

use crate::core::{CascadeRule, Column, ColumnType, Diagram, NodeId, SchemaError};
use crate::core::validation::normalize_identifier;

#[derive(Clone, Debug, PartialEq)]
pub struct AttributeEditor {
    node: NodeId,
    form: Column,
    is_update: bool,
}

/// Mutation requested by a closing editor
#[derive(Clone, Debug, PartialEq)]
pub enum EditorCommand {
    Add { node: NodeId, column: Column },
    Edit { node: NodeId, column_id: String, column: Column },
    Delete { node: NodeId, column_id: String },
}

impl AttributeEditor {
    /// Open on a copy of `column`. A blank name means a new attribute.
    pub fn open(node: NodeId, column: Column) -> Self {
        let is_update = !column.is_blank();
        Self {
            node,
            form: column,
            is_update,
        }
    }

    pub fn blank(node: NodeId) -> Self {
        Self::open(node, Column::draft())
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn form(&self) -> &Column {
        &self.form
    }

    pub fn is_update(&self) -> bool {
        self.is_update
    }

    /// Delete is offered only for attributes that already exist
    pub fn shows_delete(&self) -> bool {
        self.is_update
    }

    /// ON UPDATE / ON DELETE are shown only for foreign keys
    pub fn shows_cascade_rules(&self) -> bool {
        self.form.fk
    }

    pub fn type_options() -> &'static [ColumnType] {
        &ColumnType::ALL
    }

    pub fn cascade_options() -> &'static [CascadeRule] {
        &CascadeRule::ALL
    }

    pub fn set_name(&mut self, value: &str) {
        self.form.name = normalize_identifier(value);
    }

    pub fn set_type(&mut self, data_type: ColumnType) {
        self.form.data_type = Some(data_type);
    }

    /// Type chosen from the select box; anything outside the enumeration is rejected
    pub fn select_type(&mut self, value: &str) -> Result<(), SchemaError> {
        let data_type = value.parse::<ColumnType>()?;
        self.set_type(data_type);
        Ok(())
    }

    /// Checking PK forces the type to bigint. Unchecking leaves the type alone.
    pub fn set_pk(&mut self, pk: bool) {
        self.form.pk = pk;
        if pk {
            self.form.data_type = Some(ColumnType::Bigint);
        }
    }

    pub fn set_fk(&mut self, fk: bool) {
        self.form.fk = fk;
    }

    pub fn set_unique(&mut self, unique: bool) {
        self.form.unique = unique;
    }

    pub fn set_on_update(&mut self, rule: CascadeRule) {
        self.form.on_update = Some(rule);
    }

    pub fn set_on_delete(&mut self, rule: CascadeRule) {
        self.form.on_delete = Some(rule);
    }

    pub fn save(self) -> EditorCommand {
        if self.is_update {
            EditorCommand::Edit {
                node: self.node,
                column_id: self.form.id.clone(),
                column: self.form,
            }
        } else {
            EditorCommand::Add {
                node: self.node,
                column: self.form,
            }
        }
    }

    pub fn delete(self) -> EditorCommand {
        EditorCommand::Delete {
            node: self.node,
            column_id: self.form.id,
        }
    }
}

impl EditorCommand {
    pub fn apply(self, diagram: &mut Diagram) {
        match self {
            EditorCommand::Add { node, column } => {
                diagram.add_column(node, column);
            }
            EditorCommand::Edit {
                node,
                column_id,
                column,
            } => {
                diagram.edit_column(node, &column_id, column);
            }
            EditorCommand::Delete { node, column_id } => {
                diagram.delete_column(node, &column_id);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn varchar(name: &str) -> Column {
        Column::new("c1", name, ColumnType::Varchar)
    }

    #[test]
    fn test_blank_draft_is_not_update() {
        let editor = AttributeEditor::blank(NodeId(1));
        assert!(!editor.is_update());
        assert!(!editor.shows_delete());
        assert!(editor.form().data_type.is_none());
    }

    #[test]
    fn test_existing_column_is_update() {
        let editor = AttributeEditor::open(NodeId(1), varchar("email"));
        assert!(editor.is_update());
        assert!(editor.shows_delete());
    }

    #[test]
    fn test_whitespace_name_counts_as_new() {
        let editor = AttributeEditor::open(NodeId(1), varchar("   "));
        assert!(!editor.is_update());
    }

    #[test]
    fn test_pk_forces_bigint() {
        let mut editor = AttributeEditor::open(NodeId(1), varchar("code"));
        editor.set_pk(true);
        assert_eq!(editor.form().data_type, Some(ColumnType::Bigint));
        assert!(editor.form().pk);
    }

    #[test]
    fn test_pk_can_be_retyped_afterwards() {
        let mut editor = AttributeEditor::open(NodeId(1), varchar("code"));
        editor.set_pk(true);
        editor.set_type(ColumnType::Int);
        assert_eq!(editor.form().data_type, Some(ColumnType::Int));

        editor.set_pk(false);
        assert_eq!(editor.form().data_type, Some(ColumnType::Int));
    }

    #[test]
    fn test_select_type_rejects_unknown() {
        let mut editor = AttributeEditor::blank(NodeId(1));
        assert!(editor.select_type("json").is_err());
        assert!(editor.form().data_type.is_none());

        editor.select_type("timestamp").unwrap();
        assert_eq!(editor.form().data_type, Some(ColumnType::Timestamp));
    }

    #[test]
    fn test_name_is_normalized_while_typing() {
        let mut editor = AttributeEditor::blank(NodeId(1));
        editor.set_name("Created At");
        assert_eq!(editor.form().name, "created_at");
    }

    #[test]
    fn test_cascade_fields_follow_fk_flag() {
        let mut editor = AttributeEditor::blank(NodeId(1));
        assert!(!editor.shows_cascade_rules());
        editor.set_fk(true);
        assert!(editor.shows_cascade_rules());
        editor.set_on_update(CascadeRule::Restrict);
        editor.set_on_delete(CascadeRule::Cascade);
        assert_eq!(editor.form().on_update, Some(CascadeRule::Restrict));
        assert_eq!(editor.form().on_delete, Some(CascadeRule::Cascade));
    }

    #[test]
    fn test_save_new_emits_add() {
        let mut editor = AttributeEditor::blank(NodeId(2));
        editor.set_name("email");
        editor.set_unique(true);
        match editor.save() {
            EditorCommand::Add { node, column } => {
                assert_eq!(node, NodeId(2));
                assert_eq!(column.name, "email");
                assert!(column.unique);
            }
            other => panic!("expected Add, got {:?}", other),
        }
    }

    #[test]
    fn test_save_existing_emits_edit() {
        let editor = AttributeEditor::open(NodeId(2), varchar("email"));
        assert!(matches!(
            editor.save(),
            EditorCommand::Edit { column_id, .. } if column_id == "c1"
        ));
    }

    #[test]
    fn test_delete_emits_delete() {
        let editor = AttributeEditor::open(NodeId(2), varchar("email"));
        assert_eq!(
            editor.delete(),
            EditorCommand::Delete {
                node: NodeId(2),
                column_id: "c1".to_string()
            }
        );
    }

    #[test]
    fn test_commands_apply_to_diagram() {
        let mut diagram = Diagram::new();
        let node = diagram.add_table();

        let mut editor = AttributeEditor::blank(node);
        editor.set_name("Email!");
        editor.select_type("varchar").unwrap();
        editor.save().apply(&mut diagram);

        let stored = diagram.table(node).unwrap().columns[1].clone();
        assert_eq!(stored.name, "email_");

        let mut editor = AttributeEditor::open(node, stored.clone());
        editor.set_unique(true);
        editor.save().apply(&mut diagram);
        assert!(diagram.table(node).unwrap().columns[1].unique);

        AttributeEditor::open(node, stored).delete().apply(&mut diagram);
        assert_eq!(diagram.table(node).unwrap().columns.len(), 1);
    }
}
