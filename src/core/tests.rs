#[cfg(test)]
mod tests {
    use crate::core::{
        CascadeRule, Cardinality, Column, ColumnType, Diagram, NodeId, derived_column_name,
    };

    /// `user{id pk}` and `role{id pk}`
    fn user_and_role() -> (Diagram, NodeId, NodeId) {
        let mut diagram = Diagram::new();
        let user = diagram.add_table();
        let role = diagram.add_table();
        diagram.rename_table(user, "user");
        diagram.rename_table(role, "role");
        (diagram, user, role)
    }

    fn column_names(diagram: &Diagram, node: NodeId) -> Vec<String> {
        diagram
            .table(node)
            .unwrap()
            .columns
            .iter()
            .map(|c| c.name.clone())
            .collect()
    }

    // ===== AddTable =====

    #[test]
    fn test_add_table_id_exceeds_all_existing() {
        let mut diagram = Diagram::demo();
        for _ in 0..5 {
            let before_max = diagram.tables().iter().map(|t| t.id.0).max().unwrap_or(0);
            let id = diagram.add_table();
            assert!(id.0 > before_max);

            let table = diagram.table(id).unwrap();
            assert_eq!(table.columns.len(), 1);
            assert!(table.columns[0].pk);
        }
    }

    #[test]
    fn test_add_table_on_empty_diagram_gets_id_one() {
        let mut diagram = Diagram::new();
        assert_eq!(diagram.add_table(), NodeId(1));
    }

    // ===== Connect =====

    #[test]
    fn test_connect_without_pk_is_noop() {
        let (mut diagram, user, role) = user_and_role();
        let pk_id = diagram.table(user).unwrap().columns[0].id.clone();
        diagram.delete_column(user, &pk_id);
        diagram.add_column(user, Column::new("", "name", ColumnType::Varchar));

        let before = diagram.snapshot();
        assert!(diagram.connect(user, role).is_none());
        let after = diagram.snapshot();

        assert_eq!(before.tables, after.tables);
        assert_eq!(before.relationships, after.relationships);
    }

    #[test]
    fn test_duplicate_connect_is_idempotent() {
        let (mut diagram, user, role) = user_and_role();
        assert!(diagram.connect(user, role).is_some());
        assert!(diagram.connect(user, role).is_none());

        assert_eq!(diagram.relationship_count(), 1);
        let derived = diagram
            .table(role)
            .unwrap()
            .columns
            .iter()
            .filter(|c| c.fk && c.name == "user_id")
            .count();
        assert_eq!(derived, 1);
    }

    #[test]
    fn test_every_relationship_has_exactly_one_derived_column() {
        let mut diagram = Diagram::demo();
        let user = diagram.find_table_by_label("user").unwrap();
        let role = diagram.find_table_by_label("role").unwrap();
        let user_role = diagram.find_table_by_label("user_role").unwrap();

        diagram.connect(user, user_role);
        diagram.connect(role, user_role);
        diagram.connect(user, role);

        for rel in diagram.relationships() {
            let source = diagram.table(rel.source).unwrap();
            let pk = source.primary_key().unwrap();
            let expected = derived_column_name(&source.label, &pk.name);
            let matching = diagram
                .table(rel.target)
                .unwrap()
                .columns
                .iter()
                .filter(|c| c.fk && c.name == expected)
                .count();
            assert_eq!(matching, 1, "relationship {}", rel.id);
        }
    }

    // ===== Disconnect =====

    #[test]
    fn test_connect_then_disconnect_restores_target_columns() {
        let mut diagram = Diagram::demo();
        let user = diagram.find_table_by_label("user").unwrap();
        let user_role = diagram.find_table_by_label("user_role").unwrap();
        let original = diagram.table(user_role).unwrap().columns.clone();

        let edge = diagram.connect(user, user_role).unwrap();
        assert_eq!(diagram.table(user_role).unwrap().columns.len(), original.len() + 1);

        diagram.disconnect(&edge);
        assert_eq!(diagram.table(user_role).unwrap().columns, original);
        assert!(diagram.relationship(&edge).is_none());
    }

    // ===== ToggleCardinality =====

    #[test]
    fn test_toggle_twice_restores_cardinality() {
        let (mut diagram, user, role) = user_and_role();
        let edge = diagram.connect(user, role).unwrap();
        let columns_before = diagram.table(role).unwrap().columns.clone();

        assert_eq!(diagram.toggle_cardinality(&edge), Some(Cardinality::OneToMany));
        assert_eq!(diagram.toggle_cardinality(&edge), Some(Cardinality::OneToOne));
        assert_eq!(
            diagram.relationship(&edge).unwrap().cardinality,
            Cardinality::OneToOne
        );
        assert_eq!(diagram.table(role).unwrap().columns, columns_before);
    }

    // ===== DeleteTable =====

    #[test]
    fn test_delete_table_removes_incident_relationships() {
        let mut diagram = Diagram::demo();
        let user = diagram.find_table_by_label("user").unwrap();
        let role = diagram.find_table_by_label("role").unwrap();
        let user_role = diagram.find_table_by_label("user_role").unwrap();

        diagram.connect(user, user_role);
        diagram.connect(role, user_role);
        diagram.connect(user_role, role);
        let untouched = diagram.connect(user, role).unwrap();

        diagram.delete_table(user_role);

        assert!(diagram.table(user_role).is_none());
        let remaining: Vec<&str> = diagram.relationships().iter().map(|r| r.id.as_str()).collect();
        assert_eq!(remaining, vec![untouched.as_str()]);
    }

    // ===== Scenarios =====

    #[test]
    fn test_scenario_user_role_round_trip() {
        let (mut diagram, user, role) = user_and_role();

        let edge = diagram.connect(user, role).unwrap();
        assert_eq!(column_names(&diagram, role), vec!["id", "user_id"]);

        let fk = &diagram.table(role).unwrap().columns[1];
        assert!(fk.fk);
        assert_eq!(fk.on_update, Some(CascadeRule::Cascade));
        assert_eq!(fk.on_delete, Some(CascadeRule::Cascade));
        assert_eq!(diagram.relationship_count(), 1);
        assert_eq!(
            diagram.relationship(&edge).unwrap().cardinality,
            Cardinality::OneToOne
        );

        diagram.toggle_cardinality(&edge);
        assert_eq!(
            diagram.relationship(&edge).unwrap().cardinality,
            Cardinality::OneToMany
        );

        diagram.disconnect(&edge);
        assert_eq!(column_names(&diagram, role), vec!["id"]);
        assert_eq!(diagram.relationship_count(), 0);
    }

    #[test]
    fn test_scenario_add_column_normalizes_name() {
        let (mut diagram, user, _) = user_and_role();
        let mut draft = Column::draft();
        draft.name = "Email!".to_string();
        draft.data_type = Some(ColumnType::Varchar);

        diagram.add_column(user, draft);
        assert_eq!(column_names(&diagram, user), vec!["id", "email_"]);
    }

    #[test]
    fn test_table_crud_workflow() {
        let mut diagram = Diagram::new();

        // Create
        let products = diagram.add_table();
        diagram.rename_table(products, "Products");
        let name_id = diagram
            .add_column(products, Column::new("", "name", ColumnType::Varchar).unique())
            .unwrap();
        diagram.add_column(products, Column::new("", "released", ColumnType::Date));

        // Read
        let table = diagram.table(products).unwrap();
        assert_eq!(table.label, "products");
        assert!(table.column(&name_id).unwrap().unique);

        // Update
        let mut values = table.column(&name_id).unwrap().clone();
        values.name = "Title".to_string();
        diagram.edit_column(products, &name_id, values);
        assert_eq!(column_names(&diagram, products), vec!["id", "title", "released"]);

        // Delete
        diagram.delete_column(products, &name_id);
        assert_eq!(column_names(&diagram, products), vec!["id", "released"]);
        diagram.delete_table(products);
        assert_eq!(diagram.table_count(), 0);
    }
}
