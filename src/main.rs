fn main() -> Result<(), Box<dyn std::error::Error>> {
    use erbuilder::core::{Config, Diagram, NodeId};
    use erbuilder::ui::{Gesture, InteractionController, RowTarget, edge_views, table_views};

    // Load .env file (if exists)
    let _ = dotenvy::dotenv();

    // Initialize tracing
    tracing_subscriber::fmt::init();

    let config = Config::from_env()?;
    tracing::info!(
        "Config loaded: seed_demo={}, pretty_snapshot={}, snapshot_label={}",
        config.seed_demo,
        config.pretty_snapshot,
        config.has_snapshot_label()
    );

    let diagram = if config.seed_demo {
        Diagram::demo()
    } else {
        Diagram::new()
    };
    let mut controller = InteractionController::new(diagram);

    // Scripted session over whatever tables exist: add one, link the first two,
    // flip the link to one-to-many and give the new table an attribute.
    let added = controller.add_table();
    let tables: Vec<NodeId> = controller.diagram().tables().iter().map(|t| t.id).collect();
    if let &[source, target, ..] = tables.as_slice() {
        controller.handle(Gesture::Connect {
            source,
            target,
            source_handle: None,
            target_handle: None,
        });
        if let Some(edge) = controller.diagram().relationship_between(source, target) {
            let edge = edge.id.clone();
            controller.handle(Gesture::EdgeClick { edge });
        }
    }

    controller.handle(Gesture::RowDoubleClick {
        node: added,
        row: RowTarget::NewRow,
    });
    if let Some(editor) = controller.editor_mut() {
        editor.set_name("Email!");
        editor.select_type("varchar")?;
        editor.set_unique(true);
    }
    controller.save_editor();

    tracing::info!(
        tables = table_views(controller.diagram()).len(),
        edges = edge_views(controller.diagram()).len(),
        "Session finished"
    );

    controller.save(config.pretty_snapshot, config.snapshot_label.as_deref())?;
    Ok(())
}

