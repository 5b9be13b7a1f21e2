//! Table formatting utilities using comfy-table.

use comfy_table::{Cell, Color, Table};
use ripple_core::{BuildPlan, ResolvedWorkspace};

fn change_label(workspace: &ResolvedWorkspace) -> (&'static str, Color) {
    let classification = &workspace.classification;
    match (
        classification.directly_changed,
        classification.transitively_changed,
    ) {
        (true, true) => ("direct + deps", Color::Red),
        (true, false) => ("direct", Color::Yellow),
        (false, true) => ("deps", Color::Cyan),
        (false, false) => ("-", Color::DarkGrey),
    }
}

/// Prints the build plan as a table.
pub fn print_table(plan: &BuildPlan) {
    let mut table = Table::new();
    table
        .set_header(vec![
            Cell::new("#").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Workspace").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Location").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("Changed").add_attribute(comfy_table::Attribute::Bold),
            Cell::new("In-repo dependencies").add_attribute(comfy_table::Attribute::Bold),
        ])
        .load_preset(comfy_table::presets::UTF8_FULL)
        .apply_modifier(comfy_table::modifiers::UTF8_ROUND_CORNERS)
        .set_content_arrangement(comfy_table::ContentArrangement::Dynamic);

    for workspace in &plan.workspaces {
        let (label, color) = change_label(workspace);
        let deps = &workspace.classification.changed_in_repo_dependencies;
        let deps = if deps.is_empty() {
            "(none)".to_string()
        } else {
            deps.join(", ")
        };
        table.add_row(vec![
            Cell::new(workspace.build_order),
            Cell::new(&workspace.name).fg(Color::White),
            Cell::new(&workspace.location).fg(Color::DarkGrey),
            Cell::new(label).fg(color),
            Cell::new(deps),
        ]);
    }

    println!("{}", table);
}
