//! CLI output formatting

use crate::core::{GraphType, TaskGraph, TaskNode};
use console::Emoji;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static LOOP: Emoji<'_, '_> = Emoji("🔁 ", "@ ");

/// Format a graph type for display
pub fn format_graph_type(graph_type: GraphType) -> String {
    match graph_type {
        GraphType::Full => style("FULL").bold().to_string(),
        GraphType::Loop => style("LOOP").yellow().to_string(),
        GraphType::Head => style("HEAD").cyan().to_string(),
        GraphType::Tail => style("TAIL").blue().to_string(),
    }
}

/// Render a graph as an indented tree, one line per node
pub fn format_graph_tree(graph: &TaskGraph) -> String {
    let mut out = format!("[{}]\n", format_graph_type(graph.graph_type()));
    write_nodes(graph, 1, &mut out);
    out
}

fn write_nodes(graph: &TaskGraph, depth: usize, out: &mut String) {
    let indent = "  ".repeat(depth);

    if graph.is_empty() {
        out.push_str(&format!("{}{}\n", indent, style("(no tasks)").dim()));
        return;
    }

    for node in graph {
        match node {
            TaskNode::Task(task) => out.push_str(&format!(
                "{}- {} {}\n",
                indent,
                style(task.name()).bold(),
                style(task.implementing_class_name()).dim()
            )),
            TaskNode::Graph(sub) => {
                let marker = if sub.graph_type() == GraphType::Loop {
                    LOOP.to_string()
                } else {
                    String::new()
                };
                out.push_str(&format!("{}{}[{}]\n", indent, marker, format_graph_type(sub.graph_type())));
                write_nodes(sub, depth + 1, out);
            }
        }
    }
}

/// Render every task in execution order, ignoring nesting
pub fn format_task_list(graph: &TaskGraph) -> String {
    graph
        .tasks()
        .enumerate()
        .map(|(i, task)| format!("{:>3}. {} ({})\n", i + 1, task.name(), task.implementing_class_name()))
        .collect()
}
