//! Link graph rendering and link lookups.

use std::collections::{HashMap, HashSet};

use html_escape::encode_text;

use crate::models::{Edge, NoteSummary};

/// Renders the edges as a Graphviz DOT digraph.
///
/// With a `term`, only edges whose source or target title contains it
/// (ignoring case) are drawn. Each note appears once, labelled with its
/// title and leaf tags; each edge points from target to source.
pub fn render_dot(graph: &[Edge], term: Option<&str>) -> String {
    let needle = term.filter(|t| !t.is_empty()).map(str::to_lowercase);

    let mut nodes: HashMap<&str, usize> = HashMap::new();
    let mut node_lines = String::new();
    let mut edge_lines = String::new();
    let mut drawn: HashSet<(usize, usize)> = HashSet::new();

    for edge in graph {
        if let Some(needle) = &needle {
            let haystack = format!(
                "{}::{}",
                edge.source.title.to_lowercase(),
                edge.target.title.to_lowercase()
            );
            if !haystack.contains(needle.as_str()) {
                continue;
            }
        }

        let source = node_id(&mut nodes, &mut node_lines, &edge.source);
        let target = node_id(&mut nodes, &mut node_lines, &edge.target);

        if drawn.insert((target, source)) {
            edge_lines.push_str(&format!("\tnode_{target} -> node_{source};\n"));
        }
    }

    let mut dot = String::from("digraph Notes {\n");
    dot.push_str(&node_lines);
    dot.push('\n');
    dot.push_str(&edge_lines);
    dot.push_str("}\n");
    dot
}

fn node_id<'a>(
    nodes: &mut HashMap<&'a str, usize>,
    node_lines: &mut String,
    note: &'a NoteSummary,
) -> usize {
    if let Some(id) = nodes.get(note.id.as_str()) {
        return *id;
    }

    let id = nodes.len();
    nodes.insert(note.id.as_str(), id);
    node_lines.push_str(&format!("\tnode_{id} [label={}];\n", node_label(note)));
    id
}

/// An HTML-like DOT label: the title over a small line of hashtags.
pub fn node_label(note: &NoteSummary) -> String {
    let tags = note.unique_tags();
    let tag_line = if tags.is_empty() {
        "&nbsp;".to_string()
    } else {
        tags.iter()
            .map(|t| format!("#{}", encode_text(t)))
            .collect::<Vec<_>>()
            .join(", ")
    };

    format!(
        "<{}<br/><font point-size=\"10\">{}</font>>",
        encode_text(&note.title),
        tag_line
    )
}

/// `(target, source)` pairs for edges whose target title contains `term`.
pub fn backlinks<'a>(graph: &'a [Edge], term: &str) -> Vec<(&'a NoteSummary, &'a NoteSummary)> {
    let term = term.to_lowercase();
    graph
        .iter()
        .filter(|edge| edge.target.title.to_lowercase().contains(&term))
        .map(|edge| (&edge.target, &edge.source))
        .collect()
}

/// `(source, target)` pairs for edges whose source title contains `term`.
pub fn forward_links<'a>(
    graph: &'a [Edge],
    term: &str,
) -> Vec<(&'a NoteSummary, &'a NoteSummary)> {
    let term = term.to_lowercase();
    graph
        .iter()
        .filter(|edge| edge.source.title.to_lowercase().contains(&term))
        .map(|edge| (&edge.source, &edge.target))
        .collect()
}
