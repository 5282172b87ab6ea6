//! Graphviz DOT output.

use remora_core::NodeShape;

use crate::DiagramConverter;

fn shape_name(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Rectangle => "box",
        NodeShape::Diamond => "diamond",
        NodeShape::Circle => "circle",
        NodeShape::Ellipse => "ellipse",
        NodeShape::Cylinder => "cylinder",
        NodeShape::Parallelogram => "parallelogram",
    }
}

fn escape_quotes(text: &str) -> String {
    text.replace('"', "\\\"")
}

pub(crate) fn render(conv: &DiagramConverter<'_>) -> String {
    let mut lines: Vec<String> = vec!["digraph G {".to_string()];
    if let Some(title) = conv.title() {
        lines.push(format!("    label=\"{}\";", escape_quotes(title)));
    }
    lines.push("    rankdir=TB;".to_string());
    lines.push("    node [fontname=\"Arial\"];".to_string());
    lines.push(String::new());

    for node in conv.nodes() {
        let label = escape_quotes(node.display_label());
        let mut attrs = vec![
            format!("label=\"{label}\""),
            format!("shape={}", shape_name(node.shape)),
        ];
        if let Some(style) = &node.style {
            if let Some(fill) = &style.fill_color {
                attrs.push(format!("fillcolor=\"{fill}\""));
                attrs.push("style=filled".to_string());
            }
            if let Some(stroke) = &style.stroke_color {
                attrs.push(format!("color=\"{stroke}\""));
            }
        }
        lines.push(format!("    {} [{}];", node.id, attrs.join(", ")));
    }

    lines.push(String::new());

    for edge in conv.edges() {
        let mut attrs: Vec<String> = Vec::new();
        if let Some(label) = edge.label_text() {
            attrs.push(format!("label=\"{}\"", escape_quotes(label)));
        }
        if edge.is_dashed() {
            attrs.push("style=dashed".to_string());
        }
        let attr_str = if attrs.is_empty() {
            String::new()
        } else {
            format!(" [{}]", attrs.join(", "))
        };
        lines.push(format!("    {} -> {}{attr_str};", edge.from, edge.to));
    }

    // Members stay declared at top level in addition to this listing;
    // Graphviz resolves the duplicate declaration into the cluster.
    for group in conv.groups() {
        lines.push(String::new());
        lines.push(format!("    subgraph cluster_{} {{", group.id));
        lines.push(format!("        label=\"{}\";", escape_quotes(&group.label)));
        let mut member_ids: Vec<&str> = group.node_ids.iter().map(String::as_str).collect();
        member_ids.sort_unstable();
        for id in member_ids {
            lines.push(format!("        {id};"));
        }
        lines.push("    }".to_string());
    }

    lines.push("}".to_string());
    lines.join("\n")
}
