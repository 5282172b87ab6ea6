//! Mermaid flowchart output.

use rustc_hash::FxHashSet;

use remora_core::{EdgeKind, Node, NodeShape, NodeStyle};

use crate::{DiagramConverter, LayoutMode, OutputFormat, fmt_number};

/// Opening/closing delimiter pair for a node declaration.
fn shape_delimiters(shape: NodeShape) -> (&'static str, &'static str) {
    match shape {
        NodeShape::Rectangle => ("[\"", "\"]"),
        NodeShape::Diamond => ("{", "}"),
        NodeShape::Circle => ("((\"", "\"))"),
        NodeShape::Ellipse => ("([\"", "\"])"),
        NodeShape::Cylinder => ("[(\"", "\")]"),
        NodeShape::Parallelogram => ("[/\"", "\"/]"),
    }
}

/// Quote and bracket characters would break the shape delimiter syntax, so
/// they are substituted rather than escaped.
fn sanitize_label(label: &str) -> String {
    label
        .replace('"', "'")
        .replace('[', "(")
        .replace(']', ")")
}

fn node_line(node: &Node) -> String {
    let (open, close) = shape_delimiters(node.shape);
    let label = sanitize_label(node.display_label());
    format!("    {}{open}{label}{close}", node.id)
}

fn style_line(node: &Node, style: &NodeStyle) -> Option<String> {
    let mut parts: Vec<String> = Vec::new();
    if let Some(fill) = &style.fill_color {
        parts.push(format!("fill:{fill}"));
    }
    if let Some(stroke) = &style.stroke_color {
        parts.push(format!("stroke:{stroke}"));
    }
    if let Some(width) = style.stroke_width {
        parts.push(format!("stroke-width:{}px", fmt_number(width)));
    }
    if parts.is_empty() {
        return None;
    }
    Some(format!("    style {} {}", node.id, parts.join(",")))
}

/// Flow direction heuristic: with position layout, a wider-than-tall spread
/// of node x/y coordinates flows left-to-right; ties and everything else
/// flow top-to-bottom.
fn flow_direction(conv: &DiagramConverter<'_>) -> &'static str {
    if conv.layout_for(OutputFormat::Mermaid) != LayoutMode::Position || !conv.has_nodes() {
        return "TD";
    }
    let xs: Vec<f64> = conv.nodes().map(|n| n.x.unwrap_or(0.0)).collect();
    let ys: Vec<f64> = conv.nodes().map(|n| n.y.unwrap_or(0.0)).collect();
    let span = |vals: &[f64]| {
        let min = vals.iter().copied().fold(f64::INFINITY, f64::min);
        let max = vals.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        max - min
    };
    if span(&xs) > span(&ys) { "LR" } else { "TD" }
}

pub(crate) fn render(conv: &DiagramConverter<'_>) -> String {
    let mut lines: Vec<String> = Vec::new();

    if let Some(title) = conv.title() {
        lines.push("---".to_string());
        lines.push(format!("title: {title}"));
        lines.push("---".to_string());
    }

    lines.push(format!("flowchart {}", flow_direction(conv)));

    let grouped: FxHashSet<&str> = conv
        .groups()
        .flat_map(|g| g.node_ids.iter().map(String::as_str))
        .collect();

    // Group members are only declared inside their subgraph block.
    for node in conv.nodes() {
        if grouped.contains(node.id.as_str()) {
            continue;
        }
        lines.push(node_line(node));
    }

    for group in conv.groups() {
        lines.push(String::new());
        lines.push(format!("    subgraph {}[{}]", group.id, group.label));
        let mut member_ids: Vec<&str> = group.node_ids.iter().map(String::as_str).collect();
        member_ids.sort_unstable();
        for id in member_ids {
            if let Some(node) = conv.node(id) {
                lines.push(format!("    {}", node_line(node)));
            }
        }
        lines.push("    end".to_string());
    }

    lines.push(String::new());

    for edge in conv.edges() {
        let arrow = if edge.kind == EdgeKind::Line {
            "---"
        } else if edge.is_dashed() {
            "-.->"
        } else {
            "-->"
        };
        match edge.label_text() {
            Some(label) => lines.push(format!("    {} {arrow}|{label}| {}", edge.from, edge.to)),
            None => lines.push(format!("    {} {arrow} {}", edge.from, edge.to)),
        }
    }

    let style_lines: Vec<String> = conv
        .nodes()
        .filter_map(|n| n.style.as_ref().and_then(|s| style_line(n, s)))
        .collect();
    if !style_lines.is_empty() {
        lines.push(String::new());
        lines.extend(style_lines);
    }

    lines.join("\n")
}
