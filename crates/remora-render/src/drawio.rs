//! draw.io (mxGraph XML) output.

use std::fmt::Write as _;

use remora_core::NodeShape;

use crate::{DiagramConverter, escape_xml, fmt_number};

/// Base mxGraph style string per shape.
fn shape_style(shape: NodeShape) -> &'static str {
    match shape {
        NodeShape::Rectangle => "rounded=0;whiteSpace=wrap;html=1;",
        NodeShape::Diamond => "rhombus;whiteSpace=wrap;html=1;",
        NodeShape::Circle => "ellipse;whiteSpace=wrap;html=1;aspect=fixed;",
        NodeShape::Ellipse => "ellipse;whiteSpace=wrap;html=1;",
        NodeShape::Cylinder => "shape=cylinder3;whiteSpace=wrap;html=1;",
        NodeShape::Parallelogram => "shape=parallelogram;whiteSpace=wrap;html=1;",
    }
}

const EDGE_BASE_STYLE: &str = "edgeStyle=orthogonalEdgeStyle;rounded=0;html=1;";

pub(crate) fn render(conv: &DiagramConverter<'_>) -> String {
    let mut cells = String::new();

    for node in conv.nodes() {
        let label = escape_xml(node.display_label());
        let mut style = shape_style(node.shape).to_string();
        if let Some(node_style) = &node.style {
            if let Some(fill) = &node_style.fill_color {
                let _ = write!(style, "fillColor={fill};");
            }
            if let Some(stroke) = &node_style.stroke_color {
                let _ = write!(style, "strokeColor={stroke};");
            }
        }
        let geom = node.geometry();
        let _ = writeln!(
            cells,
            "        <mxCell id=\"cell_{id}\" value=\"{label}\" style=\"{style}\" vertex=\"1\" parent=\"1\">",
            id = node.id,
        );
        let _ = writeln!(
            cells,
            "          <mxGeometry x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" as=\"geometry\"/>",
            x = fmt_number(geom.x),
            y = fmt_number(geom.y),
            w = fmt_number(geom.width),
            h = fmt_number(geom.height),
        );
        let _ = writeln!(cells, "        </mxCell>");
    }

    for edge in conv.edges() {
        let label = escape_xml(edge.label.as_deref().unwrap_or(""));
        let mut style = EDGE_BASE_STYLE.to_string();
        if edge.is_dashed() {
            style.push_str("dashed=1;");
        }
        let _ = writeln!(
            cells,
            "        <mxCell id=\"cell_{id}\" value=\"{label}\" style=\"{style}\" edge=\"1\" parent=\"1\" source=\"cell_{from}\" target=\"cell_{to}\">",
            id = edge.id,
            from = edge.from,
            to = edge.to,
        );
        let _ = writeln!(cells, "          <mxGeometry relative=\"1\" as=\"geometry\"/>");
        let _ = writeln!(cells, "        </mxCell>");
    }

    let mut out = String::new();
    out.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
    out.push_str("<mxfile host=\"remora\" type=\"device\">\n");
    out.push_str("  <diagram name=\"Page-1\" id=\"diagram_1\">\n");
    out.push_str("    <mxGraphModel dx=\"1000\" dy=\"600\" grid=\"1\" gridSize=\"10\">\n");
    out.push_str("      <root>\n");
    out.push_str("        <mxCell id=\"0\"/>\n");
    out.push_str("        <mxCell id=\"1\" parent=\"0\"/>\n");
    out.push_str(&cells);
    out.push_str("      </root>\n");
    out.push_str("    </mxGraphModel>\n");
    out.push_str("  </diagram>\n");
    out.push_str("</mxfile>");
    out
}
