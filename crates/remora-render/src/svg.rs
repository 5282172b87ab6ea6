//! SVG output.
//!
//! Edges are drawn before nodes so connectors never occlude node interiors;
//! a single arrowhead marker is declared once in `<defs>` and shared by
//! every edge.

use std::fmt::Write as _;

use remora_core::NodeGeometry;

use crate::{DiagramConverter, escape_xml, fmt_number};

const PADDING: f64 = 50.0;
const EMPTY_CANVAS: &str =
    "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"100\" height=\"100\"></svg>";

#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: f64,
    min_y: f64,
    max_x: f64,
    max_y: f64,
}

fn compute_bounds<I: Iterator<Item = NodeGeometry>>(geometries: I) -> Option<Bounds> {
    let mut bounds: Option<Bounds> = None;
    for geom in geometries {
        let b = bounds.get_or_insert(Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        });
        b.min_x = b.min_x.min(geom.x);
        b.min_y = b.min_y.min(geom.y);
        b.max_x = b.max_x.max(geom.x + geom.width);
        b.max_y = b.max_y.max(geom.y + geom.height);
    }
    bounds
}

pub(crate) fn render(conv: &DiagramConverter<'_>) -> String {
    let Some(bounds) = compute_bounds(conv.nodes().map(|n| n.geometry())) else {
        return EMPTY_CANVAS.to_string();
    };

    let width = bounds.max_x - bounds.min_x + PADDING * 2.0;
    let height = bounds.max_y - bounds.min_y + PADDING * 2.0;
    let ox = -bounds.min_x + PADDING;
    let oy = -bounds.min_y + PADDING;

    let mut elements = String::new();

    // Edges with an unresolved endpoint have no geometry to draw from and
    // are skipped entirely.
    for edge in conv.edges() {
        let (Some(from), Some(to)) = (conv.node(&edge.from), conv.node(&edge.to)) else {
            continue;
        };
        let (x1, y1) = from.geometry().center();
        let (x2, y2) = to.geometry().center();
        let dash = if edge.is_dashed() {
            " stroke-dasharray=\"8,4\""
        } else {
            ""
        };
        let _ = writeln!(
            elements,
            "  <line x1=\"{x1}\" y1=\"{y1}\" x2=\"{x2}\" y2=\"{y2}\" stroke=\"#333\" stroke-width=\"2\"{dash} marker-end=\"url(#arrow)\"/>",
            x1 = fmt_number(x1 + ox),
            y1 = fmt_number(y1 + oy),
            x2 = fmt_number(x2 + ox),
            y2 = fmt_number(y2 + oy),
        );
    }

    for node in conv.nodes() {
        let geom = node.geometry();
        let x = geom.x + ox;
        let y = geom.y + oy;
        let label = escape_xml(node.display_label());
        let fill = node
            .style
            .as_ref()
            .and_then(|s| s.fill_color.as_deref())
            .unwrap_or("#fff");
        let stroke = node
            .style
            .as_ref()
            .and_then(|s| s.stroke_color.as_deref())
            .unwrap_or("#333");
        let _ = writeln!(
            elements,
            "  <rect x=\"{x}\" y=\"{y}\" width=\"{w}\" height=\"{h}\" fill=\"{fill}\" stroke=\"{stroke}\" stroke-width=\"2\" rx=\"5\"/>",
            x = fmt_number(x),
            y = fmt_number(y),
            w = fmt_number(geom.width),
            h = fmt_number(geom.height),
        );
        let _ = writeln!(
            elements,
            "  <text x=\"{tx}\" y=\"{ty}\" font-family=\"Arial\" font-size=\"14\" text-anchor=\"middle\">{label}</text>",
            tx = fmt_number(x + geom.width / 2.0),
            ty = fmt_number(y + geom.height / 2.0 + 5.0),
        );
    }

    let mut out = String::new();
    let _ = writeln!(
        out,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{w}\" height=\"{h}\">",
        w = fmt_number(width),
        h = fmt_number(height),
    );
    out.push_str(
        "  <defs><marker id=\"arrow\" markerWidth=\"10\" markerHeight=\"7\" refX=\"9\" refY=\"3.5\" orient=\"auto\">\n",
    );
    out.push_str("    <polygon points=\"0 0, 10 3.5, 0 7\" fill=\"#333\"/></marker></defs>\n");
    out.push_str(&elements);
    out.push_str("</svg>");
    out
}
