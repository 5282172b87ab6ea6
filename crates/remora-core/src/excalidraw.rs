//! Excalidraw scene importer.
//!
//! Reconstructs the normalized [`Diagram`] model from an Excalidraw element
//! list in three passes: shapes, connectors, frames. Text-to-shape and
//! connector-to-shape bindings are resolved by element id; bindings are not
//! required to be adjacent in the element list.

use rustc_hash::{FxHashMap, FxHashSet};
use serde::Deserialize;
use tracing::debug;

use crate::error::Result;
use crate::model::{
    Diagram, Edge, EdgeKind, EdgeStyle, Group, Node, NodeShape, NodeStyle, StrokeStyle,
};
use crate::sanitize::sanitize_id_unique;

/// Excalidraw's sentinel for "no background".
const TRANSPARENT: &str = "transparent";

#[derive(Debug, Clone, Default, Deserialize)]
struct SceneFile {
    #[serde(default)]
    elements: Vec<Element>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Element {
    #[serde(default)]
    id: String,
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    is_deleted: bool,
    #[serde(default)]
    x: Option<f64>,
    #[serde(default)]
    y: Option<f64>,
    #[serde(default)]
    width: Option<f64>,
    #[serde(default)]
    height: Option<f64>,
    #[serde(default)]
    background_color: Option<String>,
    #[serde(default)]
    stroke_color: Option<String>,
    #[serde(default)]
    stroke_style: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    container_id: Option<String>,
    #[serde(default)]
    start_binding: Option<Binding>,
    #[serde(default)]
    end_binding: Option<Binding>,
    #[serde(default)]
    frame_id: Option<String>,
    #[serde(default)]
    name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Binding {
    #[serde(default)]
    element_id: Option<String>,
}

impl Element {
    fn is_connector(&self) -> bool {
        matches!(self.kind.as_str(), "arrow" | "line")
    }

    fn is_text(&self) -> bool {
        self.kind == "text"
    }

    fn is_frame(&self) -> bool {
        self.kind == "frame"
    }

    fn inline_text(&self) -> Option<&str> {
        self.text.as_deref().filter(|t| !t.is_empty())
    }
}

/// First text element bound to `element_id` via `containerId`, in document
/// order. With multiple bound texts the first one wins.
fn find_bound_text<'a>(element_id: &str, elements: &'a [Element]) -> Option<&'a str> {
    elements
        .iter()
        .find(|el| el.is_text() && el.container_id.as_deref() == Some(element_id))
        .and_then(|el| el.inline_text())
}

fn shape_for(kind: &str) -> NodeShape {
    NodeShape::parse_lossy(kind)
}

fn round_or(value: Option<f64>, default: f64) -> f64 {
    value.unwrap_or(default).round()
}

/// Parses an Excalidraw scene into the normalized diagram model.
///
/// `source_file` is recorded as provenance only; the scene itself is taken
/// from `json`. Native-format imports are exact, so every produced node and
/// edge carries confidence 1.0.
pub fn import_str(json: &str, source_file: &str) -> Result<Diagram> {
    let scene: SceneFile = serde_json::from_str(json)?;
    Ok(import_elements(&scene.elements, source_file))
}

fn import_elements(elements: &[Element], source_file: &str) -> Diagram {
    let mut id_map: FxHashMap<&str, String> = FxHashMap::default();
    let mut existing: FxHashSet<String> = FxHashSet::default();

    // Pass 1: shapes. Frames register here too (as placeholder-labeled
    // rectangles), which lets a nested frame be a member of its enclosing
    // frame's group in pass 3.
    let mut nodes: Vec<Node> = Vec::new();
    for el in elements {
        if el.is_connector() || el.is_text() || el.is_deleted {
            continue;
        }

        let label = find_bound_text(&el.id, elements)
            .or_else(|| el.inline_text())
            .map(str::to_string)
            .unwrap_or_else(|| format!("Shape {}", nodes.len() + 1));
        let node_id = sanitize_id_unique(&label, &mut existing);
        id_map.insert(el.id.as_str(), node_id.clone());

        let style = NodeStyle {
            fill_color: el
                .background_color
                .clone()
                .filter(|c| !c.is_empty() && c != TRANSPARENT),
            stroke_color: el.stroke_color.clone().filter(|c| !c.is_empty()),
            stroke_width: None,
        };

        nodes.push(Node {
            id: node_id,
            shape: shape_for(&el.kind),
            label: Some(label.trim().to_string()),
            x: Some(round_or(el.x, 0.0)),
            y: Some(round_or(el.y, 0.0)),
            width: Some(round_or(el.width, 100.0)),
            height: Some(round_or(el.height, 50.0)),
            style: (!style.is_empty()).then_some(style),
            confidence: Some(1.0),
        });
    }

    // Pass 2: connectors. Edges whose bindings are missing or point at
    // anything that did not register as a shape are dropped silently.
    let mut edges: Vec<Edge> = Vec::new();
    for el in elements {
        if !el.is_connector() || el.is_deleted {
            continue;
        }

        let start = el
            .start_binding
            .as_ref()
            .and_then(|b| b.element_id.as_deref());
        let end = el.end_binding.as_ref().and_then(|b| b.element_id.as_deref());
        let (Some(start), Some(end)) = (start, end) else {
            continue;
        };
        let (Some(from), Some(to)) = (id_map.get(start), id_map.get(end)) else {
            continue;
        };

        let dashed = el.stroke_style.as_deref() == Some("dashed");
        edges.push(Edge {
            id: format!("{from}_to_{to}"),
            from: from.clone(),
            to: to.clone(),
            kind: if el.kind == "line" {
                EdgeKind::Line
            } else {
                EdgeKind::Arrow
            },
            label: find_bound_text(&el.id, elements).map(|t| t.trim().to_string()),
            style: dashed.then(|| EdgeStyle {
                stroke_style: Some(StrokeStyle::Dashed),
            }),
            confidence: Some(1.0),
        });
    }

    // Pass 3: frames become groups; empty frames are omitted.
    let mut groups: Vec<Group> = Vec::new();
    for el in elements {
        if !el.is_frame() || el.is_deleted {
            continue;
        }

        let name = el.name.as_deref().filter(|n| !n.is_empty()).unwrap_or("Group");
        let node_ids: Vec<String> = elements
            .iter()
            .filter(|e| e.frame_id.as_deref() == Some(el.id.as_str()))
            .filter_map(|e| id_map.get(e.id.as_str()).cloned())
            .collect();
        if node_ids.is_empty() {
            continue;
        }
        groups.push(Group {
            id: sanitize_id_unique(name, &mut existing),
            label: name.to_string(),
            node_ids,
        });
    }

    let diagram_type = if nodes.iter().any(|n| n.shape == NodeShape::Diamond) {
        "flowchart"
    } else {
        "architecture"
    };
    debug!(
        nodes = nodes.len(),
        edges = edges.len(),
        groups = groups.len(),
        diagram_type,
        "imported excalidraw scene"
    );

    Diagram {
        title: None,
        diagram_type: Some(diagram_type.to_string()),
        source: Some("excalidraw".to_string()),
        source_file: Some(source_file.to_string()),
        overall_confidence: Some(1.0),
        nodes,
        edges,
        groups,
    }
}
