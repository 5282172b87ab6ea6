//! Normalized diagram model shared by the importer and every renderer.
//!
//! The model is plain data: the importer constructs a fresh [`Diagram`] per
//! source file, renderers only read it. Optional geometry is resolved through
//! [`Node::geometry`] so the "a node always has usable geometry" invariant
//! lives in one place instead of scattered fallbacks.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Default node width used when the model omits one.
pub const DEFAULT_NODE_WIDTH: f64 = 120.0;
/// Default node height used when the model omits one.
pub const DEFAULT_NODE_HEIGHT: f64 = 60.0;

/// Shape vocabulary for nodes. Unrecognized input values map to `Rectangle`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeShape {
    #[default]
    Rectangle,
    Diamond,
    Circle,
    Ellipse,
    Cylinder,
    Parallelogram,
}

impl NodeShape {
    pub fn as_str(self) -> &'static str {
        match self {
            NodeShape::Rectangle => "rectangle",
            NodeShape::Diamond => "diamond",
            NodeShape::Circle => "circle",
            NodeShape::Ellipse => "ellipse",
            NodeShape::Cylinder => "cylinder",
            NodeShape::Parallelogram => "parallelogram",
        }
    }

    /// Parses a shape name; anything unrecognized falls back to `Rectangle`.
    pub fn parse_lossy(s: &str) -> Self {
        match s {
            "rectangle" => NodeShape::Rectangle,
            "diamond" => NodeShape::Diamond,
            "circle" => NodeShape::Circle,
            "ellipse" => NodeShape::Ellipse,
            "cylinder" => NodeShape::Cylinder,
            "parallelogram" => NodeShape::Parallelogram,
            _ => NodeShape::Rectangle,
        }
    }
}

impl From<String> for NodeShape {
    fn from(value: String) -> Self {
        Self::parse_lossy(&value)
    }
}

impl From<NodeShape> for String {
    fn from(value: NodeShape) -> Self {
        value.as_str().to_string()
    }
}

/// Connector kind. Unrecognized input values map to `Arrow`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum EdgeKind {
    #[default]
    Arrow,
    Line,
}

impl EdgeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EdgeKind::Arrow => "arrow",
            EdgeKind::Line => "line",
        }
    }
}

impl From<String> for EdgeKind {
    fn from(value: String) -> Self {
        match value.as_str() {
            "line" => EdgeKind::Line,
            _ => EdgeKind::Arrow,
        }
    }
}

impl From<EdgeKind> for String {
    fn from(value: EdgeKind) -> Self {
        value.as_str().to_string()
    }
}

/// Edge stroke style. Unrecognized input values map to `Solid`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum StrokeStyle {
    #[default]
    Solid,
    Dashed,
}

impl From<String> for StrokeStyle {
    fn from(value: String) -> Self {
        match value.as_str() {
            "dashed" => StrokeStyle::Dashed,
            _ => StrokeStyle::Solid,
        }
    }
}

impl From<StrokeStyle> for String {
    fn from(value: StrokeStyle) -> Self {
        match value {
            StrokeStyle::Solid => "solid".to_string(),
            StrokeStyle::Dashed => "dashed".to_string(),
        }
    }
}

/// Explicit node styling. Absence of the whole object means "no styling".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

impl NodeStyle {
    pub fn is_empty(&self) -> bool {
        self.fill_color.is_none() && self.stroke_color.is_none() && self.stroke_width.is_none()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_style: Option<StrokeStyle>,
}

/// Fully resolved node geometry (defaults applied).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl NodeGeometry {
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A diagram shape/vertex.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    #[serde(rename = "type", default)]
    pub shape: NodeShape,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<NodeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Node {
    /// Display text: the label when present, else the node id.
    pub fn display_label(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.id)
    }

    /// Resolved geometry with documented defaults (x/y 0, 120x60 box).
    pub fn geometry(&self) -> NodeGeometry {
        NodeGeometry {
            x: self.x.unwrap_or(0.0),
            y: self.y.unwrap_or(0.0),
            width: self.width.unwrap_or(DEFAULT_NODE_WIDTH),
            height: self.height.unwrap_or(DEFAULT_NODE_HEIGHT),
        }
    }
}

/// A directed (or undirected, for `EdgeKind::Line`) connector between nodes.
///
/// `from`/`to` need not resolve to existing node ids; renderers degrade per
/// format instead of failing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub id: String,
    pub from: String,
    pub to: String,
    #[serde(rename = "type", default)]
    pub kind: EdgeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style: Option<EdgeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl Edge {
    pub fn is_dashed(&self) -> bool {
        self.style
            .as_ref()
            .and_then(|s| s.stroke_style)
            .is_some_and(|s| s == StrokeStyle::Dashed)
    }

    /// Label text, with empty strings treated as "no label".
    pub fn label_text(&self) -> Option<&str> {
        self.label.as_deref().filter(|l| !l.is_empty())
    }
}

/// A named cluster of node ids rendered as a nested container in supporting
/// formats.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub node_ids: Vec<String>,
}

/// The format-agnostic in-memory diagram all converters read from and the
/// importer produces.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Diagram {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_file: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub overall_confidence: Option<f64>,
    #[serde(default)]
    pub nodes: Vec<Node>,
    #[serde(default)]
    pub edges: Vec<Edge>,
    #[serde(default)]
    pub groups: Vec<Group>,
}

impl Diagram {
    /// Enforces the node-id uniqueness invariant at construction time.
    pub fn validated(self) -> Result<Self> {
        let mut seen = rustc_hash::FxHashSet::default();
        for node in &self.nodes {
            if !seen.insert(node.id.as_str()) {
                return Err(Error::DuplicateNodeId {
                    id: node.id.clone(),
                });
            }
        }
        Ok(self)
    }

    /// Deserializes and validates a diagram from model JSON.
    pub fn from_json_str(json: &str) -> Result<Self> {
        serde_json::from_str::<Diagram>(json)?.validated()
    }

    pub fn to_json_string_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Title text, with empty strings treated as "no title".
    pub fn title_text(&self) -> Option<&str> {
        self.title.as_deref().filter(|t| !t.is_empty())
    }
}
