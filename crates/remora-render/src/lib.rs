#![forbid(unsafe_code)]

//! Renderers from the normalized diagram model to four output formats.
//!
//! A [`DiagramConverter`] borrows a validated [`Diagram`] and offers one pure
//! rendering function per target format. All formats visit nodes and groups
//! in ascending lexicographic id order and edges in ascending edge-id order,
//! so identical input always produces byte-identical output.

mod drawio;
mod graphviz;
mod mermaid;
mod svg;

use std::collections::BTreeMap;
use std::str::FromStr;

use tracing::debug;

use remora_core::{Diagram, Edge, Group, Node};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("unsupported output format: {format}")]
    UnsupportedFormat { format: String },
    #[error("unsupported layout mode: {layout} (expected structure|position)")]
    UnsupportedLayout { layout: String },
}

pub type Result<T> = std::result::Result<T, Error>;

/// The four supported output formats. Unrecognized format names are rejected
/// at this boundary instead of falling back silently.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Mermaid,
    Graphviz,
    Drawio,
    Svg,
}

impl OutputFormat {
    pub fn name(self) -> &'static str {
        match self {
            OutputFormat::Mermaid => "mermaid",
            OutputFormat::Graphviz => "graphviz",
            OutputFormat::Drawio => "drawio",
            OutputFormat::Svg => "svg",
        }
    }

    /// Output file extension, including the leading dot.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Mermaid => ".mmd",
            OutputFormat::Graphviz => ".dot",
            OutputFormat::Drawio => ".drawio",
            OutputFormat::Svg => ".svg",
        }
    }

    /// Layout mode used when no override is given: structure-based formats
    /// let the target's own engine place nodes, position-based formats carry
    /// the stored coordinates.
    pub fn default_layout(self) -> LayoutMode {
        match self {
            OutputFormat::Mermaid | OutputFormat::Graphviz => LayoutMode::Structure,
            OutputFormat::Drawio | OutputFormat::Svg => LayoutMode::Position,
        }
    }

    pub const ALL: [OutputFormat; 4] = [
        OutputFormat::Mermaid,
        OutputFormat::Graphviz,
        OutputFormat::Drawio,
        OutputFormat::Svg,
    ];
}

impl FromStr for OutputFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mermaid" => Ok(Self::Mermaid),
            "graphviz" => Ok(Self::Graphviz),
            "drawio" => Ok(Self::Drawio),
            "svg" => Ok(Self::Svg),
            other => Err(Error::UnsupportedFormat {
                format: other.to_string(),
            }),
        }
    }
}

/// Whether a renderer uses stored coordinates or defers to the target
/// format's layout engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    Structure,
    Position,
}

impl FromStr for LayoutMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "structure" => Ok(Self::Structure),
            "position" => Ok(Self::Position),
            other => Err(Error::UnsupportedLayout {
                layout: other.to_string(),
            }),
        }
    }
}

/// Render engine over a borrowed diagram.
///
/// Holds nodes indexed by id for O(log n) lookup and lexicographic
/// iteration, plus edge/group sequences pre-sorted by id. The diagram is
/// never mutated.
pub struct DiagramConverter<'a> {
    diagram: &'a Diagram,
    layout_override: Option<LayoutMode>,
    nodes: BTreeMap<&'a str, &'a Node>,
    edges: Vec<&'a Edge>,
    groups: Vec<&'a Group>,
}

impl<'a> DiagramConverter<'a> {
    pub fn new(diagram: &'a Diagram) -> Self {
        Self::with_layout(diagram, None)
    }

    pub fn with_layout(diagram: &'a Diagram, layout_override: Option<LayoutMode>) -> Self {
        let nodes: BTreeMap<&str, &Node> = diagram
            .nodes
            .iter()
            .map(|n| (n.id.as_str(), n))
            .collect();

        let mut edges: Vec<&Edge> = diagram.edges.iter().collect();
        edges.sort_by(|a, b| a.id.cmp(&b.id));

        let mut groups: Vec<&Group> = diagram.groups.iter().collect();
        groups.sort_by(|a, b| a.id.cmp(&b.id));

        Self {
            diagram,
            layout_override,
            nodes,
            edges,
            groups,
        }
    }

    /// Effective layout mode for a format: the run-wide override when set,
    /// else the format default.
    pub fn layout_for(&self, format: OutputFormat) -> LayoutMode {
        self.layout_override.unwrap_or(format.default_layout())
    }

    pub fn render(&self, format: OutputFormat) -> String {
        debug!(format = format.name(), "rendering diagram");
        match format {
            OutputFormat::Mermaid => mermaid::render(self),
            OutputFormat::Graphviz => graphviz::render(self),
            OutputFormat::Drawio => drawio::render(self),
            OutputFormat::Svg => svg::render(self),
        }
    }

    fn title(&self) -> Option<&str> {
        self.diagram.title_text()
    }

    fn node(&self, id: &str) -> Option<&'a Node> {
        self.nodes.get(id).copied()
    }

    /// Nodes in ascending lexicographic id order.
    fn nodes(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.values().copied()
    }

    fn has_nodes(&self) -> bool {
        !self.nodes.is_empty()
    }

    /// Edges in ascending lexicographic edge-id order.
    fn edges(&self) -> impl Iterator<Item = &'a Edge> + '_ {
        self.edges.iter().copied()
    }

    /// Groups in ascending lexicographic id order.
    fn groups(&self) -> impl Iterator<Item = &'a Group> + '_ {
        self.groups.iter().copied()
    }
}

/// Minimal XML/HTML entity escaping for labels embedded in markup output.
pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Compact decimal formatting: up to three fractional digits, trailing
/// zeros trimmed, so integral coordinates print without a `.0` tail.
pub(crate) fn fmt_number(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let mut r = (v * 1000.0).round() / 1000.0;
    if r.abs() < 0.0005 {
        r = 0.0;
    }
    let mut s = format!("{r:.3}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" { "0".to_string() } else { s }
}

#[cfg(test)]
mod tests;
