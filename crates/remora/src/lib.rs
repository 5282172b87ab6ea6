#![forbid(unsafe_code)]

//! `remora` converts diagrams between formats.
//!
//! One normalized model sits in the middle: the Excalidraw importer
//! ([`import_excalidraw_str`]) produces it, and [`convert_str`] renders it to
//! Mermaid flowchart markup, Graphviz DOT, draw.io XML, or SVG. See
//! `remora-core` for the model and importer, `remora-render` for the
//! renderers.

pub use remora_core::{
    Diagram, Edge, EdgeKind, EdgeStyle, Group, Node, NodeGeometry, NodeShape, NodeStyle,
    StrokeStyle, excalidraw, model, sanitize,
};
pub use remora_render::{DiagramConverter, LayoutMode, OutputFormat};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Model(#[from] remora_core::Error),
    #[error(transparent)]
    Render(#[from] remora_render::Error),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Parses model JSON and renders it to `format` in one call.
///
/// `layout` overrides the format's default layout mode for this run.
pub fn convert_str(
    model_json: &str,
    format: OutputFormat,
    layout: Option<LayoutMode>,
) -> Result<String> {
    let diagram = Diagram::from_json_str(model_json)?;
    Ok(DiagramConverter::with_layout(&diagram, layout).render(format))
}

/// Imports an Excalidraw scene into the normalized model. `source_file` is
/// recorded as provenance.
pub fn import_excalidraw_str(json: &str, source_file: &str) -> Result<Diagram> {
    Ok(excalidraw::import_str(json, source_file)?)
}
