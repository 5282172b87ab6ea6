#![forbid(unsafe_code)]

//! Normalized diagram model + Excalidraw importer (headless).
//!
//! Design goals:
//! - one intermediate model shared by the importer and every output format
//! - deterministic, testable outputs (stable ids, validated invariants)
//! - pure in-memory transformation; callers own all file I/O

pub mod error;
pub mod excalidraw;
pub mod model;
pub mod sanitize;

pub use error::{Error, Result};
pub use model::{
    DEFAULT_NODE_HEIGHT, DEFAULT_NODE_WIDTH, Diagram, Edge, EdgeKind, EdgeStyle, Group, Node,
    NodeGeometry, NodeShape, NodeStyle, StrokeStyle,
};
