//! Draftkit - incremental scene reconciliation for wireframe shapes.
//!
//! Shape plugins describe what an item looks like by requesting primitives
//! (rectangles, ellipses, paths, text, images, groups) in a fixed order on
//! every render pass. Draftkit maps those requests onto a retained scene:
//! nodes are matched by position, reused when their kind still matches and
//! only the properties that actually changed are written.
//!
//! # Overview
//!
//! - [`renderer::DiagramRenderer`] - Renders diagram items, one container per item
//! - [`plugin::ShapePlugin`] / [`plugin::ShapeCatalog`] - Shape definitions and their registry
//! - [`context::RenderContext`] - What a plugin sees while rendering one item
//! - [`reconciler::Reconciler`] - Positional matching of primitives, cleanup and clipping
//! - [`properties`] - Typed property staging and change tracking
//! - [`scene::Scene`] - The retained scene and its mutation counters
//! - [`export`] - SVG serialization of the scene

pub mod config;
pub mod context;
pub mod export;
pub mod plugin;
pub mod properties;
pub mod reconciler;
pub mod renderer;
pub mod scene;
pub mod shapes;
pub mod text;

mod error;

pub use draftkit_core::{
    appearance, color, configurable, geometry, identifier, item, path, style,
};

pub use error::{DraftkitError, RenderError};
