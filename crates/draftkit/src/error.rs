//! Error types for Draftkit operations.
//!
//! [`RenderError`] is raised while a shape plugin renders into the scene;
//! [`DraftkitError`] wraps everything the renderer and its callers can fail
//! with.

use std::io;

use thiserror::Error;

use draftkit_core::identifier::Id;

/// Errors raised during a render pass.
///
/// A render error aborts the remainder of the current pass; the next pass
/// starts from whatever the scene holds.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// A container received a second clip-producing primitive in one pass.
    #[error("only one clipping element supported")]
    Clipping,

    #[error("no shape plugin registered for renderer `{0}`")]
    UnknownRenderer(Id),
}

/// The main error type for Draftkit operations.
#[derive(Debug, Error)]
pub enum DraftkitError {
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Export error: {0}")]
    Export(Box<dyn std::error::Error>),
}

impl From<crate::export::Error> for DraftkitError {
    fn from(error: crate::export::Error) -> Self {
        Self::Export(Box::new(error))
    }
}
