//! Error adapter for converting DraftkitError to miette diagnostics.
//!
//! This module provides the bridge between the library's standard error types
//! and miette's rich diagnostic formatting used in the CLI.

use std::fmt;

use miette::{Diagnostic as MietteDiagnostic, LabeledSpan};

use draftkit::{DraftkitError, RenderError};

/// Adapter that renders a [`DraftkitError`] through miette.
///
/// Draftkit errors carry no source locations, so the adapter only supplies
/// an error code and, where one helps, a hint.
pub struct ErrorAdapter<'a>(pub &'a DraftkitError);

impl fmt::Debug for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for ErrorAdapter<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl std::error::Error for ErrorAdapter<'_> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.0.source()
    }
}

impl MietteDiagnostic for ErrorAdapter<'_> {
    fn code<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let code = match &self.0 {
            DraftkitError::Io(_) => "draftkit::io",
            DraftkitError::Render(RenderError::Clipping) => "draftkit::render::clipping",
            DraftkitError::Render(RenderError::UnknownRenderer(_)) => "draftkit::render::unknown",
            DraftkitError::Config(_) => "draftkit::config",
            DraftkitError::Export(_) => "draftkit::export",
        };
        Some(Box::new(code))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn fmt::Display + 'a>> {
        let help = match &self.0 {
            DraftkitError::Render(RenderError::UnknownRenderer(_)) => {
                "shape names are case-sensitive, e.g. `Rectangle` or `ButtonBar`"
            }
            DraftkitError::Render(RenderError::Clipping) => {
                "a shape may clip its content with at most one primitive"
            }
            DraftkitError::Config(_) => "pass `--config <FILE>` to use a different file",
            _ => return None,
        };
        Some(Box::new(help))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        None
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = LabeledSpan> + '_>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use draftkit::identifier::Id;

    use super::*;

    fn code_of(err: &DraftkitError) -> String {
        ErrorAdapter(err).code().unwrap().to_string()
    }

    #[test]
    fn test_error_codes() {
        let io = DraftkitError::Io(std::io::Error::other("disk full"));
        assert_eq!(code_of(&io), "draftkit::io");

        let clipping = DraftkitError::Render(RenderError::Clipping);
        assert_eq!(code_of(&clipping), "draftkit::render::clipping");

        let config = DraftkitError::Config("bad".to_string());
        assert_eq!(code_of(&config), "draftkit::config");
    }

    #[test]
    fn test_help_only_where_useful() {
        let unknown = DraftkitError::Render(RenderError::UnknownRenderer(Id::new("Ghost")));
        assert!(ErrorAdapter(&unknown).help().is_some());

        let io = DraftkitError::Io(std::io::Error::other("disk full"));
        assert!(ErrorAdapter(&io).help().is_none());
    }

    #[test]
    fn test_display_delegates() {
        let unknown = DraftkitError::Render(RenderError::UnknownRenderer(Id::new("Ghost")));
        let adapter = ErrorAdapter(&unknown);
        assert_eq!(adapter.to_string(), unknown.to_string());
        assert!(adapter.to_string().contains("Ghost"));
    }

    #[test]
    fn test_renders_with_graphical_handler() {
        let config = DraftkitError::Config("Missing configuration file: x.toml".to_string());
        let mut out = String::new();
        miette::GraphicalReportHandler::new()
            .render_report(&mut out, &ErrorAdapter(&config))
            .unwrap();
        assert!(out.contains("x.toml"), "{out}");
    }
}
