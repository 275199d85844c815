//! Non-fatal problems found while filling a template.
use crate::template::error::ColorApplyError;
use std::fmt;
use tracing::warn;

/// A problem that was recovered from.
#[derive(Debug, Clone, PartialEq)]
pub enum Diagnostic {
    /// The captured color could not be reapplied to the replacement text.
    ColorNotApplied {
        /// 1-based slide number
        slide: usize,
        /// Shape name from `p:cNvPr/@name`
        shape: String,
        error: ColorApplyError,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ColorNotApplied {
                slide,
                shape,
                error,
            } => write!(f, "slide {}, shape '{}': {}", slide, shape, error),
        }
    }
}

/// Receiver for diagnostics.
pub trait DiagnosticSink {
    fn report(&mut self, diagnostic: Diagnostic);
}

impl<S: DiagnosticSink + ?Sized> DiagnosticSink for &mut S {
    fn report(&mut self, diagnostic: Diagnostic) {
        (**self).report(diagnostic);
    }
}

/// Logs every diagnostic as a `tracing` warning.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        match &diagnostic {
            Diagnostic::ColorNotApplied {
                slide,
                shape,
                error,
            } => warn!(slide, shape = %shape, color = %error.color, %error, "color not applied"),
        }
    }
}

/// Keeps every diagnostic in memory.
#[derive(Debug, Clone, Default)]
pub struct CollectingSink {
    diagnostics: Vec<Diagnostic>,
}

impl CollectingSink {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.diagnostics.is_empty()
    }

    pub fn into_diagnostics(self) -> Vec<Diagnostic> {
        self.diagnostics
    }
}

impl DiagnosticSink for CollectingSink {
    fn report(&mut self, diagnostic: Diagnostic) {
        self.diagnostics.push(diagnostic);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ooxml::pptx::dml::color::{ColorError, ThemeColor};
    use crate::template::style::CapturedColor;

    fn color_diagnostic() -> Diagnostic {
        Diagnostic::ColorNotApplied {
            slide: 2,
            shape: "Title 1".to_string(),
            error: ColorApplyError {
                color: CapturedColor::Theme(ThemeColor::Placeholder),
                source: ColorError::ThemeColorRejected(ThemeColor::Placeholder),
            },
        }
    }

    fn report_into<S: DiagnosticSink>(mut sink: S) {
        sink.report(color_diagnostic());
    }

    #[test]
    fn test_collecting_sink_through_reference() {
        let mut sink = CollectingSink::new();
        report_into(&mut sink);
        report_into(&mut sink);
        assert_eq!(sink.diagnostics(), [color_diagnostic(), color_diagnostic()]);
    }

    #[test]
    fn test_display() {
        let text = color_diagnostic().to_string();
        assert!(text.starts_with("slide 2, shape 'Title 1': could not apply color theme Placeholder"));
    }

    #[test]
    fn test_tracing_sink_does_not_panic() {
        TracingSink.report(color_diagnostic());
    }
}
