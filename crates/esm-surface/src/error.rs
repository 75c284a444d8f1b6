//! Scan errors.

use thiserror::Error;

/// The single error the scanner produces: the source violated a
/// structural invariant (unbalanced brackets, an unterminated string,
/// template or regex, or a malformed statement).
///
/// Carries the byte offset of the failure plus the derived 1-indexed
/// line and column. A module name for display can be attached with
/// [`with_module`](SyntaxError::with_module).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message} at {}:{line}:{column}", .module.as_deref().unwrap_or("@"))]
pub struct SyntaxError {
    /// What was left open or found out of place.
    pub message: &'static str,
    /// Byte offset of the failure.
    pub offset: u32,
    /// 1-indexed line of the failure.
    pub line: u32,
    /// 1-indexed column of the failure.
    pub column: u32,
    /// Module name for display, if any.
    pub module: Option<String>,
}

impl SyntaxError {
    pub(crate) fn new(message: &'static str, offset: usize, src: &[u8]) -> Self {
        let upto = offset.min(src.len());
        let line_start = src[..upto]
            .iter()
            .rposition(|&b| b == b'\n')
            .map_or(0, |i| i + 1);
        let line = src[..upto].iter().filter(|&&b| b == b'\n').count() + 1;
        Self {
            message,
            offset: upto as u32,
            line: line as u32,
            column: (upto - line_start) as u32 + 1,
            module: None,
        }
    }

    /// Attach a module name to the error display.
    #[must_use]
    pub fn with_module(mut self, module: impl Into<String>) -> Self {
        self.module = Some(module.into());
        self
    }
}
