use std::fmt;

use super::LineType;

/// Failure raised by a scene assembler.
///
/// These indicate violated track/physics invariants, not transient conditions;
/// callers are expected to surface them rather than retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    /// The line type has no track-line rendering (e.g. scenery lines reached the
    /// standard-line path).
    UnsupportedLineType(LineType),
}

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RenderError::UnsupportedLineType(kind) => {
                write!(f, "cannot render track line of type {kind:?}")
            }
        }
    }
}

impl std::error::Error for RenderError {}
