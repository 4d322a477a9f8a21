//! Error taxonomy for panorama conversion.

use crate::convert::Format;

/// Failures a conversion can report. Conversions are one-shot batch jobs:
/// every failure is either a configuration/input error or a usage error,
/// never retried.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectError {
    /// The requested format pair or transform direction has no implemented
    /// projection. Reported before any output is written.
    UnsupportedConversion { from: Format, to: Format },
    /// An input image failed shape validation before projection started.
    DegenerateInput(String),
    /// A color lookup hit a representation constructed without backing
    /// pixel data. A usage error, not a data condition.
    MissingPixelData(&'static str),
}

impl std::fmt::Display for ProjectError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnsupportedConversion { from, to } => {
                write!(
                    f,
                    "unsupported conversion: {} -> {}",
                    from.label(),
                    to.label()
                )
            }
            Self::DegenerateInput(msg) => write!(f, "degenerate input: {}", msg),
            Self::MissingPixelData(what) => {
                write!(f, "{} has no backing pixel data", what)
            }
        }
    }
}

impl std::error::Error for ProjectError {}
