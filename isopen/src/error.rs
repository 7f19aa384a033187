use std::fmt::Display;

use chrono::Duration;

pub use isopen_syntax::error::Error as ParserError;

/// Reason why a schedule could not be evaluated.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EvalError {
    /// A rule needs the position of the sun but the context has no location.
    LocationUnresolved,
    /// A rule needs a holiday calendar but the context region is missing or
    /// unknown to the holiday provider.
    RegionUnresolved,
    /// No state change was found before the end of the searched horizon.
    NoChangeFound { horizon: Duration },
}

impl Display for EvalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LocationUnresolved => write!(f, "no location available to compute solar events"),
            Self::RegionUnresolved => write!(f, "no holiday calendar available for the region"),
            Self::NoChangeFound { horizon } => {
                write!(f, "no state change within {} minutes", horizon.num_minutes())
            }
        }
    }
}

impl std::error::Error for EvalError {}
