use std::fmt;

use crate::parser::Rule;

pub type Result<T> = std::result::Result<T, Error>;

/// Reason why an expression could not be turned into time rules.
///
/// Every variant carries the text of the clause that could not be parsed, the
/// whole expression is rejected as soon as one of its clauses fails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// The clause does not match any recognized shape.
    MalformedClause {
        clause: String,
        cause: Option<Box<pest::error::Error<Rule>>>,
    },
    /// A weekday or month token is not part of the reference tables.
    UnknownAbbreviation { clause: String, token: String },
    /// The clause uses a feature of the syntax which is recognized but not
    /// implemented.
    UnsupportedConstruct {
        clause: String,
        construct: &'static str,
    },
}

impl Error {
    /// Text of the clause which raised this error.
    ///
    /// ```
    /// use isopen_syntax::parse;
    ///
    /// let err = parse("24/7; Mo-Fr 08:00").unwrap_err();
    /// assert_eq!(err.clause(), "Mo-Fr 08:00");
    /// ```
    pub fn clause(&self) -> &str {
        match self {
            Self::MalformedClause { clause, .. }
            | Self::UnknownAbbreviation { clause, .. }
            | Self::UnsupportedConstruct { clause, .. } => clause,
        }
    }

    pub(crate) fn malformed(clause: &str) -> Self {
        Self::MalformedClause { clause: clause.to_string(), cause: None }
    }

    pub(crate) fn unknown_abbreviation(clause: &str, token: &str) -> Self {
        Self::UnknownAbbreviation {
            clause: clause.to_string(),
            token: token.to_string(),
        }
    }

    pub(crate) fn unsupported(clause: &str, construct: &'static str) -> Self {
        Self::UnsupportedConstruct { clause: clause.to_string(), construct }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MalformedClause { clause, cause: None } => {
                write!(f, "malformed clause `{clause}`")
            }
            Self::MalformedClause { clause, cause: Some(pest_err) } => {
                write!(f, "malformed clause `{clause}`:\n{pest_err}")
            }
            Self::UnknownAbbreviation { clause, token } => {
                write!(f, "unknown weekday or month `{token}` in `{clause}`")
            }
            Self::UnsupportedConstruct { clause, construct } => {
                write!(f, "using an unsupported feature in `{clause}`: {construct}")
            }
        }
    }
}

impl std::error::Error for Error {}
