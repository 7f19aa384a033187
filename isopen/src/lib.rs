#![doc = include_str!("../../README.md")]

pub mod context;
pub mod error;
pub mod interval;
pub mod localization;
pub mod resolver;
pub mod schedule;

mod utils;

#[cfg(test)]
mod tests;

// Public re-exports
pub use crate::context::Context;
pub use crate::error::{EvalError, ParserError};
pub use crate::interval::{combine, ResolvedInterval};
pub use crate::resolver::resolve;
pub use crate::schedule::Schedule;
pub use isopen_syntax::rules::{RuleKind, TimeRule, Timeslot};
