#![doc = include_str!("../README.md")]

#[macro_use]
extern crate pest_derive;

pub mod clock_time;
pub mod error;
pub mod rules;

mod parser;


pub use clock_time::ClockTime;
pub use error::{Error, Result};
pub use parser::{parse, parse_clause, CLAUSE_SEPARATOR};
pub use rules::{RuleKind, TimeRule, Timeslot};
