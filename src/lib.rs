//! # prereq - dependency ordering with cycle reporting
//!
//! Orders a graph of named items so that every prerequisite comes before the
//! items that depend on it. Cycles never abort the sort: each back-edge found
//! during traversal is reported, and the remaining edges are still honored.

pub mod cli;
pub mod cli_handlers;
pub mod error;
pub mod graph;
pub mod input;

pub use error::{Error, Result};
pub use graph::{
    Cycle, GraphIndex, Mode, Orderer, SortOutcome, Violation, sort, validate, violations,
};
