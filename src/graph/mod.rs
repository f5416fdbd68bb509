//! Graph engine for dependency ordering and cycle reporting.

pub mod cycle;
pub mod index;
pub mod order;
pub mod validate;

pub use cycle::Cycle;
pub use index::GraphIndex;
pub use order::{Mode, Orderer, SortOutcome, sort};
pub use validate::{Violation, validate, violations};
