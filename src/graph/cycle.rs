//! Cycles reported by the orderer.

use serde::Serialize;
use std::fmt;

/// Separator used by the `Display` rendering of a cycle.
pub const ARROW: &str = " -> ";

/// A closed chain of "depends on" edges.
///
/// The first item is repeated at the end, so `[a, b, a]` reads as
/// "a depends on b, which depends on a". A self-loop is `[x, x]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cycle<T> {
    path: Vec<T>,
}

impl<T> Cycle<T> {
    /// Create a cycle from a closed path. The caller guarantees the first
    /// and last entries are the same item.
    pub(crate) fn new(path: Vec<T>) -> Self {
        debug_assert!(path.len() >= 2);
        Self { path }
    }

    pub fn path(&self) -> &[T] {
        &self.path
    }

    pub fn into_path(self) -> Vec<T> {
        self.path
    }

    /// Items on the loop, without the closing repeat.
    pub fn items(&self) -> &[T] {
        &self.path[..self.path.len() - 1]
    }

    /// Number of edges in the loop (1 for a self-loop).
    pub fn edge_count(&self) -> usize {
        self.path.len() - 1
    }

    /// The `(item, prerequisite)` edges that form the loop.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> {
        self.path.windows(2).map(|pair| (&pair[0], &pair[1]))
    }
}

impl<T: PartialEq> Cycle<T> {
    pub fn contains_edge(&self, item: &T, prerequisite: &T) -> bool {
        self.edges().any(|(i, p)| i == item && p == prerequisite)
    }
}

impl<T: fmt::Display> Cycle<T> {
    /// Render the chain with a custom separator.
    pub fn render(&self, separator: &str) -> String {
        self.path
            .iter()
            .map(|item| item.to_string())
            .collect::<Vec<_>>()
            .join(separator)
    }
}

impl<T: fmt::Display> fmt::Display for Cycle<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(ARROW))
    }
}
