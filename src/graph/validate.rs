//! Checks a produced order against the graph it came from.

use super::cycle::Cycle;
use super::index::GraphIndex;
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::hash::Hash;

/// A way in which an order fails to respect its graph.
///
/// Positions are 1-based, matching the numbered order the CLI prints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation<T> {
    /// A prerequisite is not placed before the item that depends on it.
    Misordered {
        item: T,
        prerequisite: T,
        item_position: usize,
        prerequisite_position: usize,
    },
    /// A graph item does not appear in the order at all.
    Missing { item: T },
    /// An item appears more than once.
    Duplicate { item: T, first: usize, second: usize },
}

impl<T: fmt::Display> fmt::Display for Violation<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Violation::Misordered {
                item,
                prerequisite,
                item_position,
                prerequisite_position,
            } => write!(
                f,
                "{item} (position {item_position}) depends on {prerequisite} (position {prerequisite_position}), which is not placed before it"
            ),
            Violation::Missing { item } => write!(f, "{item} is missing from the order"),
            Violation::Duplicate {
                item,
                first,
                second,
            } => write!(f, "{item} appears at positions {first} and {second}"),
        }
    }
}

/// Every violation of `order` against `graph`.
///
/// Edges that belong to one of `cycles` cannot all be honored and are
/// skipped. Items in `order` that the graph does not know are ignored.
pub fn violations<T>(
    graph: &GraphIndex<T>,
    order: &[T],
    cycles: &[Cycle<T>],
) -> Vec<Violation<T>>
where
    T: Ord + Hash + Clone,
{
    let mut found = Vec::new();

    let mut positions: HashMap<&T, usize> = HashMap::with_capacity(order.len());
    for (index, item) in order.iter().enumerate() {
        let position = index + 1;
        match positions.get(item) {
            Some(&first) => found.push(Violation::Duplicate {
                item: item.clone(),
                first,
                second: position,
            }),
            None => {
                positions.insert(item, position);
            }
        }
    }

    for item in graph.all_items() {
        if !positions.contains_key(item) {
            found.push(Violation::Missing { item: item.clone() });
        }
    }

    let cyclic: HashSet<(&T, &T)> = cycles.iter().flat_map(|cycle| cycle.edges()).collect();

    for (item, prerequisite) in graph.edges() {
        if cyclic.contains(&(item, prerequisite)) {
            continue;
        }
        let (Some(&item_position), Some(&prerequisite_position)) =
            (positions.get(item), positions.get(prerequisite))
        else {
            // already reported as missing
            continue;
        };
        if prerequisite_position >= item_position {
            found.push(Violation::Misordered {
                item: item.clone(),
                prerequisite: prerequisite.clone(),
                item_position,
                prerequisite_position,
            });
        }
    }

    found
}

/// True when `order` places every item exactly once and honors every edge
/// outside `cycles`.
pub fn validate<T>(graph: &GraphIndex<T>, order: &[T], cycles: &[Cycle<T>]) -> bool
where
    T: Ord + Hash + Clone,
{
    violations(graph, order, cycles).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::order::sort;

    fn chain() -> GraphIndex<&'static str> {
        GraphIndex::from_edges(vec![("c", "b"), ("b", "a")])
    }

    #[test]
    fn test_valid_order() {
        assert!(validate(&chain(), &["a", "b", "c"], &[]));
    }

    #[test]
    fn test_misordered_edge_reported_with_positions() {
        let found = violations(&chain(), &["b", "a", "c"], &[]);
        assert_eq!(
            found,
            vec![Violation::Misordered {
                item: "b",
                prerequisite: "a",
                item_position: 1,
                prerequisite_position: 2,
            }]
        );
        assert_eq!(
            found[0].to_string(),
            "b (position 1) depends on a (position 2), which is not placed before it"
        );
    }

    #[test]
    fn test_missing_item() {
        let found = violations(&chain(), &["a", "c"], &[]);
        assert_eq!(found, vec![Violation::Missing { item: "b" }]);
    }

    #[test]
    fn test_duplicate_item() {
        let found = violations(&chain(), &["a", "b", "a", "c"], &[]);
        assert_eq!(
            found,
            vec![Violation::Duplicate {
                item: "a",
                first: 1,
                second: 3,
            }]
        );
    }

    #[test]
    fn test_cyclic_edges_are_skipped() {
        let graph = GraphIndex::from_edges(vec![("a", "b"), ("b", "a")]);
        let outcome = sort(&graph);

        assert!(!validate(&graph, &outcome.order, &[]));
        assert!(validate(&graph, &outcome.order, &outcome.cycles));
    }

    #[test]
    fn test_unreported_self_loop_is_misordered() {
        let graph = GraphIndex::from_edges(vec![("x", "x")]);
        assert!(!validate(&graph, &["x"], &[]));
    }

    #[test]
    fn test_sorted_acyclic_graph_validates() {
        let graph = GraphIndex::from_edges(vec![
            ("deploy", "test"),
            ("deploy", "build"),
            ("test", "build"),
            ("build", "fetch"),
            ("lint", "fetch"),
        ]);
        let outcome = sort(&graph);

        assert!(outcome.is_acyclic());
        assert!(validate(&graph, &outcome.order, &outcome.cycles));
    }
}
