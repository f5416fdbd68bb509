//! Depth-first topological ordering with cycle capture.
//!
//! Items are expanded in ascending order. Each item is placed only after all
//! of its prerequisites have been placed. When a prerequisite is already on
//! the current expansion path, the edge closes a cycle: the cycle is recorded,
//! the edge is treated as satisfied, and the traversal carries on.
//!
//! The expansion path is an explicit stack of frames rather than native
//! recursion, so arbitrarily deep prerequisite chains cannot exhaust the
//! thread stack.

use super::cycle::Cycle;
use super::index::GraphIndex;
use crate::error::{Error, Result};
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::hash::Hash;
use tracing::{debug, trace};

/// How the orderer reacts to a cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Report every cycle and still produce a full order.
    Lenient,
    /// Fail on the first cycle found.
    Strict,
}

/// Result of a sort: the order plus every cycle found along the way.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SortOutcome<T> {
    pub order: Vec<T>,
    pub cycles: Vec<Cycle<T>>,
}

impl<T> SortOutcome<T> {
    pub fn is_acyclic(&self) -> bool {
        self.cycles.is_empty()
    }
}

/// Per-item traversal tag. `InProgress` records the item's depth on the
/// current expansion path so a back-edge can slice the cycle out directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    Unvisited,
    InProgress { depth: usize },
    Done,
}

#[derive(Debug)]
struct Frame<'g, T> {
    item: &'g T,
    /// Index of the next prerequisite to look at.
    next: usize,
}

/// Sorts a [`GraphIndex`]. Holds no traversal state of its own; every call
/// starts from scratch, so one orderer (or one graph) can be sorted repeatedly
/// and from several threads.
#[derive(Debug, Clone)]
pub struct Orderer<'g, T> {
    graph: &'g GraphIndex<T>,
}

impl<'g, T> Orderer<'g, T>
where
    T: Ord + Hash + Clone,
{
    pub fn new(graph: &'g GraphIndex<T>) -> Self {
        Self { graph }
    }

    /// Order every item, reporting one cycle per back-edge found.
    pub fn sort(&self) -> SortOutcome<T> {
        Traversal::new(self.graph, false).run()
    }

    /// Order every item, failing with [`Error::CycleDetected`] on the first cycle.
    pub fn sort_strict(&self) -> Result<Vec<T>>
    where
        T: fmt::Display,
    {
        let outcome = Traversal::new(self.graph, true).run();
        match outcome.cycles.into_iter().next() {
            Some(cycle) => Err(Error::CycleDetected {
                path: cycle.to_string(),
            }),
            None => Ok(outcome.order),
        }
    }

    pub fn sort_with(&self, mode: Mode) -> Result<SortOutcome<T>>
    where
        T: fmt::Display,
    {
        match mode {
            Mode::Lenient => Ok(self.sort()),
            Mode::Strict => self.sort_strict().map(|order| SortOutcome {
                order,
                cycles: Vec::new(),
            }),
        }
    }
}

/// Shorthand for `Orderer::new(graph).sort()`.
pub fn sort<T>(graph: &GraphIndex<T>) -> SortOutcome<T>
where
    T: Ord + Hash + Clone,
{
    Orderer::new(graph).sort()
}

/// State owned by a single sort call.
struct Traversal<'g, T> {
    graph: &'g GraphIndex<T>,
    state: HashMap<&'g T, VisitState>,
    path: Vec<Frame<'g, T>>,
    order: Vec<T>,
    cycles: Vec<Cycle<T>>,
    stop_on_cycle: bool,
}

impl<'g, T> Traversal<'g, T>
where
    T: Ord + Hash + Clone,
{
    fn new(graph: &'g GraphIndex<T>, stop_on_cycle: bool) -> Self {
        Self {
            graph,
            state: HashMap::with_capacity(graph.len()),
            path: Vec::new(),
            order: Vec::with_capacity(graph.len()),
            cycles: Vec::new(),
            stop_on_cycle,
        }
    }

    fn run(mut self) -> SortOutcome<T> {
        let graph = self.graph;
        for root in graph.all_items() {
            if self.state_of(root) == VisitState::Unvisited && !self.expand(root) {
                break;
            }
        }

        debug!(
            items = self.order.len(),
            cycles = self.cycles.len(),
            "dependency sort finished"
        );

        SortOutcome {
            order: self.order,
            cycles: self.cycles,
        }
    }

    /// Expand `root` and everything reachable from it.
    ///
    /// Returns false if a cycle halted the traversal.
    fn expand(&mut self, root: &'g T) -> bool {
        let graph = self.graph;
        self.enter(root);

        while let Some(frame) = self.path.last_mut() {
            let item = frame.item;
            let Some(prerequisite) = graph.prerequisites(item).get(frame.next) else {
                self.path.pop();
                self.finish(item);
                continue;
            };
            frame.next += 1;

            match self.state_of(prerequisite) {
                VisitState::InProgress { depth } => {
                    self.record_cycle(depth, prerequisite);
                    if self.stop_on_cycle {
                        return false;
                    }
                }
                VisitState::Unvisited => self.enter(prerequisite),
                VisitState::Done => {}
            }
        }

        true
    }

    fn state_of(&self, item: &T) -> VisitState {
        self.state
            .get(item)
            .copied()
            .unwrap_or(VisitState::Unvisited)
    }

    fn enter(&mut self, item: &'g T) {
        let depth = self.path.len();
        self.state.insert(item, VisitState::InProgress { depth });
        self.path.push(Frame { item, next: 0 });
    }

    fn finish(&mut self, item: &'g T) {
        self.state.insert(item, VisitState::Done);
        self.order.push(item.clone());
        trace!(position = self.order.len(), "item placed");
    }

    /// The cycle is the path from `closing` down to the current tail,
    /// closed by repeating `closing`.
    fn record_cycle(&mut self, depth: usize, closing: &'g T) {
        let path: Vec<T> = self.path[depth..]
            .iter()
            .map(|frame| frame.item.clone())
            .chain(std::iter::once(closing.clone()))
            .collect();
        let cycle = Cycle::new(path);
        debug!(edges = cycle.edge_count(), "back-edge closes a dependency cycle");
        self.cycles.push(cycle);
    }
}
