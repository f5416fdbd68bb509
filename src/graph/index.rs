//! Immutable adjacency index: each item maps to its direct prerequisites.

use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::fmt;
use std::hash::Hash;
use std::marker::PhantomData;

/// Dependency graph keyed by item.
///
/// An edge `item -> prerequisite` means the prerequisite must be ordered
/// before the item. Items that only ever appear as prerequisites are leaves:
/// they have no entry of their own but are still part of [`all_items`].
///
/// [`all_items`]: GraphIndex::all_items
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphIndex<T> {
    prerequisites: BTreeMap<T, Vec<T>>,
    items: BTreeSet<T>,
}

impl<T> GraphIndex<T>
where
    T: Ord + Hash + Clone,
{
    /// Build from `(item, prerequisite)` pairs.
    pub fn from_edges<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = (T, T)>,
    {
        Self::from_adjacency(
            edges
                .into_iter()
                .map(|(item, prerequisite)| (item, std::iter::once(prerequisite))),
        )
    }

    /// Build from an adjacency listing.
    ///
    /// Every listed item is registered even when its prerequisite list is
    /// empty. Prerequisites keep the order they are given in; a repeated
    /// `item -> prerequisite` pair is kept only at its first position.
    pub fn from_adjacency<I, P>(adjacency: I) -> Self
    where
        I: IntoIterator<Item = (T, P)>,
        P: IntoIterator<Item = T>,
    {
        let mut prerequisites: BTreeMap<T, Vec<T>> = BTreeMap::new();
        let mut items: BTreeSet<T> = BTreeSet::new();
        let mut seen: HashSet<(T, T)> = HashSet::new();

        for (item, listed) in adjacency {
            items.insert(item.clone());
            let entry = prerequisites.entry(item.clone()).or_default();
            for prerequisite in listed {
                if seen.insert((item.clone(), prerequisite.clone())) {
                    items.insert(prerequisite.clone());
                    entry.push(prerequisite);
                }
            }
        }

        Self {
            prerequisites,
            items,
        }
    }
}

impl<T: Ord> GraphIndex<T> {
    /// Direct prerequisites of `item`, empty if none are recorded.
    pub fn prerequisites(&self, item: &T) -> &[T] {
        self.prerequisites
            .get(item)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Every item in the graph, keys and prerequisites alike, in ascending order.
    pub fn all_items(&self) -> &BTreeSet<T> {
        &self.items
    }

    pub fn contains(&self, item: &T) -> bool {
        self.items.contains(item)
    }

    /// Number of distinct items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn edge_count(&self) -> usize {
        self.prerequisites.values().map(Vec::len).sum()
    }

    /// All `(item, prerequisite)` edges, items ascending, prerequisites in index order.
    pub fn edges(&self) -> impl Iterator<Item = (&T, &T)> {
        self.prerequisites
            .iter()
            .flat_map(|(item, listed)| listed.iter().map(move |p| (item, p)))
    }
}

impl<T> FromIterator<(T, T)> for GraphIndex<T>
where
    T: Ord + Hash + Clone,
{
    fn from_iter<I: IntoIterator<Item = (T, T)>>(iter: I) -> Self {
        Self::from_edges(iter)
    }
}

impl<'de, T> Deserialize<'de> for GraphIndex<T>
where
    T: Deserialize<'de> + Ord + Hash + Clone,
{
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(AdjacencyVisitor(PhantomData))
    }
}

/// Collects every map entry in document order, so a repeated key merges
/// into the earlier one instead of replacing it.
struct AdjacencyVisitor<T>(PhantomData<T>);

impl<'de, T> Visitor<'de> for AdjacencyVisitor<T>
where
    T: Deserialize<'de> + Ord + Hash + Clone,
{
    type Value = GraphIndex<T>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map from each item to its list of prerequisites")
    }

    fn visit_map<A>(self, mut map: A) -> std::result::Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut adjacency: Vec<(T, Vec<T>)> = Vec::with_capacity(map.size_hint().unwrap_or(0));
        while let Some(entry) = map.next_entry::<T, Vec<T>>()? {
            adjacency.push(entry);
        }
        Ok(GraphIndex::from_adjacency(adjacency))
    }
}
