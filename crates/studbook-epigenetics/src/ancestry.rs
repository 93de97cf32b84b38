//! Bounded breadth-first ancestry traversal.
//!
//! The parent relation should form a DAG (a pedigree), but studbook data can
//! be malformed, so traversal keeps a visited-id set and never re-expands a
//! node. One batched `find_parent_records` call is made per generation.

use std::collections::{HashMap, HashSet};

use studbook_state::{HorseId, HorseLookup, HorseRef, StorageError};
use tracing::debug;

/// Ancestors keyed by id, iterated in discovery order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AncestorSet {
    nodes: Vec<HorseRef>,
    index: HashMap<HorseId, usize>,
}

impl AncestorSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a node. Returns `false` and keeps the existing entry if the id
    /// is already present.
    pub fn insert(&mut self, node: HorseRef) -> bool {
        if self.index.contains_key(&node.id) {
            return false;
        }
        self.index.insert(node.id, self.nodes.len());
        self.nodes.push(node);
        true
    }

    pub fn contains(&self, id: HorseId) -> bool {
        self.index.contains_key(&id)
    }

    pub fn get(&self, id: HorseId) -> Option<&HorseRef> {
        self.index.get(&id).map(|&slot| &self.nodes[slot])
    }

    pub fn iter(&self) -> impl Iterator<Item = &HorseRef> {
        self.nodes.iter()
    }

    pub fn ids(&self) -> impl Iterator<Item = HorseId> + '_ {
        self.nodes.iter().map(|n| n.id)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Nodes of `self` whose id is also in `other`, in `self`'s order.
    pub fn intersection(&self, other: &AncestorSet) -> Vec<HorseRef> {
        self.nodes
            .iter()
            .filter(|n| other.contains(n.id))
            .cloned()
            .collect()
    }

    /// Add every node of `other` not already present, keeping `other`'s order.
    pub fn extend_from(&mut self, other: &AncestorSet) {
        for node in other.iter() {
            self.insert(node.clone());
        }
    }
}

/// What a walk found, plus the error that cut it short, if any.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    /// The start horse, when it has a record. Never part of `ancestors`.
    pub root: Option<HorseRef>,
    pub ancestors: AncestorSet,
    /// Set when a lookup failed; `ancestors` then holds the partial result.
    pub failure: Option<StorageError>,
}

impl WalkOutcome {
    pub fn is_complete(&self) -> bool {
        self.failure.is_none()
    }
}

/// Walks parent links through a [`HorseLookup`].
pub struct AncestorWalker<'a> {
    lookup: &'a dyn HorseLookup,
}

impl<'a> AncestorWalker<'a> {
    pub fn new(lookup: &'a dyn HorseLookup) -> Self {
        Self { lookup }
    }

    /// Collect the ancestors of `start_id` up to `max_depth` generations.
    ///
    /// Generation 1 is the parents of `start_id`. A branch ends at a node
    /// without parent ids, at an id the studbook does not know, or at
    /// `max_depth`. A failed lookup ends the walk; what was gathered so far
    /// is returned together with the error.
    pub async fn walk(&self, start_id: HorseId, max_depth: usize) -> WalkOutcome {
        let mut outcome = WalkOutcome::default();
        let mut visited: HashSet<HorseId> = HashSet::from([start_id]);

        let mut frontier = match self.lookup.find_parent_records(&[start_id]).await {
            Ok(nodes) => match nodes.into_iter().find(|n| n.id == start_id) {
                Some(root) => {
                    let parents = unvisited_parents(std::slice::from_ref(&root), &mut visited);
                    outcome.root = Some(root);
                    parents
                }
                None => Vec::new(),
            },
            Err(e) => {
                outcome.failure = Some(e);
                return outcome;
            }
        };

        let mut depth = 0;
        while !frontier.is_empty() && depth < max_depth {
            depth += 1;
            let nodes = match self.lookup.find_parent_records(&frontier).await {
                Ok(nodes) => nodes,
                Err(e) => {
                    debug!(start = %start_id, depth, error = %e, "ancestor walk interrupted");
                    outcome.failure = Some(e);
                    return outcome;
                }
            };
            let generation: Vec<HorseRef> = nodes
                .into_iter()
                .filter(|n| frontier.contains(&n.id))
                .filter(|n| outcome.ancestors.insert(n.clone()))
                .collect();
            frontier = unvisited_parents(&generation, &mut visited);
        }

        debug!(
            start = %start_id,
            depth,
            ancestors = outcome.ancestors.len(),
            "ancestor walk finished"
        );
        outcome
    }
}

/// Parent ids of `nodes` not seen before, marking them visited.
fn unvisited_parents(nodes: &[HorseRef], visited: &mut HashSet<HorseId>) -> Vec<HorseId> {
    nodes
        .iter()
        .flat_map(HorseRef::parent_ids)
        .filter(|id| visited.insert(*id))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use studbook_state::{HorseRecord, MemoryStudbook};

    fn horse(id: u64, sire: Option<u64>, dam: Option<u64>) -> HorseRecord {
        HorseRecord::new(id, format!("Horse{id}")).with_parents(sire, dam)
    }

    fn ids(set: &AncestorSet) -> Vec<u64> {
        set.ids().map(|id| id.0).collect()
    }

    /// 1 <- (10, 11), 10 <- (100, 101), 11 <- (110, 111), 100 <- (1000, _)
    fn three_generations() -> MemoryStudbook {
        let mut studbook = MemoryStudbook::new();
        studbook.insert_horse(horse(1, Some(10), Some(11)));
        studbook.insert_horse(horse(10, Some(100), Some(101)));
        studbook.insert_horse(horse(11, Some(110), Some(111)));
        studbook.insert_horse(horse(100, Some(1000), None));
        studbook.insert_horse(horse(101, None, None));
        studbook.insert_horse(horse(110, None, None));
        studbook.insert_horse(horse(111, None, None));
        studbook.insert_horse(horse(1000, None, None));
        studbook
    }

    #[test]
    fn test_ancestor_set_dedupes_by_id() {
        let mut set = AncestorSet::new();
        assert!(set.insert(HorseRef::bare(HorseId(1))));
        assert!(!set.insert(HorseRef::bare(HorseId(1))));
        assert_eq!(set.len(), 1);
        assert!(set.get(HorseId(1)).is_some());
    }

    #[test]
    fn test_intersection_follows_left_order() {
        let mut left = AncestorSet::new();
        let mut right = AncestorSet::new();
        for id in [5, 3, 9] {
            left.insert(HorseRef::bare(HorseId(id)));
        }
        for id in [9, 5] {
            right.insert(HorseRef::bare(HorseId(id)));
        }
        let common: Vec<u64> = left.intersection(&right).iter().map(|n| n.id.0).collect();
        assert_eq!(common, vec![5, 9]);
    }

    #[tokio::test]
    async fn test_walk_breadth_first_excludes_start() {
        let studbook = three_generations();
        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;

        assert!(outcome.is_complete());
        assert_eq!(outcome.root.as_ref().map(|r| r.id), Some(HorseId(1)));
        assert_eq!(ids(&outcome.ancestors), vec![10, 11, 100, 101, 110, 111, 1000]);
    }

    #[tokio::test]
    async fn test_walk_respects_max_depth() {
        let studbook = three_generations();
        let walker = AncestorWalker::new(&studbook);

        assert_eq!(ids(&walker.walk(HorseId(1), 1).await.ancestors), vec![10, 11]);
        assert_eq!(walker.walk(HorseId(1), 2).await.ancestors.len(), 6);
        assert!(walker.walk(HorseId(1), 0).await.ancestors.is_empty());
    }

    #[tokio::test]
    async fn test_walk_lookups_bounded_by_generations() {
        let studbook = three_generations();
        AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;
        // root + three generations with parents; the fourth frontier is empty
        assert_eq!(studbook.lookup_count(), 4);
    }

    #[tokio::test]
    async fn test_walk_unknown_start_is_empty() {
        let studbook = three_generations();
        let outcome = AncestorWalker::new(&studbook).walk(HorseId(404), 5).await;

        assert!(outcome.is_complete());
        assert!(outcome.root.is_none());
        assert!(outcome.ancestors.is_empty());
    }

    #[tokio::test]
    async fn test_walk_missing_parent_record_ends_branch() {
        let mut studbook = MemoryStudbook::new();
        studbook.insert_horse(horse(1, Some(10), Some(11)));
        studbook.insert_horse(horse(11, Some(110), None));
        studbook.insert_horse(horse(110, None, None));

        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;
        assert!(outcome.is_complete());
        assert_eq!(ids(&outcome.ancestors), vec![11, 110]);
    }

    #[tokio::test]
    async fn test_walk_terminates_on_cycle() {
        let mut studbook = MemoryStudbook::new();
        studbook.insert_horse(horse(1, Some(2), None));
        studbook.insert_horse(horse(2, Some(3), None));
        studbook.insert_horse(horse(3, Some(2), Some(1)));

        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 50).await;
        assert!(outcome.is_complete());
        assert_eq!(ids(&outcome.ancestors), vec![2, 3]);
    }

    #[tokio::test]
    async fn test_walk_shared_ancestor_through_two_paths_once() {
        let mut studbook = MemoryStudbook::new();
        studbook.insert_horse(horse(1, Some(10), Some(11)));
        studbook.insert_horse(horse(10, Some(100), None));
        studbook.insert_horse(horse(11, Some(100), None));
        studbook.insert_horse(horse(100, None, None));

        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;
        assert_eq!(ids(&outcome.ancestors), vec![10, 11, 100]);
    }

    #[tokio::test]
    async fn test_walk_failure_returns_no_ancestors_and_error() {
        let studbook = three_generations();
        studbook.set_parent_lookup_failure(true);

        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;
        assert!(!outcome.is_complete());
        assert!(outcome.ancestors.is_empty());
    }

    #[tokio::test]
    async fn test_walk_failure_mid_walk_keeps_earlier_generations() {
        let studbook = three_generations();
        // root and generation 1 succeed; generation 2 fails
        studbook.fail_parent_lookups_after(2);

        let outcome = AncestorWalker::new(&studbook).walk(HorseId(1), 5).await;
        assert!(!outcome.is_complete());
        assert!(matches!(outcome.failure, Some(StorageError::Unavailable(_))));
        assert_eq!(outcome.root.as_ref().map(|r| r.id), Some(HorseId(1)));
        assert_eq!(ids(&outcome.ancestors), vec![10, 11]);
    }
}
