use braid_consensus_core::{summary::BlockSummary, BlockHashMap, BlockHashSet};
use braid_hashes::Hash;
use indexmap::IndexMap;
use std::collections::VecDeque;

/// The append-only partial DAG accumulated during a single sync call.
///
/// `dag` is a parent → children index. Its key set may reference hashes whose
/// summary has not been received (dangling parents). Both maps only grow, and
/// appending an already-known summary changes nothing.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct SyncState {
    summaries: BlockHashMap<BlockSummary>,
    dag: IndexMap<Hash, BlockHashSet>,
}

impl SyncState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of summaries received so far. The outer request loop uses this
    /// as its progress measure.
    pub fn summary_count(&self) -> usize {
        self.summaries.len()
    }

    pub fn summaries(&self) -> impl Iterator<Item = &BlockSummary> {
        self.summaries.values()
    }

    pub fn children_of(&self, parent: Hash) -> Option<&BlockHashSet> {
        self.dag.get(&parent)
    }

    /// Registers the summary under every hash it depends on. Idempotent.
    pub fn append(&mut self, summary: BlockSummary) {
        for dependency in summary.dependencies() {
            self.dag.entry(dependency).or_default().insert(summary.hash);
        }
        self.summaries.entry(summary.hash).or_insert(summary);
    }

    /// One upward step of a level walk: all hashes with a child inside
    /// `frontier`, derived from the partial index alone (never from the
    /// persistent DAG).
    pub fn frontier_parents(&self, frontier: &BlockHashSet) -> BlockHashSet {
        self.dag
            .iter()
            .filter(|(_, children)| children.iter().any(|child| frontier.contains(child)))
            .map(|(parent, _)| *parent)
            .collect()
    }

    /// Hashes referenced as a dependency by some received summary but whose
    /// own summary has not been received yet.
    pub fn dangling_parents(&self) -> BlockHashSet {
        self.dag.keys().copied().filter(|hash| !self.summaries.contains_key(hash)).collect()
    }

    /// Emits the received summaries in dependency order: a summary appears
    /// only after every received summary it depends on.
    ///
    /// The walk is a FIFO pass seeded with the index roots (hashes referenced
    /// as an ancestor but nobody's child here) in index insertion order.
    /// Dequeued hashes without a summary emit nothing but still release their
    /// children; a child is enqueued once its last pending dependency was
    /// dequeued, which is what keeps multi-parent blocks behind all of their
    /// received parents.
    pub fn topological_sort(&self) -> Vec<BlockSummary> {
        // Count distinct dependencies: a parent that is also justified must
        // release its child exactly once.
        let mut pending: BlockHashMap<usize> = self
            .summaries
            .values()
            .map(|summary| (summary.hash, summary.dependencies().collect::<BlockHashSet>().len()))
            .collect();

        let mut queue: VecDeque<Hash> =
            self.dag.keys().copied().filter(|hash| pending.get(hash).is_none_or(|count| *count == 0)).collect();
        // A dependency-free summary nothing else references (a genesis-only
        // sync) is no index key, yet it still has to flow out.
        queue.extend(
            self.summaries
                .values()
                .filter(|summary| summary.dependencies().next().is_none() && !self.dag.contains_key(&summary.hash))
                .map(|summary| summary.hash),
        );

        let mut sorted = Vec::with_capacity(self.summaries.len());
        while let Some(hash) = queue.pop_front() {
            if let Some(summary) = self.summaries.get(&hash) {
                sorted.push(summary.clone());
            }
            let Some(children) = self.dag.get(&hash) else { continue };
            for child in children.iter() {
                let count = pending.get_mut(child).expect("children are always received summaries");
                *count -= 1;
                if *count == 0 {
                    queue.push_back(*child);
                }
            }
        }
        sorted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use braid_consensus_core::{blockhash::new_unique, summary::Justification};

    fn block(parents: Vec<Hash>, rank: u64) -> BlockSummary {
        BlockSummary::new(1, parents, vec![], rank, 0)
    }

    #[test]
    fn test_append_upholds_dependency_index() {
        let mut state = SyncState::new();
        let (p1, p2, validator, justified) = (new_unique(), new_unique(), new_unique(), new_unique());
        let summary = BlockSummary::new(1, vec![p1, p2], vec![Justification::new(validator, justified)], 1, 0);
        let hash = summary.hash;
        state.append(summary);

        for dependency in [p1, p2, justified] {
            assert!(state.children_of(dependency).unwrap().contains(&hash));
        }
        assert!(state.children_of(validator).is_none(), "the validator identity is not a dependency");
    }

    #[test]
    fn test_append_is_idempotent() {
        let parent = block(vec![new_unique()], 0);
        let child = block(vec![parent.hash], 1);

        let mut once = SyncState::new();
        once.append(parent.clone());
        once.append(child.clone());

        let mut twice = SyncState::new();
        twice.append(parent.clone());
        twice.append(child.clone());
        twice.append(parent);
        twice.append(child);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_dangling_parents() {
        let mut state = SyncState::new();
        let genesis = block(vec![], 0);
        let middle = block(vec![genesis.hash], 1);
        let tip = block(vec![middle.hash], 2);

        state.append(tip.clone());
        state.append(middle.clone());
        let dangling = state.dangling_parents();
        assert!(dangling.contains(&genesis.hash));
        assert!(!dangling.contains(&middle.hash));

        // A received genesis has no dependencies, hence it never shows up as a
        // value of the index; it must still not be reported as dangling.
        state.append(genesis);
        assert!(state.dangling_parents().is_empty());
    }

    #[test]
    fn test_frontier_parents_walks_the_index() {
        let mut state = SyncState::new();
        let genesis = block(vec![], 0);
        let middle = block(vec![genesis.hash], 1);
        let tip = block(vec![middle.hash], 2);
        state.append(tip.clone());
        state.append(middle.clone());

        let level1 = state.frontier_parents(&BlockHashSet::from_iter([tip.hash]));
        assert_eq!(level1, BlockHashSet::from_iter([middle.hash]));
        let level2 = state.frontier_parents(&level1);
        assert_eq!(level2, BlockHashSet::from_iter([genesis.hash]));
        assert!(state.frontier_parents(&level2).is_empty());
    }

    #[test]
    fn test_topological_sort_chain() {
        let mut state = SyncState::new();
        let genesis = block(vec![], 0);
        let middle = block(vec![genesis.hash], 1);
        let tip = block(vec![middle.hash], 2);
        state.append(tip.clone());
        state.append(middle.clone());
        state.append(genesis.clone());

        let sorted = state.topological_sort();
        assert_eq!(sorted, vec![genesis, middle, tip]);
    }

    #[test]
    fn test_topological_sort_keeps_children_behind_all_parents() {
        // Two locally-known roots releasing their subtrees at different
        // depths: a naive breadth walk would emit `child` before `near`.
        let mut state = SyncState::new();
        let far_root = new_unique();
        let near = block(vec![far_root], 1);
        let near_root = new_unique();
        let child = block(vec![near.hash, near_root], 2);
        state.append(child.clone());
        state.append(near.clone());

        let sorted = state.topological_sort();
        let position = |hash| sorted.iter().position(|summary| summary.hash == hash).unwrap();
        assert_eq!(sorted.len(), 2);
        assert!(position(near.hash) < position(child.hash));
    }

    #[test]
    fn test_topological_sort_handles_justified_parent() {
        // The same hash as both parent and justification must be counted once.
        let mut state = SyncState::new();
        let genesis = block(vec![], 0);
        let child = BlockSummary::new(1, vec![genesis.hash], vec![Justification::new(new_unique(), genesis.hash)], 1, 0);
        state.append(child.clone());
        state.append(genesis.clone());

        assert_eq!(state.topological_sort(), vec![genesis, child]);
    }

    #[test]
    fn test_topological_sort_genesis_only() {
        let mut state = SyncState::new();
        let genesis = block(vec![], 0);
        state.append(genesis.clone());
        assert_eq!(state.topological_sort(), vec![genesis]);
    }

    #[test]
    fn test_topological_sort_emits_each_summary_once() {
        let mut state = SyncState::new();
        let root = new_unique();
        let left = BlockSummary::new(1, vec![root], vec![], 1, 1);
        let right = BlockSummary::new(1, vec![root], vec![], 1, 2);
        let merge = block(vec![left.hash, right.hash], 2);
        state.append(merge.clone());
        state.append(left.clone());
        state.append(right.clone());

        let sorted = state.topological_sort();
        assert_eq!(sorted.len(), state.summary_count());
        assert_eq!(sorted.last(), Some(&merge));
    }
}
