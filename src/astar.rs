//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! which breaks ties between equally scored frontier entries on the node itself, so that the
//! order in which equal-cost cells are expanded (and thus the returned path) is deterministic.
//!
//! All per-node bookkeeping lives in a map allocated by the call, so consecutive searches can
//! never observe each other's costs or parents.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Search scratch of a single discovered node.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct SearchState<C> {
    pub cost_so_far: C,
    pub heuristic: C,
    /// Index of the predecessor in the scratch map, `None` for the start.
    pub parent: Option<usize>,
}

impl<C: Copy + Add<Output = C>> SearchState<C> {
    pub fn score(&self) -> C {
        self.cost_so_far + self.heuristic
    }
}

/// Frontier entry, ordered by `(score, node)` so that [BinaryHeap] pops the smallest score
/// first and, among equal scores, the smallest node.
struct FrontierEntry<N, C> {
    score: C,
    cost: C,
    node: N,
    index: usize,
}

impl<N: Ord, C: Ord> Eq for FrontierEntry<N, C> {}

impl<N: Ord, C: Ord> PartialEq for FrontierEntry<N, C> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<N: Ord, C: Ord> PartialOrd for FrontierEntry<N, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<N: Ord, C: Ord> Ord for FrontierEntry<N, C> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed on both keys, the heap is a max-heap
        other
            .score
            .cmp(&self.score)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.cost.cmp(&self.cost))
    }
}

fn reverse_path<N, C>(scratch: &FxIndexMap<N, SearchState<C>>, goal: usize) -> Vec<N>
where
    N: Clone,
{
    let mut path: Vec<N> = std::iter::successors(Some(goal), |&i| {
        scratch.get_index(i).and_then(|(_, state)| state.parent)
    })
    .filter_map(|i| scratch.get_index(i).map(|(node, _)| node.clone()))
    .collect();
    path.reverse();
    path
}

/// Best-first search from `start` until `success` holds for a popped node. A discovered node is
/// relaxed and pushed again whenever a strictly cheaper way to reach it is found, so with a
/// consistent heuristic the first goal popped is reached optimally.
///
/// Returns the path from start to goal (both included) and its cost, or [None] once the
/// frontier runs dry.
pub(crate) fn best_first<N, C, FN, IN, FH, FS>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
) -> Option<(Vec<N>, C)>
where
    N: Eq + Hash + Clone + Ord,
    C: Zero + Ord + Copy,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
{
    let mut scratch: FxIndexMap<N, SearchState<C>> = FxIndexMap::default();
    let h = heuristic(start);
    scratch.insert(
        start.clone(),
        SearchState {
            cost_so_far: Zero::zero(),
            heuristic: h,
            parent: None,
        },
    );
    let mut to_see = BinaryHeap::new();
    to_see.push(FrontierEntry {
        score: h,
        cost: Zero::zero(),
        node: start.clone(),
        index: 0,
    });
    while let Some(FrontierEntry {
        cost, node, index, ..
    }) = to_see.pop()
    {
        if success(&node) {
            return Some((reverse_path(&scratch, index), cost));
        }
        // A node may sit in the heap several times if a better way to reach it was found
        // after it was pushed. Only the entry carrying the recorded cost is expanded.
        match scratch.get_index(index) {
            Some((_, state)) if cost > state.cost_so_far => continue,
            _ => {}
        }
        for (successor, move_cost) in successors(&node) {
            let new_cost = cost + move_cost;
            let (n, score) = match scratch.entry(successor.clone()) {
                Vacant(e) => {
                    let state = SearchState {
                        cost_so_far: new_cost,
                        heuristic: heuristic(e.key()),
                        parent: Some(index),
                    };
                    let n = e.index();
                    e.insert(state);
                    (n, state.score())
                }
                Occupied(mut e) => {
                    if e.get().cost_so_far > new_cost {
                        let n = e.index();
                        let state = e.get_mut();
                        state.cost_so_far = new_cost;
                        state.parent = Some(index);
                        (n, state.score())
                    } else {
                        continue;
                    }
                }
            };
            to_see.push(FrontierEntry {
                score,
                cost: new_cost,
                node: successor,
                index: n,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Line graph 0 - 1 - 2 - ... - 9
    fn line(n: &i32) -> Vec<(i32, i32)> {
        [n - 1, n + 1]
            .into_iter()
            .filter(|m| (0..10).contains(m))
            .map(|m| (m, 1))
            .collect()
    }

    #[test]
    fn path_on_line() {
        let (path, cost) = best_first(&2, line, |_| 0, |n| *n == 6).unwrap();
        assert_eq!(path, vec![2, 3, 4, 5, 6]);
        assert_eq!(cost, 4);
    }

    #[test]
    fn start_is_goal() {
        let (path, cost) = best_first(&4, line, |_| 0, |n| *n == 4).unwrap();
        assert_eq!(path, vec![4]);
        assert_eq!(cost, 0);
    }

    #[test]
    fn exhausted_frontier() {
        assert!(best_first(&0, line, |_| 0, |n| *n == 42).is_none());
    }

    /// The cheap edge 0 -> 2 is only discovered through 1, so 2 is relaxed after being queued
    /// via the expensive direct edge.
    #[test]
    fn relaxes_cheaper_route() {
        let graph = |n: &u8| -> Vec<(u8, u32)> {
            match n {
                0 => vec![(2, 10), (1, 1)],
                1 => vec![(2, 1)],
                2 => vec![(3, 1)],
                _ => vec![],
            }
        };
        let (path, cost) = best_first(&0u8, graph, |_| 0, |n| *n == 3).unwrap();
        assert_eq!(path, vec![0, 1, 2, 3]);
        assert_eq!(cost, 3);
    }

    /// Two routes of equal cost: the one through the smaller node is expanded first and wins.
    #[test]
    fn ties_break_on_smallest_node() {
        let graph = |n: &u8| -> Vec<(u8, u32)> {
            match n {
                0 => vec![(7, 1), (3, 1)],
                3 | 7 => vec![(9, 1)],
                _ => vec![],
            }
        };
        let (path, _) = best_first(&0u8, graph, |_| 0, |n| *n == 9).unwrap();
        assert_eq!(path, vec![0, 3, 9]);
    }

    #[test]
    fn frontier_orders_by_score_then_node() {
        let mut heap = BinaryHeap::new();
        for (score, node) in [(2, 5), (1, 9), (1, 4), (3, 0)] {
            heap.push(FrontierEntry {
                score,
                cost: 0,
                node,
                index: 0,
            });
        }
        let order: Vec<(i32, i32)> =
            std::iter::from_fn(|| heap.pop().map(|e| (e.score, e.node))).collect();
        assert_eq!(order, vec![(1, 4), (1, 9), (2, 5), (3, 0)]);
    }
}
