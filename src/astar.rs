//! This module implements a variant of
//! [pathfinding's astar function](https://docs.rs/pathfinding/latest/pathfinding/directed/astar/index.html)
//! that breaks ties between equal estimates by discovery order and can be interrupted between
//! expansions.
use fxhash::FxBuildHasher;
use indexmap::map::Entry::{Occupied, Vacant};
use indexmap::IndexMap;
use log::trace;
use num_traits::Zero;
use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;
use std::ops::Add;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// Result of a single search run.
#[derive(Debug, PartialEq)]
pub(crate) enum AstarOutcome<N, C> {
    Found(Vec<N>, C),
    Exhausted,
    Cancelled,
}

struct SmallestCostHolder<K> {
    estimated_cost: K,
    cost: K,
    index: usize,
    seq: usize,
}

impl<K: PartialOrd> Eq for SmallestCostHolder<K> {}

impl<K: PartialOrd> PartialEq for SmallestCostHolder<K> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K: PartialOrd> PartialOrd for SmallestCostHolder<K> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K: PartialOrd> Ord for SmallestCostHolder<K> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Smallest estimate first, then earliest pushed. Costs are never NaN.
        match other
            .estimated_cost
            .partial_cmp(&self.estimated_cost)
            .unwrap_or(Ordering::Equal)
        {
            Ordering::Equal => other.seq.cmp(&self.seq),
            s => s,
        }
    }
}

fn reverse_path<N, V, F>(parents: &FxIndexMap<N, V>, mut parent: F, start: usize) -> Vec<N>
where
    N: Eq + Hash + Clone,
    F: FnMut(&V) -> usize,
{
    let mut i = start;
    let mut path: Vec<N> = std::iter::from_fn(|| {
        parents.get_index(i).map(|(node, value)| {
            i = parent(value);
            node.clone()
        })
    })
    .collect();
    path.reverse();
    path
}

/// Searches from `start` until a node satisfying `success` is popped from the frontier.
///
/// A successor only replaces a recorded parent if it is strictly cheaper, so the first path found
/// to a node is kept among equals. `cancelled` is polled before every expansion.
pub(crate) fn astar<N, C, FN, IN, FH, FS, FC>(
    start: &N,
    mut successors: FN,
    mut heuristic: FH,
    mut success: FS,
    mut cancelled: FC,
) -> AstarOutcome<N, C>
where
    N: Eq + Hash + Clone,
    C: Zero + PartialOrd + Copy + Add<Output = C>,
    FN: FnMut(&N) -> IN,
    IN: IntoIterator<Item = (N, C)>,
    FH: FnMut(&N) -> C,
    FS: FnMut(&N) -> bool,
    FC: FnMut() -> bool,
{
    let mut to_see = BinaryHeap::new();
    let mut seq = 0;
    to_see.push(SmallestCostHolder {
        estimated_cost: heuristic(start),
        cost: Zero::zero(),
        index: 0,
        seq,
    });
    let mut parents: FxIndexMap<N, (usize, C)> = FxIndexMap::default();
    parents.insert(start.clone(), (usize::MAX, Zero::zero()));
    let mut expanded = 0usize;
    while let Some(SmallestCostHolder { cost, index, .. }) = to_see.pop() {
        if cancelled() {
            return AstarOutcome::Cancelled;
        }
        let successors = {
            let Some((node, &(_, c))) = parents.get_index(index) else {
                continue;
            };
            if success(node) {
                trace!("Goal popped after {} expansions", expanded);
                let path = reverse_path(&parents, |&(p, _)| p, index);
                return AstarOutcome::Found(path, cost);
            }
            // We may have inserted a node several times into the binary heap if we found
            // a better way to access it. Ensure that we are currently dealing with the
            // best path and discard the others.
            if cost > c {
                continue;
            }
            expanded += 1;
            successors(node)
        };
        for (successor, move_cost) in successors {
            let new_cost = cost + move_cost;
            let h;
            let n;
            match parents.entry(successor) {
                Vacant(e) => {
                    h = heuristic(e.key());
                    n = e.index();
                    e.insert((index, new_cost));
                }
                Occupied(mut e) => {
                    if e.get().1 > new_cost {
                        h = heuristic(e.key());
                        n = e.index();
                        e.insert((index, new_cost));
                    } else {
                        continue;
                    }
                }
            }
            seq += 1;
            to_see.push(SmallestCostHolder {
                estimated_cost: new_cost + h,
                cost: new_cost,
                index: n,
                seq,
            });
        }
    }
    trace!("Frontier exhausted after {} expansions", expanded);
    AstarOutcome::Exhausted
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    type Graph = HashMap<&'static str, Vec<(&'static str, u32)>>;

    fn graph(edges: &[(&'static str, &'static str, u32)]) -> Graph {
        let mut g: HashMap<_, Vec<_>> = HashMap::new();
        for &(a, b, c) in edges {
            g.entry(a).or_default().push((b, c));
        }
        g
    }

    #[test]
    fn finds_cheapest_path() {
        // Diamond-shaped graph: A -> B -> D and A -> C -> D
        let g = graph(&[("A", "B", 1), ("A", "C", 3), ("B", "D", 5), ("C", "D", 1)]);
        let outcome = astar(
            &"A",
            |n| g.get(n).cloned().unwrap_or_default(),
            |_| 0,
            |n| *n == "D",
            || false,
        );
        assert_eq!(outcome, AstarOutcome::Found(vec!["A", "C", "D"], 4));
    }

    #[test]
    fn equal_cost_ties_go_to_first_discovered() {
        let g = graph(&[("A", "B", 1), ("A", "C", 1), ("B", "D", 1), ("C", "D", 1)]);
        let outcome = astar(
            &"A",
            |n| g.get(n).cloned().unwrap_or_default(),
            |_| 0,
            |n| *n == "D",
            || false,
        );
        assert_eq!(outcome, AstarOutcome::Found(vec!["A", "B", "D"], 2));
    }

    #[test]
    fn unreachable_goal_exhausts() {
        let g = graph(&[("A", "B", 1), ("B", "C", 1), ("C", "A", 1)]);
        let outcome = astar(
            &"A",
            |n| g.get(n).cloned().unwrap_or_default(),
            |_| 0,
            |n| *n == "D",
            || false,
        );
        assert_eq!(outcome, AstarOutcome::Exhausted);
    }

    #[test]
    fn cancellation_stops_before_expanding() {
        let g = graph(&[("A", "B", 1)]);
        let outcome = astar(
            &"A",
            |n| g.get(n).cloned().unwrap_or_default(),
            |_| 0,
            |n| *n == "B",
            || true,
        );
        assert_eq!(outcome, AstarOutcome::Cancelled);
    }
}
