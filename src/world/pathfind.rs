//! Generic A* over caller-supplied graph closures
//!
//! The search is parameterized on an edge-admissibility predicate, a
//! heuristic, and a neighbor expansion so callers can bring their own
//! topology. Room graphs have uniform edge cost.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};
use std::hash::Hash;

/// Node in the A* open set
#[derive(Debug, Clone)]
struct PathNode<N> {
    node: N,
    f_cost: f32, // g_cost + heuristic
}

impl<N> PartialEq for PathNode<N> {
    fn eq(&self, other: &Self) -> bool {
        self.f_cost == other.f_cost
    }
}

impl<N> Eq for PathNode<N> {}

impl<N> Ord for PathNode<N> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f_cost
            .partial_cmp(&self.f_cost)
            .unwrap_or(Ordering::Equal)
    }
}

impl<N> PartialOrd for PathNode<N> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Find a path from `start` to `goal` using A*
///
/// Returns the full path including `start`, or None if no admissible
/// route exists. `edge_admissible` gates each candidate edge;
/// `heuristic` must never overestimate the remaining cost.
pub fn find_path<N, FE, FH, FN, I>(
    start: N,
    goal: N,
    mut edge_admissible: FE,
    mut heuristic: FH,
    mut neighbors: FN,
) -> Option<Vec<N>>
where
    N: Copy + Eq + Hash,
    FE: FnMut(N, N) -> bool,
    FH: FnMut(N, N) -> f32,
    FN: FnMut(N) -> I,
    I: IntoIterator<Item = N>,
{
    if start == goal {
        return Some(vec![start]);
    }

    let mut open_set = BinaryHeap::new();
    let mut came_from: HashMap<N, N> = HashMap::new();
    let mut g_scores: HashMap<N, f32> = HashMap::new();

    g_scores.insert(start, 0.0);
    open_set.push(PathNode {
        node: start,
        f_cost: heuristic(start, goal),
    });

    while let Some(current) = open_set.pop() {
        if current.node == goal {
            return Some(reconstruct_path(&came_from, current.node));
        }

        let current_g = *g_scores.get(&current.node).unwrap_or(&f32::INFINITY);

        for neighbor in neighbors(current.node) {
            if !edge_admissible(current.node, neighbor) {
                continue;
            }

            let tentative_g = current_g + 1.0;
            let neighbor_g = *g_scores.get(&neighbor).unwrap_or(&f32::INFINITY);

            if tentative_g < neighbor_g {
                came_from.insert(neighbor, current.node);
                g_scores.insert(neighbor, tentative_g);

                open_set.push(PathNode {
                    node: neighbor,
                    f_cost: tentative_g + heuristic(neighbor, goal),
                });
            }
        }
    }

    None // No path found
}

/// Reconstruct path from came_from map
fn reconstruct_path<N: Copy + Eq + Hash>(came_from: &HashMap<N, N>, mut current: N) -> Vec<N> {
    let mut path = vec![current];
    while let Some(&prev) = came_from.get(&current) {
        path.push(prev);
        current = prev;
    }
    path.reverse();
    path
}
