use crate::engine_config::EngineConfig;
use crate::graph::CompactGraph;
use rustc_hash::{FxHashMap, FxHashSet};
use std::collections::VecDeque;
use tracing::debug;

/// One side of the bidirectional search. Parents record the first
/// discoverer of each node, so exactly one chain is kept per node.
struct Frontier {
    queue: VecDeque<u32>,
    visited: FxHashSet<u32>,
    parents: FxHashMap<u32, u32>,
}

impl Frontier {
    fn rooted_at(node: u32) -> Self {
        let mut queue = VecDeque::new();
        let mut visited = FxHashSet::default();
        queue.push_back(node);
        visited.insert(node);

        Self {
            queue,
            visited,
            parents: FxHashMap::default(),
        }
    }

    /// Expands one full BFS level. Returns every node discovered during
    /// this level that the opposite side has already visited.
    fn expand_level(&mut self, graph: &CompactGraph, other: &Frontier) -> Vec<u32> {
        let mut meetings = Vec::new();
        let level_size = self.queue.len();

        for _ in 0..level_size {
            let current = match self.queue.pop_front() {
                Some(node) => node,
                None => break,
            };

            for &neighbor in &graph.neighbors[current as usize] {
                if !self.visited.insert(neighbor) {
                    continue;
                }
                self.parents.insert(neighbor, current);
                self.queue.push_back(neighbor);
                if other.visited.contains(&neighbor) {
                    meetings.push(neighbor);
                }
            }
        }

        meetings
    }
}

/// Level-synchronized bidirectional BFS. Both frontiers advance one full
/// level per round, smaller frontier first, so the first round that
/// produces a meeting node has found the true shortest distance.
///
/// Returns up to `max_paths` node sequences, one per distinct meeting
/// node, all of the minimal length; `None` means no path exists or a
/// resource cap was hit.
pub(crate) fn search(
    graph: &CompactGraph,
    start: u32,
    end: u32,
    max_paths: usize,
    config: &EngineConfig,
) -> Option<Vec<Vec<u32>>> {
    let mut forward = Frontier::rooted_at(start);
    let mut backward = Frontier::rooted_at(end);

    while !forward.queue.is_empty() && !backward.queue.is_empty() {
        let forward_first = forward.queue.len() <= backward.queue.len();

        for step in 0..2 {
            let (active, other) = if (step == 0) == forward_first {
                (&mut forward, &backward)
            } else {
                (&mut backward, &forward)
            };

            let meetings = active.expand_level(graph, other);
            if !meetings.is_empty() {
                return Some(collect_paths(&meetings, &forward, &backward, max_paths));
            }

            let visited_total = forward.visited.len() + backward.visited.len();
            if visited_total > config.max_visited {
                debug!(visited_total, "visited cap exceeded, aborting search");
                return None;
            }
            if forward.queue.len() > config.max_queue || backward.queue.len() > config.max_queue {
                debug!("frontier queue cap exceeded, aborting search");
                return None;
            }
        }
    }

    None
}

/// Builds one path per meeting node and keeps only the minimal-length
/// ones. Meeting nodes surfaced by the same expansion can sit at different
/// depths in the opposite tree, so lengths are compared explicitly.
fn collect_paths(
    meetings: &[u32],
    forward: &Frontier,
    backward: &Frontier,
    max_paths: usize,
) -> Vec<Vec<u32>> {
    let mut paths: Vec<Vec<u32>> = meetings
        .iter()
        .map(|&meeting| reconstruct(meeting, forward, backward))
        .collect();

    let shortest = paths.iter().map(Vec::len).min().unwrap_or(0);
    paths.retain(|path| path.len() == shortest);
    paths.truncate(max_paths);
    paths
}

/// Walks forward parents from the meeting node back to the start
/// (prepending) and backward parents from the meeting node to the end
/// (appending). Roots have no parent entry, which terminates each walk.
fn reconstruct(meeting: u32, forward: &Frontier, backward: &Frontier) -> Vec<u32> {
    let mut path = VecDeque::new();

    let mut current = Some(meeting);
    while let Some(node) = current {
        path.push_front(node);
        current = forward.parents.get(&node).copied();
    }

    let mut current = backward.parents.get(&meeting).copied();
    while let Some(node) = current {
        path.push_back(node);
        current = backward.parents.get(&node).copied();
    }

    path.into()
}
