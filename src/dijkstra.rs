use crate::graph::Graph;
use crate::heap::PriorityQueue;
use crate::location::{Edge, Location};
use crate::path::Path;
use hashbrown::HashMap;
use orx_priority_queue::{BinaryHeapWithMap, PriorityQueue as _, PriorityQueueDecKey as _};
use std::fmt;
use std::str::FromStr;
use tracing::{debug, trace};

// Bookkeeping reported once a search finishes.
#[derive(Debug, Default)]
struct SearchStats {
    popped: usize,
    stale: usize,
    relaxed: usize,
}

/// Lowest-weight path from `start` to `end`, or `None` when `end` can't be
/// reached.
///
/// All weights must be non-negative; with a negative weight the result is
/// unspecified. The heap has no decrease-key, so an improved distance is
/// queued as a fresh path and the superseded entry is dropped when popped.
pub fn shortest_path(graph: &Graph, start: Location, end: Location) -> Option<Path> {
    // Best path found so far to each location; its `dist` is the best distance.
    let mut best: HashMap<Location, Path> = HashMap::new();
    let mut queue = PriorityQueue::new(|a: &Path, b: &Path| a.dist.total_cmp(&b.dist));
    let mut stats = SearchStats::default();

    let origin = Path::trivial(start);
    best.insert(start, origin.clone());
    queue.insert(origin);

    while let Ok(current) = queue.extract_min() {
        stats.popped += 1;

        let best_dist = best.get(&current.end).map_or(f64::INFINITY, |p| p.dist);
        if current.dist > best_dist {
            stats.stale += 1;
            continue;
        }

        if current.end == end {
            debug!(?stats, dist = current.dist, steps = current.steps.len(), "path found");
            return Some(current);
        }

        for edge in graph.neighbors_of(&current.end) {
            let candidate = current.dist + edge.dist;
            let known = best.get(&edge.end).map_or(f64::INFINITY, |p| p.dist);
            if candidate < known {
                trace!(from = %edge.start, to = %edge.end, candidate, "relax");
                stats.relaxed += 1;
                let extended = current.extend(*edge);
                best.insert(edge.end, extended.clone());
                queue.insert(extended);
            }
        }
    }

    debug!(?stats, %start, %end, "no path");
    None
}

/// Same contract as [`shortest_path`], using an addressable heap that lowers
/// a queued location's key in place instead of queueing duplicates.
///
/// Only the last edge into each location is recorded; the returned path is
/// rebuilt from those edges once `end` is settled.
pub fn shortest_path_decrease_key(graph: &Graph, start: Location, end: Location) -> Option<Path> {
    let mut dist: HashMap<Location, f64> = HashMap::new();
    let mut via: HashMap<Location, Edge> = HashMap::new();
    let mut heap: BinaryHeapWithMap<Location, f64> = BinaryHeapWithMap::new();
    let mut stats = SearchStats::default();

    dist.insert(start, 0.0);
    heap.push(start, 0.0);

    while let Some((node, cost)) = heap.pop() {
        stats.popped += 1;

        if node == end {
            debug!(?stats, dist = cost, "path found");
            return Some(rebuild_path(graph, start, end, &via));
        }

        for edge in graph.neighbors_of(&node) {
            let candidate = cost + edge.dist;
            let known = dist.get(&edge.end).copied().unwrap_or(f64::INFINITY);
            if candidate < known {
                trace!(from = %edge.start, to = %edge.end, candidate, "relax");
                stats.relaxed += 1;
                dist.insert(edge.end, candidate);
                via.insert(edge.end, *edge);
                heap.decrease_key_or_push(&edge.end, candidate);
            }
        }
    }

    debug!(?stats, %start, %end, "no path");
    None
}

// Walks the predecessor edges back from `end`. Bounded by the edge count so a
// cycle (only possible with negative weights) can't spin forever.
fn rebuild_path(graph: &Graph, start: Location, end: Location, via: &HashMap<Location, Edge>) -> Path {
    let mut rev = Vec::new();
    let mut cur = end;
    while cur != start && rev.len() <= graph.edge_count() {
        match via.get(&cur) {
            Some(edge) => {
                rev.push(*edge);
                cur = edge.start;
            }
            None => break,
        }
    }
    rev.into_iter()
        .rev()
        .fold(Path::trivial(start), |path, edge| path.extend(edge))
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown algorithm {0:?}, possible options are: (\"lazy\", \"decrease-key\")")]
pub struct UnknownAlgorithm(pub String);

/// Which queue discipline drives the search. Both return equally short paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Algorithm {
    /// Crate binary heap, stale entries skipped on pop.
    #[default]
    Lazy,
    /// Addressable heap with decrease-key.
    DecreaseKey,
}

impl Algorithm {
    pub fn find(&self, graph: &Graph, start: Location, end: Location) -> Option<Path> {
        match self {
            Algorithm::Lazy => shortest_path(graph, start, end),
            Algorithm::DecreaseKey => shortest_path_decrease_key(graph, start, end),
        }
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "lazy" | "dijkstra" => Ok(Algorithm::Lazy),
            "decrease-key" => Ok(Algorithm::DecreaseKey),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Algorithm::Lazy => f.write_str("lazy"),
            Algorithm::DecreaseKey => f.write_str("decrease-key"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const ALGORITHMS: [Algorithm; 2] = [Algorithm::Lazy, Algorithm::DecreaseKey];

    // Named test points spread along the x axis.
    fn p(i: usize) -> Location {
        Location::new(i as f64, 0.0)
    }

    const A: usize = 0;
    const B: usize = 1;
    const C: usize = 2;

    fn graph(edges: &[(usize, usize, f64)]) -> Graph {
        Graph::build(edges.iter().map(|&(u, v, w)| Edge::new(p(u), p(v), w)))
    }

    fn assert_chained(path: &Path, start: Location, end: Location) {
        assert_eq!(path.start, start);
        assert_eq!(path.end, end);
        let mut at = start;
        for step in &path.steps {
            assert_eq!(step.start, at, "broken chain in {:?}", path);
            at = step.end;
        }
        assert_eq!(at, end);
        let total: f64 = path.steps.iter().map(|e| e.dist).sum();
        assert_eq!(path.dist, total);
    }

    // Minimum over all simple start->end paths. With non-negative weights no
    // walk that repeats a location can beat that.
    fn brute_force(edges: &[(usize, usize, f64)], start: usize, end: usize) -> Option<f64> {
        fn go(edges: &[(usize, usize, f64)], at: usize, end: usize, seen: &mut Vec<usize>, acc: f64, best: &mut Option<f64>) {
            if at == end {
                *best = Some(best.map_or(acc, |b: f64| b.min(acc)));
                return;
            }
            for &(u, v, w) in edges {
                if u == at && !seen.contains(&v) {
                    seen.push(v);
                    go(edges, v, end, seen, acc + w, best);
                    seen.pop();
                }
            }
        }
        let mut best = None;
        go(edges, start, end, &mut vec![start], 0.0, &mut best);
        best
    }

    fn random_edges(rng: &mut StdRng, nodes: usize) -> Vec<(usize, usize, f64)> {
        let count = rng.random_range(0..nodes * 3);
        (0..count)
            .map(|_| {
                (
                    rng.random_range(0..nodes),
                    rng.random_range(0..nodes),
                    rng.random_range(0..10) as f64,
                )
            })
            .collect()
    }

    #[test]
    fn prefers_two_short_hops_over_one_long_edge() {
        let g = graph(&[(A, B, 5.0), (B, C, 3.0), (A, C, 10.0)]);
        for algo in ALGORITHMS {
            let path = algo.find(&g, p(A), p(C)).expect("path exists");
            assert_eq!(path.dist, 8.0);
            assert_eq!(path.steps, vec![Edge::new(p(A), p(B), 5.0), Edge::new(p(B), p(C), 3.0)]);
            assert_chained(&path, p(A), p(C));
        }
    }

    #[test]
    fn parallel_edges_pick_the_lighter_one() {
        let g = graph(&[(A, B, 4.0), (A, B, 2.0)]);
        for algo in ALGORITHMS {
            let path = algo.find(&g, p(A), p(B)).unwrap();
            assert_eq!(path.dist, 2.0);
            assert_eq!(path.steps, vec![Edge::new(p(A), p(B), 2.0)]);
        }
    }

    #[test]
    fn isolated_target_has_no_path() {
        let g = graph(&[(A, B, 1.0)]);
        for algo in ALGORITHMS {
            assert_eq!(algo.find(&g, p(A), p(C)), None);
        }
    }

    #[test]
    fn edges_are_directed() {
        let g = graph(&[(A, B, 1.0)]);
        for algo in ALGORITHMS {
            assert!(algo.find(&g, p(A), p(B)).is_some());
            assert_eq!(algo.find(&g, p(B), p(A)), None);
        }
    }

    #[test]
    fn start_equal_to_end_is_trivial() {
        let g = graph(&[(A, B, 1.0), (B, A, 1.0)]);
        for algo in ALGORITHMS {
            for loc in [p(A), p(B), Location::new(99.0, -3.0)] {
                assert_eq!(algo.find(&g, loc, loc), Some(Path::trivial(loc)));
            }
        }
        // Even on an empty graph.
        assert_eq!(shortest_path(&Graph::default(), p(A), p(A)), Some(Path::trivial(p(A))));
    }

    #[test]
    fn unknown_start_has_no_path() {
        let g = graph(&[(A, B, 1.0)]);
        for algo in ALGORITHMS {
            assert_eq!(algo.find(&g, Location::new(50.0, 50.0), p(B)), None);
        }
    }

    #[test]
    fn self_loops_are_never_taken() {
        let g = graph(&[(A, A, 0.0), (A, B, 2.0), (B, B, 1.0), (B, C, 2.0)]);
        for algo in ALGORITHMS {
            let path = algo.find(&g, p(A), p(C)).unwrap();
            assert_eq!(path.dist, 4.0);
            assert_eq!(path.steps.len(), 2);
            assert!(path.steps.iter().all(|e| !e.is_self_loop()));
        }
    }

    #[test]
    fn stale_entries_are_skipped() {
        // B is first queued at 10 via the direct edge, then improved to 3.
        let g = graph(&[(A, B, 10.0), (A, C, 1.0), (C, B, 2.0), (B, 3, 1.0)]);
        for algo in ALGORITHMS {
            let path = algo.find(&g, p(A), p(3)).unwrap();
            assert_eq!(path.dist, 4.0);
            assert_eq!(path.locations(), vec![p(A), p(C), p(B), p(3)]);
        }
    }

    #[test]
    fn zero_weight_edges() {
        let g = graph(&[(A, B, 0.0), (B, C, 0.0), (A, C, 0.5)]);
        for algo in ALGORITHMS {
            let path = algo.find(&g, p(A), p(C)).unwrap();
            assert_eq!(path.dist, 0.0);
            assert_chained(&path, p(A), p(C));
        }
    }

    #[test]
    fn repeated_searches_agree() {
        let g = graph(&[(A, B, 1.0), (A, C, 1.0), (B, 3, 1.0), (C, 3, 1.0)]);
        let first = shortest_path(&g, p(A), p(3)).unwrap();
        for _ in 0..10 {
            assert_eq!(shortest_path(&g, p(A), p(3)).unwrap(), first);
        }
        assert_eq!(first.dist, 2.0);
    }

    #[test]
    fn matches_brute_force_on_random_graphs() {
        for seed in 0..300 {
            let mut rng = StdRng::seed_from_u64(seed);
            let nodes = rng.random_range(1..7);
            let edges = random_edges(&mut rng, nodes);
            let g = graph(&edges);

            for s in 0..nodes {
                for t in 0..nodes {
                    let expected = brute_force(&edges, s, t);
                    for algo in ALGORITHMS {
                        let found = algo.find(&g, p(s), p(t));
                        assert_eq!(found.as_ref().map(|path| path.dist), expected, "seed {} {} -> {} via {}", seed, s, t, algo);
                        if let Some(path) = found {
                            assert_chained(&path, p(s), p(t));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn shared_graph_across_threads() {
        let g = graph(&[(A, B, 5.0), (B, C, 3.0), (A, C, 10.0)]);
        let g = &g;
        std::thread::scope(|scope| {
            let handles: Vec<_> = ALGORITHMS
                .iter()
                .cycle()
                .take(8)
                .map(|&algo| scope.spawn(move || algo.find(g, p(A), p(C)).map(|path| path.dist)))
                .collect();
            for h in handles {
                assert_eq!(h.join().unwrap(), Some(8.0));
            }
        });
    }

    #[test]
    fn parses_algorithm_names() {
        assert_eq!("lazy".parse::<Algorithm>(), Ok(Algorithm::Lazy));
        assert_eq!("decrease-key".parse::<Algorithm>(), Ok(Algorithm::DecreaseKey));
        assert!("bmssp".parse::<Algorithm>().is_err());
        assert_eq!(Algorithm::DecreaseKey.to_string(), "decrease-key");
    }
}
