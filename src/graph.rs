use crate::location::{Edge, Location};
use fnv::{FnvHashMap, FnvHashSet};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GraphError {
    /// Searches assume every weight is finite and non-negative.
    #[error("edge {edge} has an invalid weight (must be finite and non-negative)")]
    InvalidWeight { edge: Edge },
}

/// Adjacency list keyed by location. Read-only once built, so a single
/// instance can be shared by any number of concurrent searches.
#[derive(Debug, Clone, Default)]
pub struct Graph {
    adj: FnvHashMap<Location, Vec<Edge>>,
    nodes: FnvHashSet<Location>,
    edge_count: usize,
}

impl Graph {
    /// Groups `edges` by their start location, keeping input order within
    /// each group. Weights are not checked; see [`Graph::try_build`].
    pub fn build<I>(edges: I) -> Self
    where
        I: IntoIterator<Item = Edge>,
    {
        let mut adj: FnvHashMap<Location, Vec<Edge>> = FnvHashMap::default();
        let mut nodes: FnvHashSet<Location> = FnvHashSet::default();
        let mut edge_count = 0;

        for edge in edges {
            nodes.insert(edge.start);
            nodes.insert(edge.end);
            adj.entry(edge.start).or_default().push(edge);
            edge_count += 1;
        }

        Self {
            adj,
            nodes,
            edge_count,
        }
    }

    /// Like [`Graph::build`], but fails on the first negative, NaN or
    /// infinite weight.
    pub fn try_build<I>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = Edge>,
    {
        let edges: Vec<Edge> = edges.into_iter().collect();
        if let Some(edge) = edges.iter().find(|e| !(e.dist.is_finite() && e.dist >= 0.0)) {
            return Err(GraphError::InvalidWeight { edge: *edge });
        }
        Ok(Self::build(edges))
    }

    /// Outgoing edges of `loc` in build order; empty for unknown locations.
    pub fn neighbors_of(&self, loc: &Location) -> &[Edge] {
        self.adj.get(loc).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct locations that appear at either end of an edge.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Locations with at least one outgoing edge, in no particular order.
    pub fn locations(&self) -> impl Iterator<Item = &Location> {
        self.adj.keys()
    }

    /// Whether `loc` is an endpoint of any edge.
    pub fn contains(&self, loc: &Location) -> bool {
        self.nodes.contains(loc)
    }
}

impl FromIterator<Edge> for Graph {
    fn from_iter<I: IntoIterator<Item = Edge>>(iter: I) -> Self {
        Self::build(iter)
    }
}
