use crate::location::{Edge, Location};
use serde::{Deserialize, Serialize};

/// A walk from the search origin `start` to `end` along `steps`, with the
/// summed weight cached in `dist`.
///
/// Each step starts where the previous one ended (the first at `start`).
/// Paths are values: [`Path::extend`] returns a new path and leaves the
/// original untouched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Path {
    pub start: Location,
    pub end: Location,
    pub steps: Vec<Edge>,
    pub dist: f64,
}

impl Path {
    /// The zero-length path that starts and ends at `loc`.
    pub fn trivial(loc: Location) -> Self {
        Self {
            start: loc,
            end: loc,
            steps: Vec::new(),
            dist: 0.0,
        }
    }

    pub fn is_trivial(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn extend(&self, edge: Edge) -> Self {
        debug_assert_eq!(edge.start, self.end, "edge does not continue the path");
        let mut steps = Vec::with_capacity(self.steps.len() + 1);
        steps.extend_from_slice(&self.steps);
        steps.push(edge);
        Self {
            start: self.start,
            end: edge.end,
            steps,
            dist: self.dist + edge.dist,
        }
    }

    /// Every location visited, `start` first and `end` last.
    pub fn locations(&self) -> Vec<Location> {
        std::iter::once(self.start)
            .chain(self.steps.iter().map(|e| e.end))
            .collect()
    }
}
