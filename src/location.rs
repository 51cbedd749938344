use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the campus map.
///
/// Coordinates are wrapped in `OrderedFloat` so that a `Location` can be used
/// directly as a hash or ordered map key: two locations built from the same
/// coordinates are the same graph node.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Location {
    x: OrderedFloat<f64>,
    y: OrderedFloat<f64>,
}

impl Location {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: OrderedFloat(x),
            y: OrderedFloat(y),
        }
    }

    pub fn x(&self) -> f64 {
        self.x.into_inner()
    }

    pub fn y(&self) -> f64 {
        self.y.into_inner()
    }

    /// Straight-line (Euclidean) distance in map units.
    pub fn distance_to(&self, other: &Location) -> f64 {
        let dx = other.x() - self.x();
        let dy = other.y() - self.y();
        dx.hypot(dy)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// A directed walkway from `start` to `end` with a non-negative length.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Edge {
    pub start: Location,
    pub end: Location,
    pub dist: f64,
}

impl Edge {
    pub fn new(start: Location, end: Location, dist: f64) -> Self {
        Self { start, end, dist }
    }

    /// Edge weighted by the length of the straight segment between its ends.
    pub fn straight(start: Location, end: Location) -> Self {
        Self::new(start, end, start.distance_to(&end))
    }

    pub fn is_self_loop(&self) -> bool {
        self.start == self.end
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {} ({})", self.start, self.end, self.dist)
    }
}
