//! Shortest walking routes over a campus walkway graph.
//!
//! A [`Graph`] is built once from directed, weighted [`Edge`]s between map
//! [`Location`]s and can then be searched by any number of callers.
//! [`shortest_path`] is Dijkstra driven by the crate's own
//! [`PriorityQueue`]; [`shortest_path_decrease_key`] gives the same answers
//! using an addressable heap. [`Campus`] wraps CSV loading and routing
//! between named buildings.

pub mod campus;
pub mod dijkstra;
pub mod error;
pub mod graph;
pub mod heap;
pub mod location;
pub mod path;

pub use campus::{Building, BuildingList, Campus};
pub use dijkstra::{shortest_path, shortest_path_decrease_key, Algorithm};
pub use error::CampusError;
pub use graph::{Graph, GraphError};
pub use heap::{EmptyQueueError, PriorityQueue};
pub use location::{Edge, Location};
pub use path::Path;
