//! Loading the campus walkway map from CSV and answering route queries
//! between named buildings.
//!
//! Edge files have the header `x1,y1,x2,y2,dist`, one directed walkway per
//! row. A blank `dist` is filled in with the straight-line length of the
//! segment. Building files have the header `shortName,longName,x,y`.

use crate::dijkstra::Algorithm;
use crate::error::CampusError;
use crate::graph::Graph;
use crate::location::{Edge, Location};
use crate::path::Path;
use csv::{ReaderBuilder, Trim};
use fnv::FnvHashSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io;
use tracing::{debug, info};

#[derive(Debug, Deserialize)]
struct EdgeRecord {
    x1: f64,
    y1: f64,
    x2: f64,
    y2: f64,
    dist: Option<f64>,
}

impl From<EdgeRecord> for Edge {
    fn from(r: EdgeRecord) -> Self {
        let (start, end) = (Location::new(r.x1, r.y1), Location::new(r.x2, r.y2));
        match r.dist {
            Some(dist) => Edge::new(start, end, dist),
            None => Edge::straight(start, end),
        }
    }
}

#[derive(Debug, Deserialize)]
struct BuildingRecord {
    #[serde(rename = "shortName")]
    short_name: String,
    #[serde(rename = "longName")]
    long_name: String,
    x: f64,
    y: f64,
}

/// A named building and the map location routes start or end at.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Building {
    pub short_name: String,
    pub long_name: String,
    pub location: Location,
}

impl From<BuildingRecord> for Building {
    fn from(r: BuildingRecord) -> Self {
        Building {
            short_name: r.short_name,
            long_name: r.long_name,
            location: Location::new(r.x, r.y),
        }
    }
}

fn reader<R: io::Read>(rdr: R) -> csv::Reader<R> {
    ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(rdr)
}

pub fn read_edges<R: io::Read>(rdr: R) -> Result<Vec<Edge>, CampusError> {
    let mut edges = Vec::new();
    for result in reader(rdr).deserialize::<EdgeRecord>() {
        edges.push(result?.into());
    }
    Ok(edges)
}

pub fn read_edges_from_path(path: &str) -> Result<Vec<Edge>, CampusError> {
    let file = std::fs::File::open(path)?;
    let edges = read_edges(file)?;
    info!(path, edges = edges.len(), "loaded walkways");
    Ok(edges)
}

pub fn read_buildings<R: io::Read>(rdr: R) -> Result<Vec<Building>, CampusError> {
    let mut buildings = Vec::new();
    for result in reader(rdr).deserialize::<BuildingRecord>() {
        buildings.push(result?.into());
    }
    Ok(buildings)
}

pub fn read_buildings_from_path(path: &str) -> Result<Vec<Building>, CampusError> {
    let file = std::fs::File::open(path)?;
    let buildings = read_buildings(file)?;
    info!(path, buildings = buildings.len(), "loaded buildings");
    Ok(buildings)
}

/// Every known building, serialized as `{"buildings": [...]}` or shown as a
/// table with [`fmt::Display`].
#[derive(Debug, Serialize)]
pub struct BuildingList<'a> {
    pub buildings: &'a [Building],
}

impl fmt::Display for BuildingList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let width = self
            .buildings
            .iter()
            .map(|b| b.short_name.len())
            .max()
            .unwrap_or(0)
            .max("NAME".len());
        writeln!(f, "{:<width$}  {:<12}  DESCRIPTION", "NAME", "LOCATION")?;
        for b in self.buildings {
            writeln!(
                f,
                "{:<width$}  {:<12}  {}",
                b.short_name,
                b.location.to_string(),
                b.long_name
            )?;
        }
        Ok(())
    }
}

/// The walkway graph plus the buildings that can be routed between.
#[derive(Debug, Clone)]
pub struct Campus {
    graph: Graph,
    buildings: Vec<Building>,
}

impl Campus {
    /// Fails if any walkway has a negative or non-finite length, or if two
    /// buildings share a short name.
    pub fn new(edges: Vec<Edge>, buildings: Vec<Building>) -> Result<Self, CampusError> {
        let mut names = FnvHashSet::default();
        for b in &buildings {
            if !names.insert(b.short_name.as_str()) {
                return Err(CampusError::DuplicateBuilding(b.short_name.clone()));
            }
        }
        let graph = Graph::try_build(edges)?;
        info!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            buildings = buildings.len(),
            "campus graph ready"
        );
        Ok(Self { graph, buildings })
    }

    pub fn load(edges_path: &str, buildings_path: &str) -> Result<Self, CampusError> {
        Self::new(
            read_edges_from_path(edges_path)?,
            read_buildings_from_path(buildings_path)?,
        )
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Buildings in file order.
    pub fn buildings(&self) -> &[Building] {
        &self.buildings
    }

    pub fn building_list(&self) -> BuildingList<'_> {
        BuildingList {
            buildings: &self.buildings,
        }
    }

    pub fn building(&self, short_name: &str) -> Option<&Building> {
        self.buildings.iter().find(|b| b.short_name == short_name)
    }

    /// Shortest walk between two buildings by short name. `Ok(None)` means
    /// both exist but no walkways connect them.
    pub fn route(&self, start: &str, end: &str, algorithm: Algorithm) -> Result<Option<Path>, CampusError> {
        let from = self
            .building(start)
            .ok_or_else(|| CampusError::UnknownBuilding(start.to_string()))?;
        let to = self
            .building(end)
            .ok_or_else(|| CampusError::UnknownBuilding(end.to_string()))?;
        debug!(start, end, %algorithm, "routing");
        Ok(algorithm.find(&self.graph, from.location, to.location))
    }
}
