use crate::graph::GraphError;

#[derive(Debug, thiserror::Error)]
pub enum CampusError {
    #[error("failed to open file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Graph(#[from] GraphError),

    /// No building has the requested short name.
    #[error("unknown building: {0}")]
    UnknownBuilding(String),

    #[error("building {0} is listed more than once")]
    DuplicateBuilding(String),
}
