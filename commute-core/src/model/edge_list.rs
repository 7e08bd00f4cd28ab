use std::{collections::HashMap, path::Path};

use super::{CoreError, Edge, EdgeId, EdgeRegistry, EdgeRow};

/// in-memory edge registry.
#[derive(Debug, Clone, Default)]
pub struct EdgeList {
    edges: HashMap<EdgeId, Edge>,
}

impl EdgeList {
    /// builds a registry from a collection of edges, failing if any id repeats.
    pub fn new(edges: impl IntoIterator<Item = Edge>) -> Result<EdgeList, CoreError> {
        let mut lookup = HashMap::new();
        for edge in edges {
            let edge_id = edge.edge_id;
            if lookup.insert(edge_id, edge).is_some() {
                return Err(CoreError::DuplicateEdgeId(edge_id));
            }
        }
        Ok(EdgeList { edges: lookup })
    }

    /// reads a headered CSV file with columns
    /// `edge_id,start_lon,start_lat,end_lon,end_lat,travel_time_ms`.
    pub fn from_csv<P: AsRef<Path>>(path: P) -> Result<EdgeList, CoreError> {
        let path = path.as_ref();
        let filename = path.to_string_lossy().to_string();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_path(path)
            .map_err(|e| CoreError::EdgeFileError(filename.clone(), e))?;
        let edges = reader
            .deserialize::<EdgeRow>()
            .map(|row| {
                row.map(Edge::from)
                    .map_err(|e| CoreError::EdgeFileError(filename.clone(), e))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let result = EdgeList::new(edges)?;
        log::info!("read {} edges from {}", result.n_edges(), filename);
        Ok(result)
    }
}

impl EdgeRegistry for EdgeList {
    fn get_edge(&self, edge_id: EdgeId) -> Option<&Edge> {
        self.edges.get(&edge_id)
    }

    fn n_edges(&self) -> usize {
        self.edges.len()
    }
}
