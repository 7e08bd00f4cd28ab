use super::{CoreError, Edge, EdgeId, EdgeRegistry};

/// an ordered, non-empty path of edges, as produced by a routing engine.
#[derive(Debug, Clone)]
pub struct Route {
    edges: Vec<Edge>,
}

impl Route {
    pub fn new(edges: Vec<Edge>) -> Result<Route, CoreError> {
        if edges.is_empty() {
            return Err(CoreError::EmptyRoute);
        }
        Ok(Route { edges })
    }

    /// rebuilds a route from a path of edge ids, looking up each edge in the registry.
    pub fn from_edge_ids<R: EdgeRegistry>(
        edge_ids: &[EdgeId],
        registry: &R,
    ) -> Result<Route, CoreError> {
        let edges = edge_ids
            .iter()
            .map(|edge_id| {
                registry
                    .get_edge(*edge_id)
                    .cloned()
                    .ok_or(CoreError::UnknownEdgeId(*edge_id))
            })
            .collect::<Result<Vec<_>, _>>()?;
        Route::new(edges)
    }

    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    /// always false, a route holds at least one edge.
    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// total time to traverse the route, in milliseconds.
    pub fn travel_time_ms(&self) -> u64 {
        self.edges.iter().map(|e| e.travel_time_ms).sum()
    }
}
