use super::{Edge, EdgeId};

/// resolves edge identifiers to the edges of some road network.
pub trait EdgeRegistry {
    fn get_edge(&self, edge_id: EdgeId) -> Option<&Edge>;

    fn n_edges(&self) -> usize;
}
