use geo::{LineString, Point};
use std::hash::{Hash, Hasher};

use super::EdgeId;

/// a directed road segment. coordinates are stored with x as longitude
/// and y as latitude.
///
/// two edges are equal when their ids are equal, regardless of geometry or
/// travel time, so an edge can key a map the same way its id would.
#[derive(Debug, Clone)]
pub struct Edge {
    pub edge_id: EdgeId,
    pub start: Point<f64>,
    pub end: Point<f64>,
    /// time to traverse this edge, in milliseconds
    pub travel_time_ms: u64,
}

impl Edge {
    pub fn new(edge_id: EdgeId, start: Point<f64>, end: Point<f64>, travel_time_ms: u64) -> Edge {
        Edge {
            edge_id,
            start,
            end,
            travel_time_ms,
        }
    }

    /// two-point start→end geometry of this edge.
    pub fn line_string(&self) -> LineString<f64> {
        LineString::from(vec![self.start.0, self.end.0])
    }
}

impl PartialEq for Edge {
    fn eq(&self, other: &Self) -> bool {
        self.edge_id == other.edge_id
    }
}

impl Eq for Edge {}

impl Hash for Edge {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.edge_id.hash(state);
    }
}

impl std::fmt::Display for Edge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.edge_id)
    }
}
