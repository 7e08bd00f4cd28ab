use geo::Point;
use serde::Deserialize;

use super::{Edge, EdgeId};

/// a row in an edges CSV file describing one road network edge.
#[derive(Deserialize, Debug, Clone)]
pub struct EdgeRow {
    pub edge_id: EdgeId,
    pub start_lon: f64,
    pub start_lat: f64,
    pub end_lon: f64,
    pub end_lat: f64,
    pub travel_time_ms: u64,
}

impl From<EdgeRow> for Edge {
    fn from(row: EdgeRow) -> Self {
        Edge::new(
            row.edge_id,
            Point::new(row.start_lon, row.start_lat),
            Point::new(row.end_lon, row.end_lat),
            row.travel_time_ms,
        )
    }
}
