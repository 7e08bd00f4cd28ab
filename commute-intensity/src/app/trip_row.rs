use chrono::NaiveTime;
use commute_core::{EdgeId, EdgeRegistry, Route};
use serde::{Deserialize, Serialize};

use crate::model::{time_ops, IntensityError};

/// a row in a trips CSV file: a route found by a routing engine, as a path of
/// edge ids, and the wall-clock time the trip departs.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TripRow {
    /// departure time, `HH:MM:SS`
    pub start_time: NaiveTime,
    /// edge ids along the route in traversal order, separated by `;`
    pub edge_ids: String,
}

impl TripRow {
    pub const EDGE_ID_SEPARATOR: char = ';';

    pub fn start_time_ms(&self) -> i64 {
        time_ops::timestamp_from_time_of_day(self.start_time)
    }

    pub fn route<R: EdgeRegistry>(&self, registry: &R) -> Result<Route, IntensityError> {
        let edge_ids = self
            .edge_ids
            .split(Self::EDGE_ID_SEPARATOR)
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.parse::<EdgeId>()
                    .map_err(|e| IntensityError::InvalidTrip(format!("invalid edge id '{s}': {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let route = Route::from_edge_ids(&edge_ids, registry)?;
        Ok(route)
    }
}
