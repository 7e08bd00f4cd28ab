use std::collections::{hash_map, HashMap};

use commute_core::{Edge, Route};
use itertools::Itertools;
use rayon::prelude::*;

use super::{time_ops, IntensityError, Timetable};

/// per-edge daily traffic histograms aggregated from route traversals.
///
/// the map is built by ingesting routes with their start times, after which it
/// may be queried, persisted with [`crate::io::csv_codec`] or exported with
/// [`crate::io::geojson_export`]. iteration order over edges is unspecified.
#[derive(Debug, Clone, Default)]
pub struct IntensityMap {
    timetables: HashMap<Edge, Timetable>,
}

impl IntensityMap {
    pub fn new() -> IntensityMap {
        IntensityMap::default()
    }

    /// pre-sizes the map for an expected number of distinct edges.
    pub fn with_capacity(n_edges: usize) -> IntensityMap {
        IntensityMap {
            timetables: HashMap::with_capacity(n_edges),
        }
    }

    /// walks the route in order, recording one traversal per edge at the time the
    /// edge is entered. the clock starts at `start_time_ms` and advances by each
    /// edge's travel time.
    pub fn ingest(&mut self, start_time_ms: i64, route: &Route) {
        let mut time = start_time_ms;
        for edge in route.edges() {
            self.timetables
                .entry(edge.clone())
                .or_default()
                .intensify(time);
            time = time.saturating_add_unsigned(edge.travel_time_ms);
        }
    }

    /// ingests start times and routes pairwise. fails without modifying the map
    /// when the two slices have different lengths.
    pub fn ingest_batch(
        &mut self,
        start_times_ms: &[i64],
        routes: &[Route],
    ) -> Result<(), IntensityError> {
        validate_batch(start_times_ms, routes)?;
        for (start_time_ms, route) in start_times_ms.iter().zip(routes) {
            self.ingest(*start_time_ms, route);
        }
        log::debug!("ingested batch of {} routes", routes.len());
        Ok(())
    }

    /// same result as [`IntensityMap::ingest_batch`], with routes split across the
    /// rayon thread pool. each worker fills a private map and the partial maps
    /// are merged, so no two workers share counters.
    pub fn ingest_batch_parallel(
        &mut self,
        start_times_ms: &[i64],
        routes: &[Route],
    ) -> Result<(), IntensityError> {
        validate_batch(start_times_ms, routes)?;
        let partial = start_times_ms
            .par_iter()
            .zip(routes.par_iter())
            .fold(IntensityMap::new, |mut acc, (start_time_ms, route)| {
                acc.ingest(*start_time_ms, route);
                acc
            })
            .reduce(IntensityMap::new, |mut a, b| {
                a.merge(b);
                a
            });
        self.merge(partial);
        log::debug!("ingested batch of {} routes in parallel", routes.len());
        Ok(())
    }

    /// adds the counts of another map into this one.
    pub fn merge(&mut self, other: IntensityMap) {
        for (edge, timetable) in other.timetables {
            match self.timetables.entry(edge) {
                hash_map::Entry::Occupied(mut entry) => entry.get_mut().absorb(&timetable),
                hash_map::Entry::Vacant(entry) => {
                    entry.insert(timetable);
                }
            }
        }
    }

    /// installs a timetable for an edge, replacing any previous one.
    pub fn insert_timetable(&mut self, edge: Edge, timetable: Timetable) -> Option<Timetable> {
        self.timetables.insert(edge, timetable)
    }

    /// traffic intensity on one edge at a time of day, zero for unknown edges.
    pub fn intensity_of(&self, edge: &Edge, timestamp_ms: i64) -> u32 {
        self.timetables
            .get(edge)
            .map(|t| t.intensity_at(timestamp_ms))
            .unwrap_or_default()
    }

    /// traffic intensity on every known edge at a time of day.
    pub fn intensity_snapshot(&self, timestamp_ms: i64) -> HashMap<Edge, u32> {
        self.timetables
            .iter()
            .map(|(edge, t)| (edge.clone(), t.intensity_at(timestamp_ms)))
            .collect()
    }

    pub fn timetable(&self, edge: &Edge) -> Option<&Timetable> {
        self.timetables.get(edge)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Edge, &Timetable)> {
        self.timetables.iter()
    }

    pub fn len(&self) -> usize {
        self.timetables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timetables.is_empty()
    }
}

fn validate_batch(start_times_ms: &[i64], routes: &[Route]) -> Result<(), IntensityError> {
    if start_times_ms.len() != routes.len() {
        return Err(IntensityError::BatchLengthMismatch {
            start_times: start_times_ms.len(),
            routes: routes.len(),
        });
    }
    Ok(())
}

impl std::fmt::Display for IntensityMap {
    /// lists every non-empty bucket of every edge as `hour:minute count`, with a
    /// blank line after each edge.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (edge, timetable) in self.timetables.iter().sorted_by_key(|(e, _)| e.edge_id) {
            writeln!(f, "{edge}:")?;
            for (bucket, count) in timetable.nonzero_buckets() {
                let (hour, minute) = time_ops::bucket_start(bucket);
                writeln!(f, "{hour}:{minute} {count}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::time_ops::MILLIS_PER_MINUTE;
    use commute_core::EdgeId;
    use geo::Point;

    fn edge(id: u64, travel_time_ms: u64) -> Edge {
        Edge::new(
            EdgeId(id),
            Point::new(30.0 + id as f64 * 0.01, 59.9),
            Point::new(30.01 + id as f64 * 0.01, 59.9),
            travel_time_ms,
        )
    }

    fn route(edges: Vec<Edge>) -> Route {
        Route::new(edges).expect("test route is non-empty")
    }

    #[test]
    fn test_two_route_scenario() {
        let e1 = edge(1, 300_000);
        let e2 = edge(2, 0);
        let mut map = IntensityMap::new();
        map.ingest(0, &route(vec![e1.clone(), e2.clone()]));
        map.ingest(5 * MILLIS_PER_MINUTE, &route(vec![e1.clone()]));

        let t1 = map.timetable(&e1).unwrap();
        assert_eq!(t1.intensity_at_bucket(0), Some(1));
        assert_eq!(t1.intensity_at_bucket(1), Some(1));
        assert_eq!(t1.total(), 2);
        let t2 = map.timetable(&e2).unwrap();
        assert_eq!(t2.intensity_at_bucket(0), Some(0));
        assert_eq!(t2.intensity_at_bucket(1), Some(1));
        assert_eq!(t2.total(), 1);
    }

    #[test]
    fn test_one_increment_per_edge() {
        let edges = (0..25).map(|i| edge(i, 47_000 * i)).collect::<Vec<_>>();
        let mut map = IntensityMap::new();
        map.ingest(8 * 60 * MILLIS_PER_MINUTE + 12_345, &route(edges.clone()));
        let total: u64 = map.iter().map(|(_, t)| t.total()).sum();
        assert_eq!(total, edges.len() as u64);
        assert_eq!(map.len(), edges.len());
    }

    #[test]
    fn test_revisited_edge_counts_twice() {
        let e1 = edge(1, 60_000);
        let mut map = IntensityMap::new();
        map.ingest(0, &route(vec![e1.clone(), e1.clone()]));
        assert_eq!(map.len(), 1);
        assert_eq!(map.timetable(&e1).unwrap().total(), 2);
    }

    #[test]
    fn test_unknown_edge_is_zero() {
        let mut map = IntensityMap::new();
        assert_eq!(map.intensity_of(&edge(1, 0), 0), 0);
        map.ingest(0, &route(vec![edge(2, 0)]));
        assert_eq!(map.intensity_of(&edge(1, 0), 0), 0);
        assert_eq!(map.intensity_of(&edge(2, 0), 0), 1);
    }

    #[test]
    fn test_batch_length_mismatch_mutates_nothing() {
        let mut map = IntensityMap::new();
        let routes = vec![route(vec![edge(1, 0)]), route(vec![edge(2, 0)])];
        let result = map.ingest_batch(&[0], &routes);
        assert!(matches!(
            result,
            Err(IntensityError::BatchLengthMismatch {
                start_times: 1,
                routes: 2
            })
        ));
        assert!(map.is_empty());
        let result = map.ingest_batch_parallel(&[0, 1, 2], &routes);
        assert!(result.is_err());
        assert!(map.is_empty());
    }

    #[test]
    fn test_parallel_batch_matches_sequential() {
        let routes = (0..40)
            .map(|i| route((0..(i % 7 + 1)).map(|j| edge(j, 90_000 * (i + 1))).collect()))
            .collect::<Vec<_>>();
        let start_times = (0..40)
            .map(|i| (7 * 60 + i * 3) * MILLIS_PER_MINUTE)
            .collect::<Vec<_>>();
        let mut sequential = IntensityMap::new();
        sequential.ingest_batch(&start_times, &routes).unwrap();
        let mut parallel = IntensityMap::new();
        parallel.ingest_batch_parallel(&start_times, &routes).unwrap();

        assert_eq!(sequential.len(), parallel.len());
        for (edge, timetable) in sequential.iter() {
            assert_eq!(Some(timetable), parallel.timetable(edge));
        }
    }

    #[test]
    fn test_snapshot() {
        let mut map = IntensityMap::with_capacity(2);
        map.ingest(0, &route(vec![edge(1, 600_000), edge(2, 0)]));
        let at_midnight = map.intensity_snapshot(0);
        assert_eq!(at_midnight.len(), 2);
        assert_eq!(at_midnight[&edge(1, 0)], 1);
        assert_eq!(at_midnight[&edge(2, 0)], 0);
        let later = map.intensity_snapshot(10 * MILLIS_PER_MINUTE);
        assert_eq!(later[&edge(2, 0)], 1);
    }

    #[test]
    fn test_display() {
        let mut map = IntensityMap::new();
        map.ingest(65 * MILLIS_PER_MINUTE, &route(vec![edge(1, 0), edge(2, 0)]));
        map.ingest(65 * MILLIS_PER_MINUTE, &route(vec![edge(1, 0)]));
        assert_eq!(map.to_string(), "1:\n1:5 2\n\n2:\n1:5 1\n\n");
    }
}
