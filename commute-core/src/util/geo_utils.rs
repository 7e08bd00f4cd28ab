use geo::{BoundingRect, MultiPoint, Point, Rect};

use crate::model::Edge;

/// computes the bounding rectangle of a set of edges from their endpoints.
///
/// # Arguments
///
/// * `edges` - edges to bound
///
/// # Returns
///
/// * the smallest rectangle containing every edge endpoint, or None when no
///   edges were provided
pub fn edges_bounding_rect<'a>(edges: impl IntoIterator<Item = &'a Edge>) -> Option<Rect<f64>> {
    let points: Vec<Point<f64>> = edges
        .into_iter()
        .flat_map(|e| [e.start, e.end])
        .collect();
    MultiPoint::from(points).bounding_rect()
}

/// bounding rectangle as a `[min_x, min_y, max_x, max_y]` array.
pub fn rect_to_bbox(rect: &Rect<f64>) -> [f64; 4] {
    let min = rect.min();
    let max = rect.max();
    [min.x, min.y, max.x, max.y]
}
