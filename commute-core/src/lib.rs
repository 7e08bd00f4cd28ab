//! road network value types consumed by the commute traffic intensity tools.
//!
//! edges and routes are produced elsewhere (an edge registry built from a network
//! dataset, a routing engine producing edge paths); this crate only describes
//! their shape and how to look them up by id.
pub mod model;
pub mod util;

pub use model::{CoreError, Edge, EdgeId, EdgeList, EdgeRegistry, Route};
