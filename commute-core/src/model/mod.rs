mod core_error;
mod edge;
mod edge_id;
mod edge_list;
mod edge_registry;
mod edge_row;
mod route;

pub use core_error::CoreError;
pub use edge::Edge;
pub use edge_id::EdgeId;
pub use edge_list::EdgeList;
pub use edge_registry::EdgeRegistry;
pub use edge_row::EdgeRow;
pub use route::Route;
