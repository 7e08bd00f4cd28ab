use thiserror::Error;

use super::EdgeId;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("a route must contain at least one edge")]
    EmptyRoute,
    #[error("edge '{0}' not found in edge registry")]
    UnknownEdgeId(EdgeId),
    #[error("edge '{0}' appears more than once in edge registry")]
    DuplicateEdgeId(EdgeId),
    #[error("failure reading edges file {0}: {1}")]
    EdgeFileError(String, csv::Error),
}
