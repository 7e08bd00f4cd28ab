use commute_core::{CoreError, EdgeId};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IntensityError {
    #[error("start times and routes must have equal lengths, found {start_times} start times and {routes} routes")]
    BatchLengthMismatch { start_times: usize, routes: usize },
    #[error("timetable must have exactly {expected} buckets, found {found}")]
    InvalidTimetableLength { expected: usize, found: usize },
    #[error("malformed intensity row on line {line}: {message}")]
    MalformedRow { line: u64, message: String },
    #[error("intensity row on line {line} references edge '{edge_id}' not found in edge registry")]
    UnknownEdge { line: u64, edge_id: EdgeId },
    #[error("invalid trip: {0}")]
    InvalidTrip(String),
    #[error("refusing to overwrite existing file {0}")]
    OutputExists(String),
    #[error("invalid configuration: {0}")]
    ConfigurationError(String),
    #[error("failure reading or writing intensity CSV: {source}")]
    CsvError {
        #[from]
        source: csv::Error,
    },
    #[error("failure encoding GeoJSON: {source}")]
    SerdeJsonError {
        #[from]
        source: serde_json::Error,
    },
    #[error("i/o failure: {source}")]
    StdIoError {
        #[from]
        source: std::io::Error,
    },
    #[error(transparent)]
    CoreError {
        #[from]
        source: CoreError,
    },
}
