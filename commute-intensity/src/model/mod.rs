mod intensity_error;
mod intensity_map;
pub mod load_level;
pub mod time_ops;
mod timetable;

pub use intensity_error::IntensityError;
pub use intensity_map::IntensityMap;
pub use load_level::{BinningPolicy, LoadLevel};
pub use timetable::Timetable;
