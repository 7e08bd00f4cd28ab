mod intensity_app;
mod intensity_operation;
mod trip_row;

pub use intensity_app::IntensityApp;
pub use intensity_operation::IntensityOperation;
pub use trip_row::TripRow;
