pub mod csv_codec;
pub mod geojson_export;

use std::{fs::File, path::Path};

use crate::model::IntensityError;

/// opens a file for writing in truncate mode, refusing to replace an existing
/// file unless overwrite is set.
fn create_output_file(path: &Path, overwrite: bool) -> Result<File, IntensityError> {
    if path.exists() && !overwrite {
        return Err(IntensityError::OutputExists(
            path.to_string_lossy().to_string(),
        ));
    }
    let file = File::create(path)?;
    Ok(file)
}
