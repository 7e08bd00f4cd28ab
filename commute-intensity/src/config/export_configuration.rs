use std::{fmt::Display, path::Path};

use serde::{Deserialize, Serialize};

use crate::model::{BinningPolicy, IntensityError};

/// defines behaviors for writing intensity CSV and GeoJSON outputs
#[derive(Clone, Serialize, Deserialize, Debug, PartialEq, Eq)]
#[serde(default)]
pub struct ExportConfiguration {
    pub binning_policy: BinningPolicy,
    /// pretty-print GeoJSON output
    pub pretty: bool,
    /// replace output files that already exist
    pub overwrite: bool,
}

impl Default for ExportConfiguration {
    fn default() -> Self {
        Self {
            binning_policy: BinningPolicy::ClosedForm,
            pretty: false,
            overwrite: true,
        }
    }
}

impl TryFrom<&String> for ExportConfiguration {
    type Error = IntensityError;

    /// decodes a `.toml` or `.json` file, chosen by extension.
    fn try_from(f: &String) -> Result<Self, Self::Error> {
        let extension = Path::new(f).extension().and_then(|e| e.to_str());
        match extension {
            Some("toml") => toml::from_str(&read_contents(f)?).map_err(|e| decode_failure(f, e)),
            Some("json") => {
                serde_json::from_str(&read_contents(f)?).map_err(|e| decode_failure(f, e))
            }
            _ => Err(IntensityError::ConfigurationError(format!(
                "unsupported file type: {f}"
            ))),
        }
    }
}

fn read_contents(f: &str) -> Result<String, IntensityError> {
    std::fs::read_to_string(f)
        .map_err(|e| IntensityError::ConfigurationError(format!("failure reading {f}: {e}")))
}

fn decode_failure(f: &str, e: impl Display) -> IntensityError {
    IntensityError::ConfigurationError(format!("failure decoding {f}: {e}"))
}
