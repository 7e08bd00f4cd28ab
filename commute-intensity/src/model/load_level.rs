//! ten-band classification of average edge load used by the GeoJSON export.
use std::fmt::Display;

use commute_core::Edge;
use serde::{Deserialize, Serialize};

use super::IntensityMap;

pub const N_LOAD_LEVELS: u8 = 10;

/// average load samples one bucket out of every six, i.e. every half hour.
pub const AVERAGE_SAMPLE_STRIDE: usize = 6;

/// slack allowed when testing an average against a band's upper bound.
pub const BINNING_TOLERANCE: f64 = 1e-5;

/// one of ten equal-width load bands, from 1 (lightest) to 10 (heaviest).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LoadLevel(u8);

impl LoadLevel {
    pub const MIN: LoadLevel = LoadLevel(1);
    pub const MAX: LoadLevel = LoadLevel(N_LOAD_LEVELS);

    pub fn new(level: u8) -> Option<LoadLevel> {
        if (1..=N_LOAD_LEVELS).contains(&level) {
            Some(LoadLevel(level))
        } else {
            None
        }
    }

    pub fn value(&self) -> u8 {
        self.0
    }

    /// zero-based position of this level in a collection of all levels.
    pub fn index(&self) -> usize {
        (self.0 - 1) as usize
    }

    pub fn all() -> impl Iterator<Item = LoadLevel> {
        (1..=N_LOAD_LEVELS).map(LoadLevel)
    }
}

impl Display for LoadLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// strategy for finding the band containing an average load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BinningPolicy {
    /// `ceil((avg - tolerance) / band_width)`, computed directly.
    #[default]
    ClosedForm,
    /// scan the band thresholds upward, accumulating the band width each step
    /// until the average no longer exceeds the threshold by more than the tolerance.
    Accumulated,
}

impl BinningPolicy {
    /// assigns an average load to a level given the largest average in the map.
    /// an average beyond the last band is clamped to the heaviest level and reported.
    pub fn classify(&self, average_load: f64, max_load: f64) -> LoadLevel {
        if max_load <= 0.0 || average_load <= 0.0 {
            return LoadLevel::MIN;
        }
        let band_width = max_load / N_LOAD_LEVELS as f64;
        let level = match self {
            BinningPolicy::ClosedForm => {
                let raw = ((average_load - BINNING_TOLERANCE) / band_width).ceil();
                raw.max(1.0) as u64
            }
            BinningPolicy::Accumulated => {
                let mut level = 1u64;
                let mut threshold = band_width;
                while threshold <= max_load && average_load - threshold > BINNING_TOLERANCE {
                    level += 1;
                    threshold += band_width;
                }
                level
            }
        };
        match u8::try_from(level).ok().and_then(LoadLevel::new) {
            Some(load_level) => load_level,
            None => {
                log::warn!(
                    "average load {average_load} exceeds all {N_LOAD_LEVELS} bands of width {band_width} (computed level {level}), assigning level {}",
                    LoadLevel::MAX
                );
                LoadLevel::MAX
            }
        }
    }
}

/// first pass of the export: the average load of each edge and the largest
/// average found. an empty map has a maximum load of zero.
pub fn average_loads(map: &IntensityMap) -> (Vec<(&Edge, f64)>, f64) {
    let averages = map
        .iter()
        .map(|(edge, timetable)| (edge, timetable.average_load(AVERAGE_SAMPLE_STRIDE)))
        .collect::<Vec<_>>();
    let max_load = averages
        .iter()
        .map(|(_, avg)| *avg)
        .fold(0.0, f64::max);
    (averages, max_load)
}

/// classifies every edge in the map into a load level.
pub fn load_levels(map: &IntensityMap, policy: BinningPolicy) -> Vec<(&Edge, LoadLevel)> {
    let (averages, max_load) = average_loads(map);
    averages
        .into_iter()
        .map(|(edge, avg)| (edge, policy.classify(avg, max_load)))
        .collect()
}
