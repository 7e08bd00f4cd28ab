//! time-of-day arithmetic for timestamps expressed in milliseconds since some
//! reference midnight (for example the unix epoch, or midnight of the simulated day).
//!
//! every function here is total over `i64`. timestamps before the reference point
//! wrap backwards onto the previous day, so `-1` is one millisecond before midnight.
use chrono::{NaiveTime, Timelike};

pub const MILLIS_PER_MINUTE: i64 = 60_000;
pub const MINUTES_PER_DAY: i64 = 1440;
pub const BUCKET_WIDTH_MINUTES: usize = 5;
pub const N_BUCKETS: usize = MINUTES_PER_DAY as usize / BUCKET_WIDTH_MINUTES;

/// minutes elapsed since the most recent midnight, in `[0, 1440)`.
pub fn minutes_of_day(timestamp_ms: i64) -> u32 {
    let minutes = timestamp_ms.div_euclid(MILLIS_PER_MINUTE);
    minutes.rem_euclid(MINUTES_PER_DAY) as u32
}

/// index of the 5-minute bucket containing this timestamp, in `[0, 288)`.
pub fn bucket_index(timestamp_ms: i64) -> usize {
    minutes_of_day(timestamp_ms) as usize / BUCKET_WIDTH_MINUTES
}

/// wall-clock hour and minute at which a bucket begins.
pub fn bucket_start(index: usize) -> (usize, usize) {
    let minutes = index * BUCKET_WIDTH_MINUTES;
    (minutes / 60, minutes % 60)
}

/// milliseconds since midnight for a wall-clock time.
pub fn timestamp_from_time_of_day(time: NaiveTime) -> i64 {
    time.num_seconds_from_midnight() as i64 * 1000 + (time.nanosecond() / 1_000_000) as i64
}
