use super::{
    time_ops::{self, N_BUCKETS},
    IntensityError,
};

/// daily histogram of traffic events on one edge at 5-minute resolution.
/// bucket `i` counts events in minutes `[5i, 5i + 5)` of the day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timetable {
    counts: [u32; N_BUCKETS],
}

impl Default for Timetable {
    fn default() -> Self {
        Self {
            counts: [0; N_BUCKETS],
        }
    }
}

impl Timetable {
    pub const SIZE: usize = N_BUCKETS;

    /// builds a timetable from bucket counts in bucket order. bucket `i` of the
    /// slice becomes bucket `i` of the timetable.
    pub fn from_counts(counts: &[u32]) -> Result<Timetable, IntensityError> {
        let counts: [u32; N_BUCKETS] =
            counts
                .try_into()
                .map_err(|_| IntensityError::InvalidTimetableLength {
                    expected: N_BUCKETS,
                    found: counts.len(),
                })?;
        Ok(Timetable { counts })
    }

    /// records one traversal at the time of day of this timestamp.
    pub fn intensify(&mut self, timestamp_ms: i64) {
        let bucket = time_ops::bucket_index(timestamp_ms);
        self.counts[bucket] = self.counts[bucket].saturating_add(1);
    }

    pub fn intensity_at(&self, timestamp_ms: i64) -> u32 {
        self.counts[time_ops::bucket_index(timestamp_ms)]
    }

    pub fn intensity_at_bucket(&self, bucket: usize) -> Option<u32> {
        self.counts.get(bucket).copied()
    }

    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().map(|c| *c as u64).sum()
    }

    /// mean of the counts sampled every `stride` buckets starting at bucket 0.
    /// with a stride of 6 this samples each half hour of the day.
    pub fn average_load(&self, stride: usize) -> f64 {
        let stride = stride.max(1);
        let (sum, n) = self
            .counts
            .iter()
            .step_by(stride)
            .fold((0u64, 0usize), |(sum, n), c| (sum + *c as u64, n + 1));
        sum as f64 / n as f64
    }

    /// adds every bucket of another timetable into this one.
    pub fn absorb(&mut self, other: &Timetable) {
        for (count, other_count) in self.counts.iter_mut().zip(other.counts.iter()) {
            *count = count.saturating_add(*other_count);
        }
    }

    /// non-empty buckets as `(bucket, count)` pairs in bucket order.
    pub fn nonzero_buckets(&self) -> impl Iterator<Item = (usize, u32)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != 0)
            .map(|(i, c)| (i, *c))
    }
}
