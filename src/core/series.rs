use crate::core::{Channel, NormalizedSample, RawRow};
use crate::error::SeriesError;
use crate::normalize::normalize;

/// The ordered samples of one recording session.
///
/// Order is the input row order and is never re-sorted by time. There are
/// no mutation operations; loading a new log builds a new series.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TelemetrySeries {
    samples: Vec<NormalizedSample>,
}

impl TelemetrySeries {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Normalize parsed rows into a series
    pub fn from_rows(rows: Vec<RawRow>) -> Self {
        Self {
            samples: normalize(rows),
        }
    }

    pub fn from_samples(samples: Vec<NormalizedSample>) -> Self {
        Self { samples }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sample at `index`, failing loudly outside `0..len`.
    pub fn at(&self, index: usize) -> Result<&NormalizedSample, SeriesError> {
        self.samples.get(index).ok_or(SeriesError::OutOfRange {
            index,
            len: self.samples.len(),
        })
    }

    pub fn all(&self) -> &[NormalizedSample] {
        &self.samples
    }

    /// Highest valid index, 0 for an empty series
    pub fn last_index(&self) -> usize {
        self.samples.len().saturating_sub(1)
    }

    /// Clamp an index into `[0, len - 1]` (0 when empty)
    pub fn clamp_index(&self, index: usize) -> usize {
        index.min(self.last_index())
    }

    /// `[time, value]` points of one channel, e.g. throttle vs time.
    /// Rows where the channel is absent or non-numeric are skipped.
    pub fn channel_points(&self, channel: Channel) -> Vec<[f64; 2]> {
        self.samples
            .iter()
            .filter_map(|s| s.row.channel(channel).map(|v| [s.time(), v]))
            .collect()
    }

    /// The full normalized path as `[longNorm, latNorm]` points
    pub fn track(&self) -> Vec<[f64; 2]> {
        self.samples.iter().map(NormalizedSample::track_point).collect()
    }

    /// Time of the first and last sample
    pub fn time_span(&self) -> Option<(f64, f64)> {
        match (self.samples.first(), self.samples.last()) {
            (Some(first), Some(last)) => Some((first.time(), last.time())),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series() -> TelemetrySeries {
        TelemetrySeries::from_rows(vec![
            RawRow::new().with("time", 0.0).with("throttle", 10.0).with("lat", 1.0).with("long", 1.0),
            RawRow::new().with("time", 0.5).with("lat", 2.0).with("long", 3.0),
            RawRow::new().with("time", 1.0).with("throttle", 80.0).with("lat", 3.0).with("long", 5.0),
        ])
    }

    #[test]
    fn test_at_in_range() {
        let s = series();
        assert_eq!(s.len(), 3);
        assert_eq!(s.at(1).unwrap().time(), 0.5);
    }

    #[test]
    fn test_at_out_of_range() {
        let s = series();
        assert_eq!(s.at(3), Err(SeriesError::OutOfRange { index: 3, len: 3 }));
        assert_eq!(
            TelemetrySeries::empty().at(0),
            Err(SeriesError::OutOfRange { index: 0, len: 0 })
        );
    }

    #[test]
    fn test_clamp_index() {
        let s = series();
        assert_eq!(s.clamp_index(0), 0);
        assert_eq!(s.clamp_index(2), 2);
        assert_eq!(s.clamp_index(99), 2);
        assert_eq!(TelemetrySeries::empty().clamp_index(5), 0);
    }

    #[test]
    fn test_channel_points_skip_missing() {
        let s = series();
        assert_eq!(s.channel_points(Channel::Throttle), vec![[0.0, 10.0], [1.0, 80.0]]);
    }

    #[test]
    fn test_track_and_time_span() {
        let s = series();
        assert_eq!(s.track(), vec![[0.0, 0.0], [50.0, 50.0], [100.0, 100.0]]);
        assert_eq!(s.time_span(), Some((0.0, 1.0)));
        assert_eq!(TelemetrySeries::empty().time_span(), None);
    }
}
