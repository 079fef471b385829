use crate::core::{Channel, NormalizedSample, RawRow};
use tracing::debug;

/// Upper bound of the normalized display space
pub const NORM_SCALE: f64 = 100.0;

/// Session-wide extent of one positional channel
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateRange {
    pub min: f64,
    pub max: f64,
}

impl CoordinateRange {
    /// Min/max of `channel` over all rows. A row without a numeric value
    /// counts as 0, so partial GPS coverage pulls the range towards zero.
    pub fn of(rows: &[RawRow], channel: Channel) -> Self {
        let mut values = rows.iter().map(|r| coordinate(r, channel));
        let first = values.next().unwrap_or(0.0);
        let (min, max) = values.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
        Self { min, max }
    }

    /// Half the width of the range, `None` when every row has the same value.
    /// Halving keeps `max - min` finite for extreme coordinates.
    fn half_span(&self) -> Option<f64> {
        let half = self.max / 2.0 - self.min / 2.0;
        (half > 0.0).then_some(half)
    }

    pub fn is_degenerate(&self) -> bool {
        self.max <= self.min
    }

    /// Map a value into `[0, NORM_SCALE]`. A degenerate range maps to 0.
    pub fn scale(&self, value: f64) -> f64 {
        match self.half_span() {
            Some(half) => {
                let ratio = (value / 2.0 - self.min / 2.0) / half;
                (ratio * NORM_SCALE).clamp(0.0, NORM_SCALE)
            }
            None => 0.0,
        }
    }
}

fn coordinate(row: &RawRow, channel: Channel) -> f64 {
    row.channel(channel).unwrap_or(0.0)
}

/// Rescale latitude/longitude of every row into the display space.
///
/// Output has the same length and order as the input; every original field
/// is kept.
pub fn normalize(rows: Vec<RawRow>) -> Vec<NormalizedSample> {
    let lat = CoordinateRange::of(&rows, Channel::Lat);
    let long = CoordinateRange::of(&rows, Channel::Long);

    if lat.is_degenerate() || long.is_degenerate() {
        debug!(
            "Degenerate GPS range (lat {:?}, long {:?}), constant channel maps to 0",
            lat, long
        );
    }

    rows.into_iter()
        .map(|row| {
            let lat_norm = lat.scale(coordinate(&row, Channel::Lat));
            let long_norm = long.scale(coordinate(&row, Channel::Long));
            NormalizedSample::new(row, lat_norm, long_norm)
        })
        .collect()
}
