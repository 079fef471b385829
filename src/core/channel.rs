use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The fixed set of recognized telemetry columns.
///
/// Any other column in a log is carried through untouched but has no
/// special meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Time,
    Throttle,
    Speed,
    Rpm,
    Lat,
    Long,
}

impl Channel {
    pub const ALL: [Channel; 6] = [
        Channel::Time,
        Channel::Throttle,
        Channel::Speed,
        Channel::Rpm,
        Channel::Lat,
        Channel::Long,
    ];

    /// Column name as it appears in the CSV header
    pub fn column(&self) -> &'static str {
        match self {
            Channel::Time => "time",
            Channel::Throttle => "throttle",
            Channel::Speed => "speed",
            Channel::Rpm => "rpm",
            Channel::Lat => "lat",
            Channel::Long => "long",
        }
    }

    /// Display unit, if any
    pub fn unit(&self) -> Option<&'static str> {
        match self {
            Channel::Time => Some("s"),
            Channel::Throttle => Some("%"),
            Channel::Speed => Some("km/h"),
            Channel::Rpm | Channel::Lat | Channel::Long => None,
        }
    }

    /// Gauge range for channels that are shown as dials
    pub fn gauge_range(&self) -> Option<(f64, f64)> {
        match self {
            Channel::Throttle => Some((0.0, 100.0)),
            Channel::Speed => Some((0.0, 300.0)),
            Channel::Rpm => Some((0.0, 14_000.0)),
            _ => None,
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.column())
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Channel::ALL
            .iter()
            .copied()
            .find(|c| c.column() == lower)
            .ok_or_else(|| format!("Unknown channel: {}", s))
    }
}
