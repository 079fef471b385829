pub mod channel;
pub mod sample;
pub mod series;
pub mod value;

pub use channel::Channel;
pub use sample::{NormalizedSample, RawRow};
pub use series::TelemetrySeries;
pub use value::FieldValue;
