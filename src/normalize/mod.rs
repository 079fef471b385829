//! GPS normalization: rescales `lat`/`long` into a [0, 100] display space
//! so a track map can be drawn without knowing the circuit's coordinates.

pub mod normalizer;

pub use normalizer::{normalize, CoordinateRange, NORM_SCALE};
