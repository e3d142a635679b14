//! stringifyable-util - random test data for the stringifyable diff engine.

pub mod fuzzer;

pub use fuzzer::{Fuzzer, TreeOptions};
