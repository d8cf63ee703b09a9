//! Shared data structures for well-log processing
//!
//! - `Curve` / `WellLog`: a well's depth-indexed curve table
//! - `SamplingStep` / `WindowSpec`: validated step and aggregation window

mod curve;
mod window;

pub use curve::*;
pub use window::*;
