//! Pinch analysis engine for sets of hot and cold process streams.
//!
//! Stages run in a fixed order, each a function from the previous stage's
//! output to a new value: stream shifting, temperature intervals, the
//! problem table, the two-pass heat cascade, then composite curves and
//! temperature pocket deletion on top of the cascade. Intervals and every
//! table derived from them are ordered hottest first and indexed by position.

pub mod analysis;
pub mod cascade;
pub mod composite;
pub mod config;
pub mod interval;
pub mod pocket;
pub mod problem_table;
pub mod stream;

pub use analysis::{EnergyTargets, PinchAnalysis};
pub use cascade::{HeatCascade, HeatCascadeRow, solve_cascade};
pub use composite::{
    CompositeDiagram, Curve, CurvePoint, actual_composite, grand_composite_curve,
    shifted_composite,
};
pub use config::{PinchConfig, PinchRule};
pub use interval::{TemperatureInterval, build_intervals, temperature_ladder};
pub use pinch_core::{PinchError, PinchResult, Real};
pub use pocket::{CascadePoint, CascadeProfile, PocketCase, PocketError, ProfileRow};
pub use problem_table::{ProblemTableRow, build_problem_table};
pub use stream::{ShiftedStream, Stream, StreamKind, StreamSet};
