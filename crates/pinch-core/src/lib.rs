//! pinch-core: shared foundation for the pinch analysis workspace.
//!
//! Contains:
//! - units (uom SI types + constructors in process-engineering units)
//! - numeric (Real + tolerances + zero-threshold helpers)
//! - error (shared error taxonomy)

pub mod error;
pub mod numeric;
pub mod units;

// Re-exports: nice ergonomics for downstream crates
pub use error::{PinchError, PinchResult};
pub use numeric::*;
pub use units::*;
