//! Numeric utilities: curve tracing and polyline geometry.

pub mod march;
pub mod polyline;

pub use march::{Direction, Marcher, Trace, TraceOutcome};
