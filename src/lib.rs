//! Planar **implicit geometry**: curves as zero-sets of `f(x, y)`, composed
//! into segments, boundaries and filled regions.
//!
//! - [`Curve`](curve::Curve): algebraic, procedural, combinator or segment,
//!   all behind [`CurveOps`](traits::CurveOps). Negative is inside.
//! - [`Segment`](segment::Segment): a base curve restricted by a mask, with an
//!   ordered polyline derived from its own parameterization.
//! - [`Boundary`](boundary::Boundary): an ordered chain of segments.
//! - [`Region`](region::Region): closed outer boundary minus holes, with ray
//!   casting containment and area.
//! - [`Field`](field::Field): scalar fields generated from a region by
//!   pluggable strategies.
//! - [`io`]: serde records for everything above.
//!
//! Everything is immutable once built and safe to share across threads.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for batch evaluation and grid sampling

#![forbid(unsafe_code)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod boundary;
pub mod config;
pub mod curve;
pub mod errors;
pub mod field;
pub mod float_types;
pub mod io;
pub mod math;
pub mod region;
pub mod segment;
pub mod traits;

#[cfg(any(
    all(feature = "f64", feature = "f32"),
    not(any(feature = "f64", feature = "f32"))
))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use aabb::Aabb;
pub use boundary::{Boundary, BoundaryShape};
pub use config::SamplingConfig;
pub use curve::{CombineOp, Curve, CurveKind};
pub use errors::GeometryError;
pub use field::{Field, FieldRegistry, FieldStrategy, Grid, OccupancyFill, SignedDistance};
pub use io::{CurveLookup, Persist};
pub use region::Region;
pub use segment::{Mask, Segment, Span};
pub use traits::CurveOps;
