//! Plain serde records for persisted geometry.
//!
//! Points are stored as `[x, y]` pairs. Composite records reference child
//! curves by id only; resolving them is the caller's job.

use crate::aabb::Aabb;
use crate::config::SamplingConfig;
use crate::curve::CombineOp;
use crate::float_types::Real;
use nalgebra::{Point2, Vector2};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One `coefficient · x^x · y^y` term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TermRecord {
    pub x: u32,
    pub y: u32,
    pub coefficient: Real,
}

/// Box with `None` standing for an infinite side, so records stay valid JSON.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AabbRecord {
    pub min_x: Option<Real>,
    pub min_y: Option<Real>,
    pub max_x: Option<Real>,
    pub max_y: Option<Real>,
}

impl From<&Aabb> for AabbRecord {
    fn from(b: &Aabb) -> Self {
        let finite = |v: Real| v.is_finite().then_some(v);
        Self {
            min_x: finite(b.mins.x),
            min_y: finite(b.mins.y),
            max_x: finite(b.maxs.x),
            max_y: finite(b.maxs.y),
        }
    }
}

impl From<&AabbRecord> for Aabb {
    fn from(r: &AabbRecord) -> Self {
        Aabb::new(
            Point2::new(
                r.min_x.unwrap_or(Real::NEG_INFINITY),
                r.min_y.unwrap_or(Real::NEG_INFINITY),
            ),
            Point2::new(
                r.max_x.unwrap_or(Real::INFINITY),
                r.max_y.unwrap_or(Real::INFINITY),
            ),
        )
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CurveRecord {
    Algebraic {
        id: Uuid,
        terms: Vec<TermRecord>,
    },
    /// The callback itself is not stored.
    Procedural {
        id: Uuid,
        name: String,
        bounds: AabbRecord,
    },
    Combinator {
        id: Uuid,
        op: CombineOp,
        smoothing: Real,
        left: Uuid,
        right: Uuid,
    },
    Segment {
        id: Uuid,
        segment: SegmentRecord,
    },
}

impl CurveRecord {
    pub const fn id(&self) -> Uuid {
        match self {
            CurveRecord::Algebraic { id, .. }
            | CurveRecord::Procedural { id, .. }
            | CurveRecord::Combinator { id, .. }
            | CurveRecord::Segment { id, .. } => *id,
        }
    }

    /// Ids of the curves this record refers to.
    pub fn references(&self) -> Vec<Uuid> {
        match self {
            CurveRecord::Algebraic { .. } | CurveRecord::Procedural { .. } => Vec::new(),
            CurveRecord::Combinator { left, right, .. } => vec![*left, *right],
            CurveRecord::Segment { segment, .. } => vec![segment.base],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaskRecord {
    Full,
    HalfPlane { normal: [Real; 2], offset: Real },
    Rectangle { bounds: AabbRecord },
    Between { start: [Real; 2], end: [Real; 2] },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SpanRecord {
    Linear {
        start: [Real; 2],
        end: [Real; 2],
    },
    Conic {
        center: [Real; 2],
        semi_axes: [Real; 2],
        start_param: Real,
        sweep: Real,
        start: [Real; 2],
        end: [Real; 2],
    },
    Traced {
        path: Vec<[Real; 2]>,
        proximity: Real,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentRecord {
    /// Id of the base curve.
    pub base: Uuid,
    pub mask: MaskRecord,
    pub span: SpanRecord,
    pub samples: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoundaryRecord {
    pub segments: Vec<SegmentRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionRecord {
    pub outer: BoundaryRecord,
    pub holes: Vec<BoundaryRecord>,
    pub config: SamplingConfig,
}

#[inline]
pub(crate) fn pair(p: &Point2<Real>) -> [Real; 2] {
    [p.x, p.y]
}

#[inline]
pub(crate) fn point(a: &[Real; 2]) -> Point2<Real> {
    Point2::new(a[0], a[1])
}

#[inline]
pub(crate) fn vector(a: &[Real; 2]) -> Vector2<Real> {
    Vector2::new(a[0], a[1])
}
