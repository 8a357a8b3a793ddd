//! Conversions between live geometry and its records.

use crate::boundary::Boundary;
use crate::curve::{CombineOp, Combinator, Curve, CurveKind, Polynomial, Procedural};
use crate::errors::GeometryError;
use crate::io::lookup::CurveLookup;
use crate::io::records::{
    AabbRecord, BoundaryRecord, CurveRecord, MaskRecord, RegionRecord, SegmentRecord, SpanRecord,
    TermRecord, pair, point, vector,
};
use crate::region::Region;
use crate::segment::{Mask, Segment, Span};
use std::sync::Arc;
use uuid::Uuid;

/// Round trip through a serde record.
///
/// `deserialize` resolves referenced curves through `lookup` and never
/// rebuilds them from nested data.
pub trait Persist: Sized {
    type Record;

    fn serialize(&self) -> Result<Self::Record, GeometryError>;

    fn deserialize(record: &Self::Record, lookup: &dyn CurveLookup) -> Result<Self, GeometryError>;
}

fn resolve(lookup: &dyn CurveLookup, id: Uuid) -> Result<Arc<Curve>, GeometryError> {
    lookup.resolve(&id).ok_or(GeometryError::UnresolvedReference(id))
}

impl Persist for Arc<Curve> {
    type Record = CurveRecord;

    /// Procedural curves become a placeholder record; see
    /// [`CurveRecord::Procedural`].
    fn serialize(&self) -> Result<CurveRecord, GeometryError> {
        let id = self.id();
        Ok(match self.kind() {
            CurveKind::Algebraic(p) => CurveRecord::Algebraic {
                id,
                terms: p
                    .terms()
                    .into_iter()
                    .map(|((x, y), coefficient)| TermRecord { x, y, coefficient })
                    .collect(),
            },
            CurveKind::Procedural(p) => CurveRecord::Procedural {
                id,
                name: p.name().to_owned(),
                bounds: AabbRecord::from(&p.bounds()),
            },
            CurveKind::Combinator(c) => CurveRecord::Combinator {
                id,
                op: c.op(),
                smoothing: c.smoothing(),
                left: c.left().id(),
                right: c.right().id(),
            },
            CurveKind::Segment(s) => CurveRecord::Segment {
                id,
                segment: s.serialize()?,
            },
        })
    }

    /// A procedural record resolves to the live curve with the same id when
    /// `lookup` has one; otherwise it becomes a placeholder that evaluates to
    /// NaN.
    fn deserialize(record: &CurveRecord, lookup: &dyn CurveLookup) -> Result<Self, GeometryError> {
        let id = record.id();
        if record.references().contains(&id) {
            return Err(GeometryError::InvalidExpression(format!(
                "curve {id} references itself"
            )));
        }

        let kind = match record {
            CurveRecord::Algebraic { terms, .. } => CurveKind::Algebraic(Polynomial::new(
                terms.iter().map(|t| ((t.x, t.y), t.coefficient)),
            )?),
            CurveRecord::Procedural { name, bounds, .. } => {
                if let Some(live) = lookup.resolve(&id) {
                    log::debug!("procedural curve '{name}' resolved to live curve {id}");
                    return Ok(live);
                }
                log::warn!("procedural curve '{name}' ({id}) restored as a placeholder");
                CurveKind::Procedural(Procedural::placeholder(name.clone(), bounds.into()))
            },
            CurveRecord::Combinator {
                op,
                smoothing,
                left,
                right,
                ..
            } => {
                if !smoothing.is_finite() || *smoothing < 0.0 {
                    return Err(GeometryError::InvalidExpression(format!(
                        "combinator smoothing must be a non-negative real, got {smoothing}"
                    )));
                }
                CurveKind::Combinator(Combinator {
                    left: resolve(lookup, *left)?,
                    right: resolve(lookup, *right)?,
                    op: *op,
                    smoothing: if *op == CombineOp::Blend { *smoothing } else { 0.0 },
                })
            },
            CurveRecord::Segment { segment, .. } => {
                CurveKind::Segment(Segment::deserialize(segment, lookup)?)
            },
        };
        Ok(Curve::with_id(id, kind))
    }
}

impl Persist for Mask {
    type Record = MaskRecord;

    /// ## Errors
    /// [`GeometryError::UnsupportedMask`] for custom predicates.
    fn serialize(&self) -> Result<MaskRecord, GeometryError> {
        Ok(match self {
            Mask::Full => MaskRecord::Full,
            Mask::HalfPlane { normal, offset } => MaskRecord::HalfPlane {
                normal: [normal.x, normal.y],
                offset: *offset,
            },
            Mask::Rectangle(bounds) => MaskRecord::Rectangle {
                bounds: bounds.into(),
            },
            Mask::Between { start, end } => MaskRecord::Between {
                start: pair(start),
                end: pair(end),
            },
            Mask::Custom(_) => {
                return Err(GeometryError::UnsupportedMask(
                    "custom predicates have no persistent form".into(),
                ));
            },
        })
    }

    fn deserialize(record: &MaskRecord, _lookup: &dyn CurveLookup) -> Result<Self, GeometryError> {
        Ok(match record {
            MaskRecord::Full => Mask::Full,
            MaskRecord::HalfPlane { normal, offset } => Mask::HalfPlane {
                normal: vector(normal),
                offset: *offset,
            },
            MaskRecord::Rectangle { bounds } => Mask::Rectangle(bounds.into()),
            MaskRecord::Between { start, end } => Mask::Between {
                start: point(start),
                end: point(end),
            },
        })
    }
}

fn span_record(span: &Span) -> SpanRecord {
    match span {
        Span::Linear { start, end } => SpanRecord::Linear {
            start: pair(start),
            end: pair(end),
        },
        Span::Conic {
            center,
            semi_axes,
            start_param,
            sweep,
            start,
            end,
        } => SpanRecord::Conic {
            center: pair(center),
            semi_axes: [semi_axes.x, semi_axes.y],
            start_param: *start_param,
            sweep: *sweep,
            start: pair(start),
            end: pair(end),
        },
        Span::Traced { path, proximity } => SpanRecord::Traced {
            path: path.iter().map(pair).collect(),
            proximity: *proximity,
        },
    }
}

fn span_from_record(record: &SpanRecord) -> Result<Span, GeometryError> {
    Ok(match record {
        SpanRecord::Linear { start, end } => Span::Linear {
            start: point(start),
            end: point(end),
        },
        SpanRecord::Conic {
            center,
            semi_axes,
            start_param,
            sweep,
            start,
            end,
        } => {
            if !(semi_axes[0] > 0.0 && semi_axes[1] > 0.0) {
                return Err(GeometryError::InvalidExpression(format!(
                    "conic span semi-axes must be positive, got {semi_axes:?}"
                )));
            }
            Span::Conic {
                center: point(center),
                semi_axes: vector(semi_axes),
                start_param: *start_param,
                sweep: *sweep,
                start: point(start),
                end: point(end),
            }
        },
        SpanRecord::Traced { path, proximity } => {
            if path.is_empty() {
                return Err(GeometryError::InvalidExpression(
                    "traced span has no vertices".into(),
                ));
            }
            Span::Traced {
                path: path.iter().map(point).collect(),
                proximity: *proximity,
            }
        },
    })
}

impl Persist for Segment {
    type Record = SegmentRecord;

    fn serialize(&self) -> Result<SegmentRecord, GeometryError> {
        Ok(SegmentRecord {
            base: self.base().id(),
            mask: self.mask().serialize()?,
            span: span_record(self.span()),
            samples: self.samples(),
        })
    }

    fn deserialize(record: &SegmentRecord, lookup: &dyn CurveLookup) -> Result<Self, GeometryError> {
        let base = resolve(lookup, record.base)?;
        let mask = Mask::deserialize(&record.mask, lookup)?;
        let span = span_from_record(&record.span)?;
        Ok(Segment::from_parts(&base, mask, span, record.samples))
    }
}

impl Persist for Boundary {
    type Record = BoundaryRecord;

    fn serialize(&self) -> Result<BoundaryRecord, GeometryError> {
        Ok(BoundaryRecord {
            segments: self
                .segments()
                .iter()
                .map(Persist::serialize)
                .collect::<Result<_, _>>()?,
        })
    }

    fn deserialize(record: &BoundaryRecord, lookup: &dyn CurveLookup) -> Result<Self, GeometryError> {
        let segments = record
            .segments
            .iter()
            .map(|s| Segment::deserialize(s, lookup))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Boundary::new(segments))
    }
}

impl Persist for Region {
    type Record = RegionRecord;

    fn serialize(&self) -> Result<RegionRecord, GeometryError> {
        Ok(RegionRecord {
            outer: self.outer().serialize()?,
            holes: self
                .holes()
                .iter()
                .map(Persist::serialize)
                .collect::<Result<_, _>>()?,
            config: *self.config(),
        })
    }

    /// ## Errors
    /// Besides unresolved references, [`GeometryError::OpenBoundary`] when a
    /// stored boundary no longer closes.
    fn deserialize(record: &RegionRecord, lookup: &dyn CurveLookup) -> Result<Self, GeometryError> {
        let outer = Boundary::deserialize(&record.outer, lookup)?;
        let holes = record
            .holes
            .iter()
            .map(|h| Boundary::deserialize(h, lookup))
            .collect::<Result<Vec<_>, _>>()?;
        Region::with_config(outer, holes, record.config)
    }
}
