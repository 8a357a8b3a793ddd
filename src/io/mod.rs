//! Persistence of curves, segments, boundaries and regions as serde records.
//!
//! Records never embed child curves: combinators and segments store the ids of
//! the curves they use, and deserialization resolves those ids through a
//! caller-supplied [`CurveLookup`]. [`export_curves`] and [`import_curves`]
//! handle a whole curve graph at once, children before parents.
//!
//! Two things do not survive a round trip:
//! - procedural curves keep their name and bounds only
//! - custom segment masks cannot be serialized at all

pub mod lookup;
pub mod persist;
pub mod records;

pub use lookup::CurveLookup;
pub use persist::Persist;
pub use records::{
    AabbRecord, BoundaryRecord, CurveRecord, MaskRecord, RegionRecord, SegmentRecord, SpanRecord,
    TermRecord,
};

use crate::curve::{Curve, CurveKind};
use crate::errors::GeometryError;
use crate::region::Region;
use hashbrown::{HashMap, HashSet};
use lookup::Chained;
use std::sync::Arc;
use uuid::Uuid;

/// Records for `roots` and every curve they depend on, each once, with every
/// curve listed after the curves it references.
pub fn export_curves(roots: &[Arc<Curve>]) -> Result<Vec<CurveRecord>, GeometryError> {
    fn visit(
        curve: &Arc<Curve>,
        seen: &mut HashSet<Uuid>,
        out: &mut Vec<CurveRecord>,
    ) -> Result<(), GeometryError> {
        if !seen.insert(curve.id()) {
            return Ok(());
        }
        match curve.kind() {
            CurveKind::Combinator(c) => {
                visit(c.left(), seen, out)?;
                visit(c.right(), seen, out)?;
            },
            CurveKind::Segment(s) => visit(s.base(), seen, out)?,
            CurveKind::Algebraic(_) | CurveKind::Procedural(_) => {},
        }
        out.push(curve.serialize()?);
        Ok(())
    }

    let mut seen = HashSet::new();
    let mut out = Vec::new();
    for root in roots {
        visit(root, &mut seen, &mut out)?;
    }
    Ok(out)
}

/// Rebuilds a curve graph from `records`, in any order.
///
/// References are resolved against curves built earlier in the same call,
/// then against `known`, which is also where live procedural curves are found.
///
/// ## Errors
/// [`GeometryError::UnresolvedReference`] when some record refers to an id
/// neither set provides, or whatever error the offending record raises.
pub fn import_curves(
    records: &[CurveRecord],
    known: &dyn CurveLookup,
) -> Result<HashMap<Uuid, Arc<Curve>>, GeometryError> {
    let mut built: HashMap<Uuid, Arc<Curve>> = HashMap::with_capacity(records.len());
    let mut pending: Vec<&CurveRecord> = records.iter().collect();

    while !pending.is_empty() {
        let before = pending.len();
        let mut deferred = Vec::new();
        for record in pending {
            let ready = record
                .references()
                .iter()
                .all(|id| built.contains_key(id) || known.resolve(id).is_some());
            if ready {
                let lookup = Chained {
                    first: &built,
                    second: known,
                };
                let curve = <Arc<Curve> as Persist>::deserialize(record, &lookup)?;
                built.insert(record.id(), curve);
            } else {
                deferred.push(record);
            }
        }
        if deferred.len() == before {
            // No progress: surface the first stuck record's own error.
            let lookup = Chained {
                first: &built,
                second: known,
            };
            let stuck = deferred[0];
            return match <Arc<Curve> as Persist>::deserialize(stuck, &lookup) {
                Err(e) => Err(e),
                Ok(_) => Err(GeometryError::UnresolvedReference(stuck.id())),
            };
        }
        pending = deferred;
    }

    log::debug!("imported {} curves", built.len());
    Ok(built)
}

/// Base curves of every segment in `region`, each once, in traversal order.
pub fn region_curves(region: &Region) -> Vec<Arc<Curve>> {
    let mut seen = HashSet::new();
    std::iter::once(region.outer())
        .chain(region.holes())
        .flat_map(|b| b.segments())
        .map(|s| s.base())
        .filter(|base| seen.insert(base.id()))
        .cloned()
        .collect()
}
