//! Point-in-zone classification.
//!
//! Boundary detection runs first and is shared by all strategies: a query on
//! any edge (vertices and the closing edge included) is `OnBoundary`. Only
//! off-boundary queries reach the `PointInPolygon` strategy, which then
//! never has to resolve a point lying exactly on an edge line.
//!
//! Both strategies use the half-open rule `a.y <= q.y < b.y` per edge and
//! decide the side of the crossing with `orient2d`, so no intersection
//! coordinate is ever computed.

use super::predicates::{on_segment, orient2d, segment_dist};
use super::types::{Containment, Point2, SafeZone, ZoneCfg, ZoneError};

/// Strategy seam for containment tests.
pub trait PointInPolygon {
    /// Whether `q` is enclosed by the closed `ring`.
    ///
    /// Pre: `q` is not on the ring boundary.
    fn encloses(&self, ring: &[Point2], q: Point2) -> bool;
}

/// Ray casting to +x (even-odd rule).
#[derive(Clone, Copy, Debug, Default)]
pub struct CrossingNumber;

/// Signed winding number (non-zero rule).
#[derive(Clone, Copy, Debug, Default)]
pub struct WindingNumber;

impl PointInPolygon for CrossingNumber {
    fn encloses(&self, ring: &[Point2], q: Point2) -> bool {
        let k = ring.len();
        let mut inside = false;
        for i in 0..k {
            let a = ring[i];
            let b = ring[(i + 1) % k];
            if (a.y <= q.y) == (b.y <= q.y) {
                continue;
            }
            // Upward edges cross right of q when q is on their left; downward
            // edges when q is on their right.
            let o = orient2d(a, b, q);
            let crosses = if b.y > a.y { o > 0.0 } else { o < 0.0 };
            if crosses {
                inside = !inside;
            }
        }
        inside
    }
}

impl PointInPolygon for WindingNumber {
    fn encloses(&self, ring: &[Point2], q: Point2) -> bool {
        let k = ring.len();
        let mut wn: i64 = 0;
        for i in 0..k {
            let a = ring[i];
            let b = ring[(i + 1) % k];
            if a.y <= q.y {
                if b.y > q.y && orient2d(a, b, q) > 0.0 {
                    wn += 1;
                }
            } else if b.y <= q.y && orient2d(a, b, q) < 0.0 {
                wn -= 1;
            }
        }
        wn != 0
    }
}

/// Whether `q` lies on the ring boundary, within `eps` when positive.
pub fn on_boundary(ring: &[Point2], q: Point2, eps: f64) -> bool {
    let k = ring.len();
    if eps > 0.0 {
        (0..k).any(|i| segment_dist(ring[i], ring[(i + 1) % k], q) <= eps)
    } else {
        (0..k).any(|i| on_segment(ring[i], ring[(i + 1) % k], q))
    }
}

/// Classify with the default strategy (`CrossingNumber`) and exact boundaries.
pub fn classify(zone: &SafeZone, query: Point2) -> Result<Containment, ZoneError> {
    classify_with(&CrossingNumber, zone, query, &ZoneCfg::default())
}

/// Classify `query` against `zone` with an explicit strategy and config.
///
/// Errors: `InvalidCoordinate { index: 0 }` for a non-finite query.
pub fn classify_with<A: PointInPolygon + ?Sized>(
    algo: &A,
    zone: &SafeZone,
    query: Point2,
    cfg: &ZoneCfg,
) -> Result<Containment, ZoneError> {
    if !(query.x.is_finite() && query.y.is_finite()) {
        return Err(ZoneError::InvalidCoordinate { index: 0 });
    }
    Ok(locate(algo, zone.ring(), query, cfg.boundary_eps))
}

/// Classify a batch of queries. Fails on the first non-finite query, reported by index.
pub fn classify_all_with<A: PointInPolygon + ?Sized>(
    algo: &A,
    zone: &SafeZone,
    queries: &[Point2],
    cfg: &ZoneCfg,
) -> Result<Vec<Containment>, ZoneError> {
    super::hull::check_finite(queries)?;
    Ok(queries
        .iter()
        .map(|q| locate(algo, zone.ring(), *q, cfg.boundary_eps))
        .collect())
}

/// Batch variant of `classify`.
pub fn classify_all(zone: &SafeZone, queries: &[Point2]) -> Result<Vec<Containment>, ZoneError> {
    classify_all_with(&CrossingNumber, zone, queries, &ZoneCfg::default())
}

#[inline]
fn locate<A: PointInPolygon + ?Sized>(
    algo: &A,
    ring: &[Point2],
    q: Point2,
    eps: f64,
) -> Containment {
    if on_boundary(ring, q, eps) {
        Containment::OnBoundary
    } else if algo.encloses(ring, q) {
        Containment::Inside
    } else {
        Containment::Outside
    }
}
