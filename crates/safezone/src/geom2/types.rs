//! Basic 2D types for the safe-zone pipeline.
//!
//! - `Point2`: exact-coordinate 2D point (nalgebra column vector).
//! - `ZoneCfg`: caller-supplied tolerances; exact by default.
//! - `Hull`, `SafeZone`: derived artifacts of the hull and ordering stages.
//! - `Containment`, `ZoneError`: query verdicts and typed failures.
//!
//! Code cross-refs: `hull::build_hull`, `order::order_ring`, `contain::classify`

use std::fmt;

use nalgebra::Vector2;

use super::predicates::orient2d;

/// A boundary marker or query position. Equality is exact.
pub type Point2 = Vector2<f64>;

/// Containment configuration (tolerances).
///
/// `boundary_eps` is the largest distance from an edge at which a query is
/// still reported as `OnBoundary`. Zero keeps every comparison exact.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoneCfg {
    pub boundary_eps: f64,
}

impl Default for ZoneCfg {
    fn default() -> Self {
        Self { boundary_eps: 0.0 }
    }
}

impl ZoneCfg {
    /// Config with a fuzz tolerance around every edge. Negative or non-finite
    /// values fall back to exact comparisons.
    pub fn with_boundary_eps(eps: f64) -> Self {
        let boundary_eps = if eps.is_finite() && eps > 0.0 { eps } else { 0.0 };
        Self { boundary_eps }
    }
}

/// Three-way verdict for a query point against a zone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Containment {
    Inside,
    OnBoundary,
    Outside,
}

impl Containment {
    /// Boundary-resident points count as safe (inclusive containment).
    #[inline]
    pub fn is_safe(self) -> bool {
        !matches!(self, Containment::Outside)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Containment::Inside => "Inside",
            Containment::OnBoundary => "OnBoundary",
            Containment::Outside => "Outside",
        }
    }
}

impl fmt::Display for Containment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors surfaced while building a zone or classifying against it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ZoneError {
    /// Fewer than three distinct boundary points.
    InsufficientPoints { distinct: usize },
    /// All boundary points lie on one line (zero-area hull).
    DegenerateGeometry,
    /// A NaN or infinite coordinate at position `index` of the input.
    InvalidCoordinate { index: usize },
}

impl fmt::Display for ZoneError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ZoneError::InsufficientPoints { distinct } => write!(
                f,
                "need at least 3 distinct boundary points, got {distinct}"
            ),
            ZoneError::DegenerateGeometry => {
                write!(f, "boundary points are collinear (zero-area hull)")
            }
            ZoneError::InvalidCoordinate { index } => {
                write!(f, "point {index} has a non-finite coordinate")
            }
        }
    }
}

impl std::error::Error for ZoneError {}

/// Extreme points of a marker set, in the order the hull stage produced them.
///
/// Invariants (established by `build_hull`):
/// - At least 3 points, pairwise distinct, not all collinear.
/// - Finite coordinates.
#[derive(Clone, Debug, PartialEq)]
pub struct Hull {
    pub(crate) vertices: Vec<Point2>,
}

impl Hull {
    #[inline]
    pub fn vertices(&self) -> &[Point2] {
        &self.vertices
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
    /// Exact membership of `p` in the vertex set.
    pub fn contains_vertex(&self, p: &Point2) -> bool {
        self.vertices.iter().any(|v| v == p)
    }
    pub fn into_vertices(self) -> Vec<Point2> {
        self.vertices
    }
}

/// Closed simple polygon used as the safety perimeter.
///
/// Invariants (established by `order_ring`):
/// - `ring[0]` is the reference vertex (lowest y, then lowest x).
/// - Remaining vertices follow in non-decreasing angle from the reference,
///   i.e. counter-clockwise.
/// - The closing edge `ring[k-1] → ring[0]` is implied; the reference is not
///   repeated.
#[derive(Clone, Debug, PartialEq)]
pub struct SafeZone {
    pub(crate) ring: Vec<Point2>,
}

impl SafeZone {
    #[inline]
    pub fn ring(&self) -> &[Point2] {
        &self.ring
    }
    #[inline]
    pub fn reference(&self) -> Point2 {
        self.ring[0]
    }
    #[inline]
    pub fn len(&self) -> usize {
        self.ring.len()
    }
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.ring.is_empty()
    }

    /// Edges `(ring[i], ring[i+1])`, ending with the closing edge back to the reference.
    pub fn edges(&self) -> impl Iterator<Item = (Point2, Point2)> + '_ {
        let k = self.ring.len();
        (0..k).map(move |i| (self.ring[i], self.ring[(i + 1) % k]))
    }

    /// Ring with the reference repeated at the end, as polyline renderers expect.
    pub fn closed_ring(&self) -> Vec<Point2> {
        let mut out = Vec::with_capacity(self.ring.len() + 1);
        out.extend_from_slice(&self.ring);
        out.push(self.ring[0]);
        out
    }

    /// Shoelace area; positive for the counter-clockwise ring.
    pub fn signed_area(&self) -> f64 {
        let twice: f64 = self.edges().map(|(p, q)| p.x * q.y - q.x * p.y).sum();
        0.5 * twice
    }

    /// True when every turn of the ring is a left turn or straight.
    pub fn is_convex(&self) -> bool {
        let k = self.ring.len();
        (0..k).all(|i| {
            orient2d(self.ring[i], self.ring[(i + 1) % k], self.ring[(i + 2) % k]) >= 0.0
        })
    }
}
