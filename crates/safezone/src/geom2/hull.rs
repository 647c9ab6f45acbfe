//! Convex hull of boundary markers.
//!
//! `build_hull` validates input, collapses exact duplicates, rejects
//! degenerate sets, applies the small-set policy (≤ 4 distinct markers are
//! all kept), and otherwise delegates to a `ConvexHull` strategy.
//!
//! Strategies return strict hulls: only extreme vertices, collinear edge
//! points dropped, counter-clockwise order.

use std::cmp::Ordering;
use std::collections::HashSet;

use super::predicates::{all_collinear, orient2d};
use super::types::{Hull, Point2, ZoneError};

/// Distinct marker counts at or below this are taken as the hull unchanged.
pub const SMALL_SET_MAX: usize = 4;

/// Strategy seam for hull algorithms.
pub trait ConvexHull {
    /// Pre: `points` are finite, pairwise distinct, and not all collinear.
    /// Post: strict extreme vertices in counter-clockwise order.
    fn extreme_points(&self, points: &[Point2]) -> Vec<Point2>;
}

/// Andrew's monotone chain. O(n log n).
#[derive(Clone, Copy, Debug, Default)]
pub struct MonotoneChain;

/// Graham scan around the lowest (then leftmost) point. O(n log n).
#[derive(Clone, Copy, Debug, Default)]
pub struct GrahamScan;

impl ConvexHull for MonotoneChain {
    fn extreme_points(&self, points: &[Point2]) -> Vec<Point2> {
        let mut pts: Vec<Point2> = points.to_vec();
        pts.sort_by(lexicographic);
        if pts.len() < 3 {
            return pts;
        }
        let mut lower: Vec<Point2> = Vec::with_capacity(pts.len());
        for p in &pts {
            while lower.len() >= 2
                && orient2d(lower[lower.len() - 2], lower[lower.len() - 1], *p) <= 0.0
            {
                lower.pop();
            }
            lower.push(*p);
        }
        let mut upper: Vec<Point2> = Vec::with_capacity(pts.len());
        for p in pts.iter().rev() {
            while upper.len() >= 2
                && orient2d(upper[upper.len() - 2], upper[upper.len() - 1], *p) <= 0.0
            {
                upper.pop();
            }
            upper.push(*p);
        }
        lower.pop();
        upper.pop();
        let mut hull = lower;
        hull.extend(upper);
        hull
    }
}

impl ConvexHull for GrahamScan {
    fn extreme_points(&self, points: &[Point2]) -> Vec<Point2> {
        let Some(pivot_idx) = lowest_then_leftmost(points) else {
            return Vec::new();
        };
        let pivot = points[pivot_idx];
        let mut rest: Vec<Point2> = points
            .iter()
            .enumerate()
            .filter(|(i, _)| *i != pivot_idx)
            .map(|(_, p)| *p)
            .collect();
        // Every other point is above the pivot or to its right on the same
        // row, so the orientation sign is a total order on angles.
        rest.sort_by(|a, b| {
            let o = orient2d(pivot, *a, *b);
            if o > 0.0 {
                Ordering::Less
            } else if o < 0.0 {
                Ordering::Greater
            } else {
                nearer_on_ray(a, b)
            }
        });
        let mut stack: Vec<Point2> = Vec::with_capacity(points.len());
        stack.push(pivot);
        for p in rest {
            while stack.len() >= 2
                && orient2d(stack[stack.len() - 2], stack[stack.len() - 1], p) <= 0.0
            {
                stack.pop();
            }
            stack.push(p);
        }
        stack
    }
}

/// Hull with the default strategy (`MonotoneChain`).
pub fn build_hull(points: &[Point2]) -> Result<Hull, ZoneError> {
    build_hull_with(&MonotoneChain, points)
}

/// Validate, deduplicate, apply the small-set policy, then run `algo`.
///
/// Errors, checked in this order:
/// - `InvalidCoordinate` for the first NaN/∞ coordinate.
/// - `InsufficientPoints` when fewer than 3 distinct points remain.
/// - `DegenerateGeometry` when all distinct points are collinear.
pub fn build_hull_with<H: ConvexHull + ?Sized>(
    algo: &H,
    points: &[Point2],
) -> Result<Hull, ZoneError> {
    check_finite(points)?;
    let distinct = dedup_exact(points);
    if distinct.len() < 3 {
        return Err(ZoneError::InsufficientPoints {
            distinct: distinct.len(),
        });
    }
    if all_collinear(&distinct) {
        return Err(ZoneError::DegenerateGeometry);
    }
    if distinct.len() <= SMALL_SET_MAX {
        return Ok(Hull { vertices: distinct });
    }
    let vertices = algo.extreme_points(&distinct);
    debug_assert!(vertices.len() >= 3, "strict hull of non-collinear set");
    Ok(Hull { vertices })
}

/// Index of the first point with a non-finite coordinate, as an error.
pub(crate) fn check_finite(points: &[Point2]) -> Result<(), ZoneError> {
    match points
        .iter()
        .position(|p| !(p.x.is_finite() && p.y.is_finite()))
    {
        Some(index) => Err(ZoneError::InvalidCoordinate { index }),
        None => Ok(()),
    }
}

/// Drop exact duplicates, keeping first occurrences in input order.
fn dedup_exact(points: &[Point2]) -> Vec<Point2> {
    // `+ 0.0` folds -0.0 into 0.0 so the bit key matches float equality.
    let key = |p: &Point2| ((p.x + 0.0).to_bits(), (p.y + 0.0).to_bits());
    let mut seen: HashSet<(u64, u64)> = HashSet::with_capacity(points.len());
    points.iter().filter(|p| seen.insert(key(*p))).copied().collect()
}

#[inline]
fn lexicographic(a: &Point2, b: &Point2) -> Ordering {
    cmp_f64(a.x, b.x).then(cmp_f64(a.y, b.y))
}

/// Numeric order for finite values (`-0.0 == 0.0`).
#[inline]
pub(crate) fn cmp_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Order of two points on one ray leaving the lowest-then-leftmost point,
/// nearest first. The ray rises or runs along +x, so comparing (y, x)
/// orders by distance without computing one.
#[inline]
pub(crate) fn nearer_on_ray(a: &Point2, b: &Point2) -> Ordering {
    cmp_f64(a.y, b.y).then(cmp_f64(a.x, b.x))
}

/// Position of the point with smallest y, ties broken by smallest x.
pub(crate) fn lowest_then_leftmost(points: &[Point2]) -> Option<usize> {
    points
        .iter()
        .enumerate()
        .min_by(|(_, a), (_, b)| cmp_f64(a.y, b.y).then(cmp_f64(a.x, b.x)))
        .map(|(i, _)| i)
}
