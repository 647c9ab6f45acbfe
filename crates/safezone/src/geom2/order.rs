//! Angular ordering of hull vertices into a ring.
//!
//! The reference vertex is the lowest point (ties: leftmost). Every other
//! vertex is sorted by `atan2(dy, dx)` from it; since the reference is
//! lowest, all angles fall in `[0, π)` and the ring winds counter-clockwise.

use super::hull::{cmp_f64, lowest_then_leftmost, nearer_on_ray};
use super::predicates::all_collinear;
use super::types::{Hull, Point2, SafeZone, ZoneError};

/// Polar angle of `p` seen from `reference`, in `(-π, π]`.
#[inline]
pub fn polar_angle(reference: Point2, p: Point2) -> f64 {
    let d = p - reference;
    if d.x.is_finite() && d.y.is_finite() {
        d.y.atan2(d.x)
    } else {
        // Difference overflowed; halve both ends first.
        let h = p * 0.5 - reference * 0.5;
        h.y.atan2(h.x)
    }
}

/// Order hull vertices into a closed ring starting at the reference vertex.
///
/// Equal angles only occur when the small-set policy kept a marker on a
/// boundary edge. Such groups are sorted nearest first, except the last
/// group (the closing edge), which is sorted farthest first.
pub fn order_ring(hull: &Hull) -> Result<SafeZone, ZoneError> {
    let pts = hull.vertices();
    if pts.len() < 3 {
        return Err(ZoneError::InsufficientPoints {
            distinct: pts.len(),
        });
    }
    if all_collinear(pts) {
        return Err(ZoneError::DegenerateGeometry);
    }
    let Some(r) = lowest_then_leftmost(pts) else {
        return Err(ZoneError::InsufficientPoints { distinct: 0 });
    };
    let reference = pts[r];

    // (angle, point)
    let mut rest: Vec<(f64, Point2)> = pts
        .iter()
        .enumerate()
        .filter(|(i, _)| *i != r)
        .map(|(_, p)| (polar_angle(reference, *p), *p))
        .collect();
    rest.sort_by(|a, b| cmp_f64(a.0, b.0).then(nearer_on_ray(&a.1, &b.1)));

    if let Some(&(last_angle, _)) = rest.last() {
        let start = rest
            .iter()
            .rposition(|e| e.0 != last_angle)
            .map_or(0, |i| i + 1);
        if start > 0 {
            rest[start..].reverse();
        }
    }

    let mut ring = Vec::with_capacity(pts.len());
    ring.push(reference);
    ring.extend(rest.into_iter().map(|(_, p)| p));
    Ok(SafeZone { ring })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom2::hull::build_hull;
    use nalgebra::vector;

    #[test]
    fn reference_tie_prefers_smaller_x() {
        let hull = build_hull(&[
            vector![4.0, 0.0],
            vector![0.0, 0.0],
            vector![4.0, 3.0],
            vector![0.0, 3.0],
        ])
        .unwrap();
        let zone = order_ring(&hull).unwrap();
        assert_eq!(zone.reference(), vector![0.0, 0.0]);
        assert_eq!(
            zone.ring(),
            &[
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![4.0, 3.0],
                vector![0.0, 3.0]
            ]
        );
    }

    #[test]
    fn collinear_markers_kept_by_small_set_stay_simple() {
        // (2,0) lies on the first edge.
        let hull = build_hull(&[
            vector![0.0, 4.0],
            vector![2.0, 0.0],
            vector![0.0, 0.0],
            vector![4.0, 0.0],
        ])
        .unwrap();
        let zone = order_ring(&hull).unwrap();
        assert_eq!(
            zone.ring(),
            &[
                vector![0.0, 0.0],
                vector![2.0, 0.0],
                vector![4.0, 0.0],
                vector![0.0, 4.0]
            ]
        );
        assert!(zone.signed_area() > 0.0);
    }

    #[test]
    fn closing_edge_group_runs_farthest_first() {
        let hull = Hull {
            vertices: vec![
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![0.0, 1.0],
                vector![0.0, 3.0],
            ],
        };
        let zone = order_ring(&hull).unwrap();
        assert_eq!(
            zone.ring(),
            &[
                vector![0.0, 0.0],
                vector![4.0, 0.0],
                vector![0.0, 3.0],
                vector![0.0, 1.0]
            ]
        );
    }

    #[test]
    fn rejects_short_and_flat_hulls() {
        let two = Hull {
            vertices: vec![vector![0.0, 0.0], vector![1.0, 0.0]],
        };
        assert_eq!(
            order_ring(&two),
            Err(ZoneError::InsufficientPoints { distinct: 2 })
        );
        let flat = Hull {
            vertices: vec![vector![0.0, 0.0], vector![1.0, 0.0], vector![2.0, 0.0]],
        };
        assert_eq!(order_ring(&flat), Err(ZoneError::DegenerateGeometry));
    }
}
