//! Property tests for the hull → ring → containment pipeline.

use proptest::prelude::*;
use safezone::geom2::{
    build_hull, build_hull_with, classify_with, order_ring, polar_angle, CrossingNumber,
    GrahamScan, MonotoneChain, WindingNumber, SMALL_SET_MAX,
};
use safezone::{Containment, Point2, SafeZone, Vec2, ZoneCfg, ZoneError};

/// Small integer grid: duplicates, collinear runs, and ties are common.
fn grid_markers() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((-12i32..=12, -12i32..=12), 0..40).prop_map(|v| {
        v.into_iter()
            .map(|(x, y)| Vec2::new(x as f64, y as f64))
            .collect()
    })
}

fn float_markers() -> impl Strategy<Value = Vec<Point2>> {
    prop::collection::vec((-1.0e3..1.0e3f64, -1.0e3..1.0e3f64), 3..60)
        .prop_map(|v| v.into_iter().map(|(x, y)| Vec2::new(x, y)).collect())
}

fn query() -> impl Strategy<Value = Point2> {
    (-15.0..15.0f64, -15.0..15.0f64).prop_map(|(x, y)| Vec2::new(x, y))
}

fn distinct_count(pts: &[Point2]) -> usize {
    let mut v: Vec<Point2> = Vec::new();
    for p in pts {
        if !v.contains(p) {
            v.push(*p);
        }
    }
    v.len()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn no_marker_outside_its_zone(pts in grid_markers()) {
        let Ok(hull) = build_hull(&pts) else { return Ok(()); };
        let zone = order_ring(&hull).unwrap();
        for p in &pts {
            let c = zone.classify(*p).unwrap();
            prop_assert!(hull.contains_vertex(p) || c != Containment::Outside);
        }
    }

    #[test]
    fn ring_angles_non_decreasing(pts in float_markers()) {
        let Ok(zone) = SafeZone::from_markers(&pts) else { return Ok(()); };
        let r = zone.reference();
        let angles: Vec<f64> = zone.ring()[1..].iter().map(|p| polar_angle(r, *p)).collect();
        for w in angles.windows(2) {
            prop_assert!(w[0] <= w[1]);
        }
        prop_assert!(angles.iter().all(|a| (0.0..std::f64::consts::PI).contains(a)));
        // The small-set policy may keep an interior marker.
        if distinct_count(&pts) > SMALL_SET_MAX {
            prop_assert!(zone.is_convex());
        }
    }

    #[test]
    fn every_vertex_is_on_boundary(pts in grid_markers()) {
        let Ok(zone) = SafeZone::from_markers(&pts) else { return Ok(()); };
        for v in zone.ring() {
            prop_assert_eq!(zone.classify(*v), Ok(Containment::OnBoundary));
        }
    }

    #[test]
    fn pipeline_is_deterministic(pts in float_markers()) {
        let a = build_hull(&pts).and_then(|h| order_ring(&h));
        let b = build_hull(&pts).and_then(|h| order_ring(&h));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn hull_strategies_agree(pts in grid_markers()) {
        let a = SafeZone::from_markers_with(&MonotoneChain, &pts);
        let b = SafeZone::from_markers_with(&GrahamScan, &pts);
        prop_assert_eq!(a, b);
    }

    #[test]
    fn containment_strategies_agree(
        pts in grid_markers(),
        qs in prop::collection::vec(query(), 1..20)
    ) {
        let Ok(zone) = SafeZone::from_markers(&pts) else { return Ok(()); };
        let cfg = ZoneCfg::default();
        for q in qs {
            let a = classify_with(&CrossingNumber, &zone, q, &cfg).unwrap();
            let b = classify_with(&WindingNumber, &zone, q, &cfg).unwrap();
            prop_assert_eq!(a, b);
        }
    }

    #[test]
    fn power_of_two_scaling_preserves_verdicts(
        pts in grid_markers(),
        qs in prop::collection::vec(((-30i32..=30), (-30i32..=30)), 1..20),
        k in -1000i32..=1000
    ) {
        let s = 2f64.powi(k);
        let scaled: Vec<Point2> = pts.iter().map(|p| p * s).collect();
        let base = SafeZone::from_markers(&pts);
        let big = SafeZone::from_markers(&scaled);
        let (base, big) = match (base, big) {
            (Ok(a), Ok(b)) => (a, b),
            (a, b) => {
                prop_assert_eq!(a.err(), b.err());
                return Ok(());
            }
        };
        let expect: Vec<Point2> = base.ring().iter().map(|p| p * s).collect();
        prop_assert_eq!(big.ring(), expect.as_slice());
        for (x, y) in qs {
            let q = Vec2::new(x as f64 * 0.5, y as f64 * 0.5);
            prop_assert_eq!(base.classify(q), big.classify(q * s));
        }
    }

    #[test]
    fn errors_follow_distinct_count(pts in grid_markers()) {
        let n = distinct_count(&pts);
        match build_hull_with(&MonotoneChain, &pts) {
            Err(ZoneError::InsufficientPoints { distinct }) => {
                prop_assert!(n < 3);
                prop_assert_eq!(distinct, n);
            }
            Err(ZoneError::DegenerateGeometry) => prop_assert!(n >= 3),
            Err(ZoneError::InvalidCoordinate { .. }) => prop_assert!(false, "grid is finite"),
            Ok(hull) => {
                prop_assert!(n >= 3);
                if n <= SMALL_SET_MAX {
                    prop_assert_eq!(hull.len(), n);
                } else {
                    prop_assert!(hull.len() <= n);
                }
            }
        }
    }
}
