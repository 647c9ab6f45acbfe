//! Orientation and segment predicates with exact signs.
//!
//! Inputs are first rescaled by a common power of two so the largest
//! coordinate lands in `[1, 2)`; the scaling is exact and keeps every sign,
//! so coordinates near the overflow or underflow limits behave like any
//! others. `orient2d` then evaluates the determinant in plain floating point
//! and accepts the result when it clears a forward error bound. Otherwise the
//! determinant is expanded into six products, each split exactly with
//! `mul_add`, and summed into a non-overlapping expansion whose leading
//! component carries the exact sign.
//!
//! Signs are exact for any finite inputs whose nonzero coordinates lie within
//! a factor `2^484` of the largest coordinate of the same call.

use super::types::Point2;

/// Relative error bound of the naive determinant, `(3 + 16ε)ε` with `ε = 2^-53`.
const CCW_ERR_BOUND: f64 = 3.330_669_073_875_471_6e-16;

/// Below this, the two naive products may have lost bits to underflow.
const FILTER_FLOOR: f64 = 1.0e-270;

const TWO_POW_54: f64 = 18_014_398_509_481_984.0;

/// `2^e` for a normal exponent.
#[inline]
fn pow2(e: i32) -> f64 {
    debug_assert!((-1022..=1023).contains(&e));
    f64::from_bits(((e + 1023) as u64) << 52)
}

/// `e` with `2^e <= m < 2^(e+1)`, for finite positive `m`.
fn exponent(m: f64) -> i32 {
    let biased = ((m.to_bits() >> 52) & 0x7ff) as i32;
    if biased == 0 {
        exponent(m * TWO_POW_54) - 54
    } else {
        biased - 1023
    }
}

/// Multiplication by `2^k`, split in two factors so `k` may reach ±1074.
#[derive(Clone, Copy, Debug)]
struct Pow2Scale(f64, f64);

impl Pow2Scale {
    fn by(k: i32) -> Self {
        let half = k / 2;
        Pow2Scale(pow2(half), pow2(k - half))
    }

    /// Scale that brings the largest coordinate of `pts` into `[1, 2)`;
    /// `None` when every coordinate is zero.
    fn normalizing(pts: &[Point2]) -> Option<(Self, i32)> {
        let m = pts
            .iter()
            .flat_map(|p| [p.x.abs(), p.y.abs()])
            .fold(0.0_f64, f64::max);
        if m == 0.0 {
            return None;
        }
        let e = exponent(m);
        Some((Pow2Scale::by(-e), e))
    }

    #[inline]
    fn apply(self, p: Point2) -> Point2 {
        p * self.0 * self.1
    }
}

#[inline]
fn two_sum(a: f64, b: f64) -> (f64, f64) {
    let s = a + b;
    let bb = s - a;
    let err = (a - (s - bb)) + (b - bb);
    (s, err)
}

#[inline]
fn two_prod(a: f64, b: f64) -> (f64, f64) {
    let p = a * b;
    let err = f64::mul_add(a, b, -p);
    (p, err)
}

/// Small fixed-capacity expansion (sum of non-overlapping doubles, increasing magnitude).
struct Expansion {
    terms: [f64; 12],
    len: usize,
}

impl Expansion {
    fn new() -> Self {
        Self {
            terms: [0.0; 12],
            len: 0,
        }
    }

    /// Shewchuk's grow-expansion with zero elimination.
    fn grow(&mut self, b: f64) {
        let mut q = b;
        let mut k = 0usize;
        for i in 0..self.len {
            let (s, h) = two_sum(q, self.terms[i]);
            q = s;
            if h != 0.0 {
                self.terms[k] = h;
                k += 1;
            }
        }
        self.terms[k] = q;
        self.len = k + 1;
    }

    fn sign(&self) -> f64 {
        self.terms[..self.len]
            .iter()
            .rev()
            .find(|t| **t != 0.0)
            .map_or(0.0, |t| t.signum())
    }
}

/// Orientation of `c` relative to the directed line `a → b`.
///
/// Positive for a left turn (counter-clockwise), negative for a right turn,
/// zero iff the three points are collinear. Only the sign is meaningful.
pub fn orient2d(a: Point2, b: Point2, c: Point2) -> f64 {
    let Some((s, _)) = Pow2Scale::normalizing(&[a, b, c]) else {
        return 0.0;
    };
    let (a, b, c) = (s.apply(a), s.apply(b), s.apply(c));
    let detleft = (b.x - a.x) * (c.y - a.y);
    let detright = (b.y - a.y) * (c.x - a.x);
    let det = detleft - detright;
    let detsum = detleft.abs() + detright.abs();
    let errbound = CCW_ERR_BOUND * detsum;
    if detsum >= FILTER_FLOOR && (det > errbound || -det > errbound) {
        return det;
    }
    orient2d_exact(a, b, c)
}

// (bx-ax)(cy-ay) - (by-ay)(cx-ax), with the ax*ay terms cancelled.
fn orient2d_exact(a: Point2, b: Point2, c: Point2) -> f64 {
    let products = [
        two_prod(b.x, c.y),
        two_prod(-b.x, a.y),
        two_prod(-a.x, c.y),
        two_prod(-b.y, c.x),
        two_prod(b.y, a.x),
        two_prod(a.y, c.x),
    ];
    let mut e = Expansion::new();
    for (p, err) in products {
        e.grow(err);
        e.grow(p);
    }
    e.sign()
}

/// `q` lies on the closed segment `[a, b]` (exact).
pub fn on_segment(a: Point2, b: Point2, q: Point2) -> bool {
    q.x >= a.x.min(b.x)
        && q.x <= a.x.max(b.x)
        && q.y >= a.y.min(b.y)
        && q.y <= a.y.max(b.y)
        && orient2d(a, b, q) == 0.0
}

/// Euclidean distance from `q` to the closed segment `[a, b]`.
///
/// Evaluated on rescaled coordinates, so it neither overflows for huge
/// inputs nor flushes to zero for tiny ones unless the result itself does.
pub fn segment_dist(a: Point2, b: Point2, q: Point2) -> f64 {
    let Some((s, e)) = Pow2Scale::normalizing(&[a, b, q]) else {
        return 0.0;
    };
    let (a, b, q) = (s.apply(a), s.apply(b), s.apply(q));
    let ab = b - a;
    let aq = q - a;
    let len2 = ab.norm_squared();
    let d = if len2 == 0.0 {
        aq.norm()
    } else {
        let t = (aq.dot(&ab) / len2).clamp(0.0, 1.0);
        (aq - ab * t).norm()
    };
    let back = Pow2Scale::by(e);
    d * back.0 * back.1
}

/// All points lie on a single line (exact). Empty and single-point inputs count as collinear.
pub fn all_collinear(points: &[Point2]) -> bool {
    let Some(&first) = points.first() else {
        return true;
    };
    let Some(&second) = points.iter().find(|p| **p != first) else {
        return true;
    };
    points.iter().all(|p| orient2d(first, second, *p) == 0.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use nalgebra::vector;

    #[test]
    fn ccw_cw_collinear() {
        let a = vector![0.0, 0.0];
        let b = vector![1.0, 0.0];
        assert!(orient2d(a, b, vector![0.0, 1.0]) > 0.0);
        assert!(orient2d(a, b, vector![0.0, -1.0]) < 0.0);
        assert_eq!(orient2d(a, b, vector![5.0, 0.0]), 0.0);
    }

    #[test]
    fn near_collinear_sign_is_exact() {
        // c sits one ulp above the line y = x through a and b.
        let a = vector![0.5, 0.5];
        let b = vector![12.0, 12.0];
        let x = 24.0_f64;
        let above = vector![x, f64::from_bits(x.to_bits() + 1)];
        let below = vector![x, f64::from_bits(x.to_bits() - 1)];
        assert!(orient2d(a, b, above) > 0.0);
        assert!(orient2d(a, b, below) < 0.0);
        assert_eq!(orient2d(a, b, vector![x, x]), 0.0);
    }

    #[test]
    fn exact_path_agrees_with_integers() {
        // Large coordinates with small differences.
        let off = 1.0e15;
        let a = vector![off, off];
        let b = vector![off + 3.0, off + 1.0];
        let c = vector![off + 6.0, off + 2.0];
        assert_eq!(orient2d(a, b, c), 0.0);
        let d = vector![off + 6.0, off + 3.0];
        assert!(orient2d(a, b, d) > 0.0);
    }

    #[test]
    fn segment_membership() {
        let a = vector![1.0, 1.0];
        let b = vector![5.0, 3.0];
        assert!(on_segment(a, b, vector![3.0, 2.0]));
        assert!(on_segment(a, b, a));
        assert!(on_segment(a, b, b));
        assert!(!on_segment(a, b, vector![7.0, 4.0]));
        assert!(!on_segment(a, b, vector![3.0, 2.5]));
    }

    #[test]
    fn distance_to_segment() {
        let a = vector![0.0, 0.0];
        let b = vector![4.0, 0.0];
        assert!((segment_dist(a, b, vector![2.0, 3.0]) - 3.0).abs() < 1e-12);
        assert!((segment_dist(a, b, vector![7.0, 4.0]) - 5.0).abs() < 1e-12);
        assert!((segment_dist(a, a, vector![3.0, 4.0]) - 5.0).abs() < 1e-12);
        assert_eq!(segment_dist(a, a, a), 0.0);
    }

    #[test]
    fn distance_survives_extreme_magnitudes() {
        for s in [1.0e300, 1.0e-300] {
            let a = vector![0.0, 0.0];
            let d = segment_dist(a, vector![4.0 * s, 0.0], vector![2.0 * s, 3.0 * s]);
            assert!((d / s - 3.0).abs() < 1e-12, "s = {s:e}: {d:e}");
        }
    }

    #[test]
    fn signs_hold_at_extreme_magnitudes() {
        for s in [1.0e200, 1.0e300, 1.0e-200, 1.0e-300, f64::MIN_POSITIVE] {
            let a = vector![0.0, 0.0];
            let b = vector![4.0 * s, 0.0];
            assert!(orient2d(a, b, vector![s, s]) > 0.0, "s = {s:e}");
            assert!(orient2d(a, b, vector![s, -s]) < 0.0, "s = {s:e}");
            assert_eq!(orient2d(a, b, vector![2.0 * s, 0.0]), 0.0, "s = {s:e}");
            assert_eq!(orient2d(b, vector![0.0, 4.0 * s], vector![2.0 * s, 2.0 * s]), 0.0);
            assert!(on_segment(a, b, vector![3.0 * s, 0.0]));
        }
        // Largest finite coordinates: differences alone would overflow.
        let m = f64::MAX / 2.0;
        assert!(orient2d(vector![-m, -m], vector![m, -m], vector![0.0, m]) > 0.0);
        assert_eq!(orient2d(vector![-m, -m], vector![m, m], vector![0.0, 0.0]), 0.0);
        // Subnormal coordinates.
        let t = 5.0e-324;
        assert!(orient2d(vector![0.0, 0.0], vector![4.0 * t, 0.0], vector![t, t]) > 0.0);
    }

    #[test]
    fn all_zero_points_are_collinear() {
        let o = vector![0.0, 0.0];
        assert_eq!(orient2d(o, o, o), 0.0);
    }

    #[test]
    fn collinearity() {
        let line = [vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.0]];
        assert!(all_collinear(&line));
        let tri = [vector![0.0, 0.0], vector![1.0, 1.0], vector![2.0, 2.5]];
        assert!(!all_collinear(&tri));
        let dup = [vector![1.0, 1.0], vector![1.0, 1.0]];
        assert!(all_collinear(&dup));
    }
}
