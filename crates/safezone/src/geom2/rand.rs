//! Random marker layouts (radial jitter + replay tokens).
//!
//! Purpose
//! - Deterministic cone and worker layouts for tests and benchmarks. Cones
//!   are placed around a jittered ring like a cordoned work area, optionally
//!   with stray cones inside; workers are scattered over a box that covers
//!   the ring with some margin so both safe and unsafe workers occur.
//!
//! Model
//! - `n` equally spaced angles on [0, 2π) with bounded angular and radial
//!   jitter, then `interior` cones drawn uniformly inside the inner radius.
//! - Determinism uses a replay token `(seed, index)` mixed into a single RNG.

use nalgebra::Vector2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use super::types::Point2;

/// Cone count distribution.
#[derive(Clone, Copy, Debug)]
pub enum MarkerCount {
    Fixed(usize),
    Uniform { min: usize, max: usize },
}
impl MarkerCount {
    fn sample<R: Rng>(&self, rng: &mut R) -> usize {
        match *self {
            MarkerCount::Fixed(n) => n.max(3),
            MarkerCount::Uniform { min, max } => {
                let lo = min.max(3);
                let hi = max.max(lo);
                rng.gen_range(lo..=hi)
            }
        }
    }
}

/// Layout sampler configuration.
#[derive(Clone, Copy, Debug)]
pub struct LayoutCfg {
    /// Cones on the perimeter ring.
    pub perimeter: MarkerCount,
    /// Extra cones strictly inside the ring (not hull vertices).
    pub interior: usize,
    /// Angular jitter as a fraction of the base spacing Δ=2π/n. Clamped to [0, 0.49].
    pub angle_jitter_frac: f64,
    /// Radial jitter (relative amplitude). Radii = `radius * (1 + u)`, `u∈[-radial_jitter, radial_jitter]`.
    pub radial_jitter: f64,
    /// Base ring radius.
    pub radius: f64,
    /// Ring center.
    pub center: (f64, f64),
    /// Workers drawn per layout.
    pub workers: usize,
    /// Worker box half-width as a multiple of `radius`.
    pub worker_spread: f64,
}
impl Default for LayoutCfg {
    fn default() -> Self {
        Self {
            perimeter: MarkerCount::Fixed(8),
            interior: 2,
            angle_jitter_frac: 0.3,
            radial_jitter: 0.2,
            radius: 10.0,
            center: (0.0, 0.0),
            workers: 16,
            worker_spread: 1.5,
        }
    }
}

/// Replay token to make draws reproducible and indexable.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ReplayToken {
    pub seed: u64,
    pub index: u64,
}
impl ReplayToken {
    #[inline]
    fn to_std_rng(self) -> StdRng {
        // SplitMix64-style mixing, cheap and stable.
        fn mix(mut x: u64) -> u64 {
            x ^= x >> 30;
            x = x.wrapping_mul(0xbf58476d1ce4e5b9);
            x ^= x >> 27;
            x = x.wrapping_mul(0x94d049bb133111eb);
            x ^ (x >> 31)
        }
        let k = mix(self.seed ^ mix(self.index.wrapping_add(0x9e3779b97f4a7c15)));
        StdRng::seed_from_u64(k)
    }
}

/// One sampled scene.
#[derive(Clone, Debug, PartialEq)]
pub struct Layout {
    pub cones: Vec<Point2>,
    pub workers: Vec<Point2>,
}

/// Draw a cone/worker layout.
///
/// Perimeter cones come first, interior cones after them; both lists keep
/// draw order. Interior cones lie within `0.9 * radius * (1 - radial_jitter) * cos(2π/n)`
/// of the center, a disc the perimeter polygon encloses for n ≥ 4 (they collapse
/// onto the center when n ≤ 4).
pub fn draw_layout(cfg: LayoutCfg, tok: ReplayToken) -> Layout {
    let mut rng = tok.to_std_rng();
    let n = cfg.perimeter.sample(&mut rng);
    let aj = cfg.angle_jitter_frac.clamp(0.0, 0.49);
    let rj = cfg.radial_jitter.clamp(0.0, 0.9);
    let r0 = cfg.radius.max(1e-9);
    let c = Vector2::new(cfg.center.0, cfg.center.1);
    let delta = std::f64::consts::TAU / (n as f64);
    let phase = rng.gen::<f64>() * std::f64::consts::TAU;

    let mut cones: Vec<Point2> = (0..n)
        .map(|k| {
            let jitter = (rng.gen::<f64>() * 2.0 - 1.0) * aj * delta;
            let th = phase + (k as f64) * delta + jitter;
            let u = (rng.gen::<f64>() * 2.0 - 1.0) * rj;
            let r = (1.0 + u) * r0;
            c + Vector2::new(th.cos() * r, th.sin() * r)
        })
        .collect();

    // Angular gaps stay below 2Δ, so the ring encloses the disc of radius r_min·cos(Δ).
    let inner = r0 * (1.0 - rj) * (delta.min(std::f64::consts::FRAC_PI_2)).cos() * 0.9;
    for _ in 0..cfg.interior {
        let th = rng.gen::<f64>() * std::f64::consts::TAU;
        let r = inner * rng.gen::<f64>().sqrt();
        cones.push(c + Vector2::new(th.cos() * r, th.sin() * r));
    }

    let half = r0 * cfg.worker_spread.max(0.0);
    let workers = (0..cfg.workers)
        .map(|_| {
            c + Vector2::new(rng.gen_range(-half..=half), rng.gen_range(-half..=half))
        })
        .collect();

    Layout { cones, workers }
}
