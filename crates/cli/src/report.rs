//! Evaluation report and drawable scene primitives.
//!
//! The report carries the ring and per-worker verdicts; `scene` lists what a
//! renderer draws: cones, the reference vertex, the filled zone (closed by
//! repeating its first vertex), and workers colored by status with labels.

use clap::ValueEnum;
use safezone::geom2::{
    ConvexHull, CrossingNumber, GrahamScan, MonotoneChain, PointInPolygon, WindingNumber,
};
use safezone::{Containment, Point2, SafeZone, ZoneCfg, ZoneError};
use serde::Serialize;

use crate::input::Scene;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HullAlgo {
    #[default]
    Monotone,
    Graham,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ContainmentAlgo {
    #[default]
    Crossing,
    Winding,
}

/// Evaluation knobs taken from the command line.
#[derive(Clone, Copy, Debug, Default)]
pub struct EvalOpts {
    pub hull: HullAlgo,
    pub containment: ContainmentAlgo,
    pub cfg: ZoneCfg,
}

type Rgb = [f64; 3];

const RED: Rgb = [1.0, 0.0, 0.0];
const BLUE: Rgb = [0.0, 0.0, 1.0];
const LIGHT_BLUE: Rgb = [0.678, 0.847, 0.902];
const GREEN: Rgb = [0.0, 0.5, 0.0];
const BLACK: Rgb = [0.0, 0.0, 0.0];

/// Offset of a worker label from its marker, in scene units.
const LABEL_OFFSET: f64 = 0.2;

#[derive(Debug, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Primitive {
    Points {
        label: String,
        color: Rgb,
        size: f64,
        points: Vec<[f64; 2]>,
    },
    Polygon {
        label: String,
        fill: Rgb,
        alpha: f64,
        outline: Rgb,
        ring: Vec<[f64; 2]>,
    },
    Text {
        text: String,
        at: [f64; 2],
        color: Rgb,
    },
}

#[derive(Debug, Serialize)]
pub struct WorkerVerdict {
    pub id: String,
    pub position: [f64; 2],
    #[serde(serialize_with = "containment_name")]
    pub containment: Containment,
    pub status: &'static str,
}

fn containment_name<S: serde::Serializer>(c: &Containment, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(c.as_str())
}

#[derive(Debug, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub safe: usize,
    pub danger: usize,
}

#[derive(Debug, Serialize)]
pub struct Report {
    pub version: &'static str,
    pub hull: HullAlgo,
    pub containment: ContainmentAlgo,
    pub boundary_eps: f64,
    pub cones: Vec<[f64; 2]>,
    pub reference: [f64; 2],
    pub ring: Vec<[f64; 2]>,
    pub area: f64,
    pub workers: Vec<WorkerVerdict>,
    pub summary: Summary,
    pub scene: Vec<Primitive>,
}

#[inline]
fn xy(p: &Point2) -> [f64; 2] {
    [p.x, p.y]
}

fn status_of(c: Containment) -> &'static str {
    if c.is_safe() {
        "Safe"
    } else {
        "Danger!"
    }
}

/// Build the zone from `scene.cones`, classify every worker, and assemble the report.
pub fn evaluate(scene: &Scene, opts: &EvalOpts) -> Result<Report, ZoneError> {
    let hull_algo: &dyn ConvexHull = match opts.hull {
        HullAlgo::Monotone => &MonotoneChain,
        HullAlgo::Graham => &GrahamScan,
    };
    let pip: &dyn PointInPolygon = match opts.containment {
        ContainmentAlgo::Crossing => &CrossingNumber,
        ContainmentAlgo::Winding => &WindingNumber,
    };

    let zone = SafeZone::from_markers_with(hull_algo, &scene.cones)?;
    tracing::info!(
        cones = scene.cones.len(),
        ring = zone.len(),
        area = zone.signed_area(),
        "zone_built"
    );
    let verdicts = zone.classify_all_with(pip, &scene.workers, &opts.cfg)?;

    let mut summary = Summary::default();
    let workers: Vec<WorkerVerdict> = scene
        .workers
        .iter()
        .zip(&verdicts)
        .enumerate()
        .map(|(i, (p, c))| {
            let id = format!("W{}", i + 1);
            if c.is_safe() {
                summary.safe += 1;
                tracing::debug!(worker = %id, x = p.x, y = p.y, containment = %c, "worker_safe");
            } else {
                summary.danger += 1;
                tracing::warn!(worker = %id, x = p.x, y = p.y, "worker_outside_zone");
            }
            WorkerVerdict {
                id,
                position: xy(p),
                containment: *c,
                status: status_of(*c),
            }
        })
        .collect();

    let scene_prims = primitives(scene, &zone, &workers);
    Ok(Report {
        version: safezone::VERSION,
        hull: opts.hull,
        containment: opts.containment,
        boundary_eps: opts.cfg.boundary_eps,
        cones: scene.cones.iter().map(xy).collect(),
        reference: xy(&zone.reference()),
        ring: zone.ring().iter().map(xy).collect(),
        area: zone.signed_area(),
        workers,
        summary,
        scene: scene_prims,
    })
}

fn primitives(scene: &Scene, zone: &SafeZone, workers: &[WorkerVerdict]) -> Vec<Primitive> {
    let mut out = vec![
        Primitive::Polygon {
            label: "Safe Zone".to_string(),
            fill: LIGHT_BLUE,
            alpha: 0.5,
            outline: BLUE,
            ring: zone.closed_ring().iter().map(xy).collect(),
        },
        Primitive::Points {
            label: "Cones".to_string(),
            color: RED,
            size: 100.0,
            points: scene.cones.iter().map(xy).collect(),
        },
        Primitive::Points {
            label: "Reference Point".to_string(),
            color: BLUE,
            size: 100.0,
            points: vec![xy(&zone.reference())],
        },
    ];
    for (i, w) in workers.iter().enumerate() {
        let color = if w.containment.is_safe() { GREEN } else { BLACK };
        out.push(Primitive::Points {
            label: format!("Worker {}: {}", i + 1, w.status),
            color,
            size: 100.0,
            points: vec![w.position],
        });
        out.push(Primitive::Text {
            text: w.id.clone(),
            at: [w.position[0] + LABEL_OFFSET, w.position[1] + LABEL_OFFSET],
            color,
        });
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use safezone::Vec2;

    #[test]
    fn sample_scene_report() {
        let report = evaluate(&Scene::sample(), &EvalOpts::default()).unwrap();
        assert_eq!(report.reference, [1.0, 1.0]);
        assert_eq!(
            report.ring,
            vec![[1.0, 1.0], [5.0, 2.0], [7.0, 3.0], [3.0, 5.0]]
        );
        assert_eq!(report.summary, Summary { safe: 1, danger: 1 });
        assert_eq!(report.workers[0].containment, Containment::Inside);
        assert_eq!(report.workers[0].status, "Safe");
        assert_eq!(report.workers[1].status, "Danger!");
        // polygon + cones + reference + (marker, label) per worker
        assert_eq!(report.scene.len(), 3 + 2 * 2);
        match &report.scene[0] {
            Primitive::Polygon { ring, .. } => {
                assert_eq!(ring.len(), 5);
                assert_eq!(ring[0], ring[4]);
            }
            other => panic!("expected polygon first, got {other:?}"),
        }
    }

    #[test]
    fn boundary_worker_is_safe_with_both_strategies() {
        let mut scene = Scene::sample();
        scene.workers = vec![Vec2::new(3.0, 1.5)]; // midpoint of (1,1)-(5,2)
        for containment in [ContainmentAlgo::Crossing, ContainmentAlgo::Winding] {
            let opts = EvalOpts {
                containment,
                hull: HullAlgo::Graham,
                ..EvalOpts::default()
            };
            let report = evaluate(&scene, &opts).unwrap();
            assert_eq!(report.workers[0].containment, Containment::OnBoundary);
            assert_eq!(report.summary, Summary { safe: 1, danger: 0 });
            match &report.scene[3] {
                Primitive::Points { label, color, .. } => {
                    assert_eq!(label, "Worker 1: Safe");
                    assert_eq!(*color, GREEN);
                }
                other => panic!("expected worker marker, got {other:?}"),
            }
        }
    }

    #[test]
    fn degenerate_cones_surface_error() {
        let scene = Scene {
            cones: vec![Vec2::new(0.0, 0.0), Vec2::new(1.0, 1.0), Vec2::new(2.0, 2.0)],
            workers: vec![],
        };
        assert_eq!(
            evaluate(&scene, &EvalOpts::default()).unwrap_err(),
            ZoneError::DegenerateGeometry
        );
    }

    #[test]
    fn report_serializes_with_tagged_primitives() {
        let report = evaluate(&Scene::sample(), &EvalOpts::default()).unwrap();
        let v = serde_json::to_value(&report).unwrap();
        assert_eq!(v["hull"], "monotone");
        assert_eq!(v["containment"], "crossing");
        assert_eq!(v["scene"][0]["kind"], "polygon");
        assert_eq!(v["scene"][3]["label"], "Worker 1: Safe");
        assert_eq!(v["scene"][6]["text"], "W2");
        assert_eq!(v["workers"][0]["containment"], "Inside");
        assert_eq!(v["workers"][1]["containment"], "Outside");
        assert_eq!(v["scene"][5]["color"], serde_json::json!(BLACK));
    }
}
