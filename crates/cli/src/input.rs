use anyhow::{bail, Context, Result};
use nalgebra::{Matrix3, Vector3};
use polars::prelude::*;
use safezone::footprint::{ground_points, BoxRotation, MarkerBox};
use safezone::{Point2, Vec2};
use serde::Deserialize;
use std::path::Path;

/// Cone and worker ground positions for one evaluation cycle.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Scene {
    pub cones: Vec<Point2>,
    pub workers: Vec<Point2>,
}

impl Scene {
    /// Cordon and workers of the reference layout.
    pub fn sample() -> Self {
        Self {
            cones: vec![
                Vec2::new(1.0, 1.0),
                Vec2::new(5.0, 2.0),
                Vec2::new(3.0, 5.0),
                Vec2::new(7.0, 3.0),
            ],
            workers: vec![Vec2::new(4.0, 3.0), Vec2::new(8.0, 3.0)],
        }
    }
}

/// JSON scene: plain ground points and/or fitted boxes reduced to ground points.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SceneFile {
    #[serde(default)]
    cones: Vec<[f64; 2]>,
    #[serde(default)]
    workers: Vec<[f64; 2]>,
    #[serde(default)]
    cone_boxes: Vec<BoxSpec>,
    #[serde(default)]
    worker_boxes: Vec<BoxSpec>,
}

#[derive(Debug, Deserialize)]
struct BoxSpec {
    center: [f64; 3],
    size: [f64; 3],
    #[serde(default)]
    rotation: Option<RotationSpec>,
}

/// Euler angles `[rx, ry, rz]` or a 3×3 matrix given row by row.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RotationSpec {
    Euler([f64; 3]),
    Matrix([[f64; 3]; 3]),
}

impl BoxSpec {
    fn to_marker_box(&self) -> MarkerBox {
        let rotation = match &self.rotation {
            None => BoxRotation::Identity,
            Some(RotationSpec::Euler(a)) => BoxRotation::EulerXyz(Vector3::from(*a)),
            Some(RotationSpec::Matrix(r)) => BoxRotation::Matrix(Matrix3::new(
                r[0][0], r[0][1], r[0][2], r[1][0], r[1][1], r[1][2], r[2][0], r[2][1], r[2][2],
            )),
        };
        MarkerBox {
            center: Vector3::from(self.center),
            size: Vector3::from(self.size),
            rotation,
        }
    }
}

/// Load a scene from `.csv` (columns `kind,x,y`) or `.json`.
pub fn load_scene(path: &str) -> Result<Scene> {
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());
    match ext.as_deref() {
        Some("csv") => load_csv(path),
        Some("json") => load_json(path),
        _ => bail!("unsupported input {path}: expected .csv or .json"),
    }
}

fn load_csv(path: &str) -> Result<Scene> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("opening {path}"))?
        .select([
            col("kind"),
            col("x").cast(DataType::Float64),
            col("y").cast(DataType::Float64),
        ])
        .collect()
        .with_context(|| format!("reading kind/x/y columns from {path}"))?;
    tracing::debug!(rows = df.height(), cols = df.width(), "input_csv_shape");

    let kinds = df
        .column("kind")
        .and_then(|c| c.str())
        .with_context(|| format!("{path}: kind column must be text"))?;
    let xs = df
        .column("x")
        .and_then(|c| c.f64())
        .with_context(|| format!("{path}: x column must be numeric"))?;
    let ys = df
        .column("y")
        .and_then(|c| c.f64())
        .with_context(|| format!("{path}: y column must be numeric"))?;
    let mut scene = Scene::default();
    for (row, ((kind, x), y)) in kinds.into_iter().zip(xs).zip(ys).enumerate() {
        let (Some(kind), Some(x), Some(y)) = (kind, x, y) else {
            bail!("{path}: row {row} has an empty kind, x, or y");
        };
        let p = Vec2::new(x, y);
        match kind.trim().to_ascii_lowercase().as_str() {
            "cone" => scene.cones.push(p),
            "worker" => scene.workers.push(p),
            other => bail!("{path}: row {row} has unknown kind {other:?}"),
        }
    }
    Ok(scene)
}

fn load_json(path: &str) -> Result<Scene> {
    let bytes = std::fs::read(path).with_context(|| format!("reading {path}"))?;
    parse_json(&bytes).with_context(|| format!("parsing {path}"))
}

fn parse_json(bytes: &[u8]) -> Result<Scene> {
    let file: SceneFile = serde_json::from_slice(bytes)?;
    let to_points = |v: &[[f64; 2]]| v.iter().map(|p| Vec2::new(p[0], p[1])).collect::<Vec<_>>();
    let boxes = |v: &[BoxSpec]| v.iter().map(BoxSpec::to_marker_box).collect::<Vec<_>>();

    let mut cones = to_points(&file.cones);
    cones.extend(ground_points(&boxes(&file.cone_boxes)).context("cone_boxes")?);
    let mut workers = to_points(&file.workers);
    workers.extend(ground_points(&boxes(&file.worker_boxes)).context("worker_boxes")?);
    Ok(Scene { cones, workers })
}
