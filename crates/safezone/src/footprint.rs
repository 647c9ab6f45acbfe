//! Ground footprints of fitted 3D marker boxes.
//!
//! Upstream perception fits an oriented bounding box per cone or worker
//! cluster. The zone pipeline works on the ground plane, so each box is
//! reduced to the center of its bottom face projected to (x, y).
//!
//! Rotation conventions
//! - `EulerXyz([a, b, c])` is `Rx(a) · Ry(b) · Rz(c)` (radians).
//! - `Matrix(R)` maps box-local axes to world axes (columns are the box axes).

use nalgebra::{Matrix3, Rotation3, Vector2, Vector3};

use crate::geom2::{Point2, ZoneError};

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum BoxRotation {
    Identity,
    EulerXyz(Vector3<f64>),
    Matrix(Matrix3<f64>),
}

/// Oriented box with full extents `size` along its local axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MarkerBox {
    pub center: Vector3<f64>,
    pub size: Vector3<f64>,
    pub rotation: BoxRotation,
}

impl MarkerBox {
    pub fn axis_aligned(center: Vector3<f64>, size: Vector3<f64>) -> Self {
        Self {
            center,
            size,
            rotation: BoxRotation::Identity,
        }
    }

    pub fn rotation_matrix(&self) -> Matrix3<f64> {
        match self.rotation {
            BoxRotation::Identity => Matrix3::identity(),
            BoxRotation::EulerXyz(a) => {
                let rx = Rotation3::from_axis_angle(&Vector3::x_axis(), a.x);
                let ry = Rotation3::from_axis_angle(&Vector3::y_axis(), a.y);
                let rz = Rotation3::from_axis_angle(&Vector3::z_axis(), a.z);
                (rx * ry * rz).into_inner()
            }
            BoxRotation::Matrix(m) => m,
        }
    }

    /// Center of the bottom face (local −z side), projected to the ground plane.
    pub fn ground_point(&self) -> Point2 {
        let down = self.rotation_matrix() * Vector3::new(0.0, 0.0, -0.5 * self.size.z);
        let p = self.center + down;
        Vector2::new(p.x, p.y)
    }

    fn is_finite(&self) -> bool {
        let rot_ok = match self.rotation {
            BoxRotation::Identity => true,
            BoxRotation::EulerXyz(a) => a.iter().all(|v| v.is_finite()),
            BoxRotation::Matrix(m) => m.iter().all(|v| v.is_finite()),
        };
        rot_ok
            && self.center.iter().all(|v| v.is_finite())
            && self.size.iter().all(|v| v.is_finite())
    }
}

/// Ground points for a batch of boxes, in input order.
///
/// Errors: `InvalidCoordinate { index }` for the first box with a non-finite parameter.
pub fn ground_points(boxes: &[MarkerBox]) -> Result<Vec<Point2>, ZoneError> {
    boxes
        .iter()
        .enumerate()
        .map(|(index, b)| {
            if b.is_finite() {
                Ok(b.ground_point())
            } else {
                Err(ZoneError::InvalidCoordinate { index })
            }
        })
        .collect()
}
