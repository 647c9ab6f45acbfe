//! Cone-defined safe zones: convex perimeter construction and worker containment.
//!
//! Boundary markers ("cones") define a convex ring; query points ("workers")
//! are classified Inside / OnBoundary / Outside against it. Boundary-resident
//! workers count as safe.
//!
//! Layout
//! - `geom2`: hull, ring ordering, containment, exact predicates, layout sampler.
//! - `zone`: one-call pipeline on `SafeZone` and the swappable `ActiveZone`.
//! - `footprint`: ground points of fitted 3D marker boxes.
//!
//! Loading point clouds, clustering, box fitting, and rendering belong to
//! callers; this crate takes flat 2D coordinates and returns verdicts plus
//! the ordered ring.

pub mod footprint;
pub mod geom2;
pub mod zone;

/// Library version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub use geom2::{Containment, Point2, SafeZone, ZoneCfg, ZoneError};
pub use nalgebra::Vector2 as Vec2;
pub use zone::ActiveZone;

/// Common exports for quick imports in callers.
pub mod prelude {
    pub use crate::footprint::{ground_points, BoxRotation, MarkerBox};
    pub use crate::geom2::rand::{draw_layout, Layout, LayoutCfg, MarkerCount, ReplayToken};
    pub use crate::geom2::{
        build_hull, build_hull_with, classify, classify_all, classify_all_with, classify_with,
        order_ring, Containment, ConvexHull, CrossingNumber, GrahamScan, Hull, MonotoneChain,
        Point2, PointInPolygon, SafeZone, WindingNumber, ZoneCfg, ZoneError,
    };
    pub use crate::zone::ActiveZone;
    pub use nalgebra::Vector2 as Vec2;
}
