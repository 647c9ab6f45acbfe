//! Planar safe-zone geometry.
//!
//! Purpose
//! - Turn an unordered set of boundary markers into a convex ring and decide
//!   Inside / OnBoundary / Outside for query points against it.
//! - Keep every stage a pure function of its input; zones are rebuilt from
//!   scratch per evaluation cycle.
//!
//! Pipeline
//! - `build_hull` (validate, dedup, small-set policy, `ConvexHull` strategy)
//! - `order_ring` (reference vertex, angular sort)
//! - `classify` (shared boundary test, `PointInPolygon` strategy)
//!
//! Numerics
//! - Orientation signs are exact (`predicates::orient2d`); no tolerance is
//!   applied unless the caller passes one through `ZoneCfg`.
//!
//! Code cross-refs: `Hull`, `SafeZone`, `Containment`, `ZoneError`

pub mod contain;
pub mod hull;
pub mod order;
pub mod predicates;
pub mod rand;
mod types;

pub use contain::{
    classify, classify_all, classify_all_with, classify_with, on_boundary, CrossingNumber,
    PointInPolygon, WindingNumber,
};
pub use hull::{build_hull, build_hull_with, ConvexHull, GrahamScan, MonotoneChain, SMALL_SET_MAX};
pub use order::{order_ring, polar_angle};
pub use predicates::orient2d;
pub use types::{Containment, Hull, Point2, SafeZone, ZoneCfg, ZoneError};
