//! Zone pipeline entry points and the swappable active zone.
//!
//! - `SafeZone::from_markers*`: hull + ordering in one call.
//! - `SafeZone::classify*`: containment against a built zone.
//! - `ActiveZone`: shared holder that publishes fully built zones only.
//!
//! Code cross-refs: `geom2::{build_hull_with, order_ring, classify_with}`

use std::sync::{Arc, PoisonError, RwLock};

use crate::geom2::{
    build_hull_with, classify_all_with, classify_with, order_ring, Containment, ConvexHull,
    CrossingNumber, MonotoneChain, Point2, PointInPolygon, SafeZone, ZoneCfg, ZoneError,
};

impl SafeZone {
    /// Build a zone from raw boundary markers with the default hull strategy.
    pub fn from_markers(markers: &[Point2]) -> Result<Self, ZoneError> {
        Self::from_markers_with(&MonotoneChain, markers)
    }

    /// Build a zone from raw boundary markers with an explicit hull strategy.
    pub fn from_markers_with<H: ConvexHull + ?Sized>(
        algo: &H,
        markers: &[Point2],
    ) -> Result<Self, ZoneError> {
        let hull = build_hull_with(algo, markers)?;
        order_ring(&hull)
    }

    #[inline]
    pub fn classify(&self, query: Point2) -> Result<Containment, ZoneError> {
        classify_with(&CrossingNumber, self, query, &ZoneCfg::default())
    }

    pub fn classify_with<A: PointInPolygon + ?Sized>(
        &self,
        algo: &A,
        query: Point2,
        cfg: &ZoneCfg,
    ) -> Result<Containment, ZoneError> {
        classify_with(algo, self, query, cfg)
    }

    pub fn classify_all_with<A: PointInPolygon + ?Sized>(
        &self,
        algo: &A,
        queries: &[Point2],
        cfg: &ZoneCfg,
    ) -> Result<Vec<Containment>, ZoneError> {
        classify_all_with(algo, self, queries, cfg)
    }
}

/// Currently active safe zone, shared between an updater and many readers.
///
/// Rebuilds run to completion before the shared reference is replaced, so a
/// reader's `snapshot` is always a complete zone (or none). A failed rebuild
/// leaves the previous zone in place.
#[derive(Debug, Default)]
pub struct ActiveZone {
    current: RwLock<Option<Arc<SafeZone>>>,
}

impl ActiveZone {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with an already built zone.
    pub fn with_zone(zone: SafeZone) -> Self {
        Self {
            current: RwLock::new(Some(Arc::new(zone))),
        }
    }

    /// Rebuild from `markers` with the default hull strategy and publish it.
    pub fn rebuild(&self, markers: &[Point2]) -> Result<Arc<SafeZone>, ZoneError> {
        self.rebuild_with(&MonotoneChain, markers)
    }

    pub fn rebuild_with<H: ConvexHull + ?Sized>(
        &self,
        algo: &H,
        markers: &[Point2],
    ) -> Result<Arc<SafeZone>, ZoneError> {
        let zone = Arc::new(SafeZone::from_markers_with(algo, markers)?);
        self.publish(Arc::clone(&zone));
        Ok(zone)
    }

    /// Replace the active zone; returns the one it displaced.
    pub fn publish(&self, zone: Arc<SafeZone>) -> Option<Arc<SafeZone>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.replace(zone)
    }

    /// Deactivate; returns the zone that was active.
    pub fn clear(&self) -> Option<Arc<SafeZone>> {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        guard.take()
    }

    /// The active zone at this instant, if any.
    pub fn snapshot(&self) -> Option<Arc<SafeZone>> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Classify against the active zone; `None` when no zone is active.
    pub fn classify(&self, query: Point2) -> Option<Result<Containment, ZoneError>> {
        self.snapshot().map(|z| z.classify(query))
    }
}
