//! Static collision world and its shared store.
//!
//! This module is responsible for:
//! - Holding the published set of static AABB colliders ([`CollisionWorld`]).
//! - Answering the geometry queries the controller needs against that set.
//! - Publishing new colliders atomically while a simulation keeps reading ([`ColliderStore`]).
//!
//! Design notes
//! - A `CollisionWorld` is an immutable snapshot. Cloning it is an `Arc` bump, so a frame
//!   takes one snapshot and runs all of its ticks against it.
//! - Colliders are only ever appended. The new collider list is assembled completely
//!   outside the lock, then swapped in under a short write lock; a tick never observes a
//!   half-applied batch.
//! - Malformed definitions are logged and skipped. Ingestion never fails as a whole.

use std::sync::Arc;

use parking_lot::RwLock;
use rapier3d::parry::bounding_volume::Aabb;

use super::{
    def::{ColliderDef, collider_from_def},
    geometry,
    settings::HEADROOM_IGNORE_BELOW,
    types::{AabbCollider, Capsule, Vec3},
};

/// Immutable snapshot of the static colliders.
#[derive(Clone, Debug, Default)]
pub struct CollisionWorld {
    colliders: Arc<Vec<AabbCollider>>,
}

impl CollisionWorld {
    pub fn new(colliders: Vec<AabbCollider>) -> Self {
        Self {
            colliders: Arc::new(colliders),
        }
    }

    /// Colliders in publication order. Resolver scan order follows this order.
    #[inline]
    pub fn colliders(&self) -> &[AabbCollider] {
        &self.colliders
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.colliders.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.colliders.is_empty()
    }

    /// Closest point on `bounds` to `point`.
    #[inline]
    pub fn closest_point(point: &Vec3, bounds: &Aabb) -> Vec3 {
        geometry::closest_point(point, bounds)
    }

    /// Strict sphere/box overlap test.
    #[inline]
    pub fn sphere_intersects(center: &Vec3, radius: f32, bounds: &Aabb) -> bool {
        geometry::sphere_intersects(center, radius, bounds)
    }

    /// Whether a capsule of `standing` dimensions could stand up at `feet`.
    ///
    /// Only the upper sphere is tested, and colliders whose bottom is near or below the feet
    /// (floors, low obstacles) are ignored.
    pub fn has_headroom(&self, feet: Vec3, standing: Capsule) -> bool {
        let top = standing.top(feet);
        !self
            .colliders
            .iter()
            .filter(|c| c.bounds.mins.y > feet.y + HEADROOM_IGNORE_BELOW)
            .any(|c| Self::sphere_intersects(&top, standing.radius, &c.bounds))
    }

    /// A new snapshot containing this world's colliders followed by `batch`.
    pub fn with_appended(&self, batch: &[AabbCollider]) -> Self {
        let mut colliders = Vec::with_capacity(self.colliders.len() + batch.len());
        colliders.extend_from_slice(&self.colliders);
        colliders.extend_from_slice(batch);
        Self::new(colliders)
    }
}

/// Outcome of one [`ColliderStore::ingest`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Colliders published.
    pub added: usize,
    /// Definitions skipped because they failed validation.
    pub rejected: usize,
}

/// Shared handle to the live collision world.
///
/// Cheap to clone; every clone refers to the same world. Readers take a snapshot, level
/// loaders call [`ColliderStore::ingest`].
#[derive(Clone, Debug, Default)]
pub struct ColliderStore {
    inner: Arc<RwLock<CollisionWorld>>,
}

impl ColliderStore {
    pub fn new(world: CollisionWorld) -> Self {
        Self {
            inner: Arc::new(RwLock::new(world)),
        }
    }

    /// The currently published world.
    #[inline]
    pub fn snapshot(&self) -> CollisionWorld {
        self.inner.read().clone()
    }

    /// Validate `batch` and append every valid collider as one atomic publication.
    pub fn ingest(&self, batch: &[ColliderDef]) -> IngestReport {
        let mut accepted = Vec::with_capacity(batch.len());
        let mut rejected = 0;

        for (i, def) in batch.iter().enumerate() {
            match collider_from_def(def) {
                Ok(collider) => {
                    if def.is_inverted() {
                        log::debug!("Collider {i} has inverted bounds; queries will clamp it");
                    }
                    accepted.push(collider);
                }
                Err(reason) => {
                    log::warn!("Skipping collider {i}: {reason}");
                    rejected += 1;
                }
            }
        }

        let report = IngestReport {
            added: accepted.len(),
            rejected,
        };

        if accepted.is_empty() {
            log::warn!("Level: batch of {} definitions produced no colliders", batch.len());
            return report;
        }

        // Build the next snapshot from the current one without holding the write lock,
        // then publish. Appends race only with other appends; the upgradable read keeps
        // two loaders from both building on the same base.
        let guard = self.inner.upgradable_read();
        let next = guard.with_appended(&accepted);
        let total = next.len();
        *parking_lot::RwLockUpgradableReadGuard::upgrade(guard) = next;

        log::info!(
            "Level: {} colliders added ({} rejected), {} total",
            report.added,
            report.rejected,
            total
        );
        report
    }
}
