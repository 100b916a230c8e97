use super::types::{AabbCollider, Vec3};

/// Canonical, schema-agnostic definition of an immutable world collider.
///
/// This is what level loaders hand to the core. Classification (wall vs floor) is decided
/// by the loader and arrives as `surfable`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColliderDef {
    /// World-space minimum corner.
    pub min: Vec3,
    /// World-space maximum corner.
    pub max: Vec3,
    /// Eligible for wall-running.
    pub surfable: bool,
}

impl ColliderDef {
    #[inline]
    pub fn new(min: Vec3, max: Vec3, surfable: bool) -> Self {
        Self { min, max, surfable }
    }

    /// A non-surfable slab whose top face is at `top_y`.
    #[inline]
    pub fn floor(half_extent: f32, top_y: f32, thickness: f32) -> Self {
        Self::new(
            Vec3::new(-half_extent, top_y - thickness, -half_extent),
            Vec3::new(half_extent, top_y, half_extent),
            false,
        )
    }

    /// Validates that this definition can be published.
    ///
    /// Checks:
    /// - every coordinate is finite
    ///
    /// Inverted and zero-size boxes are accepted; queries tolerate them.
    pub fn validate(&self) -> Result<(), &'static str> {
        if !self.min.iter().all(|c| c.is_finite()) {
            return Err("Collider min corner is not finite");
        }
        if !self.max.iter().all(|c| c.is_finite()) {
            return Err("Collider max corner is not finite");
        }
        Ok(())
    }

    /// Whether any axis has `min > max`.
    #[inline]
    pub fn is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }
}

/// Build a collider from a `ColliderDef`, rejecting definitions that fail validation.
pub fn collider_from_def(def: &ColliderDef) -> Result<AabbCollider, &'static str> {
    def.validate()?;
    Ok(AabbCollider::new(def.min, def.max, def.surfable))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finite_defs_convert() {
        let def = ColliderDef::new(Vec3::new(0.0, 0.0, 0.0), Vec3::new(1.0, 3.0, 0.2), true);
        let collider = collider_from_def(&def).unwrap();
        assert_eq!(collider.min(), def.min);
        assert_eq!(collider.max(), def.max);
        assert!(collider.surfable);
    }

    #[test]
    fn non_finite_defs_are_rejected() {
        let def = ColliderDef::new(Vec3::new(f32::NAN, 0.0, 0.0), Vec3::zeros(), false);
        assert_eq!(
            collider_from_def(&def).unwrap_err(),
            "Collider min corner is not finite"
        );

        let def = ColliderDef::new(Vec3::zeros(), Vec3::new(0.0, f32::INFINITY, 0.0), false);
        assert_eq!(def.validate(), Err("Collider max corner is not finite"));
    }

    #[test]
    fn inverted_defs_are_still_valid() {
        let def = ColliderDef::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 1.0), false);
        assert!(def.is_inverted());
        assert_eq!(def.validate(), Ok(()));
    }

    #[test]
    fn floor_top_is_at_requested_height() {
        let def = ColliderDef::floor(50.0, 0.0, 0.1);
        assert_eq!(def.max.y, 0.0);
        assert!((def.min.y + 0.1).abs() < 1.0e-6);
        assert!(!def.surfable);
    }
}
