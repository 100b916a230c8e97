/*!
Collision root module.

This module re-exports submodules that implement capsule-vs-AABB collision for the
player controller. The code is split for clarity:

- types:    shared data types (AabbCollider, Capsule, WallContact, ResolveResult)
- settings: tolerances and classification thresholds
- def:      schema-agnostic collider definitions handed over by level loaders
- geometry: closest-point, overlap and penetration queries against one box
- world:    the static collider snapshot and the shared store that publishes it
- resolve:  iterative penetration resolution with ground/wall classification
- ground:   non-moving ground probe
- wall:     proximity wall scan used when nothing is penetrating
*/

pub mod def;
pub mod geometry;
pub mod ground;
pub mod resolve;
pub mod settings;
pub mod types;
pub mod wall;
pub mod world;

// Re-export commonly used types and functions.
pub use def::{ColliderDef, collider_from_def};
pub use resolve::resolve_capsule;
pub use types::{AabbCollider, Capsule, Penetration, ResolveResult, Vec3, WallContact};
pub use wall::scan_wall;
pub use world::{ColliderStore, CollisionWorld, IngestReport};
