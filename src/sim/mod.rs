//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - One tick is one fixed unit of time
//! - Randomness only through an injected generator
//! - Stable iteration order (spawn order)
//! - No rendering, input or storage dependencies

pub mod collision;
pub mod field;
pub mod object;
pub mod tick;

pub use collision::{CollisionResult, circle_collision, collide_with, impacts};
pub use field::SpaceField;
pub use object::{ObjectKind, SpaceObject};
pub use tick::{
    GamePhase, MatchStats, PlayerCommand, apply_command, handle_collisions,
    handle_missile_collisions, move_space_objects, trim_space_objects,
};
