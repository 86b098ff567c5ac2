//! Galaxy Raiders - an asteroid-field arcade shooter
//!
//! Core modules:
//! - `physics`: 2D vector/point algebra
//! - `sim`: Deterministic simulation (space objects, field, per-frame steps)
//! - `engine`: Fixed-rate game loop wiring the simulation to its collaborators
//! - `highscores`: Match records, leaderboard and scoreboard
//! - `persistence`: Durable storage for score records
//! - `platform`: Random source, input source and renderer
//! - `web`: Read-only leaderboard endpoint

pub mod engine;
pub mod error;
pub mod highscores;
pub mod persistence;
pub mod physics;
pub mod platform;
pub mod settings;
pub mod sim;
pub mod web;

#[cfg(test)]
mod testing;

pub use engine::GameEngine;
pub use error::{ConfigError, PersistenceError, VectorError};
pub use highscores::{Leaderboard, MatchInfo, Scoreboard};
pub use settings::EngineConfig;

/// Game configuration constants
pub mod consts {
    pub const MILLISECONDS_PER_SECOND: u64 = 1000;

    /// Leaderboard keeps this many best matches
    pub const MAX_LEADERBOARD_SIZE: usize = 3;

    /// Ship defaults
    pub const SHIP_RADIUS: f64 = 1.0;
    pub const SHIP_MASS: f64 = 10.0;
    /// Velocity added per boost command
    pub const SHIP_BOOST: f64 = 1.0;

    /// Missile defaults
    pub const MISSILE_SPEED: f64 = 2.0;
    pub const MISSILE_RADIUS: f64 = 0.5;
    pub const MISSILE_MASS: f64 = 1.0;
    /// Gap between the ship hull and a freshly launched missile
    pub const MISSILE_DISTANCE_FROM_SHIP: f64 = 1.0;

    /// Asteroid spawn ranges
    pub const ASTEROID_MIN_SPEED: f64 = 1.0;
    pub const ASTEROID_MAX_SPEED: f64 = 1.5;
    /// Sideways drift is drawn from [-max, max]
    pub const ASTEROID_MAX_DRIFT: f64 = 0.5;
    pub const ASTEROID_MIN_RADIUS: f64 = 0.5;
    pub const ASTEROID_MAX_RADIUS: f64 = 2.0;
    pub const ASTEROID_MIN_MASS: f64 = 500.0;
    pub const ASTEROID_MAX_MASS: f64 = 1000.0;
    /// Points awarded are `ceil(scale / radius)`
    pub const ASTEROID_POINT_SCALE: f64 = 100.0;

    /// Explosions linger for this many ticks
    pub const EXPLOSION_MAX_TICK_DURATION: u32 = 10;
}
