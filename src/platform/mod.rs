//! Platform abstraction layer
//!
//! The engine talks to the outside world only through these traits:
//! - Randomness ([`RandomGenerator`])
//! - Player input ([`Controller`])
//! - Drawing the field ([`Visualizer`])
//!
//! Stock native implementations live in the submodules.

pub mod input;
pub mod random;
pub mod render;

pub use input::KeyboardController;
pub use random::PcgGenerator;
pub use render::TerminalVisualizer;

use crate::sim::{PlayerCommand, SpaceField};

/// Source of randomness for spawning
pub trait RandomGenerator {
    /// A sample in `[0, 1)`
    fn probability(&mut self) -> f64;

    /// An integer in `[min, max]`, both ends included
    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        let span = (max - min + 1) as f64;
        (min + (self.probability() * span).floor() as i64).min(max)
    }

    /// A real in `[min, max]`
    fn double_in_range(&mut self, min: f64, max: f64) -> f64 {
        min + self.probability() * (max - min)
    }
}

/// Non-blocking source of player commands
pub trait Controller {
    /// Next pending command, or None when nothing is queued
    fn next_player_command(&mut self) -> Option<PlayerCommand>;
}

/// Consumer of the field state after each tick
pub trait Visualizer {
    fn render_space_field(&mut self, field: &SpaceField);
}
