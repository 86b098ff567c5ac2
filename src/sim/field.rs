//! The arena and everything alive in it
//!
//! The field owns one ship plus the asteroid, missile and explosion collections.
//! Collections keep spawn order so iteration stays deterministic.

use std::ops::RangeInclusive;

use super::object::SpaceObject;
use crate::consts::*;
use crate::physics::{Point2D, Vector2D};
use crate::platform::RandomGenerator;

/// Bounded arena with its live objects
#[derive(Debug, Clone)]
pub struct SpaceField {
    pub width: u32,
    pub height: u32,
    pub boundary_x: RangeInclusive<f64>,
    pub boundary_y: RangeInclusive<f64>,
    /// Player ship (never trimmed)
    pub ship: SpaceObject,
    pub asteroids: Vec<SpaceObject>,
    pub missiles: Vec<SpaceObject>,
    pub explosions: Vec<SpaceObject>,
}

impl SpaceField {
    /// Create an empty field with the ship parked at the bottom center
    pub fn new(width: u32, height: u32) -> Self {
        let ship = SpaceObject::ship(
            Point2D::new(f64::from(width) / 2.0, 1.0),
            Vector2D::ZERO,
        );

        Self {
            width,
            height,
            boundary_x: 0.0..=f64::from(width),
            boundary_y: 0.0..=f64::from(height),
            ship,
            asteroids: Vec::new(),
            missiles: Vec::new(),
            explosions: Vec::new(),
        }
    }

    /// Every live object: ship, asteroids, missiles, explosions (in that order)
    pub fn space_objects(&self) -> impl Iterator<Item = &SpaceObject> {
        std::iter::once(&self.ship)
            .chain(self.asteroids.iter())
            .chain(self.missiles.iter())
            .chain(self.explosions.iter())
    }

    /// Mutable view in the same order as [`Self::space_objects`]
    pub fn space_objects_mut(&mut self) -> Vec<&mut SpaceObject> {
        std::iter::once(&mut self.ship)
            .chain(self.asteroids.iter_mut())
            .chain(self.missiles.iter_mut())
            .chain(self.explosions.iter_mut())
            .collect()
    }

    /// Total number of live objects, ship included
    pub fn object_count(&self) -> usize {
        1 + self.asteroids.len() + self.missiles.len() + self.explosions.len()
    }

    // --- Spawning ---

    /// Launch a missile straight ahead of the ship
    pub fn generate_missile(&mut self) {
        let offset = self.ship.radius + MISSILE_RADIUS + MISSILE_DISTANCE_FROM_SHIP;
        let center = self.ship.center + Vector2D::new(0.0, offset);
        self.missiles
            .push(SpaceObject::missile(center, Vector2D::new(0.0, MISSILE_SPEED)));
    }

    /// Spawn an asteroid on the top edge, falling toward the ship
    pub fn generate_asteroid<R: RandomGenerator + ?Sized>(&mut self, rng: &mut R) {
        let x = rng.int_in_range(0, i64::from(self.width)) as f64;
        let center = Point2D::new(x, f64::from(self.height));

        let drift = rng.double_in_range(-ASTEROID_MAX_DRIFT, ASTEROID_MAX_DRIFT);
        let speed = rng.double_in_range(ASTEROID_MIN_SPEED, ASTEROID_MAX_SPEED);
        let radius = rng.double_in_range(ASTEROID_MIN_RADIUS, ASTEROID_MAX_RADIUS);
        let mass = rng.double_in_range(ASTEROID_MIN_MASS, ASTEROID_MAX_MASS);

        self.asteroids.push(SpaceObject::asteroid(
            center,
            Vector2D::new(drift, -speed),
            radius,
            mass,
        ));
    }

    pub fn generate_explosion(&mut self, center: Point2D, radius: f64) {
        self.explosions.push(SpaceObject::explosion(center, radius));
    }

    /// Age every explosion by one tick
    pub fn tick_explosions(&mut self) {
        for explosion in &mut self.explosions {
            explosion.increase_tick_duration();
        }
    }

    pub fn reset_explosions(&mut self) {
        self.explosions.clear();
    }

    // --- Motion ---

    /// Move the ship, keeping it inside the arena
    pub fn move_ship(&mut self) {
        self.ship.move_by_velocity();
        self.ship.clamp_to(&self.boundary_x, &self.boundary_y);
    }

    pub fn move_asteroids(&mut self) {
        for asteroid in &mut self.asteroids {
            asteroid.move_by_velocity();
        }
    }

    pub fn move_missiles(&mut self) {
        for missile in &mut self.missiles {
            missile.move_by_velocity();
        }
    }

    // --- Trimming ---

    /// Drop asteroids that left the arena or were destroyed
    pub fn trim_asteroids(&mut self) {
        let (bx, by) = (&self.boundary_x, &self.boundary_y);
        self.asteroids
            .retain(|a| !a.is_destroyed() && a.in_boundaries(bx, by));
    }

    /// Drop missiles that left the arena or hit something
    pub fn trim_missiles(&mut self) {
        let (bx, by) = (&self.boundary_x, &self.boundary_y);
        self.missiles
            .retain(|m| !m.is_destroyed() && m.in_boundaries(bx, by));
    }

    /// Drop explosions that lived out their lifespan
    pub fn trim_explosions(&mut self) {
        self.explosions.retain(|e| !e.completed_life_span());
    }
}
