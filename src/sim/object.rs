//! Space objects and their per-variant behavior
//!
//! Every live entity shares the same physical state (center, velocity, radius,
//! mass); what differs per variant is its label, symbol, point value and, for
//! explosions, a lifespan counter.

use std::ops::RangeInclusive;

use crate::consts::*;
use crate::physics::{Point2D, Vector2D};

/// The fixed set of things that can live in the field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectKind {
    Ship,
    Asteroid,
    Missile,
    /// Ticks elapsed since the explosion appeared
    Explosion { tick_duration: u32 },
}

impl ObjectKind {
    pub fn label(&self) -> &'static str {
        match self {
            ObjectKind::Ship => "Ship",
            ObjectKind::Asteroid => "Asteroid",
            ObjectKind::Missile => "Missile",
            ObjectKind::Explosion { .. } => "Explosion",
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            ObjectKind::Ship => '^',
            ObjectKind::Asteroid => '.',
            ObjectKind::Missile => '|',
            ObjectKind::Explosion { .. } => '*',
        }
    }
}

/// A circular body in the field
#[derive(Debug, Clone, PartialEq)]
pub struct SpaceObject {
    pub kind: ObjectKind,
    pub center: Point2D,
    pub velocity: Vector2D,
    pub radius: f64,
    pub mass: f64,
    /// Set once the object should leave the field on the next trim
    destroyed: bool,
}

impl SpaceObject {
    fn new(kind: ObjectKind, center: Point2D, velocity: Vector2D, radius: f64, mass: f64) -> Self {
        debug_assert!(radius >= 0.0 && mass >= 0.0);
        Self {
            kind,
            center,
            velocity,
            radius,
            mass,
            destroyed: false,
        }
    }

    pub fn ship(center: Point2D, velocity: Vector2D) -> Self {
        Self::new(ObjectKind::Ship, center, velocity, SHIP_RADIUS, SHIP_MASS)
    }

    pub fn asteroid(center: Point2D, velocity: Vector2D, radius: f64, mass: f64) -> Self {
        Self::new(ObjectKind::Asteroid, center, velocity, radius, mass)
    }

    pub fn missile(center: Point2D, velocity: Vector2D) -> Self {
        Self::new(
            ObjectKind::Missile,
            center,
            velocity,
            MISSILE_RADIUS,
            MISSILE_MASS,
        )
    }

    /// Explosions are massless and never move
    pub fn explosion(center: Point2D, radius: f64) -> Self {
        Self::new(
            ObjectKind::Explosion { tick_duration: 0 },
            center,
            Vector2D::ZERO,
            radius,
            0.0,
        )
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    pub fn symbol(&self) -> char {
        self.kind.symbol()
    }

    pub fn is_explosion(&self) -> bool {
        matches!(self.kind, ObjectKind::Explosion { .. })
    }

    /// Advance the center by one tick of velocity
    pub fn move_by_velocity(&mut self) {
        self.center = self.center + self.velocity;
    }

    /// Inclusive containment of the center
    pub fn in_boundaries(
        &self,
        boundary_x: &RangeInclusive<f64>,
        boundary_y: &RangeInclusive<f64>,
    ) -> bool {
        boundary_x.contains(&self.center.x) && boundary_y.contains(&self.center.y)
    }

    pub fn mark_for_destruction(&mut self) {
        self.destroyed = true;
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Points for destroying this object. Only asteroids are worth anything;
    /// smaller ones are harder to hit and pay more.
    pub fn points(&self) -> u64 {
        match self.kind {
            ObjectKind::Asteroid if self.radius > 0.0 => {
                (ASTEROID_POINT_SCALE / self.radius).ceil() as u64
            }
            ObjectKind::Asteroid => ASTEROID_POINT_SCALE as u64,
            _ => 0,
        }
    }

    // --- Ship controls ---

    pub fn boost_up(&mut self) {
        self.velocity = self.velocity + Vector2D::new(0.0, SHIP_BOOST);
    }

    pub fn boost_down(&mut self) {
        self.velocity = self.velocity + Vector2D::new(0.0, -SHIP_BOOST);
    }

    pub fn boost_left(&mut self) {
        self.velocity = self.velocity + Vector2D::new(-SHIP_BOOST, 0.0);
    }

    pub fn boost_right(&mut self) {
        self.velocity = self.velocity + Vector2D::new(SHIP_BOOST, 0.0);
    }

    /// Pull the center back inside the arena, dropping the velocity component
    /// that carried it out.
    pub fn clamp_to(
        &mut self,
        boundary_x: &RangeInclusive<f64>,
        boundary_y: &RangeInclusive<f64>,
    ) {
        let x = self.center.x.clamp(*boundary_x.start(), *boundary_x.end());
        if x != self.center.x {
            self.center.x = x;
            self.velocity.dx = 0.0;
        }
        let y = self.center.y.clamp(*boundary_y.start(), *boundary_y.end());
        if y != self.center.y {
            self.center.y = y;
            self.velocity.dy = 0.0;
        }
    }

    // --- Explosion lifespan ---

    /// Age an explosion by one tick. No-op for other kinds.
    pub fn increase_tick_duration(&mut self) {
        if let ObjectKind::Explosion { tick_duration } = &mut self.kind {
            *tick_duration += 1;
            if *tick_duration >= EXPLOSION_MAX_TICK_DURATION {
                self.destroyed = true;
            }
        }
    }

    /// True once an explosion has lingered its full lifespan
    pub fn completed_life_span(&self) -> bool {
        self.is_explosion() && self.destroyed
    }

    pub fn tick_duration(&self) -> Option<u32> {
        match self.kind {
            ObjectKind::Explosion { tick_duration } => Some(tick_duration),
            _ => None,
        }
    }

    pub fn max_tick_duration(&self) -> u32 {
        EXPLOSION_MAX_TICK_DURATION
    }
}
