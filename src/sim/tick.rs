//! Fixed timestep simulation steps
//!
//! The pieces of one frame that only touch the field: command application,
//! missile hits, pairwise collisions, motion and trimming. Ordering and the
//! random spawn draw live in the engine.

use log::debug;

use super::collision::{collide_with, impacts};
use super::field::SpaceField;
use super::object::SpaceObject;
use crate::physics::Point2D;

/// Input commands a player can issue in one tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayerCommand {
    MoveShipUp,
    MoveShipDown,
    MoveShipLeft,
    MoveShipRight,
    LaunchMissile,
    PauseGame,
}

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Simulation frozen; input is still polled so the game can resume
    Paused,
}

impl GamePhase {
    pub fn toggled(self) -> Self {
        match self {
            GamePhase::Playing => GamePhase::Paused,
            GamePhase::Paused => GamePhase::Playing,
        }
    }

    pub fn is_playing(self) -> bool {
        self == GamePhase::Playing
    }
}

/// Running score of the current match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MatchStats {
    pub scored_points: u64,
    pub destroyed_asteroids: u64,
}

/// Apply one player command to the field
pub fn apply_command(field: &mut SpaceField, phase: &mut GamePhase, command: PlayerCommand) {
    match command {
        PlayerCommand::MoveShipUp => field.ship.boost_up(),
        PlayerCommand::MoveShipDown => field.ship.boost_down(),
        PlayerCommand::MoveShipLeft => field.ship.boost_left(),
        PlayerCommand::MoveShipRight => field.ship.boost_right(),
        PlayerCommand::LaunchMissile => field.generate_missile(),
        PlayerCommand::PauseGame => *phase = phase.toggled(),
    }
}

/// Destroy every missile/asteroid pair that overlaps, leaving an explosion where
/// the asteroid was. Returns the number of asteroids destroyed.
///
/// An asteroid already destroyed earlier in the pass cannot be scored twice.
pub fn handle_missile_collisions(field: &mut SpaceField, stats: &mut MatchStats) -> u32 {
    let mut blasts: Vec<(Point2D, f64)> = Vec::new();

    for missile in field.missiles.iter_mut() {
        for asteroid in field.asteroids.iter_mut() {
            if missile.is_destroyed() || asteroid.is_destroyed() {
                continue;
            }
            if impacts(missile, asteroid) {
                missile.mark_for_destruction();
                asteroid.mark_for_destruction();
                blasts.push((asteroid.center, asteroid.radius));

                let points = asteroid.points();
                stats.scored_points += points;
                stats.destroyed_asteroids += 1;
                debug!(
                    "Asteroid destroyed at ({:.1}, {:.1}) for {} points",
                    asteroid.center.x, asteroid.center.y, points
                );
            }
        }
    }

    let hits = blasts.len() as u32;
    for (center, radius) in blasts {
        field.generate_explosion(center, radius);
    }
    hits
}

/// Bounce every overlapping pair of live, massive objects off each other.
/// Explosions and objects already destroyed this tick take no part.
/// Returns the number of pairs resolved.
pub fn handle_collisions(field: &mut SpaceField, restitution: f64) -> usize {
    let mut bodies: Vec<&mut SpaceObject> = field
        .space_objects_mut()
        .into_iter()
        .filter(|o| !o.is_explosion() && !o.is_destroyed())
        .collect();

    let mut resolved = 0;
    for i in 0..bodies.len() {
        let (head, tail) = bodies.split_at_mut(i + 1);
        let first: &mut SpaceObject = &mut *head[i];
        for second in tail.iter_mut() {
            if impacts(first, second) && collide_with(first, second, restitution) {
                resolved += 1;
            }
        }
    }
    resolved
}

/// Advance ship, asteroids and missiles by one tick. Explosions never move.
pub fn move_space_objects(field: &mut SpaceField) {
    field.move_ship();
    field.move_asteroids();
    field.move_missiles();
}

/// Remove everything that left the arena or finished its lifespan
pub fn trim_space_objects(field: &mut SpaceField) {
    field.trim_asteroids();
    field.trim_missiles();
    field.trim_explosions();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::physics::Vector2D;

    fn field_with_asteroid(center: Point2D, velocity: Vector2D) -> SpaceField {
        let mut field = SpaceField::new(40, 40);
        field
            .asteroids
            .push(SpaceObject::asteroid(center, velocity, 1.0, 500.0));
        field
    }

    #[test]
    fn test_apply_command() {
        let mut field = SpaceField::new(20, 20);
        let mut phase = GamePhase::Playing;

        apply_command(&mut field, &mut phase, PlayerCommand::MoveShipUp);
        apply_command(&mut field, &mut phase, PlayerCommand::MoveShipLeft);
        assert_eq!(field.ship.velocity, Vector2D::new(-1.0, 1.0));

        apply_command(&mut field, &mut phase, PlayerCommand::LaunchMissile);
        assert_eq!(field.missiles.len(), 1);

        apply_command(&mut field, &mut phase, PlayerCommand::PauseGame);
        assert_eq!(phase, GamePhase::Paused);
        apply_command(&mut field, &mut phase, PlayerCommand::PauseGame);
        assert_eq!(phase, GamePhase::Playing);
    }

    #[test]
    fn test_missile_hit_scores_and_explodes() {
        let mut field = field_with_asteroid(Point2D::new(20.0, 20.0), Vector2D::ZERO);
        field
            .missiles
            .push(SpaceObject::missile(Point2D::new(20.0, 19.0), Vector2D::ZERO));
        let mut stats = MatchStats::default();

        let hits = handle_missile_collisions(&mut field, &mut stats);

        assert_eq!(hits, 1);
        assert!(field.missiles[0].is_destroyed());
        assert!(field.asteroids[0].is_destroyed());
        assert_eq!(field.explosions.len(), 1);
        assert_eq!(field.explosions[0].center, Point2D::new(20.0, 20.0));
        assert_eq!(stats.scored_points, 100);
        assert_eq!(stats.destroyed_asteroids, 1);
    }

    #[test]
    fn test_asteroid_cannot_be_scored_twice() {
        let mut field = field_with_asteroid(Point2D::new(20.0, 20.0), Vector2D::ZERO);
        for x in [19.5, 20.5] {
            field
                .missiles
                .push(SpaceObject::missile(Point2D::new(x, 19.0), Vector2D::ZERO));
        }
        let mut stats = MatchStats::default();

        assert_eq!(handle_missile_collisions(&mut field, &mut stats), 1);
        assert_eq!(stats.destroyed_asteroids, 1);
        assert!(!field.missiles[1].is_destroyed());
    }

    #[test]
    fn test_handle_collisions_skips_explosions() {
        let mut field = field_with_asteroid(Point2D::new(10.0, 10.0), Vector2D::new(1.0, 0.0));
        field.generate_explosion(Point2D::new(11.0, 10.0), 2.0);

        assert_eq!(handle_collisions(&mut field, 1.0), 0);
        assert_eq!(field.asteroids[0].velocity, Vector2D::new(1.0, 0.0));
        assert_eq!(field.explosions[0].velocity, Vector2D::ZERO);
    }

    #[test]
    fn test_handle_collisions_bounces_asteroids() {
        let mut field = field_with_asteroid(Point2D::new(10.0, 10.0), Vector2D::new(1.0, 0.0));
        field.asteroids.push(SpaceObject::asteroid(
            Point2D::new(11.5, 10.0),
            Vector2D::new(-1.0, 0.0),
            1.0,
            500.0,
        ));

        assert_eq!(handle_collisions(&mut field, 1.0), 1);
        assert_eq!(field.asteroids[0].velocity.dx, -1.0);
        assert_eq!(field.asteroids[1].velocity.dx, 1.0);
    }

    #[test]
    fn test_destroyed_asteroid_does_not_bounce_neighbour() {
        let mut field = field_with_asteroid(Point2D::new(10.0, 10.0), Vector2D::ZERO);
        field.asteroids.push(SpaceObject::asteroid(
            Point2D::new(11.5, 10.0),
            Vector2D::new(-1.0, 0.0),
            1.0,
            500.0,
        ));
        field
            .missiles
            .push(SpaceObject::missile(Point2D::new(10.0, 9.0), Vector2D::ZERO));
        let mut stats = MatchStats::default();

        assert_eq!(handle_missile_collisions(&mut field, &mut stats), 1);
        assert!(field.asteroids[0].is_destroyed());

        assert_eq!(handle_collisions(&mut field, 1.0), 0);
        assert_eq!(field.asteroids[1].velocity, Vector2D::new(-1.0, 0.0));
    }

    #[test]
    fn test_move_and_trim() {
        let mut field = field_with_asteroid(Point2D::new(5.0, 0.5), Vector2D::new(0.0, -1.0));
        field.generate_missile();
        let missile_start = field.missiles[0].center;

        move_space_objects(&mut field);
        assert_eq!(
            field.missiles[0].center,
            missile_start + field.missiles[0].velocity
        );

        trim_space_objects(&mut field);
        assert!(field.asteroids.is_empty());
        assert_eq!(field.missiles.len(), 1);
    }
}
