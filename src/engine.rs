//! Fixed-rate game loop
//!
//! One tick: poll input, update the field (only while playing), render.
//! The update runs in a fixed order:
//! 1. Age explosions, then resolve missile hits
//! 2. Bounce overlapping bodies
//! 3. Move
//! 4. Trim
//! 5. Maybe spawn one asteroid

use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;
use std::time::Instant;

use log::{debug, info};
use tokio::sync::watch;

use crate::error::PersistenceResult;
use crate::highscores::{Leaderboard, MatchInfo, Scoreboard};
use crate::persistence::{ScoreRecords, ScoreStore};
use crate::platform::{Controller, RandomGenerator, Visualizer};
use crate::settings::EngineConfig;
use crate::sim::{self, GamePhase, MatchStats, SpaceField};

/// `startTime` layout, e.g. `2024-02-03 04:05`
pub const START_TIME_FORMAT: &str = "%Y-%m-%d %H:%M";

/// Latest leaderboard snapshot; None until records are loaded
pub type LeaderboardFeed = watch::Sender<Option<Leaderboard>>;

pub struct GameEngine<R, C, V> {
    config: EngineConfig,
    generator: R,
    controller: C,
    visualizer: V,
    store: Box<dyn ScoreStore + Send>,
    feed: Option<LeaderboardFeed>,

    field: SpaceField,
    phase: GamePhase,
    stats: MatchStats,
    scoreboard: Scoreboard,
    leaderboard: Leaderboard,
    start_time: String,
    ticks: u64,
}

impl<R, C, V> GameEngine<R, C, V>
where
    R: RandomGenerator,
    C: Controller,
    V: Visualizer,
{
    /// Build an engine around its collaborators, loading prior score records
    pub fn new<S>(
        config: EngineConfig,
        generator: R,
        controller: C,
        visualizer: V,
        store: S,
    ) -> Self
    where
        S: ScoreStore + Send + 'static,
    {
        let ScoreRecords {
            scoreboard,
            leaderboard,
        } = store.load();
        let field = SpaceField::new(config.spacefield_width, config.spacefield_height);

        info!(
            "Engine ready: {}x{} field at {} fps",
            config.spacefield_width, config.spacefield_height, config.frame_rate
        );

        let mut engine = Self {
            config,
            generator,
            controller,
            visualizer,
            store: Box::new(store),
            feed: None,
            field,
            phase: GamePhase::Playing,
            stats: MatchStats::default(),
            scoreboard,
            leaderboard,
            start_time: String::new(),
            ticks: 0,
        };
        engine.set_start_time();
        engine
    }

    /// Publish leaderboard snapshots into `feed`, starting with the loaded one
    pub fn with_leaderboard_feed(mut self, feed: LeaderboardFeed) -> Self {
        self.feed = Some(feed);
        self.publish_leaderboard();
        self
    }

    // --- Loop drivers ---

    /// Run until `shutdown` is raised, pacing ticks to the configured frame rate.
    /// A tick that overruns its budget is followed immediately by the next.
    pub fn run(&mut self, shutdown: &AtomicBool) {
        let budget = self.config.frame_budget();
        info!("Game loop started ({} ms per frame)", budget.as_millis());

        while !shutdown.load(Ordering::Relaxed) {
            let started = Instant::now();
            self.tick();
            if let Some(rest) = budget.checked_sub(started.elapsed()) {
                thread::sleep(rest);
            }
        }

        info!("Game loop stopped after {} ticks", self.ticks);
    }

    /// Run exactly `max_iterations` ticks back to back
    pub fn execute(&mut self, max_iterations: usize) {
        for _ in 0..max_iterations {
            self.tick();
        }
    }

    pub fn tick(&mut self) {
        self.process_player_input();
        self.update_space_objects();
        self.render_space_field();
        self.ticks += 1;
    }

    // --- Tick stages ---

    /// Apply at most one pending command. Polled even while paused.
    pub fn process_player_input(&mut self) {
        let Some(command) = self.controller.next_player_command() else {
            return;
        };

        let before = self.phase;
        sim::apply_command(&mut self.field, &mut self.phase, command);
        if before != self.phase {
            info!(
                "Game {}",
                if self.phase.is_playing() { "resumed" } else { "paused" }
            );
        }
    }

    pub fn update_space_objects(&mut self) {
        if !self.phase.is_playing() {
            return;
        }
        self.handle_explosions();
        self.handle_collisions();
        self.move_space_objects();
        self.trim_space_objects();
        self.generate_asteroids();
    }

    /// Age explosions, then turn missile hits into new ones
    pub fn handle_explosions(&mut self) {
        self.field.tick_explosions();
        let hits = sim::handle_missile_collisions(&mut self.field, &mut self.stats);
        if hits > 0 {
            debug!(
                "{} asteroid(s) destroyed, score now {}",
                hits, self.stats.scored_points
            );
        }
    }

    pub fn handle_collisions(&mut self) {
        sim::handle_collisions(&mut self.field, self.config.coefficient_restitution);
    }

    pub fn move_space_objects(&mut self) {
        sim::move_space_objects(&mut self.field);
    }

    pub fn trim_space_objects(&mut self) {
        sim::trim_space_objects(&mut self.field);
    }

    /// One draw per tick; spawn when it does not exceed the configured chance
    pub fn generate_asteroids(&mut self) {
        if self.generator.probability() <= self.config.asteroid_probability {
            self.field.generate_asteroid(&mut self.generator);
        }
    }

    pub fn render_space_field(&mut self) {
        self.visualizer.render_space_field(&self.field);
    }

    // --- Match lifecycle ---

    /// Stamp the current local time as the match start
    pub fn set_start_time(&mut self) {
        self.start_time = chrono::Local::now().format(START_TIME_FORMAT).to_string();
    }

    /// Record the current match on both boards and persist them.
    /// In-memory boards only change once the store accepted the new records.
    pub fn save_data(&mut self) -> PersistenceResult<()> {
        let entry = MatchInfo::new(
            self.start_time.clone(),
            self.stats.scored_points,
            self.stats.destroyed_asteroids,
        );

        let mut records = ScoreRecords {
            scoreboard: self.scoreboard.clone(),
            leaderboard: self.leaderboard.clone(),
        };
        records.scoreboard.add(entry.clone());
        let rank = records.leaderboard.add(entry);

        self.store.save(&records)?;
        self.scoreboard = records.scoreboard;
        self.leaderboard = records.leaderboard;

        match rank {
            Some(rank) => info!(
                "Match scored {} points, rank #{} on the leaderboard",
                self.stats.scored_points, rank
            ),
            None => info!(
                "Match scored {} points, not on the leaderboard",
                self.stats.scored_points
            ),
        }
        self.publish_leaderboard();
        Ok(())
    }

    fn publish_leaderboard(&self) {
        if let Some(feed) = &self.feed {
            feed.send_replace(Some(self.leaderboard.clone()));
        }
    }

    // --- Accessors ---

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn field(&self) -> &SpaceField {
        &self.field
    }

    pub fn field_mut(&mut self) -> &mut SpaceField {
        &mut self.field
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.stats.scored_points
    }

    pub fn destroyed_asteroids(&self) -> u64 {
        self.stats.destroyed_asteroids
    }

    pub fn leaderboard(&self) -> &Leaderboard {
        &self.leaderboard
    }

    pub fn scoreboard(&self) -> &Scoreboard {
        &self.scoreboard
    }

    pub fn start_time(&self) -> &str {
        &self.start_time
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    pub fn visualizer(&self) -> &V {
        &self.visualizer
    }

    #[cfg(test)]
    fn set_match_stats(&mut self, scored_points: u64, destroyed_asteroids: u64) {
        self.stats = MatchStats {
            scored_points,
            destroyed_asteroids,
        };
    }
}
