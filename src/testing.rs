//! Test doubles for the platform traits and the score store

use std::collections::VecDeque;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, Ordering};

use crate::error::{PersistenceError, PersistenceResult};
use crate::persistence::{MemoryStore, ScoreRecords, ScoreStore};
use crate::platform::{Controller, RandomGenerator, Visualizer};
use crate::sim::{PlayerCommand, SpaceField};

/// Every draw is the lowest possible value
#[derive(Debug, Clone, Copy, Default)]
pub struct MinValueGenerator;

impl RandomGenerator for MinValueGenerator {
    fn probability(&mut self) -> f64 {
        0.0
    }
}

/// Every draw is the highest possible value
#[derive(Debug, Clone, Copy, Default)]
pub struct MaxValueGenerator;

impl RandomGenerator for MaxValueGenerator {
    fn probability(&mut self) -> f64 {
        1.0
    }
}

/// Every draw lands in the middle of its range
#[derive(Debug, Clone, Copy, Default)]
pub struct AverageValueGenerator;

impl RandomGenerator for AverageValueGenerator {
    fn probability(&mut self) -> f64 {
        0.5
    }
}

/// Replays a fixed list of commands and counts how often it was polled
#[derive(Debug, Default)]
pub struct ControllerSpy {
    pub commands: VecDeque<PlayerCommand>,
    pub polls: usize,
}

impl ControllerSpy {
    pub fn new(commands: impl IntoIterator<Item = PlayerCommand>) -> Self {
        Self {
            commands: commands.into_iter().collect(),
            polls: 0,
        }
    }
}

impl Controller for ControllerSpy {
    fn next_player_command(&mut self) -> Option<PlayerCommand> {
        self.polls += 1;
        self.commands.pop_front()
    }
}

/// Counts renders and remembers how crowded the last frame was
#[derive(Debug, Default)]
pub struct VisualizerSpy {
    pub renders: usize,
    pub last_object_count: usize,
}

impl Visualizer for VisualizerSpy {
    fn render_space_field(&mut self, field: &SpaceField) {
        self.renders += 1;
        self.last_object_count = field.object_count();
    }
}

/// Rejects the first `failures` saves, then stores into `inner`
#[derive(Debug, Clone)]
pub struct FailingStore {
    failures_left: Arc<AtomicU32>,
    pub inner: MemoryStore,
}

impl FailingStore {
    pub fn new(failures: u32) -> Self {
        Self {
            failures_left: Arc::new(AtomicU32::new(failures)),
            inner: MemoryStore::new(),
        }
    }
}

impl ScoreStore for FailingStore {
    fn load(&self) -> ScoreRecords {
        self.inner.load()
    }

    fn save(&self, records: &ScoreRecords) -> PersistenceResult<()> {
        let left = self.failures_left.load(Ordering::SeqCst);
        if left > 0 {
            self.failures_left.store(left - 1, Ordering::SeqCst);
            return Err(PersistenceError::Io {
                path: "scores".into(),
                source: io::Error::other("disk full"),
            });
        }
        self.inner.save(records)
    }
}
