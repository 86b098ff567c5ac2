//! Durable storage for score records
//!
//! Features:
//! - Plain JSON arrays of match records, one file per collection
//! - Missing, empty or corrupt files load as "no prior data"
//! - Temp-then-rename writes: both files are fully written to temp siblings
//!   before either real file is replaced
//!
//! The two renames are still separate steps. If the leaderboard rename fails
//! after the scoreboard one succeeded, the new scoreboard sits next to the old
//! leaderboard until the next successful save.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{PersistenceError, PersistenceResult};
use crate::highscores::{Leaderboard, MatchInfo, Scoreboard};

pub const SCOREBOARD_FILE: &str = "Scoreboard.json";
pub const LEADERBOARD_FILE: &str = "Leaderboard.json";

/// Both score collections, saved and loaded together
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ScoreRecords {
    pub scoreboard: Scoreboard,
    pub leaderboard: Leaderboard,
}

/// Where score records live between runs
pub trait ScoreStore {
    /// Load whatever is stored. Never fails: unreadable data means no data.
    fn load(&self) -> ScoreRecords;

    /// Replace the stored records with `records`
    fn save(&self, records: &ScoreRecords) -> PersistenceResult<()>;
}

/// Two JSON files in one directory
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    scoreboard_path: PathBuf,
    leaderboard_path: PathBuf,
}

impl JsonFileStore {
    /// Store records as `Scoreboard.json` and `Leaderboard.json` under `dir`
    pub fn new(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::with_paths(dir.join(SCOREBOARD_FILE), dir.join(LEADERBOARD_FILE))
    }

    pub fn with_paths(scoreboard_path: PathBuf, leaderboard_path: PathBuf) -> Self {
        Self {
            scoreboard_path,
            leaderboard_path,
        }
    }

    pub fn scoreboard_path(&self) -> &Path {
        &self.scoreboard_path
    }

    pub fn leaderboard_path(&self) -> &Path {
        &self.leaderboard_path
    }
}

impl ScoreStore for JsonFileStore {
    fn load(&self) -> ScoreRecords {
        let scoreboard = Scoreboard {
            entries: read_entries(&self.scoreboard_path),
        };
        let leaderboard = Leaderboard::from_entries(read_entries(&self.leaderboard_path));
        log::info!(
            "Loaded {} scoreboard and {} leaderboard entries",
            scoreboard.len(),
            leaderboard.len()
        );
        ScoreRecords {
            scoreboard,
            leaderboard,
        }
    }

    fn save(&self, records: &ScoreRecords) -> PersistenceResult<()> {
        let scoreboard_json = serde_json::to_string(&records.scoreboard)?;
        let leaderboard_json = serde_json::to_string(&records.leaderboard)?;

        let scoreboard_tmp = write_temp(&self.scoreboard_path, &scoreboard_json)?;
        let leaderboard_tmp = match write_temp(&self.leaderboard_path, &leaderboard_json) {
            Ok(tmp) => tmp,
            Err(err) => {
                let _ = fs::remove_file(&scoreboard_tmp);
                return Err(err);
            }
        };

        if let Err(err) = commit(&scoreboard_tmp, &self.scoreboard_path) {
            let _ = fs::remove_file(&leaderboard_tmp);
            return Err(err);
        }
        if let Err(err) = commit(&leaderboard_tmp, &self.leaderboard_path) {
            log::warn!("Scoreboard saved but leaderboard was not");
            let _ = fs::remove_file(&leaderboard_tmp);
            return Err(err);
        }

        log::info!(
            "Score records saved ({} matches, {} on leaderboard)",
            records.scoreboard.len(),
            records.leaderboard.len()
        );
        Ok(())
    }
}

fn read_entries(path: &Path) -> Vec<MatchInfo> {
    let text = match fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound => {
            log::info!("No score file at {}, starting fresh", path.display());
            return Vec::new();
        }
        Err(err) => {
            log::warn!("Could not read {}: {}", path.display(), err);
            return Vec::new();
        }
    };

    if text.trim().is_empty() {
        return Vec::new();
    }

    serde_json::from_str(&text).unwrap_or_else(|err| {
        log::warn!("Ignoring malformed score file {}: {}", path.display(), err);
        Vec::new()
    })
}

fn temp_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    path.with_file_name(name)
}

fn io_error(path: &Path) -> impl FnOnce(io::Error) -> PersistenceError + '_ {
    move |source| PersistenceError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write `contents` next to `path` and flush it to disk
fn write_temp(path: &Path, contents: &str) -> PersistenceResult<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(io_error(parent))?;
    }

    let tmp = temp_path(path);
    let mut file = fs::File::create(&tmp).map_err(io_error(&tmp))?;
    file.write_all(contents.as_bytes()).map_err(io_error(&tmp))?;
    file.sync_all().map_err(io_error(&tmp))?;
    Ok(tmp)
}

fn commit(tmp: &Path, path: &Path) -> PersistenceResult<()> {
    fs::rename(tmp, path).map_err(io_error(path))
}

/// Records held in memory; clones share the same storage
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Arc<Mutex<ScoreRecords>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_records(records: ScoreRecords) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
        }
    }

    /// Copy of the currently stored records
    pub fn snapshot(&self) -> ScoreRecords {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ScoreStore for MemoryStore {
    fn load(&self) -> ScoreRecords {
        self.snapshot()
    }

    fn save(&self, records: &ScoreRecords) -> PersistenceResult<()> {
        *self
            .records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = records.clone();
        Ok(())
    }
}
