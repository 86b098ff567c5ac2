//! Match records, leaderboard and scoreboard
//!
//! The scoreboard is the full history of finished matches; the leaderboard keeps
//! only the best [`MAX_LEADERBOARD_SIZE`] of them, highest score first.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::consts::MAX_LEADERBOARD_SIZE;

/// One finished match
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchInfo {
    /// Match start, formatted `yyyy-MM-dd HH:mm`
    pub start_time: String,
    pub final_score: u64,
    pub destroyed_asteroids: u64,
}

impl MatchInfo {
    pub fn new(start_time: impl Into<String>, final_score: u64, destroyed_asteroids: u64) -> Self {
        Self {
            start_time: start_time.into(),
            final_score,
            destroyed_asteroids,
        }
    }

    /// Ranking order: ascending by final score only. Matches with equal scores
    /// rank equal even if other fields differ.
    pub fn rank_cmp(&self, other: &Self) -> Ordering {
        self.final_score.cmp(&other.final_score)
    }
}

/// Best matches, sorted descending by score
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    pub entries: Vec<MatchInfo>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild from stored entries, restoring order and bound
    pub fn from_entries(entries: Vec<MatchInfo>) -> Self {
        let mut board = Self { entries };
        board.normalize();
        board
    }

    /// Insert a match, re-sort and drop everything past the top entries.
    /// Returns the rank achieved (1-indexed) or None if it fell off the board.
    pub fn add(&mut self, entry: MatchInfo) -> Option<usize> {
        self.entries.push(entry);
        let inserted = self.entries.len() - 1;

        // Stable sort: ties keep insertion order, so the new entry ranks last among equals
        let mut order: Vec<usize> = (0..self.entries.len()).collect();
        order.sort_by(|&a, &b| self.entries[b].rank_cmp(&self.entries[a]));
        let rank = order.iter().position(|&i| i == inserted).map(|p| p + 1);

        self.normalize();
        rank.filter(|&r| r <= MAX_LEADERBOARD_SIZE)
    }

    fn normalize(&mut self) {
        self.entries.sort_by(|a, b| b.rank_cmp(a));
        self.entries.truncate(MAX_LEADERBOARD_SIZE);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Get the top score (if any)
    pub fn top_score(&self) -> Option<u64> {
        self.entries.first().map(|e| e.final_score)
    }
}

/// Every finished match, in the order played
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Scoreboard {
    pub entries: Vec<MatchInfo>,
}

impl Scoreboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, entry: MatchInfo) {
        self.entries.push(entry);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(score: u64) -> MatchInfo {
        MatchInfo::new("2024-01-01 12:00", score, score / 10)
    }

    #[test]
    fn test_match_info_ranks_by_score_only() {
        let a = MatchInfo::new("2024-01-01 12:00", 50, 1);
        let b = MatchInfo::new("2023-05-05 08:30", 50, 9);
        assert_eq!(a.rank_cmp(&b), Ordering::Equal);
        assert_eq!(entry(10).rank_cmp(&entry(20)), Ordering::Less);
    }

    #[test]
    fn test_leaderboard_keeps_top_three_descending() {
        let mut board = Leaderboard::new();
        for score in [40, 10, 90, 70, 20] {
            board.add(entry(score));
        }

        let scores: Vec<u64> = board.entries.iter().map(|e| e.final_score).collect();
        assert_eq!(scores, vec![90, 70, 40]);
        assert_eq!(board.top_score(), Some(90));
    }

    #[test]
    fn test_leaderboard_rank() {
        let mut board = Leaderboard::new();
        assert_eq!(board.add(entry(50)), Some(1));
        assert_eq!(board.add(entry(80)), Some(1));
        assert_eq!(board.add(entry(60)), Some(2));
        assert_eq!(board.add(entry(10)), None);
        assert_eq!(board.len(), 3);
    }

    #[test]
    fn test_leaderboard_ties_keep_insertion_order() {
        let mut board = Leaderboard::new();
        for (i, time) in ["a", "b", "c", "d", "e"].iter().enumerate() {
            board.add(MatchInfo::new(*time, 100, i as u64));
        }

        let times: Vec<&str> = board.entries.iter().map(|e| e.start_time.as_str()).collect();
        assert_eq!(times, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_scoreboard_is_unbounded_history() {
        let mut board = Scoreboard::new();
        for score in 0..10 {
            board.add(entry(score));
        }
        assert_eq!(board.len(), 10);
        assert_eq!(board.entries[0].final_score, 0);
    }

    #[test]
    fn test_serialized_layout() {
        let mut board = Leaderboard::new();
        board.add(MatchInfo::new("2024-02-03 04:05", 120, 3));

        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(
            json,
            r#"[{"startTime":"2024-02-03 04:05","finalScore":120,"destroyedAsteroids":3}]"#
        );

        let back: Leaderboard = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
