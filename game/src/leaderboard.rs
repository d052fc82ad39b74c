use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const LEADERBOARD_PATH_ENV: &str = "BLOCKFALL_LEADERBOARD_PATH";
const LEADERBOARD_FILE: &str = "rankings.json";

#[derive(Debug, Error)]
pub enum LeaderboardError {
    #[error("failed to access leaderboard at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("leaderboard at {path} is not valid JSON: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("failed to encode leaderboard: {0}")]
    Encode(#[source] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RankingRecord {
    pub name: String,
    pub score: u32,
}

impl RankingRecord {
    pub fn new(name: impl Into<String>, score: u32) -> Self {
        Self {
            name: name.into(),
            score,
        }
    }
}

/// Records ordered by descending score. Equal scores keep insertion order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Leaderboard {
    records: Vec<RankingRecord>,
}

impl Leaderboard {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn records(&self) -> &[RankingRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn insert(&mut self, record: RankingRecord) {
        self.records.push(record);
        self.sort();
    }

    /// Stable sort, so a record stored earlier stays ahead of a later one with the same score.
    fn sort(&mut self) {
        self.records.sort_by(|a, b| b.score.cmp(&a.score));
    }

    pub fn truncate(&mut self, max_records: usize) {
        self.records.truncate(max_records);
    }
}

/// The leaderboard lives as one JSON array in one file, read whole and written whole.
#[derive(Debug, Clone)]
pub struct LeaderboardStore {
    path: PathBuf,
    max_records: Option<usize>,
}

impl LeaderboardStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            max_records: None,
        }
    }

    /// `BLOCKFALL_LEADERBOARD_PATH`, else the platform data dir, else the working directory.
    pub fn from_env() -> Self {
        Self::new(default_path())
    }

    /// `None` keeps every record.
    pub fn with_max_records(mut self, max_records: Option<usize>) -> Self {
        self.max_records = max_records;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// A missing file reads as an empty leaderboard.
    pub fn load(&self) -> Result<Leaderboard, LeaderboardError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Leaderboard::new()),
            Err(source) => {
                return Err(LeaderboardError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };
        let mut board: Leaderboard =
            serde_json::from_slice(&bytes).map_err(|source| LeaderboardError::Parse {
                path: self.path.clone(),
                source,
            })?;
        board.sort();
        Ok(board)
    }

    /// Overwrites the stored snapshot.
    pub fn save(&self, board: &Leaderboard) -> Result<(), LeaderboardError> {
        let io_err = |source: io::Error| LeaderboardError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(io_err)?;
            }
        }
        let text = serde_json::to_string_pretty(board).map_err(LeaderboardError::Encode)?;
        fs::write(&self.path, text).map_err(io_err)
    }

    /// Read-modify-write of one new record. A file that fails to parse is left as is.
    pub fn submit(&self, record: RankingRecord) -> Result<Leaderboard, LeaderboardError> {
        let mut board = self.load()?;
        board.insert(record);
        if let Some(max) = self.max_records {
            board.truncate(max);
        }
        self.save(&board)?;
        Ok(board)
    }
}

fn default_path() -> PathBuf {
    if let Some(explicit) = std::env::var_os(LEADERBOARD_PATH_ENV) {
        return PathBuf::from(explicit);
    }
    dirs::data_dir()
        .map(|dir| dir.join("blockfall"))
        .unwrap_or_else(|| PathBuf::from("."))
        .join(LEADERBOARD_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_descending_order_and_ties_stable() {
        let mut board = Leaderboard::new();
        board.insert(RankingRecord::new("ana", 300));
        board.insert(RankingRecord::new("bo", 900));
        board.insert(RankingRecord::new("cy", 300));

        let names: Vec<&str> = board.records().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["bo", "ana", "cy"]);
    }

    #[test]
    fn serializes_as_a_bare_array() {
        let mut board = Leaderboard::new();
        board.insert(RankingRecord::new("ana", 100));
        let json = serde_json::to_string(&board).expect("serialize");
        assert_eq!(json, r#"[{"name":"ana","score":100}]"#);
    }
}
