use crate::error::{FairDiceError, Result};
use crate::game::GameReport;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const HISTORY_FILE: &str = "games.json";

/// Finished games, kept as a single JSON file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameHistory {
    pub games: Vec<GameReport>,
}

#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            path: data_dir.join(HISTORY_FILE),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Missing file reads as an empty history
    pub fn load(&self) -> Result<GameHistory> {
        if !self.path.exists() {
            return Ok(GameHistory::default());
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(GameHistory::default());
        }
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, history: &GameHistory) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FairDiceError::internal(format!("Failed to create directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(history)?;
        std::fs::write(&self.path, content)?;
        Ok(())
    }

    pub fn append(&self, report: GameReport) -> Result<usize> {
        let mut history = self.load()?;
        tracing::debug!("Recording game {} in {}", report.id, self.path.display());
        history.games.push(report);
        self.save(&history)?;
        Ok(history.games.len())
    }
}
