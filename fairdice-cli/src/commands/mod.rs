pub mod history;
pub mod odds;
pub mod play;
pub mod verify;

pub use history::show_history;
pub use odds::show_odds;
pub use play::play_game;
pub use verify::verify_commitment;

use fairdice_core::{DiceConfig, DiceSet};
use std::path::Path;

/// Dice from a JSON file when given, otherwise from the positional arguments
pub async fn load_dice(args: &[String], dice_file: Option<&Path>) -> anyhow::Result<DiceSet> {
    let config = match dice_file {
        Some(path) => {
            let json = tokio::fs::read_to_string(path).await.map_err(|e| {
                anyhow::anyhow!("Failed to read dice file {}: {}", path.display(), e)
            })?;
            DiceConfig::from_json(&json)?
        }
        None => DiceConfig::from_args(args)?,
    };

    tracing::debug!("Loaded {} dice", config.dice.len());
    Ok(config.into_dice_set()?)
}
