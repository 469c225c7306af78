use crate::config::CliConfig;
use crate::frontend::TerminalFrontend;
use fairdice_core::{DiceGame, HistoryStore};
use std::path::Path;

pub async fn play_game(
    config: &CliConfig,
    dice: &[String],
    dice_file: Option<&Path>,
) -> anyhow::Result<()> {
    let dice = super::load_dice(dice, dice_file).await?;
    let mut game = DiceGame::new(dice);
    let game_id = game.id();

    println!("Game ID: {}", game_id);
    println!("Pick \"?\" at any prompt to see the winning odds, \"X\" to leave.");

    // dialoguer blocks on the terminal
    let report =
        tokio::task::spawn_blocking(move || game.play(&mut TerminalFrontend)).await??;

    if report.verify() {
        println!("All {} commitments verified.", report.rounds.len());
    } else {
        tracing::error!("Game {} failed self-verification", game_id);
        anyhow::bail!("Game {} failed self-verification", game_id);
    }

    if config.record_history {
        let store = HistoryStore::new(&config.data_dir);
        let count = store.append(report)?;
        println!("Game recorded ({} games in {}).", count, store.path().display());
    }

    Ok(())
}
