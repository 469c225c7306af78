use crate::config::CliConfig;
use comfy_table::{presets::UTF8_FULL, Table};
use fairdice_core::{GameReport, HistoryStore};

pub fn show_history(config: &CliConfig, verify: bool) -> anyhow::Result<()> {
    let store = HistoryStore::new(&config.data_dir);
    let history = store.load()?;

    if history.games.is_empty() {
        println!("No games recorded in {}", store.path().display());
        return Ok(());
    }

    println!("{}", history_table(&history.games, verify));

    if verify {
        let failed = history.games.iter().filter(|g| !g.verify()).count();
        if failed > 0 {
            anyhow::bail!("{} recorded game(s) failed verification", failed);
        }
        println!("All {} games verified.", history.games.len());
    }

    Ok(())
}

fn history_table(games: &[GameReport], verify: bool) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Game", "Finished", "Your dice", "House dice", "Rolls", "Result"];
    if verify {
        header.push("Verified");
    }
    table.set_header(header);

    for game in games {
        let id = game.id.to_string();
        let mut row = vec![
            id[..8].to_string(),
            game.finished_at.format("%Y-%m-%d %H:%M").to_string(),
            game.human_die.label(),
            game.house_die.label(),
            format!("{} vs {}", game.human_roll, game.house_roll),
            game.outcome.to_string(),
        ];
        if verify {
            row.push(if game.verify() { "yes" } else { "NO" }.to_string());
        }
        table.add_row(row);
    }

    table
}
