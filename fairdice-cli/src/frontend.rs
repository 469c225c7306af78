use comfy_table::{presets::UTF8_FULL, Table};
use dialoguer::Select;
use fairdice_core::{
    Choice, FairDiceError, Frontend, GameEvent, Party, ProbabilityMatrix, Prompt, Result,
    RoundKind,
};

const HELP: &str = "? - help";
const EXIT: &str = "X - exit";

/// Interactive terminal frontend: dialoguer menus, comfy-table help
#[derive(Debug, Default)]
pub struct TerminalFrontend;

impl Frontend for TerminalFrontend {
    fn choose(&mut self, prompt: &Prompt) -> Result<Choice> {
        let mut items: Vec<String> = prompt
            .options
            .iter()
            .enumerate()
            .map(|(i, option)| format!("{} - {}", i, option))
            .collect();
        items.push(EXIT.to_string());
        items.push(HELP.to_string());

        let selection = Select::new()
            .with_prompt(&prompt.title)
            .items(&items)
            .default(0)
            .interact_opt()
            .map_err(|e| FairDiceError::dialog(e.to_string()))?;

        Ok(match selection {
            Some(i) if i < prompt.options.len() => Choice::Pick(i),
            Some(i) if i == prompt.options.len() + 1 => Choice::Help,
            _ => Choice::Abort,
        })
    }

    fn show(&mut self, event: &GameEvent) -> Result<()> {
        match event {
            GameEvent::Committed { kind, range, tag } => {
                println!();
                match kind {
                    RoundKind::FirstMove => println!("Let's determine who makes the first move."),
                    RoundKind::HouseRoll => println!("It's time for my roll."),
                    RoundKind::HumanRoll => println!("It's time for your roll."),
                }
                println!(
                    "I selected a random value in the range 0..{} (HMAC={}).",
                    range - 1,
                    tag
                );
            }
            GameEvent::Revealed(record) => {
                println!(
                    "My number is {} (KEY={}).",
                    record.secret_number,
                    record.key_hex()
                );
                if !record.kind.is_guess() {
                    println!(
                        "The fair number generation result is {} + {} = {} (mod {}).",
                        record.secret_number, record.contribution, record.value, record.range
                    );
                }
            }
            GameEvent::FirstMove { human_first } => {
                if *human_first {
                    println!("You guessed it, you make the first move.");
                } else {
                    println!("Not quite, I make the first move.");
                }
            }
            GameEvent::DieAssigned { party, die, .. } => match party {
                Party::Human => println!("You choose the {} dice.", die),
                Party::House => println!("I choose the {} dice.", die),
            },
            GameEvent::Rolled { party, face } => match party {
                Party::Human => println!("Your roll result is {}.", face),
                Party::House => println!("My roll result is {}.", face),
            },
            GameEvent::Help(matrix) => {
                println!("Probability of the win for the row dice against the column dice:");
                println!("{}", matrix_table(matrix));
            }
            GameEvent::Finished(outcome) => {
                println!();
                println!("═══════════════════════════════════");
                println!("{}!", outcome);
            }
        }
        Ok(())
    }
}

/// Odds table with die labels as row and column headers
pub fn matrix_table(matrix: &ProbabilityMatrix) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL);

    let mut header = vec!["Row v / Column >".to_string()];
    header.extend(matrix.labels().iter().cloned());
    table.set_header(header);

    for (label, odds) in matrix.rows() {
        let mut row = vec![label.clone()];
        row.extend(odds.iter().map(|o| o.to_string()));
        table.add_row(row);
    }

    table
}
