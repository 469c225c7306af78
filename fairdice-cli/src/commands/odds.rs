use crate::frontend::matrix_table;
use fairdice_core::probability_matrix;
use std::path::Path;

pub async fn show_odds(dice: &[String], dice_file: Option<&Path>) -> anyhow::Result<()> {
    let dice = super::load_dice(dice, dice_file).await?;
    let matrix = probability_matrix(&dice);

    println!("Probability of the win for the row dice against the column dice:");
    println!("{}", matrix_table(&matrix));

    Ok(())
}
