//! Pairwise win odds between dice.
//!
//! Counts are exact; conversion to `f64` happens only for display.

use crate::dice::{DiceSet, Die};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of face pairs won out of all pairs. Ties count toward `total` only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WinOdds {
    pub wins: u64,
    pub total: u64,
}

impl WinOdds {
    pub fn as_f64(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.wins as f64 / self.total as f64
        }
    }

    /// Fraction reduced to lowest terms
    pub fn reduced(&self) -> (u64, u64) {
        let divisor = gcd(self.wins, self.total).max(1);
        (self.wins / divisor, self.total / divisor)
    }
}

impl fmt::Display for WinOdds {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.3}", self.as_f64())
    }
}

fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// P(a rolls strictly higher than b)
pub fn win_probability(a: &Die, b: &Die) -> WinOdds {
    let wins: u64 = a
        .faces()
        .iter()
        .map(|&fa| b.faces().iter().filter(|&&fb| fa > fb).count() as u64)
        .sum();

    WinOdds {
        wins,
        total: (a.face_count() * b.face_count()) as u64,
    }
}

/// Square table of `win_probability(row, column)` keyed by die labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProbabilityMatrix {
    labels: Vec<String>,
    cells: Vec<Vec<WinOdds>>,
}

impl ProbabilityMatrix {
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn get(&self, row: usize, column: usize) -> Option<WinOdds> {
        self.cells.get(row).and_then(|r| r.get(column)).copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = (&String, &[WinOdds])> {
        self.labels
            .iter()
            .zip(self.cells.iter().map(|row| row.as_slice()))
    }
}

pub fn probability_matrix(dice: &DiceSet) -> ProbabilityMatrix {
    let cells = dice
        .dice()
        .iter()
        .map(|row| {
            dice.dice()
                .iter()
                .map(|column| win_probability(row, column))
                .collect::<Vec<_>>()
        })
        .collect();

    ProbabilityMatrix {
        labels: dice.labels(),
        cells,
    }
}
