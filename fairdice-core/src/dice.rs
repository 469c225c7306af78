use crate::{FairDiceError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const MIN_FACES: usize = 2;
pub const MIN_DICE: usize = 3;

/// A die: an ordered, immutable list of face values
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<i64>", into = "Vec<i64>")]
pub struct Die {
    faces: Vec<i64>,
}

impl Die {
    pub fn new(faces: Vec<i64>) -> Result<Self> {
        if faces.len() < MIN_FACES {
            return Err(FairDiceError::config(format!(
                "a die needs at least {} faces, got {}",
                MIN_FACES,
                faces.len()
            )));
        }
        Ok(Self { faces })
    }

    pub fn faces(&self) -> &[i64] {
        &self.faces
    }

    pub fn face_count(&self) -> usize {
        self.faces.len()
    }

    /// Face shown for a rolled index
    pub fn face(&self, index: usize) -> Option<i64> {
        self.faces.get(index).copied()
    }

    /// Comma-joined faces, e.g. `2,2,4,4,9,9`
    pub fn label(&self) -> String {
        self.faces
            .iter()
            .map(|f| f.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl fmt::Display for Die {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.label())
    }
}

impl TryFrom<Vec<i64>> for Die {
    type Error = FairDiceError;

    fn try_from(faces: Vec<i64>) -> Result<Self> {
        Die::new(faces)
    }
}

impl From<Die> for Vec<i64> {
    fn from(die: Die) -> Self {
        die.faces
    }
}

/// Dice still available in one game. Only ever shrinks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiceSet {
    dice: Vec<Die>,
}

impl DiceSet {
    pub fn new(dice: Vec<Die>) -> Result<Self> {
        if dice.len() < MIN_DICE {
            return Err(FairDiceError::config(format!(
                "at least {} dice are required, got {}",
                MIN_DICE,
                dice.len()
            )));
        }
        Ok(Self { dice })
    }

    pub fn len(&self) -> usize {
        self.dice.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dice.is_empty()
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn get(&self, index: usize) -> Option<&Die> {
        self.dice.get(index)
    }

    pub fn labels(&self) -> Vec<String> {
        self.dice.iter().map(Die::label).collect()
    }

    /// Withdraw a die so it cannot be assigned again
    pub fn remove(&mut self, index: usize) -> Option<Die> {
        if index < self.dice.len() {
            Some(self.dice.remove(index))
        } else {
            None
        }
    }
}
