use crate::commitment::Tag;
use crate::dice::{DiceSet, Die};
use crate::probability::{probability_matrix, ProbabilityMatrix};
use crate::protocol::{FairnessProtocol, RoundKind, RoundRecord};
use crate::random::SecureRandom;
use crate::{FairDiceError, Result};
use chrono::{DateTime, Utc};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use uuid::Uuid;

pub const FIRST_MOVE_RANGE: u64 = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Party {
    Human,
    House,
}

impl fmt::Display for Party {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Party::Human => write!(f, "You"),
            Party::House => write!(f, "House"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    HumanWins,
    HouseWins,
    Draw,
}

impl Outcome {
    pub fn decide(human_roll: i64, house_roll: i64) -> Self {
        match human_roll.cmp(&house_roll) {
            Ordering::Greater => Outcome::HumanWins,
            Ordering::Less => Outcome::HouseWins,
            Ordering::Equal => Outcome::Draw,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::HumanWins => write!(f, "You win"),
            Outcome::HouseWins => write!(f, "House wins"),
            Outcome::Draw => write!(f, "Draw"),
        }
    }
}

/// What the player answered to a prompt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Pick(usize),
    Help,
    Abort,
}

/// A choice among labelled options; help and abort are always available
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prompt {
    pub title: String,
    pub options: Vec<String>,
}

/// Values disclosed to the player, in disclosure order
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    Committed {
        kind: RoundKind,
        range: u64,
        tag: Tag,
    },
    Revealed(RoundRecord),
    FirstMove {
        human_first: bool,
    },
    DieAssigned {
        party: Party,
        die: Die,
        remaining: usize,
    },
    Rolled {
        party: Party,
        face: i64,
    },
    Help(ProbabilityMatrix),
    Finished(Outcome),
}

/// Input and display surfaces of the game
pub trait Frontend {
    fn choose(&mut self, prompt: &Prompt) -> Result<Choice>;
    fn show(&mut self, event: &GameEvent) -> Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    FirstMove,
    AssigningDice,
    Rolling,
    Completed { outcome: Outcome },
}

#[derive(Debug)]
pub struct DiceGame<R = OsRng> {
    id: Uuid,
    state: GameState,
    dice: DiceSet,
    matrix: ProbabilityMatrix,
    random: SecureRandom<R>,
    started_at: DateTime<Utc>,
}

impl DiceGame<OsRng> {
    pub fn new(dice: DiceSet) -> Self {
        Self::with_random(dice, SecureRandom::os())
    }
}

impl<R: RngCore + CryptoRng> DiceGame<R> {
    pub fn with_random(dice: DiceSet, random: SecureRandom<R>) -> Self {
        let matrix = probability_matrix(&dice);
        Self {
            id: Uuid::new_v4(),
            state: GameState::FirstMove,
            dice,
            matrix,
            random,
            started_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn dice(&self) -> &DiceSet {
        &self.dice
    }

    /// Odds for the full starting set
    pub fn matrix(&self) -> &ProbabilityMatrix {
        &self.matrix
    }

    /// Run all three rounds to completion. A game is played at most once.
    pub fn play<F: Frontend>(&mut self, frontend: &mut F) -> Result<GameReport> {
        if self.state != GameState::FirstMove {
            return Err(FairDiceError::protocol(format!(
                "game {} already played (state: {:?})",
                self.id, self.state
            )));
        }

        tracing::info!("Game {} started with {} dice", self.id, self.dice.len());

        let first_move = self.run_round(
            RoundKind::FirstMove,
            FIRST_MOVE_RANGE,
            "Guess my number to move first",
            frontend,
        )?;
        let human_first = first_move.guessed_correctly();
        frontend.show(&GameEvent::FirstMove { human_first })?;
        tracing::info!(
            "Game {}: {:?} moves first",
            self.id,
            if human_first { Party::Human } else { Party::House }
        );

        self.state = GameState::AssigningDice;
        let (human_die, house_die) = if human_first {
            let human = self.human_picks_die(frontend)?;
            let house = self.house_picks_die(frontend)?;
            (human, house)
        } else {
            let house = self.house_picks_die(frontend)?;
            let human = self.human_picks_die(frontend)?;
            (human, house)
        };

        self.state = GameState::Rolling;
        let (house_round, house_roll) =
            self.roll(Party::House, RoundKind::HouseRoll, &house_die, frontend)?;
        let (human_round, human_roll) =
            self.roll(Party::Human, RoundKind::HumanRoll, &human_die, frontend)?;

        let outcome = Outcome::decide(human_roll, house_roll);
        self.state = GameState::Completed { outcome };
        frontend.show(&GameEvent::Finished(outcome))?;
        tracing::info!(
            "Game {} completed: {} ({} vs {})",
            self.id,
            outcome,
            human_roll,
            house_roll
        );

        Ok(GameReport {
            id: self.id,
            started_at: self.started_at,
            finished_at: Utc::now(),
            human_first,
            human_die,
            house_die,
            rounds: vec![first_move, house_round, human_round],
            human_roll,
            house_roll,
            outcome,
        })
    }

    /// Commit, collect the player's number, then reveal
    fn run_round<F: Frontend>(
        &mut self,
        kind: RoundKind,
        range: u64,
        title: &str,
        frontend: &mut F,
    ) -> Result<RoundRecord> {
        let mut round = FairnessProtocol::new(kind, range)?;
        let tag = round.start(&mut self.random)?;
        frontend.show(&GameEvent::Committed { kind, range, tag })?;

        let prompt = Prompt {
            title: title.to_string(),
            options: (0..range).map(|v| v.to_string()).collect(),
        };
        let contribution = self.ask(&prompt, frontend)?;
        round.accept_contribution(contribution as u64)?;

        let record = round.reveal()?;
        frontend.show(&GameEvent::Revealed(record.clone()))?;
        Ok(record)
    }

    fn roll<F: Frontend>(
        &mut self,
        party: Party,
        kind: RoundKind,
        die: &Die,
        frontend: &mut F,
    ) -> Result<(RoundRecord, i64)> {
        let title = format!("Add your number modulo {}", die.face_count());
        let record = self.run_round(kind, die.face_count() as u64, &title, frontend)?;

        let face = die.face(record.value as usize).ok_or_else(|| {
            FairDiceError::internal(format!("roll index {} outside die {}", record.value, die))
        })?;
        frontend.show(&GameEvent::Rolled { party, face })?;
        tracing::info!("Game {}: {:?} rolled {}", self.id, party, face);

        Ok((record, face))
    }

    fn human_picks_die<F: Frontend>(&mut self, frontend: &mut F) -> Result<Die> {
        let prompt = Prompt {
            title: "Choose your dice".to_string(),
            options: self.dice.labels(),
        };
        let index = self.ask(&prompt, frontend)?;
        self.assign(Party::Human, index, frontend)
    }

    fn house_picks_die<F: Frontend>(&mut self, frontend: &mut F) -> Result<Die> {
        let index = self.random.uniform_int(self.dice.len() as u64)? as usize;
        self.assign(Party::House, index, frontend)
    }

    fn assign<F: Frontend>(&mut self, party: Party, index: usize, frontend: &mut F) -> Result<Die> {
        let die = self
            .dice
            .remove(index)
            .ok_or_else(|| FairDiceError::internal(format!("no die at index {}", index)))?;

        tracing::info!("Game {}: {:?} takes {}", self.id, party, die);
        frontend.show(&GameEvent::DieAssigned {
            party,
            die: die.clone(),
            remaining: self.dice.len(),
        })?;
        Ok(die)
    }

    /// Re-prompt until a listed option is picked; help is shown inline
    fn ask<F: Frontend>(&self, prompt: &Prompt, frontend: &mut F) -> Result<usize> {
        loop {
            match frontend.choose(prompt)? {
                Choice::Pick(index) if index < prompt.options.len() => return Ok(index),
                Choice::Pick(index) => {
                    tracing::warn!(
                        "Selection {} is not one of {} options, asking again",
                        index,
                        prompt.options.len()
                    );
                }
                Choice::Help => frontend.show(&GameEvent::Help(self.matrix.clone()))?,
                Choice::Abort => {
                    tracing::warn!("Game {} aborted by player", self.id);
                    return Err(FairDiceError::Aborted);
                }
            }
        }
    }
}

/// Full record of a finished game
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameReport {
    pub id: Uuid,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub human_first: bool,
    pub human_die: Die,
    pub house_die: Die,
    pub rounds: Vec<RoundRecord>,
    pub human_roll: i64,
    pub house_roll: i64,
    pub outcome: Outcome,
}

impl GameReport {
    /// Check every tag and that rolls and outcome follow from the reveals
    pub fn verify(&self) -> bool {
        let [first, house, human] = match self.rounds.as_slice() {
            [a, b, c] => [a, b, c],
            _ => return false,
        };

        let kinds_ok = first.kind == RoundKind::FirstMove
            && house.kind == RoundKind::HouseRoll
            && human.kind == RoundKind::HumanRoll;

        let ranges_ok = first.range == FIRST_MOVE_RANGE
            && house.range == self.house_die.face_count() as u64
            && human.range == self.human_die.face_count() as u64;

        kinds_ok
            && ranges_ok
            && self.human_die != self.house_die
            && self.rounds.iter().all(RoundRecord::verify)
            && first.guessed_correctly() == self.human_first
            && self.house_die.face(house.value as usize) == Some(self.house_roll)
            && self.human_die.face(human.value as usize) == Some(self.human_roll)
            && Outcome::decide(self.human_roll, self.house_roll) == self.outcome
    }
}
