//! Commit-reveal exchange between the house (committer) and the human.
//!
//! One `FairnessProtocol` value drives exactly one round:
//! `Idle -> Committed -> Contributed -> Revealed`. The house number and key
//! stay inside the state until the counterpart contribution has been
//! recorded, so a reveal can never precede the contribution it is combined
//! with.

use crate::commitment::{CommitmentScheme, HmacCommitment, Tag};
use crate::random::{SecretKey, SecureRandom};
use crate::{FairDiceError, Result};
use rand::{CryptoRng, RngCore};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Which step of the game a round belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundKind {
    /// Human guesses the committed number directly
    FirstMove,
    HouseRoll,
    HumanRoll,
}

impl RoundKind {
    pub fn is_guess(&self) -> bool {
        matches!(self, RoundKind::FirstMove)
    }
}

impl fmt::Display for RoundKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoundKind::FirstMove => write!(f, "first move"),
            RoundKind::HouseRoll => write!(f, "house roll"),
            RoundKind::HumanRoll => write!(f, "human roll"),
        }
    }
}

enum RoundState {
    Idle,
    Committed {
        secret_number: u64,
        key: SecretKey,
        tag: Tag,
    },
    Contributed {
        secret_number: u64,
        key: SecretKey,
        tag: Tag,
        contribution: u64,
    },
    Revealed,
}

impl RoundState {
    fn name(&self) -> &'static str {
        match self {
            RoundState::Idle => "idle",
            RoundState::Committed { .. } => "committed",
            RoundState::Contributed { .. } => "contributed",
            RoundState::Revealed => "revealed",
        }
    }
}

pub struct FairnessProtocol {
    kind: RoundKind,
    range: u64,
    state: RoundState,
}

impl FairnessProtocol {
    pub fn new(kind: RoundKind, range: u64) -> Result<Self> {
        if range == 0 {
            return Err(FairDiceError::InvalidRange(range));
        }

        Ok(Self {
            kind,
            range,
            state: RoundState::Idle,
        })
    }

    pub fn kind(&self) -> RoundKind {
        self.kind
    }

    pub fn range(&self) -> u64 {
        self.range
    }

    pub fn is_committed(&self) -> bool {
        !matches!(self.state, RoundState::Idle)
    }

    pub fn is_revealed(&self) -> bool {
        matches!(self.state, RoundState::Revealed)
    }

    /// Draw a fresh key and number and publish only the tag
    pub fn start<R: RngCore + CryptoRng>(&mut self, random: &mut SecureRandom<R>) -> Result<Tag> {
        if !matches!(self.state, RoundState::Idle) {
            return Err(FairDiceError::protocol(format!(
                "{} round already started (state: {})",
                self.kind,
                self.state.name()
            )));
        }

        let key = random.secret_key()?;
        let secret_number = random.uniform_int(self.range)?;
        let tag = HmacCommitment::commit(secret_number, &key)?;

        self.state = RoundState::Committed {
            secret_number,
            key,
            tag,
        };

        tracing::info!("{} round committed, tag {}", self.kind, tag);
        Ok(tag)
    }

    /// Record the counterpart's number (or guess) for a committed round
    pub fn accept_contribution(&mut self, contribution: u64) -> Result<()> {
        if contribution >= self.range {
            return Err(FairDiceError::protocol(format!(
                "contribution {} outside [0, {})",
                contribution, self.range
            )));
        }

        match std::mem::replace(&mut self.state, RoundState::Revealed) {
            RoundState::Committed {
                secret_number,
                key,
                tag,
            } => {
                self.state = RoundState::Contributed {
                    secret_number,
                    key,
                    tag,
                    contribution,
                };
                tracing::debug!("{} round accepted contribution {}", self.kind, contribution);
                Ok(())
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(FairDiceError::protocol(format!(
                    "cannot accept a contribution for the {} round in state {}",
                    self.kind, state
                )))
            }
        }
    }

    /// Disclose the number and key; terminal
    pub fn reveal(&mut self) -> Result<RoundRecord> {
        match std::mem::replace(&mut self.state, RoundState::Revealed) {
            RoundState::Contributed {
                secret_number,
                key,
                tag,
                contribution,
            } => {
                let record = RoundRecord::new(
                    self.kind,
                    self.range,
                    tag,
                    secret_number,
                    key,
                    contribution,
                );
                tracing::debug!(
                    "{} round revealed number {} key {}",
                    self.kind,
                    secret_number,
                    record.key_hex()
                );
                Ok(record)
            }
            other => {
                let state = other.name();
                self.state = other;
                Err(FairDiceError::protocol(format!(
                    "nothing to reveal for the {} round in state {}",
                    self.kind, state
                )))
            }
        }
    }
}

impl fmt::Debug for FairnessProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FairnessProtocol")
            .field("kind", &self.kind)
            .field("range", &self.range)
            .field("state", &self.state.name())
            .finish()
    }
}

/// Everything disclosed by a finished round, verifiable offline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    pub kind: RoundKind,
    pub range: u64,
    pub tag: Tag,
    pub secret_number: u64,
    #[serde(with = "hex::serde")]
    pub key: SecretKey,
    pub contribution: u64,
    /// Modular sum for rolls, the committed number for the first-move guess
    pub value: u64,
}

impl RoundRecord {
    fn new(
        kind: RoundKind,
        range: u64,
        tag: Tag,
        secret_number: u64,
        key: SecretKey,
        contribution: u64,
    ) -> Self {
        let value = if kind.is_guess() {
            secret_number
        } else {
            combine(secret_number, contribution, range)
        };

        Self {
            kind,
            range,
            tag,
            secret_number,
            key,
            contribution,
            value,
        }
    }

    /// Did the guess hit the committed number
    pub fn guessed_correctly(&self) -> bool {
        self.contribution == self.secret_number
    }

    pub fn key_hex(&self) -> String {
        hex::encode_upper(self.key)
    }

    /// Re-check the tag and the derived value against the disclosed data
    pub fn verify(&self) -> bool {
        let expected = if self.kind.is_guess() {
            self.secret_number
        } else {
            combine(self.secret_number, self.contribution, self.range)
        };

        self.secret_number < self.range
            && self.contribution < self.range
            && self.value == expected
            && HmacCommitment::verify(self.secret_number, &self.key, &self.tag)
    }
}

/// `(a + b) mod range`, without overflow for any `u64` inputs
pub fn combine(a: u64, b: u64, range: u64) -> u64 {
    ((a as u128 + b as u128) % range as u128) as u64
}
