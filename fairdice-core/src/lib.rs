//! Provably fair non-transitive dice
//!
//! The house commits to a random number with an HMAC before the player
//! contributes, and only reveals the number and key afterwards. Rolls are the
//! modular sum of both numbers, so neither side controls the result.

pub mod commitment;
pub mod config;
pub mod dice;
pub mod error;
pub mod game;
pub mod probability;
pub mod protocol;
pub mod random;
pub mod storage;

pub use commitment::{CommitmentScheme, HmacCommitment, Tag};
pub use config::DiceConfig;
pub use dice::{DiceSet, Die};
pub use error::{FairDiceError, Result};
pub use game::{Choice, DiceGame, Frontend, GameEvent, GameReport, GameState, Outcome, Party, Prompt};
pub use probability::{probability_matrix, win_probability, ProbabilityMatrix, WinOdds};
pub use protocol::{FairnessProtocol, RoundKind, RoundRecord};
pub use random::{SecretKey, SecureRandom};
pub use storage::{GameHistory, HistoryStore};
