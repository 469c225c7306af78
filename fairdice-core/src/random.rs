//! Cryptographically secure random source.
//!
//! Wraps any `RngCore + CryptoRng` (the OS generator by default) so tests can
//! substitute a seeded generator without touching protocol code.

use crate::error::{FairDiceError, Result};
use rand::rngs::OsRng;
use rand::{CryptoRng, RngCore};

pub const KEY_SIZE: usize = 32;

/// Secret key material for one commitment
pub type SecretKey = [u8; KEY_SIZE];

#[derive(Debug, Clone, Default)]
pub struct SecureRandom<R = OsRng> {
    rng: R,
}

impl SecureRandom<OsRng> {
    pub fn os() -> Self {
        Self { rng: OsRng }
    }
}

impl<R: RngCore + CryptoRng> SecureRandom<R> {
    pub fn from_rng(rng: R) -> Self {
        Self { rng }
    }

    /// Uniform integer in `[0, range)`.
    ///
    /// Draws full 64-bit words and rejects the ones falling in the final
    /// incomplete block of `range`, so no value is favoured by the reduction.
    pub fn uniform_int(&mut self, range: u64) -> Result<u64> {
        if range == 0 {
            return Err(FairDiceError::InvalidRange(range));
        }

        // 2^64 mod range words above this bound form an incomplete block
        let rejection_zone = u64::MAX - (u64::MAX % range + 1) % range;

        loop {
            let mut word = [0u8; 8];
            self.rng.try_fill_bytes(&mut word)?;
            let value = u64::from_le_bytes(word);

            if value <= rejection_zone {
                return Ok(value % range);
            }
        }
    }

    /// Fresh 32-byte key, used once.
    pub fn secret_key(&mut self) -> Result<SecretKey> {
        let mut key = [0u8; KEY_SIZE];
        self.rng.try_fill_bytes(&mut key)?;
        Ok(key)
    }
}
