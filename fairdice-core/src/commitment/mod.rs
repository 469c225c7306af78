pub mod scheme;

pub use scheme::{key_from_hex, CommitmentScheme, Tag, TAG_SIZE};

use crate::random::SecretKey;
use crate::{FairDiceError, Result};
use hmac::{Hmac, Mac};
use sha3::Sha3_256;

type HmacSha3_256 = Hmac<Sha3_256>;

/// HMAC-SHA3-256 commitment over the big-endian `u64` encoding of the number
#[derive(Debug, Clone, Copy, Default)]
pub struct HmacCommitment;

impl HmacCommitment {
    fn mac(secret_number: u64, key: &SecretKey) -> Result<HmacSha3_256> {
        let mut mac = HmacSha3_256::new_from_slice(key)
            .map_err(|e| FairDiceError::internal(format!("HMAC key rejected: {}", e)))?;
        mac.update(&secret_number.to_be_bytes());
        Ok(mac)
    }
}

impl CommitmentScheme for HmacCommitment {
    fn commit(secret_number: u64, key: &SecretKey) -> Result<Tag> {
        let tag = Self::mac(secret_number, key)?.finalize().into_bytes();
        Ok(Tag::from_bytes(tag.into()))
    }

    // verify_slice compares in constant time
    fn verify(secret_number: u64, key: &SecretKey, tag: &Tag) -> bool {
        match Self::mac(secret_number, key) {
            Ok(mac) => mac.verify_slice(tag.as_bytes()).is_ok(),
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::random::SecureRandom;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn key(seed: u64) -> SecretKey {
        SecureRandom::from_rng(StdRng::seed_from_u64(seed))
            .secret_key()
            .unwrap()
    }

    #[test]
    fn test_commitment_verification() {
        let key = key(1);
        for secret in 0..6 {
            let tag = HmacCommitment::commit(secret, &key).unwrap();
            assert!(HmacCommitment::verify(secret, &key, &tag));
        }
    }

    #[test]
    fn test_tampered_number_fails_verification() {
        let key = key(2);
        let tag = HmacCommitment::commit(3, &key).unwrap();

        for tampered in [0u64, 1, 2, 4, 5, u64::MAX] {
            assert!(!HmacCommitment::verify(tampered, &key, &tag));
        }
    }

    #[test]
    fn test_wrong_key_fails_verification() {
        let tag = HmacCommitment::commit(4, &key(3)).unwrap();
        assert!(!HmacCommitment::verify(4, &key(4), &tag));
    }

    #[test]
    fn test_commit_is_deterministic() {
        let key = key(5);
        assert_eq!(
            HmacCommitment::commit(1, &key).unwrap(),
            HmacCommitment::commit(1, &key).unwrap()
        );
    }

    #[test]
    fn test_tag_hex_is_upper_case_and_parses_back() {
        let tag = HmacCommitment::commit(2, &key(6)).unwrap();
        let shown = tag.to_string();

        assert_eq!(shown.len(), TAG_SIZE * 2);
        assert_eq!(shown, shown.to_uppercase());
        assert_eq!(Tag::from_hex(&shown.to_lowercase()).unwrap(), tag);
    }

    #[test]
    fn test_short_tag_rejected() {
        assert!(matches!(
            Tag::from_hex("ABCD"),
            Err(FairDiceError::Encoding(_))
        ));
        assert!(key_from_hex("zz").is_err());
    }
}
