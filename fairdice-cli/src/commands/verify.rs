use fairdice_core::commitment::key_from_hex;
use fairdice_core::{CommitmentScheme, HmacCommitment, Tag};

/// Check a published tag against a revealed number and key
pub fn verify_commitment(number: u64, key_hex: &str, tag_hex: &str) -> anyhow::Result<()> {
    let key = key_from_hex(key_hex)?;
    let tag = Tag::from_hex(tag_hex)?;

    if HmacCommitment::verify(number, &key, &tag) {
        println!("Commitment valid: HMAC={} opens to {}", tag, number);
        Ok(())
    } else {
        anyhow::bail!("Commitment INVALID: HMAC={} does not open to {}", tag, number)
    }
}
