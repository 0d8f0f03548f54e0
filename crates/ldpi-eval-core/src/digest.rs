//! Content digests for evaluation inputs.

use sha2::{Digest, Sha256};

const DOMAIN_TAG: &[u8] = b"ldpi-eval/scores/v1\0";

/// SHA-256 hex digest over a score/label population.
///
/// Each sample is hashed as the little-endian IEEE-754 bits of its score
/// followed by one label byte, after a domain tag and the sample count, so
/// the digest identifies the exact inputs a report was computed from.
/// `-0.0` and `0.0` hash differently.
pub fn input_digest(scores: &[f64], labels: &[bool]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(DOMAIN_TAG);
    hasher.update((scores.len() as u64).to_le_bytes());
    for (score, &label) in scores.iter().zip(labels) {
        hasher.update(score.to_bits().to_le_bytes());
        hasher.update([u8::from(label)]);
    }
    hex::encode(hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_digest_is_hex_sha256() {
        let d = input_digest(&[0.1, 0.2], &[true, false]);
        assert_eq!(d.len(), 64);
        assert!(d.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(d, input_digest(&[0.1, 0.2], &[true, false]));
    }

    #[test]
    fn test_label_flip_changes_digest() {
        assert_ne!(
            input_digest(&[0.1, 0.2], &[true, false]),
            input_digest(&[0.1, 0.2], &[false, true])
        );
    }

    #[test]
    fn test_order_matters() {
        assert_ne!(
            input_digest(&[0.1, 0.2], &[true, true]),
            input_digest(&[0.2, 0.1], &[true, true])
        );
    }
}
