use sha2::{Digest, Sha256};

/// SHA-256 fingerprint of a prompt, rendered as lowercase hex.
///
/// Deterministic across calls and process restarts; this is the dedup key
/// for stored entries.
#[must_use]
pub fn sha256_hex(text: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(text.as_bytes());
    format!("{:x}", hasher.finalize())
}
