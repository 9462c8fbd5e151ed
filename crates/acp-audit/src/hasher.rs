// hasher.rs — SHA-256 hashing utilities.
//
// All hashes are SHA-256, hex-encoded as 64 lowercase characters.
// Request fingerprints hash the canonical JSON serialization: serde_json
// maps are key-sorted, so equal field sets hash equally regardless of
// insertion order.

use sha2::{Digest, Sha256};

use acp_policy::Fields;

/// Hash arbitrary bytes, returning a lowercase hex-encoded SHA-256 string.
pub fn hash_bytes(data: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(data);
    format!("{:x}", hasher.finalize())
}

/// Hash a UTF-8 string.
pub fn hash_str(s: &str) -> String {
    hash_bytes(s.as_bytes())
}

/// Fingerprint a request's fields via their canonical JSON form.
pub fn hash_fields(fields: &Fields) -> Result<String, serde_json::Error> {
    let canonical = serde_json::to_string(fields)?;
    Ok(hash_str(&canonical))
}
