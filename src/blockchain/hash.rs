use serde::Serialize;
use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of raw bytes.
pub(crate) fn hash_bytes(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Canonical SHA-256 digest of any serializable value.
///
/// The value is serialized to JSON first. Structs that reach this function
/// declare their fields in lexicographic order, so two structurally equal
/// values always produce identical bytes and identical digests, regardless
/// of how they were constructed.
pub fn hash_value<T: Serialize>(value: &T) -> String {
    let canonical = serde_json::to_string(value).expect("serialize hash preimage");
    hash_bytes(canonical.as_bytes())
}
