use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of stored page content.
pub fn sha256_hex(content: &[u8]) -> String {
    let digest = Sha256::digest(content);
    digest.iter().map(|byte| format!("{byte:02x}")).collect()
}

/// Compares content against a recorded hash, ignoring hex case.
pub fn fingerprint_matches(content: &[u8], expected: &str) -> bool {
    sha256_hex(content).eq_ignore_ascii_case(expected.trim())
}
