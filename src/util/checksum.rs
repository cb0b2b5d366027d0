use sha2::{Digest, Sha256};

/// Length of a hex encoded SHA-256 digest
pub const SHA256_HEX_LEN: usize = 64;

pub fn sha256_hex(input: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input);
    format!("{:x}", hasher.finalize())
}

/// Digest of the UTF-8 bytes of `input`.
pub fn sha256_str(input: &str) -> String {
    sha256_hex(input.as_bytes())
}
