// Checksum format utilities

use sha2::{Digest, Sha256, Sha512};

/// Checksum algorithms whose digest shape is known
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChecksumAlgorithm {
    Sha256,
    Sha512,
}

impl ChecksumAlgorithm {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "sha256" => Some(ChecksumAlgorithm::Sha256),
            "sha512" => Some(ChecksumAlgorithm::Sha512),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ChecksumAlgorithm::Sha256 => "sha256",
            ChecksumAlgorithm::Sha512 => "sha512",
        }
    }

    /// Digest length in bytes
    pub fn digest_len(&self) -> usize {
        match self {
            ChecksumAlgorithm::Sha256 => <Sha256 as Digest>::output_size(),
            ChecksumAlgorithm::Sha512 => <Sha512 as Digest>::output_size(),
        }
    }
}

/// Check that `value` looks like a hex digest produced by `algorithm`.
///
/// This only inspects the string; nothing is downloaded or hashed.
pub fn validate_format(value: &str, algorithm: ChecksumAlgorithm) -> Result<(), String> {
    let bytes = hex::decode(value.trim()).map_err(|e| format!("not a hex digest ({})", e))?;

    if bytes.len() != algorithm.digest_len() {
        return Err(format!(
            "expected {} hex characters for {}, found {}",
            algorithm.digest_len() * 2,
            algorithm.name(),
            value.trim().len()
        ));
    }

    Ok(())
}
