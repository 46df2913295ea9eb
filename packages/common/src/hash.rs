//! Hash helpers shared by the commit-reveal and hashlock contracts

use cosmwasm_std::{HexBinary, StdError, StdResult};
use sha2::{Digest, Sha256};

/// Compute sha256 hash of arbitrary data
pub fn sha256(data: &[u8]) -> [u8; 32] {
    Sha256::digest(data).into()
}

/// Interpret a hex-encoded value as a 32-byte checksum.
pub fn checksum256(value: &HexBinary) -> StdResult<[u8; 32]> {
    value
        .as_slice()
        .try_into()
        .map_err(|_| StdError::generic_err(format!("checksum must be 32 bytes, got {}", value.len())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_value() {
        assert_eq!(
            hex_of(&sha256(b"")),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }

    #[test]
    fn test_checksum256_length() {
        let ok = HexBinary::from(vec![7u8; 32]);
        assert_eq!(checksum256(&ok).unwrap(), [7u8; 32]);
        assert!(checksum256(&HexBinary::from(vec![0u8; 20])).is_err());
    }

    fn hex_of(bytes: &[u8]) -> String {
        HexBinary::from(bytes).to_hex()
    }
}
