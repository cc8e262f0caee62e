//! Cryptographic operations for Ethereum accounts.
//!
//! This module provides:
//! - Keccak-256 hashing
//! - secp256k1 keypairs and address derivation
//! - Recoverable ECDSA signatures (recovery id first)

mod address;
mod keypair;
mod signature;

pub use address::{Address, ADDRESS_LENGTH};
pub use keypair::{Keypair, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH};
pub use signature::{Signature, SIGNATURE_LENGTH};

use tiny_keccak::{Hasher, Keccak};

use crate::error::AccountError;

/// Keccak-256 of arbitrary bytes (output 32 bytes).
pub fn keccak256(input: &[u8]) -> [u8; 32] {
    let mut hasher = Keccak::v256();
    hasher.update(input);
    let mut out = [0u8; 32];
    hasher.finalize(&mut out);
    out
}

/// Strips a single leading `0x` or `0X`, if present.
pub fn strip_hex_prefix(input: &str) -> &str {
    input
        .strip_prefix("0x")
        .or_else(|| input.strip_prefix("0X"))
        .unwrap_or(input)
}

/// Hex-decodes `input` after [`strip_hex_prefix`].
pub fn decode_hex(input: &str) -> Result<Vec<u8>, AccountError> {
    hex::decode(strip_hex_prefix(input)).map_err(|e| AccountError::InvalidHex(e.to_string()))
}
