//! Ethereum address representation and utilities.

use std::fmt;
use std::str::FromStr;

use secp256k1::PublicKey;

use super::{decode_hex, keccak256, PUBLIC_KEY_LENGTH};
use crate::error::AccountError;

/// Length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 20;

/// An Ethereum address (20 bytes).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Address([u8; ADDRESS_LENGTH]);

impl Address {
    /// Creates an address from raw bytes.
    #[inline]
    pub const fn from_bytes(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Derives the address of a secp256k1 public key.
    ///
    /// Process:
    /// 1. Serialize the public key in uncompressed form (65 bytes)
    /// 2. Remove the first byte (0x04 prefix)
    /// 3. Hash the remaining 64 bytes with Keccak-256
    /// 4. Take the last 20 bytes of the hash
    #[inline]
    pub fn from_public_key(public_key: &PublicKey) -> Self {
        let public_key_bytes = public_key.serialize_uncompressed();
        let hash = keccak256(&public_key_bytes[1..]);

        let mut address_bytes = [0u8; ADDRESS_LENGTH];
        address_bytes.copy_from_slice(&hash[12..]);

        Self(address_bytes)
    }

    /// Derives the address from a 65-byte uncompressed public key.
    ///
    /// The input must be exactly `0x04 || X || Y` with the point on the curve.
    /// Compressed (`0x02`/`0x03`) and hybrid (`0x06`/`0x07`) encodings are
    /// rejected.
    pub fn from_uncompressed(public_key: &[u8]) -> Result<Self, AccountError> {
        if public_key.len() != PUBLIC_KEY_LENGTH || public_key[0] != 0x04 {
            return Err(AccountError::InvalidAddress(format!(
                "expected {}-byte uncompressed public key with 0x04 prefix",
                PUBLIC_KEY_LENGTH
            )));
        }
        let public_key = PublicKey::from_slice(public_key)
            .map_err(|e| AccountError::InvalidAddress(format!("bad public key: {}", e)))?;
        Ok(Self::from_public_key(&public_key))
    }

    /// Returns the address as raw bytes.
    #[inline]
    pub const fn as_bytes(&self) -> &[u8; ADDRESS_LENGTH] {
        &self.0
    }

    /// Returns the address as a lowercase hex string (without 0x prefix).
    #[inline]
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Returns the address with 0x prefix.
    pub fn to_hex_prefixed(&self) -> String {
        format!("0x{}", self.to_hex())
    }

    /// Returns the address with checksum encoding (EIP-55).
    pub fn to_checksum(&self) -> String {
        let hex_addr = self.to_hex();
        let hash = keccak256(hex_addr.as_bytes());

        let mut checksum = String::with_capacity(42);
        checksum.push_str("0x");

        for (i, c) in hex_addr.chars().enumerate() {
            let hash_byte = hash[i / 2];
            let hash_nibble = if i % 2 == 0 {
                hash_byte >> 4
            } else {
                hash_byte & 0x0f
            };

            if c.is_ascii_alphabetic() && hash_nibble >= 8 {
                checksum.push(c.to_ascii_uppercase());
            } else {
                checksum.push(c);
            }
        }

        checksum
    }
}

impl FromStr for Address {
    type Err = AccountError;

    /// Parses `0x`-prefixed or bare hex in any letter case. The checksum is
    /// not enforced.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = decode_hex(s).map_err(|e| AccountError::InvalidAddress(e.to_string()))?;
        let bytes: [u8; ADDRESS_LENGTH] = bytes.try_into().map_err(|b: Vec<u8>| {
            AccountError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                b.len()
            ))
        })?;
        Ok(Self(bytes))
    }
}

impl fmt::Debug for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Address({})", self.to_checksum())
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_prefixed())
    }
}
