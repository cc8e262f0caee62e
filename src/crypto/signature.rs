//! Recoverable ECDSA signatures in `recovery_id || r || s` layout.
//!
//! The recovery byte comes first, ahead of the two 32-byte scalars. This is
//! the reverse of the usual `r || s || v` layout and existing verifiers rely
//! on it, so the byte order must not change.

use std::fmt;
use std::str::FromStr;

use secp256k1::ecdsa::{RecoverableSignature, RecoveryId};
use secp256k1::{Message, PublicKey, Secp256k1};
use tracing::debug;

use super::{decode_hex, Address};
use crate::error::AccountError;

/// Length of an encoded signature in bytes.
pub const SIGNATURE_LENGTH: usize = 65;

/// A 65-byte recoverable signature: `recovery_id(1) || r(32) || s(32)`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature([u8; SIGNATURE_LENGTH]);

impl Signature {
    pub(crate) fn from_recoverable(signature: &RecoverableSignature) -> Self {
        let (recovery_id, compact) = signature.serialize_compact();
        let mut bytes = [0u8; SIGNATURE_LENGTH];
        // libsecp256k1 only ever yields ids 0..=3
        bytes[0] = recovery_id.to_i32() as u8;
        bytes[1..].copy_from_slice(&compact);
        Self(bytes)
    }

    /// Parses a 65-byte signature.
    ///
    /// The recovery id must be in `0..=3` and `r`, `s` must be valid scalars.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, AccountError> {
        let bytes: [u8; SIGNATURE_LENGTH] = bytes.try_into().map_err(|_| {
            AccountError::InvalidSignature(format!(
                "expected {} bytes, got {}",
                SIGNATURE_LENGTH,
                bytes.len()
            ))
        })?;
        let signature = Self(bytes);
        signature.to_recoverable()?;
        Ok(signature)
    }

    /// Parses a 130-character hex signature. A `0x` prefix is tolerated.
    pub fn from_hex(signature_hex: &str) -> Result<Self, AccountError> {
        let bytes =
            decode_hex(signature_hex).map_err(|e| AccountError::InvalidSignature(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    /// Returns the raw 65 bytes.
    #[inline]
    pub const fn to_bytes(&self) -> [u8; SIGNATURE_LENGTH] {
        self.0
    }

    /// Returns the signature as lowercase hex (130 characters, no prefix).
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The recovery id byte.
    #[inline]
    pub const fn recovery_id(&self) -> u8 {
        self.0[0]
    }

    /// The `r` scalar, big-endian.
    pub fn r(&self) -> [u8; 32] {
        let mut r = [0u8; 32];
        r.copy_from_slice(&self.0[1..33]);
        r
    }

    /// The `s` scalar, big-endian.
    pub fn s(&self) -> [u8; 32] {
        let mut s = [0u8; 32];
        s.copy_from_slice(&self.0[33..]);
        s
    }

    fn to_recoverable(&self) -> Result<RecoverableSignature, AccountError> {
        let recovery_id = RecoveryId::from_i32(i32::from(self.recovery_id())).map_err(|_| {
            AccountError::InvalidSignature(format!("bad recovery id {}", self.recovery_id()))
        })?;
        RecoverableSignature::from_compact(&self.0[1..], recovery_id)
            .map_err(|e| AccountError::InvalidSignature(e.to_string()))
    }

    /// Recovers the signer's public key from the signed 32-byte digest.
    pub fn recover_public_key(&self, digest: &[u8; 32]) -> Result<PublicKey, AccountError> {
        let signature = self.to_recoverable()?;
        let message = Message::from_digest(*digest);
        let public_key = Secp256k1::verification_only()
            .recover_ecdsa(&message, &signature)
            .map_err(|e| AccountError::RecoveryFailed(e.to_string()))?;
        debug!(recovery_id = self.recovery_id(), "recovered public key");
        Ok(public_key)
    }

    /// Recovers the signer's address from the signed 32-byte digest.
    pub fn recover_address(&self, digest: &[u8; 32]) -> Result<Address, AccountError> {
        self.recover_public_key(digest)
            .map(|public_key| Address::from_public_key(&public_key))
    }

    /// Returns true if the signature over `digest` recovers to `address`.
    ///
    /// A signature that cannot be recovered at all is reported as `false`;
    /// only malformed encodings are errors.
    pub fn verify(&self, digest: &[u8; 32], address: &Address) -> Result<bool, AccountError> {
        match self.recover_address(digest) {
            Ok(recovered) => Ok(&recovered == address),
            Err(AccountError::RecoveryFailed(_)) => Ok(false),
            Err(e) => Err(e),
        }
    }
}

impl FromStr for Signature {
    type Err = AccountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({})", self.to_hex())
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}
