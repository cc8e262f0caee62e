//! Errors surfaced by key handling, signing and account lookup.

use thiserror::Error;

/// Error returned by every fallible account operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccountError {
    /// Secret key is zero, not below the curve order, or malformed
    #[error("invalid secret key: {0}")]
    InvalidKey(String),

    /// The signing primitive rejected its input. Reserved: `secp256k1`
    /// cannot fail to sign with an already validated key.
    #[error("signing failed: {0}")]
    SigningFailed(String),

    /// No account with this name in the key provider
    #[error("unknown account: {0}")]
    UnknownAccount(String),

    /// Signature has the wrong length, a bad recovery id or bad scalars
    #[error("invalid signature: {0}")]
    InvalidSignature(String),

    /// No public key could be recovered from the signature
    #[error("public key recovery failed: {0}")]
    RecoveryFailed(String),

    /// Address or public key input could not be parsed
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Input was not valid hex
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}
