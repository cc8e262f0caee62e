//! Account operations over a raw secret key.
//!
//! Every function here is pure: the same inputs always produce the same
//! outputs, and nothing is retained between calls.

use secp256k1::PublicKey;

use crate::crypto::{keccak256, Address, Keypair, Signature};
use crate::error::AccountError;

/// Derives the Ethereum address of a 32-byte secret key.
///
/// The `Display` form of the result is `0x` followed by 40 lowercase hex
/// characters.
pub fn derive_address(secret_key: &[u8]) -> Result<Address, AccountError> {
    Keypair::from_secret_bytes(secret_key).map(|keypair| *keypair.address())
}

/// Keccak-256 of the raw message bytes.
///
/// No "Ethereum Signed Message" prefix is applied; callers that want one
/// must prepend it themselves.
#[inline]
pub fn hash_message(message: &[u8]) -> [u8; 32] {
    keccak256(message)
}

/// Signs `hash_message(message)` with RFC 6979 deterministic ECDSA.
pub fn sign(secret_key: &[u8], message: &[u8]) -> Result<Signature, AccountError> {
    Keypair::from_secret_bytes(secret_key).map(|keypair| keypair.sign(message))
}

/// Uppercase hex of the 65-byte uncompressed public key.
pub fn public_key_hex(secret_key: &[u8]) -> Result<String, AccountError> {
    Keypair::from_secret_bytes(secret_key).map(|keypair| keypair.public_key_hex())
}

/// Recovers the public key that produced `signature` over `message`.
pub fn recover_public_key(
    message: &[u8],
    signature: &Signature,
) -> Result<PublicKey, AccountError> {
    signature.recover_public_key(&hash_message(message))
}

/// Returns true if `signature` over `message` was made by `address`.
pub fn verify(
    message: &[u8],
    signature: &Signature,
    address: &Address,
) -> Result<bool, AccountError> {
    signature.verify(&hash_message(message), address)
}
