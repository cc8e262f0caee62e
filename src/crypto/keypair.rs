//! Ethereum keypair handling.

use std::fmt;

use secp256k1::{Message, PublicKey, Secp256k1, SecretKey};
use tracing::debug;

use super::{decode_hex, keccak256, Address, Signature};
use crate::error::AccountError;

/// Length of a secret key in bytes.
pub const SECRET_KEY_LENGTH: usize = 32;

/// Length of an uncompressed public key in bytes (`0x04 || X || Y`).
pub const PUBLIC_KEY_LENGTH: usize = 65;

/// Represents an Ethereum keypair (secret key, public key and derived address).
#[derive(Clone)]
pub struct Keypair {
    /// The secret scalar, validated against the curve order
    secret_key: SecretKey,
    /// The public key, `secret_key * G`
    public_key: PublicKey,
    /// The derived Ethereum address
    address: Address,
}

impl Keypair {
    /// Generates a new random keypair.
    ///
    /// Uses a cryptographically secure random number generator.
    #[inline]
    pub fn generate() -> Self {
        let secp = Secp256k1::new();
        let (secret_key, public_key) = secp.generate_keypair(&mut rand::thread_rng());
        Self::from_parts(secret_key, public_key)
    }

    /// Builds a keypair from a raw 32-byte secret.
    ///
    /// Fails with [`AccountError::InvalidKey`] when the slice is not 32 bytes,
    /// is zero, or is not below the secp256k1 curve order.
    pub fn from_secret_bytes(secret_bytes: &[u8]) -> Result<Self, AccountError> {
        if secret_bytes.len() != SECRET_KEY_LENGTH {
            return Err(AccountError::InvalidKey(format!(
                "expected {} bytes, got {}",
                SECRET_KEY_LENGTH,
                secret_bytes.len()
            )));
        }
        let secret_key = SecretKey::from_slice(secret_bytes)
            .map_err(|e| AccountError::InvalidKey(e.to_string()))?;
        let public_key = PublicKey::from_secret_key(&Secp256k1::signing_only(), &secret_key);
        Ok(Self::from_parts(secret_key, public_key))
    }

    /// Builds a keypair from a 64-character hex secret. A `0x` prefix is tolerated.
    pub fn from_hex(secret_hex: &str) -> Result<Self, AccountError> {
        let bytes = decode_hex(secret_hex).map_err(|e| AccountError::InvalidKey(e.to_string()))?;
        Self::from_secret_bytes(&bytes)
    }

    fn from_parts(secret_key: SecretKey, public_key: PublicKey) -> Self {
        let address = Address::from_public_key(&public_key);
        debug!(%address, "derived keypair");
        Self {
            secret_key,
            public_key,
            address,
        }
    }

    /// Returns the private key as a hex string (without 0x prefix).
    pub fn private_key_hex(&self) -> String {
        hex::encode(self.secret_key.secret_bytes())
    }

    /// Returns the private key bytes.
    pub fn private_key_bytes(&self) -> [u8; SECRET_KEY_LENGTH] {
        self.secret_key.secret_bytes()
    }

    /// Returns the curve public key.
    #[inline]
    pub fn public_key(&self) -> &PublicKey {
        &self.public_key
    }

    /// Returns the 65-byte uncompressed public key, leading byte `0x04`.
    pub fn public_key_bytes(&self) -> [u8; PUBLIC_KEY_LENGTH] {
        self.public_key.serialize_uncompressed()
    }

    /// Returns the uncompressed public key as uppercase hex (130 characters).
    pub fn public_key_hex(&self) -> String {
        hex::encode_upper(self.public_key_bytes())
    }

    /// Returns a reference to the derived address.
    #[inline]
    pub fn address(&self) -> &Address {
        &self.address
    }

    /// Signs a 32-byte digest with RFC 6979 deterministic ECDSA.
    ///
    /// The signature is low-s and carries the recovery id that maps back to
    /// this keypair's public key.
    pub fn sign_digest(&self, digest: &[u8; 32]) -> Signature {
        let secp = Secp256k1::signing_only();
        let message = Message::from_digest(*digest);
        let signature = secp.sign_ecdsa_recoverable(&message, &self.secret_key);
        Signature::from_recoverable(&signature)
    }

    /// Hashes `message` with Keccak-256 (no prefix) and signs the digest.
    pub fn sign(&self, message: &[u8]) -> Signature {
        let signature = self.sign_digest(&keccak256(message));
        debug!(
            address = %self.address,
            recovery_id = signature.recovery_id(),
            message_len = message.len(),
            "signed message"
        );
        signature
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keypair_generation() {
        let keypair = Keypair::generate();
        assert_eq!(keypair.private_key_bytes().len(), 32);
        assert_eq!(keypair.address().as_bytes().len(), 20);
        assert_eq!(keypair.public_key_bytes()[0], 0x04);
    }

    #[test]
    fn test_deterministic_address() {
        let mut secret_bytes = [0u8; 32];
        secret_bytes[31] = 0x01;
        let keypair = Keypair::from_secret_bytes(&secret_bytes).unwrap();

        // Address for private key = 1 is well-known
        assert_eq!(
            keypair.address().to_hex(),
            "7e5f4552091a69125d5dfcb7b8c2659029395bdf"
        );
    }

    #[test]
    fn test_public_key_hex_is_uppercase() {
        let keypair = Keypair::from_hex(
            "0000000000000000000000000000000000000000000000000000000000000001",
        )
        .unwrap();
        assert_eq!(
            keypair.public_key_hex(),
            "0479BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798\
             483ADA7726A3C4655DA4FBFC0E1108A8FD17B448A68554199C47D08FFB10D4B8"
        );
    }

    #[test]
    fn test_rejects_zero_key() {
        let err = Keypair::from_secret_bytes(&[0u8; 32]).unwrap_err();
        assert!(matches!(err, AccountError::InvalidKey(_)));
    }

    #[test]
    fn test_rejects_curve_order() {
        let order = "fffffffffffffffffffffffffffffffebaaedce6af48a03bbfd25e8cd0364141";
        assert!(matches!(
            Keypair::from_hex(order),
            Err(AccountError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_rejects_bad_length_and_hex() {
        assert!(matches!(
            Keypair::from_secret_bytes(&[1u8; 31]),
            Err(AccountError::InvalidKey(_))
        ));
        assert!(matches!(
            Keypair::from_hex("not hex"),
            Err(AccountError::InvalidKey(_))
        ));
    }

    #[test]
    fn test_debug_hides_secret() {
        let keypair = Keypair::generate();
        let debug = format!("{:?}", keypair);
        assert!(!debug.contains(&keypair.private_key_hex()));
    }
}
