//! # eth_account
//!
//! Ethereum account keys: address derivation, Keccak-256 message hashing and
//! recoverable secp256k1 signatures.
//!
//! ## Architecture
//!
//! - `crypto`: Keypairs, addresses, signatures and Keccak-256
//! - `account`: Pure operations over a raw secret key
//! - `provider`: Named accounts behind a key provider
//! - `generate`: Parallel batch key generation
//! - `config`: Runtime configuration

pub mod account;
pub mod config;
pub mod crypto;
pub mod error;
pub mod generate;
pub mod provider;

pub use account::{derive_address, hash_message, public_key_hex, recover_public_key, sign, verify};
pub use config::{AccountsFile, Config};
pub use crypto::{keccak256, Address, Keypair, Signature};
pub use error::AccountError;
pub use generate::generate_keypairs;
pub use provider::{KeyProvider, MemoryKeyProvider, Wallet};
