//! Named accounts.
//!
//! A [`KeyProvider`] resolves an account name to its keypair. The [`Wallet`]
//! sits on top of a provider and exposes per-user address, public key and
//! signing lookups.

use std::collections::BTreeMap;

use tracing::debug;

use crate::crypto::{Address, Keypair, Signature};
use crate::error::AccountError;

/// Resolves account names to keypairs.
pub trait KeyProvider: Send + Sync {
    /// Returns the keypair for `name`, or [`AccountError::UnknownAccount`].
    fn keypair(&self, name: &str) -> Result<Keypair, AccountError>;

    /// Returns every account name, sorted.
    fn names(&self) -> Vec<String>;
}

/// Key provider backed by an in-memory map.
#[derive(Debug, Clone, Default)]
pub struct MemoryKeyProvider {
    accounts: BTreeMap<String, Keypair>,
}

impl MemoryKeyProvider {
    /// Creates an empty provider.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a provider from `(name, secret hex)` pairs.
    pub fn from_hex_entries<I, N, S>(entries: I) -> Result<Self, AccountError>
    where
        I: IntoIterator<Item = (N, S)>,
        N: Into<String>,
        S: AsRef<str>,
    {
        let mut provider = Self::new();
        for (name, secret_hex) in entries {
            provider.insert_hex(name, secret_hex.as_ref())?;
        }
        Ok(provider)
    }

    /// Adds or replaces an account from a hex secret key.
    pub fn insert_hex(
        &mut self,
        name: impl Into<String>,
        secret_hex: &str,
    ) -> Result<&mut Self, AccountError> {
        let name = name.into();
        let keypair = Keypair::from_hex(secret_hex)
            .map_err(|e| AccountError::InvalidKey(format!("account {}: {}", name, e)))?;
        Ok(self.insert(name, keypair))
    }

    /// Adds or replaces an account.
    pub fn insert(&mut self, name: impl Into<String>, keypair: Keypair) -> &mut Self {
        self.accounts.insert(name.into(), keypair);
        self
    }

    /// Returns the number of accounts.
    pub fn len(&self) -> usize {
        self.accounts.len()
    }

    /// Returns true if no accounts are registered.
    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }
}

impl KeyProvider for MemoryKeyProvider {
    fn keypair(&self, name: &str) -> Result<Keypair, AccountError> {
        self.accounts
            .get(name)
            .cloned()
            .ok_or_else(|| AccountError::UnknownAccount(name.to_string()))
    }

    fn names(&self) -> Vec<String> {
        self.accounts.keys().cloned().collect()
    }
}

/// Per-user view over a key provider.
#[derive(Debug, Clone)]
pub struct Wallet<P> {
    provider: P,
}

impl<P: KeyProvider> Wallet<P> {
    /// Creates a wallet over `provider`.
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    /// Returns the known user names.
    pub fn users(&self) -> Vec<String> {
        self.provider.names()
    }

    /// Returns the address of `user`.
    pub fn address(&self, user: &str) -> Result<Address, AccountError> {
        Ok(*self.provider.keypair(user)?.address())
    }

    /// Returns the uppercase hex public key of `user`.
    pub fn public_key_hex(&self, user: &str) -> Result<String, AccountError> {
        Ok(self.provider.keypair(user)?.public_key_hex())
    }

    /// Signs `message` as `user`.
    pub fn sign(&self, user: &str, message: &[u8]) -> Result<Signature, AccountError> {
        let keypair = self.provider.keypair(user)?;
        debug!(user, "signing as named account");
        Ok(keypair.sign(message))
    }

    /// Returns the underlying provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }
}
