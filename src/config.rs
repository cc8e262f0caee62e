//! Runtime configuration for the account tool.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use serde::Deserialize;

use crate::crypto::{
    decode_hex, strip_hex_prefix, ADDRESS_LENGTH, PUBLIC_KEY_LENGTH, SECRET_KEY_LENGTH,
    SIGNATURE_LENGTH,
};
use crate::error::AccountError;
use crate::provider::MemoryKeyProvider;

/// Ethereum account keys: derive addresses, hash and sign messages
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Config {
    /// Increase log verbosity (-v debug, -vv trace); RUST_LOG overrides
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Number of worker threads for key generation (default: number of CPU cores)
    #[arg(short = 'w', long, global = true)]
    pub workers: Option<usize>,

    #[command(subcommand)]
    pub command: Command,
}

/// Operations exposed on the command line.
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Generate random keypairs and print key material with the address
    Generate {
        /// Number of keypairs to generate
        #[arg(short = 'n', long, default_value = "1")]
        count: usize,
    },

    /// Derive the address of a secret key or an uncompressed public key
    Address {
        /// Secret key (64 hex characters)
        #[arg(short, long, conflicts_with = "public_key", required_unless_present = "public_key")]
        key: Option<String>,

        /// Uncompressed public key (130 hex characters)
        #[arg(long)]
        public_key: Option<String>,
    },

    /// Print the uppercase uncompressed public key of a secret key
    PublicKey {
        /// Secret key (64 hex characters)
        #[arg(short, long)]
        key: String,
    },

    /// Keccak-256 hash of a message
    Hash {
        #[command(flatten)]
        message: MessageArgs,
    },

    /// Sign a message with a secret key
    Sign {
        /// Secret key (64 hex characters)
        #[arg(short, long)]
        key: String,

        #[command(flatten)]
        message: MessageArgs,
    },

    /// Recover the signer of a message
    Recover {
        #[command(flatten)]
        message: MessageArgs,

        /// Signature (130 hex characters, recovery id first)
        #[arg(short, long)]
        signature: String,
    },

    /// Check that a signature over a message was made by an address
    Verify {
        #[command(flatten)]
        message: MessageArgs,

        /// Signature (130 hex characters, recovery id first)
        #[arg(short, long)]
        signature: String,

        /// Expected signer address (0x-prefixed)
        #[arg(short, long)]
        address: String,
    },

    /// List the accounts of an accounts file
    Accounts {
        /// TOML file with an [accounts] table of name = "secret hex"
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Sign a message as a named account from an accounts file
    WalletSign {
        /// TOML file with an [accounts] table of name = "secret hex"
        #[arg(short, long)]
        file: PathBuf,

        /// Account name
        #[arg(short, long)]
        user: String,

        #[command(flatten)]
        message: MessageArgs,
    },
}

/// Message input shared by the hashing and signing commands.
#[derive(Args, Debug, Clone)]
pub struct MessageArgs {
    /// Message to process (UTF-8 text unless --message-hex is set)
    #[arg(short, long)]
    pub message: String,

    /// Interpret --message as hex-encoded bytes
    #[arg(long, default_value = "false")]
    pub message_hex: bool,
}

impl MessageArgs {
    /// Returns the message bytes.
    pub fn bytes(&self) -> Result<Vec<u8>, ConfigError> {
        if self.message_hex {
            decode_hex(&self.message)
                .map_err(|e| ConfigError::InvalidInput(format!("message is not hex: {}", e)))
        } else {
            Ok(self.message.as_bytes().to_vec())
        }
    }
}

impl Config {
    /// Validates argument shapes before any key material is touched.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == Some(0) {
            return Err(ConfigError::InvalidInput(
                "Worker count must be at least 1".into(),
            ));
        }

        match &self.command {
            Command::Generate { count } => {
                if *count == 0 {
                    return Err(ConfigError::InvalidInput(
                        "Count must be at least 1".into(),
                    ));
                }
            }
            Command::Address { key, public_key } => {
                if let Some(key) = key {
                    validate_hex_len("Secret key", key, SECRET_KEY_LENGTH)?;
                }
                if let Some(public_key) = public_key {
                    validate_hex_len("Public key", public_key, PUBLIC_KEY_LENGTH)?;
                }
            }
            Command::PublicKey { key } => validate_hex_len("Secret key", key, SECRET_KEY_LENGTH)?,
            Command::Hash { message } => {
                message.bytes()?;
            }
            Command::Sign { key, message } => {
                validate_hex_len("Secret key", key, SECRET_KEY_LENGTH)?;
                message.bytes()?;
            }
            Command::Recover { message, signature } => {
                validate_hex_len("Signature", signature, SIGNATURE_LENGTH)?;
                message.bytes()?;
            }
            Command::Verify {
                message,
                signature,
                address,
            } => {
                validate_hex_len("Signature", signature, SIGNATURE_LENGTH)?;
                validate_hex_len("Address", address, ADDRESS_LENGTH)?;
                message.bytes()?;
            }
            Command::Accounts { .. } => {}
            Command::WalletSign { user, message, .. } => {
                if user.is_empty() {
                    return Err(ConfigError::InvalidInput("User cannot be empty".into()));
                }
                message.bytes()?;
            }
        }

        Ok(())
    }

    /// Returns the default log directive for the verbosity flag.
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn validate_hex_len(what: &str, value: &str, bytes: usize) -> Result<(), ConfigError> {
    let digits = strip_hex_prefix(value);
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ConfigError::InvalidInput(format!(
            "{} must contain only hex characters (0-9, a-f)",
            what
        )));
    }
    if digits.len() != bytes * 2 {
        return Err(ConfigError::InvalidInput(format!(
            "{} must be {} hex characters, got {}",
            what,
            bytes * 2,
            digits.len()
        )));
    }
    Ok(())
}

/// Named accounts loaded from TOML.
///
/// ```toml
/// [accounts]
/// arda = "f906f5ff52331f1ea1dbd4d2981c5f2eb8903e127bf6802ba6f39f8552f29a99"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AccountsFile {
    #[serde(default)]
    pub accounts: BTreeMap<String, String>,
}

impl AccountsFile {
    /// Reads and parses an accounts file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&content)
    }

    /// Parses accounts from TOML text.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    /// Builds an in-memory key provider, validating every secret key.
    pub fn into_provider(self) -> Result<MemoryKeyProvider, ConfigError> {
        Ok(MemoryKeyProvider::from_hex_entries(self.accounts)?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid accounts file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Account(#[from] AccountError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(command: Command) -> Config {
        Config {
            verbose: 0,
            workers: None,
            command,
        }
    }

    fn text(message: &str) -> MessageArgs {
        MessageArgs {
            message: message.into(),
            message_hex: false,
        }
    }

    #[test]
    fn test_valid_sign() {
        let config = make_test_config(Command::Sign {
            key: "f906f5ff52331f1ea1dbd4d2981c5f2eb8903e127bf6802ba6f39f8552f29a99".into(),
            message: text("hello"),
        });
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_key_shape() {
        let config = make_test_config(Command::PublicKey { key: "xyz".into() });
        assert!(config.validate().is_err());

        let config = make_test_config(Command::PublicKey { key: "abcd".into() });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_hex_prefix_rule() {
        let key = "f906f5ff52331f1ea1dbd4d2981c5f2eb8903e127bf6802ba6f39f8552f29a99";

        let config = make_test_config(Command::PublicKey {
            key: format!("0X{}", key),
        });
        assert!(config.validate().is_ok());

        let config = make_test_config(Command::PublicKey {
            key: format!("0x0x{}", key),
        });
        assert!(config.validate().is_err());

        let args = MessageArgs {
            message: "0x0xdead".into(),
            message_hex: true,
        };
        assert!(args.bytes().is_err());
    }

    #[test]
    fn test_verify_address_length() {
        let signature = "00".repeat(SIGNATURE_LENGTH);
        let config = make_test_config(Command::Verify {
            message: text("hi"),
            signature: signature.clone(),
            address: format!("0x{}", "ab".repeat(ADDRESS_LENGTH)),
        });
        assert!(config.validate().is_ok());

        let config = make_test_config(Command::Verify {
            message: text("hi"),
            signature,
            address: format!("0x{}", "ab".repeat(ADDRESS_LENGTH - 1)),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_zero_count() {
        let config = make_test_config(Command::Generate { count: 0 });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_message_hex() {
        let args = MessageArgs {
            message: "0xdeadbeef".into(),
            message_hex: true,
        };
        assert_eq!(args.bytes().unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);
        assert_eq!(text("hi").bytes().unwrap(), b"hi".to_vec());
    }

    #[test]
    fn test_parse_cli() {
        let config = Config::try_parse_from([
            "eth_account",
            "-vv",
            "sign",
            "--key",
            "f906f5ff52331f1ea1dbd4d2981c5f2eb8903e127bf6802ba6f39f8552f29a99",
            "--message",
            "hello",
        ])
        .unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(matches!(config.command, Command::Sign { .. }));
    }

    #[test]
    fn test_accounts_file() {
        let file = AccountsFile::parse(
            r#"
            [accounts]
            sam = "e17f36d60851f9a0c641b9d2d9da84ef2d8a4c783c359c233c741a14f5ed412a"
            "#,
        )
        .unwrap();
        let provider = file.into_provider().unwrap();
        assert_eq!(provider.len(), 1);
    }

    #[test]
    fn test_accounts_file_bad_key() {
        let file = AccountsFile::parse("[accounts]\nbad = \"00\"\n").unwrap();
        assert!(matches!(
            file.into_provider(),
            Err(ConfigError::Account(AccountError::InvalidKey(_)))
        ));
    }
}
