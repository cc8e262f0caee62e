//! Ethereum account key CLI
//!
//! Usage:
//!   eth_account generate -n 3                       # Three fresh keypairs
//!   eth_account address -k <secret hex>             # Address of a secret key
//!   eth_account sign -k <secret hex> -m "hello"     # Recoverable signature
//!   eth_account recover -m "hello" -s <signature>   # Signer of a message

use std::process;

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use eth_account::config::{Command, ConfigError};
use eth_account::crypto::decode_hex;
use eth_account::{
    account, generate_keypairs, AccountsFile, Address, Config, KeyProvider, Keypair, Signature,
    Wallet,
};

fn main() {
    let config = Config::parse();
    init_logging(&config);

    // Validate configuration
    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn init_logging(config: &Config) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(config.log_level()));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn run(config: &Config) -> Result<(), ConfigError> {
    match &config.command {
        Command::Generate { count } => {
            if let Some(workers) = config.workers {
                rayon::ThreadPoolBuilder::new()
                    .num_threads(workers)
                    .build_global()
                    .map_err(|e| ConfigError::InvalidInput(e.to_string()))?;
            }
            for keypair in generate_keypairs(*count) {
                print_keypair(&keypair);
            }
        }
        Command::Address { key, public_key } => {
            let address = match (key, public_key) {
                (Some(key), _) => *Keypair::from_hex(key)?.address(),
                (None, Some(public_key)) => {
                    let bytes = decode_hex(public_key)?;
                    Address::from_uncompressed(&bytes)?
                }
                (None, None) => {
                    return Err(ConfigError::InvalidInput(
                        "Either --key or --public-key is required".into(),
                    ))
                }
            };
            println!("{}", address);
        }
        Command::PublicKey { key } => {
            println!("{}", Keypair::from_hex(key)?.public_key_hex());
        }
        Command::Hash { message } => {
            println!("{}", hex::encode(account::hash_message(&message.bytes()?)));
        }
        Command::Sign { key, message } => {
            let keypair = Keypair::from_hex(key)?;
            println!("{}", keypair.sign(&message.bytes()?));
        }
        Command::Recover { message, signature } => {
            let signature = Signature::from_hex(signature)?;
            let public_key = account::recover_public_key(&message.bytes()?, &signature)?;
            println!("Public key: {}", hex::encode_upper(public_key.serialize_uncompressed()));
            println!("Address:    {}", Address::from_public_key(&public_key));
        }
        Command::Verify {
            message,
            signature,
            address,
        } => {
            let signature = Signature::from_hex(signature)?;
            let address: Address = address.parse()?;
            if account::verify(&message.bytes()?, &signature, &address)? {
                println!("valid");
            } else {
                println!("invalid");
                process::exit(2);
            }
        }
        Command::Accounts { file } => {
            let wallet = Wallet::new(AccountsFile::load(file)?.into_provider()?);
            for user in wallet.users() {
                println!("=== {} ===", user);
                println!("Address:    {}", wallet.address(&user)?);
                println!("Public Key: {}", wallet.public_key_hex(&user)?);
                println!();
            }
        }
        Command::WalletSign {
            file,
            user,
            message,
        } => {
            let wallet = Wallet::new(AccountsFile::load(file)?.into_provider()?);
            let signature = wallet.sign(user, &message.bytes()?)?;
            tracing::info!(accounts = wallet.provider().names().len(), "wallet loaded");
            println!("{}", signature);
        }
    }

    Ok(())
}

fn print_keypair(keypair: &Keypair) {
    println!("private key : {}", keypair.private_key_hex());
    println!("public key  : {}", hex::encode(keypair.public_key_bytes()));
    println!("address     : {}", keypair.address());
    println!();
}
