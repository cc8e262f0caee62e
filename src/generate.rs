//! Batch generation of fresh keypairs.

use rayon::prelude::*;
use tracing::info;

use crate::crypto::Keypair;

/// Generates `count` random keypairs across the rayon thread pool.
pub fn generate_keypairs(count: usize) -> Vec<Keypair> {
    let keypairs: Vec<Keypair> = (0..count)
        .into_par_iter()
        .map(|_| Keypair::generate())
        .collect();
    info!(count = keypairs.len(), "generated keypairs");
    keypairs
}
