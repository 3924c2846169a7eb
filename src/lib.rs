//! Client SDK for the metronome thread program.
//!
//! Threads are schedulable units living in program-derived accounts: each
//! carries a trigger (the condition that kicks off execution), an ordered
//! instruction set to replay, and mutable settings. This crate derives
//! thread and worker addresses deterministically, encodes and decodes the
//! program's wire types, and builds every thread operation as an unsigned
//! instruction. Signing, submission, and retry policy belong to the caller's
//! transport layer; [`client::MetronomeClient`] is a thin wrapper over it.

pub mod client;
pub mod constants;
pub mod error;
pub mod thread;
pub mod utils;

// Re-export the main client and types
pub use client::MetronomeClient;
pub use constants::*;
pub use error::*;
pub use thread::*;
pub use utils::*;

// Re-export commonly used Solana types
pub use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::{Keypair, Signature},
    signer::Signer,
    commitment_config::CommitmentConfig,
};
