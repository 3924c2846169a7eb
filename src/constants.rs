//! Program ids, PDA seed tags, and limits enforced by the thread program.
//!
//! Every value here must match the deployed program bit-for-bit. Changing a
//! seed tag or its encoding breaks every previously derived address.

use solana_sdk::pubkey;
use solana_sdk::pubkey::Pubkey;

/// The thread program, which owns all thread accounts.
pub const THREAD_PROGRAM_ID: Pubkey = pubkey!("CLoCKyJ6DXBJqqu2VWx9RLbgnwwR6BMHHuyasVmfMzBh");

/// The network program, which owns worker accounts.
pub const NETWORK_PROGRAM_ID: Pubkey = pubkey!("F8dKseqmBoAkHx3c58Lmb9TgJv5qeTf3BbtZZSEzYvUa");

/// The stand-in pubkey for delegating a payer address to a worker. Workers
/// are reimbursed by the thread for lamports spent under this delegation.
pub const PAYER_PUBKEY: Pubkey = pubkey!("C1ockworkPayer11111111111111111111111111111");

/// Seed tag for thread PDAs: `["thread", authority, id]`.
pub const SEED_THREAD: &[u8] = b"thread";

/// Seed tag for worker PDAs: `["worker", worker_id.to_be_bytes()]`.
pub const SEED_WORKER: &[u8] = b"worker";

/// Maximum number of execs per slot accepted by the thread program.
pub const MAX_RATE_LIMIT: u64 = 32;

/// Account triggers may monitor a byte slice of strictly less than 1kb.
pub const MAX_ACCOUNT_SLICE_SIZE: u64 = 1024;
