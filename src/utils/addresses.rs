/// Address derivation for thread program accounts
///
/// Seeds are concatenated in a fixed order and must match the on-chain
/// program bit-for-bit.
use solana_sdk::pubkey::Pubkey;

use crate::constants::{NETWORK_PROGRAM_ID, SEED_THREAD, SEED_WORKER, THREAD_PROGRAM_ID};
use crate::error::{MetronomeError, MetronomeResult};

/// Find the thread PDA for an authority and thread id.
///
/// Seeds: `["thread", authority, id]`. Deterministic; identical inputs always
/// yield the same address and bump.
pub fn find_thread_pda(authority: &Pubkey, id: &[u8]) -> MetronomeResult<(Pubkey, u8)> {
    Pubkey::try_find_program_address(
        &[SEED_THREAD, authority.as_ref(), id],
        &THREAD_PROGRAM_ID,
    )
    .ok_or(MetronomeError::AddressSpaceExhausted)
}

/// Find the worker PDA for a worker id.
///
/// Seeds: `["worker", worker_id.to_be_bytes()]`.
pub fn find_worker_pda(worker_id: u64) -> MetronomeResult<(Pubkey, u8)> {
    Pubkey::try_find_program_address(
        &[SEED_WORKER, &worker_id.to_be_bytes()],
        &NETWORK_PROGRAM_ID,
    )
    .ok_or(MetronomeError::AddressSpaceExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thread_pda_determinism() {
        let authority = Pubkey::new_unique();

        let (pda1, bump1) = find_thread_pda(&authority, b"job-1").unwrap();
        let (pda2, bump2) = find_thread_pda(&authority, b"job-1").unwrap();

        assert_eq!(pda1, pda2);
        assert_eq!(bump1, bump2);
    }

    #[test]
    fn test_thread_pda_scoped_by_inputs() {
        let authority = Pubkey::new_unique();
        let other = Pubkey::new_unique();

        let (pda, _) = find_thread_pda(&authority, b"job-1").unwrap();
        let (other_authority, _) = find_thread_pda(&other, b"job-1").unwrap();
        let (other_id, _) = find_thread_pda(&authority, b"job-2").unwrap();

        assert_ne!(pda, other_authority);
        assert_ne!(pda, other_id);
    }

    #[test]
    fn test_worker_pda_determinism() {
        let (pda1, bump1) = find_worker_pda(7).unwrap();
        let (pda2, bump2) = find_worker_pda(7).unwrap();

        assert_eq!(pda1, pda2);
        assert_eq!(bump1, bump2);
        assert_ne!(pda1, find_worker_pda(8).unwrap().0);
    }
}
