//! RPC client wrapper for the thread program.
//!
//! Everything network-facing lives here: fetch raw account bytes and decode
//! them, or sign and submit a built instruction. Retry, timeout, and
//! confirmation policy stay inside the underlying RPC client.

use std::rc::Rc;

use anchor_client::{Client, Cluster, Program};
use solana_sdk::commitment_config::CommitmentConfig;
use solana_sdk::instruction::Instruction;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signature};
use solana_sdk::signer::Signer;
use solana_sdk::transaction::Transaction;

use crate::constants::THREAD_PROGRAM_ID;
use crate::error::{MetronomeError, MetronomeResult};
use crate::thread::state::{Thread, Worker};
use crate::utils::addresses::{find_thread_pda, find_worker_pda};

/// Client for interacting with the thread program.
pub struct MetronomeClient {
    pub client: Client<Rc<Keypair>>,
    pub payer: Rc<Keypair>,
    thread_program: Program<Rc<Keypair>>,
    commitment: CommitmentConfig,
}

impl MetronomeClient {
    /// Create a new client.
    pub fn new(
        cluster: Cluster,
        payer: Rc<Keypair>,
        commitment: Option<CommitmentConfig>,
    ) -> MetronomeResult<Self> {
        let commitment = commitment.unwrap_or(CommitmentConfig::confirmed());
        let client = Client::new_with_options(cluster, payer.clone(), commitment);
        let thread_program = client.program(THREAD_PROGRAM_ID)?;

        Ok(Self {
            client,
            payer,
            thread_program,
            commitment,
        })
    }

    /// Get the payer's public key.
    pub fn payer(&self) -> Pubkey {
        self.payer.pubkey()
    }

    /// Derive the thread PDA for an authority and thread id.
    pub fn thread_pda(&self, authority: &Pubkey, id: &[u8]) -> MetronomeResult<(Pubkey, u8)> {
        find_thread_pda(authority, id)
    }

    /// Fetch and decode a thread account.
    pub fn fetch_thread(&self, thread: &Pubkey) -> MetronomeResult<Thread> {
        let data = self.fetch_account_data(thread)?;
        Thread::try_from_bytes(&data)
    }

    /// Fetch and decode a worker account.
    pub fn fetch_worker(&self, worker_id: u64) -> MetronomeResult<Worker> {
        let (address, _bump) = find_worker_pda(worker_id)?;
        let data = self.fetch_account_data(&address)?;
        Worker::try_from_bytes(&data)
    }

    /// Sign a built instruction with the payer and submit it.
    pub fn submit(&self, instruction: Instruction) -> MetronomeResult<Signature> {
        let rpc = self.thread_program.rpc();
        let blockhash = rpc.get_latest_blockhash()?;
        let transaction = Transaction::new_signed_with_payer(
            &[instruction],
            Some(&self.payer.pubkey()),
            &[self.payer.as_ref()],
            blockhash,
        );
        let signature = rpc.send_and_confirm_transaction(&transaction)?;
        log::debug!("submitted transaction {signature}");
        Ok(signature)
    }

    fn fetch_account_data(&self, address: &Pubkey) -> MetronomeResult<Vec<u8>> {
        log::debug!("fetching account {address}");
        let response = self
            .thread_program
            .rpc()
            .get_account_with_commitment(address, self.commitment)?;
        let account = response
            .value
            .ok_or(MetronomeError::AccountNotFound(*address))?;
        Ok(account.data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_construction_is_offline() {
        let payer = Rc::new(Keypair::new());
        let client = MetronomeClient::new(Cluster::Localnet, payer.clone(), None).unwrap();
        assert_eq!(client.payer(), payer.pubkey());

        let authority = Pubkey::new_unique();
        let (pda1, bump1) = client.thread_pda(&authority, b"job-1").unwrap();
        let (pda2, bump2) = client.thread_pda(&authority, b"job-1").unwrap();
        assert_eq!((pda1, bump1), (pda2, bump2));
    }
}
