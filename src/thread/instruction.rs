//! Serializable form of the instructions a thread replays.
//!
//! Conversion to and from `solana_sdk::instruction::Instruction` is a
//! structural re-tagging: no byte is transformed and account order is
//! preserved exactly, since the order is semantically significant to the
//! programs the thread calls into.

use anchor_lang::{AnchorDeserialize, AnchorSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;

/// Account metadata for an instruction the thread will execute.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerializableAccount {
    /// The account's public key.
    pub pubkey: Pubkey,
    /// True if the instruction requires a transaction signature matching `pubkey`.
    pub is_signer: bool,
    /// True if the account may be loaded read-write.
    pub is_writable: bool,
}

/// An instruction the thread is configured to execute.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct SerializableInstruction {
    /// Pubkey of the program that executes this instruction.
    pub program_id: Pubkey,
    /// Metadata for the accounts passed to the program, in call order.
    pub accounts: Vec<SerializableAccount>,
    /// Opaque data passed to the program.
    pub data: Vec<u8>,
}

impl From<&AccountMeta> for SerializableAccount {
    fn from(meta: &AccountMeta) -> Self {
        Self {
            pubkey: meta.pubkey,
            is_signer: meta.is_signer,
            is_writable: meta.is_writable,
        }
    }
}

impl From<&SerializableAccount> for AccountMeta {
    fn from(account: &SerializableAccount) -> Self {
        Self {
            pubkey: account.pubkey,
            is_signer: account.is_signer,
            is_writable: account.is_writable,
        }
    }
}

impl From<Instruction> for SerializableInstruction {
    fn from(instruction: Instruction) -> Self {
        Self {
            program_id: instruction.program_id,
            accounts: instruction.accounts.iter().map(Into::into).collect(),
            data: instruction.data,
        }
    }
}

impl From<SerializableInstruction> for Instruction {
    fn from(instruction: SerializableInstruction) -> Self {
        Self {
            program_id: instruction.program_id,
            accounts: instruction.accounts.iter().map(Into::into).collect(),
            data: instruction.data,
        }
    }
}

/// Convert a batch of instructions, preserving sequence order.
pub fn to_serializable_list(instructions: Vec<Instruction>) -> Vec<SerializableInstruction> {
    instructions.into_iter().map(Into::into).collect()
}
