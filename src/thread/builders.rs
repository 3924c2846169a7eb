//! Builders for the thread program's operations.
//!
//! Each builder is a pure constructor: it derives the thread PDA where
//! needed, encodes the Anchor sighash discriminator plus Borsh args, and
//! returns an unsigned `Instruction`. Signing and submission belong to the
//! transport layer. Account metas are listed exactly as the program orders
//! them.

use anchor_lang::AnchorSerialize;
use solana_sdk::instruction::{AccountMeta, Instruction};
use solana_sdk::pubkey::Pubkey;
use solana_sdk::system_program;

use crate::constants::THREAD_PROGRAM_ID;
use crate::error::{MetronomeError, MetronomeResult};
use crate::thread::instruction::SerializableInstruction;
use crate::thread::settings::ThreadSettings;
use crate::thread::trigger::Trigger;
use crate::utils::addresses::find_thread_pda;

/// Anchor instruction discriminator: `sha256("global:<name>")[..8]`.
fn sighash(name: &str) -> [u8; 8] {
    let hash = anchor_lang::solana_program::hash::hash(format!("global:{name}").as_bytes());
    let mut out = [0u8; 8];
    out.copy_from_slice(&hash.to_bytes()[..8]);
    out
}

fn append<T: AnchorSerialize>(data: &mut Vec<u8>, value: &T) -> MetronomeResult<()> {
    value
        .serialize(data)
        .map_err(MetronomeError::serialization)
}

/// Create a new thread, funded with `amount` lamports.
///
/// The thread address is derived from `(authority, id)`; the payer covers
/// account rent.
pub fn thread_create(
    authority: &Pubkey,
    payer: &Pubkey,
    id: Vec<u8>,
    instructions: Vec<SerializableInstruction>,
    trigger: Trigger,
    amount: u64,
) -> MetronomeResult<Instruction> {
    trigger.validate()?;
    let (thread, _bump) = find_thread_pda(authority, &id)?;

    let mut data = sighash("thread_create").to_vec();
    append(&mut data, &amount)?;
    append(&mut data, &id)?;
    append(&mut data, &instructions)?;
    append(&mut data, &trigger)?;

    Ok(Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*payer, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(thread, false),
        ],
        data,
    })
}

/// Close a thread and return its lamports to `close_to` (the authority when
/// omitted).
pub fn thread_delete(
    authority: &Pubkey,
    thread: &Pubkey,
    close_to: Option<Pubkey>,
) -> Instruction {
    Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(close_to.unwrap_or(*authority), false),
            AccountMeta::new(*thread, false),
        ],
        data: sighash("thread_delete").to_vec(),
    }
}

/// Pause an active thread.
pub fn thread_pause(authority: &Pubkey, thread: &Pubkey) -> Instruction {
    authority_thread_op("thread_pause", authority, thread)
}

/// Resume a paused thread.
pub fn thread_resume(authority: &Pubkey, thread: &Pubkey) -> Instruction {
    authority_thread_op("thread_resume", authority, thread)
}

/// Reset a thread's next instruction.
pub fn thread_reset(authority: &Pubkey, thread: &Pubkey) -> Instruction {
    authority_thread_op("thread_reset", authority, thread)
}

// pause/resume/reset share one account shape
fn authority_thread_op(name: &str, authority: &Pubkey, thread: &Pubkey) -> Instruction {
    Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*thread, false),
        ],
        data: sighash(name).to_vec(),
    }
}

/// Withdraw `amount` lamports from a thread to `pay_to` (the authority when
/// omitted).
pub fn thread_withdraw(
    authority: &Pubkey,
    thread: &Pubkey,
    amount: u64,
    pay_to: Option<Pubkey>,
) -> MetronomeResult<Instruction> {
    let mut data = sighash("thread_withdraw").to_vec();
    append(&mut data, &amount)?;

    Ok(Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(pay_to.unwrap_or(*authority), false),
            AccountMeta::new(*thread, false),
        ],
        data,
    })
}

/// Apply a settings patch to a thread. `None` fields are left unchanged.
pub fn thread_update(
    authority: &Pubkey,
    thread: &Pubkey,
    settings: ThreadSettings,
) -> MetronomeResult<Instruction> {
    settings.validate()?;

    let mut data = sighash("thread_update").to_vec();
    append(&mut data, &settings)?;

    Ok(Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(*thread, false),
        ],
        data,
    })
}

/// Append an instruction to the thread's instruction set.
pub fn thread_instruction_add(
    authority: &Pubkey,
    thread: &Pubkey,
    instruction: SerializableInstruction,
) -> MetronomeResult<Instruction> {
    let mut data = sighash("thread_instruction_add").to_vec();
    append(&mut data, &instruction)?;

    Ok(Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(*authority, true),
            AccountMeta::new_readonly(system_program::ID, false),
            AccountMeta::new(*thread, false),
        ],
        data,
    })
}

/// Remove the instruction at `index` from the thread's instruction set.
pub fn thread_instruction_remove(
    authority: &Pubkey,
    thread: &Pubkey,
    index: u64,
) -> MetronomeResult<Instruction> {
    let mut data = sighash("thread_instruction_remove").to_vec();
    append(&mut data, &index)?;

    Ok(Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![
            AccountMeta::new_readonly(*authority, true),
            AccountMeta::new(*thread, false),
        ],
        data,
    })
}

/// Query the program's crate metadata via return data.
pub fn get_crate_info() -> Instruction {
    Instruction {
        program_id: THREAD_PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(system_program::ID, false)],
        data: sighash("get_crate_info").to_vec(),
    }
}
