//! Typed views of the on-chain accounts.
//!
//! Accounts arrive as raw bytes: an 8-byte discriminator
//! (`sha256("account:<Name>")[..8]`) followed by Borsh fields in declaration
//! order. The authoritative copy always lives with the program; these types
//! are transient local decodes.

use anchor_lang::{AnchorDeserialize, AnchorSerialize};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use solana_sdk::pubkey::Pubkey;

use crate::error::{MetronomeError, MetronomeResult};
use crate::thread::instruction::SerializableInstruction;
use crate::thread::trigger::{read_trigger, read_trigger_context, Trigger, TriggerContext};

/// The cluster clock at a captured moment.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ClockData {
    /// The current slot.
    pub slot: u64,
    /// The bank epoch.
    pub epoch: u64,
    /// The current unix timestamp.
    pub unix_timestamp: i64,
}

/// The execution context of a thread that has begun its current cycle.
#[derive(AnchorSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ExecContext {
    /// Index of the next instruction to be executed.
    pub exec_index: u64,
    /// Number of execs since the last tx reimbursement.
    pub execs_since_reimbursement: u64,
    /// Number of execs in this slot.
    pub execs_since_slot: u64,
    /// Slot of the last exec.
    pub last_exec_at: u64,
    /// Context for the triggering condition.
    pub trigger_context: TriggerContext,
}

/// The current state of one schedulable thread.
#[derive(AnchorSerialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Thread {
    /// The owner of this thread; only this identity may mutate or delete it.
    pub authority: Pubkey,
    /// The bump used for PDA validation. Immutable after creation.
    pub bump: u8,
    /// The cluster clock at the moment the thread was created.
    pub created_at: ClockData,
    /// Present only while the thread is executing its current cycle.
    pub exec_context: Option<ExecContext>,
    /// Lamports paid to the worker per execution.
    pub fee: u64,
    /// The id of the thread, given by the authority. Part of the PDA seeds.
    pub id: Vec<u8>,
    /// The instructions to be executed, in order.
    pub instructions: Vec<SerializableInstruction>,
    /// The thread's display name.
    pub name: String,
    /// The next instruction awaiting execution, if any.
    pub next_instruction: Option<SerializableInstruction>,
    /// Whether the thread is currently paused.
    pub paused: bool,
    /// Maximum executions per slot.
    pub rate_limit: u64,
    /// The condition that kicks off the next execution cycle.
    pub trigger: Trigger,
}

/// A registered worker of the network program.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Worker {
    /// The worker's authority (owner).
    pub authority: Pubkey,
    /// Lamports claimable by the authority as commission.
    pub commission_balance: u64,
    /// Percentage (0-100) of fees kept as commission.
    pub commission_rate: u64,
    /// The worker's id.
    pub id: u64,
    /// The signatory address used to sign the worker's transactions.
    pub signatory: Pubkey,
    /// The number of delegations allocated to this worker.
    pub total_delegations: u64,
}

/// Compute the Anchor account discriminator for an account type name.
pub(crate) fn account_discriminator(name: &str) -> [u8; 8] {
    let mut hasher = Sha256::new();
    hasher.update(format!("account:{name}").as_bytes());
    let hash = hasher.finalize();
    let mut discriminator = [0u8; 8];
    discriminator.copy_from_slice(&hash[..8]);
    discriminator
}

fn read<T: AnchorDeserialize>(buf: &mut &[u8]) -> MetronomeResult<T> {
    T::deserialize(buf).map_err(MetronomeError::malformed)
}

fn strip_discriminator<'a>(data: &'a [u8], name: &str) -> MetronomeResult<&'a [u8]> {
    if data.len() < 8 {
        return Err(MetronomeError::malformed("account data shorter than discriminator"));
    }
    if data[..8] != account_discriminator(name) {
        return Err(MetronomeError::malformed(format!(
            "account discriminator does not match {name}"
        )));
    }
    Ok(&data[8..])
}

fn read_exec_context(buf: &mut &[u8]) -> MetronomeResult<ExecContext> {
    Ok(ExecContext {
        exec_index: read(buf)?,
        execs_since_reimbursement: read(buf)?,
        execs_since_slot: read(buf)?,
        last_exec_at: read(buf)?,
        trigger_context: read_trigger_context(buf)?,
    })
}

impl Thread {
    pub fn discriminator() -> [u8; 8] {
        account_discriminator("Thread")
    }

    /// Decode a thread account from raw bytes.
    ///
    /// Fields are read one by one so that an out-of-range trigger or
    /// trigger-context discriminant surfaces as its own error kind instead
    /// of a generic deserialization failure. A context whose variant
    /// disagrees with the thread's trigger is rejected outright; that state
    /// is not recoverable client-side.
    pub fn try_from_bytes(data: &[u8]) -> MetronomeResult<Self> {
        let mut buf = strip_discriminator(data, "Thread")?;
        let buf = &mut buf;

        let authority = read(buf)?;
        let bump = read(buf)?;
        let created_at = read(buf)?;
        let exec_context = match read::<u8>(buf)? {
            0 => None,
            1 => Some(read_exec_context(buf)?),
            tag => {
                return Err(MetronomeError::malformed(format!(
                    "invalid option tag {tag} for exec_context"
                )))
            }
        };
        let fee = read(buf)?;
        let id = read(buf)?;
        let instructions = read(buf)?;
        let name = read(buf)?;
        let next_instruction = read(buf)?;
        let paused = read(buf)?;
        let rate_limit = read(buf)?;
        let trigger = read_trigger(buf)?;

        if let Some(context) = &exec_context {
            if !context.trigger_context.matches(&trigger) {
                return Err(MetronomeError::InconsistentExecutionContext);
            }
        }

        Ok(Self {
            authority,
            bump,
            created_at,
            exec_context,
            fee,
            id,
            instructions,
            name,
            next_instruction,
            paused,
            rate_limit,
            trigger,
        })
    }
}

impl Worker {
    pub fn discriminator() -> [u8; 8] {
        account_discriminator("Worker")
    }

    /// Decode a worker account from raw bytes.
    pub fn try_from_bytes(data: &[u8]) -> MetronomeResult<Self> {
        let mut buf = strip_discriminator(data, "Worker")?;
        read(&mut buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_thread(trigger: Trigger, exec_context: Option<ExecContext>) -> Thread {
        Thread {
            authority: Pubkey::new_unique(),
            bump: 254,
            created_at: ClockData {
                slot: 100,
                epoch: 2,
                unix_timestamp: 1_700_000_000,
            },
            exec_context,
            fee: 1000,
            id: b"job-1".to_vec(),
            instructions: vec![SerializableInstruction {
                program_id: Pubkey::new_unique(),
                accounts: vec![],
                data: vec![1, 2, 3],
            }],
            name: "job-1".to_string(),
            next_instruction: None,
            paused: false,
            rate_limit: 8,
            trigger,
        }
    }

    fn to_account_bytes(thread: &Thread) -> Vec<u8> {
        let mut data = Thread::discriminator().to_vec();
        AnchorSerialize::serialize(thread, &mut data).unwrap();
        data
    }

    #[test]
    fn test_thread_decode_fidelity() {
        let thread = sample_thread(
            Trigger::Cron {
                schedule: "0 0 * * * *".to_string(),
                skippable: true,
            },
            Some(ExecContext {
                exec_index: 0,
                execs_since_reimbursement: 1,
                execs_since_slot: 1,
                last_exec_at: 99,
                trigger_context: TriggerContext::Cron { started_at: 1_699_999_990 },
            }),
        );
        let decoded = Thread::try_from_bytes(&to_account_bytes(&thread)).unwrap();
        assert_eq!(decoded, thread);
    }

    #[test]
    fn test_idle_thread_has_no_context() {
        let thread = sample_thread(Trigger::Now {}, None);
        let decoded = Thread::try_from_bytes(&to_account_bytes(&thread)).unwrap();
        assert_eq!(decoded.exec_context, None);
        assert_eq!(decoded.next_instruction, None);
    }

    #[test]
    fn test_mismatched_context_rejected() {
        let thread = sample_thread(
            Trigger::Cron {
                schedule: "0 0 * * * *".to_string(),
                skippable: false,
            },
            Some(ExecContext {
                exec_index: 0,
                execs_since_reimbursement: 0,
                execs_since_slot: 0,
                last_exec_at: 0,
                trigger_context: TriggerContext::Pyth { price: 42 },
            }),
        );
        assert!(matches!(
            Thread::try_from_bytes(&to_account_bytes(&thread)),
            Err(MetronomeError::InconsistentExecutionContext)
        ));
    }

    #[test]
    fn test_malformed_bytes_rejected() {
        // too short for a discriminator
        assert!(matches!(
            Thread::try_from_bytes(&[1, 2, 3]),
            Err(MetronomeError::MalformedResource(_))
        ));

        // wrong discriminator
        let mut data = Worker::discriminator().to_vec();
        data.extend_from_slice(&[0u8; 64]);
        assert!(matches!(
            Thread::try_from_bytes(&data),
            Err(MetronomeError::MalformedResource(_))
        ));

        // valid discriminator, truncated body
        let thread = sample_thread(Trigger::Now {}, None);
        let bytes = to_account_bytes(&thread);
        assert!(matches!(
            Thread::try_from_bytes(&bytes[..bytes.len() - 4]),
            Err(MetronomeError::MalformedResource(_)) | Err(MetronomeError::CorruptTrigger)
        ));
    }

    #[test]
    fn test_unknown_trigger_surfaces() {
        let thread = sample_thread(Trigger::Now {}, None);
        let mut bytes = to_account_bytes(&thread);
        // the trigger discriminant is the final byte of a Now thread
        *bytes.last_mut().unwrap() = 99;
        assert!(matches!(
            Thread::try_from_bytes(&bytes),
            Err(MetronomeError::UnknownTriggerVariant(99))
        ));
    }

    #[test]
    fn test_worker_round_trip() {
        let worker = Worker {
            authority: Pubkey::new_unique(),
            commission_balance: 5_000,
            commission_rate: 10,
            id: 3,
            signatory: Pubkey::new_unique(),
            total_delegations: 12,
        };
        let mut data = Worker::discriminator().to_vec();
        AnchorSerialize::serialize(&worker, &mut data).unwrap();
        assert_eq!(Worker::try_from_bytes(&data).unwrap(), worker);
    }
}
