//! Sparse updates to a thread's mutable settings.
//!
//! Each field of [`ThreadSettings`] is an `Option`: `None` means "leave the
//! on-chain value unchanged" and `Some` means "overwrite", including
//! explicit zero or empty values. Presence is decided only by whether a
//! builder setter was called, never by the value itself, so `fee(0)` and "no
//! fee change" stay distinguishable.

use anchor_lang::{AnchorDeserialize, AnchorSerialize};
use serde::{Deserialize, Serialize};

use crate::constants::MAX_RATE_LIMIT;
use crate::error::{MetronomeError, MetronomeResult};
use crate::thread::instruction::SerializableInstruction;
use crate::thread::trigger::Trigger;

/// The updatable properties of a thread, as consumed by the update
/// operation. Field order is part of the wire format.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ThreadSettings {
    /// Lamports paid to the worker per execution.
    pub fee: Option<u64>,
    /// The full replacement instruction set.
    pub instructions: Option<Vec<SerializableInstruction>>,
    /// The thread's display name.
    pub name: Option<String>,
    /// Maximum executions per slot.
    pub rate_limit: Option<u64>,
    /// The new triggering condition. The program may reject a variant
    /// change.
    pub trigger: Option<Trigger>,
}

impl ThreadSettings {
    pub fn builder() -> ThreadSettingsBuilder {
        ThreadSettingsBuilder::default()
    }

    /// Check the bounds the thread program enforces on patched fields. The
    /// builder runs this, and the update operation runs it again on
    /// hand-constructed patches.
    pub fn validate(&self) -> MetronomeResult<()> {
        if let Some(rate_limit) = self.rate_limit {
            if rate_limit > MAX_RATE_LIMIT {
                return Err(MetronomeError::RateLimitOutOfRange(rate_limit));
            }
        }
        if let Some(trigger) = &self.trigger {
            trigger.validate()?;
        }
        Ok(())
    }
}

/// Builder for [`ThreadSettings`]. Unset fields stay `None`.
#[derive(Default, Debug, Clone)]
pub struct ThreadSettingsBuilder {
    fee: Option<u64>,
    instructions: Option<Vec<SerializableInstruction>>,
    name: Option<String>,
    rate_limit: Option<u64>,
    trigger: Option<Trigger>,
}

impl ThreadSettingsBuilder {
    pub fn fee(mut self, fee: u64) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn instructions(mut self, instructions: Vec<SerializableInstruction>) -> Self {
        self.instructions = Some(instructions);
        self
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn rate_limit(mut self, rate_limit: u64) -> Self {
        self.rate_limit = Some(rate_limit);
        self
    }

    pub fn trigger(mut self, trigger: Trigger) -> Self {
        self.trigger = Some(trigger);
        self
    }

    /// Build the patch. Field values are the program's to validate, except
    /// the bounds it is known to enforce, which fail fast here.
    pub fn build(self) -> MetronomeResult<ThreadSettings> {
        let settings = ThreadSettings {
            fee: self.fee,
            instructions: self.instructions,
            name: self.name,
            rate_limit: self.rate_limit,
            trigger: self.trigger,
        };
        settings.validate()?;
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_builder_leaves_everything_unset() {
        let settings = ThreadSettings::builder().build().unwrap();
        assert_eq!(
            settings,
            ThreadSettings {
                fee: None,
                instructions: None,
                name: None,
                rate_limit: None,
                trigger: None,
            }
        );
    }

    #[test]
    fn test_zero_and_empty_are_explicit_overwrites() {
        let settings = ThreadSettings::builder()
            .fee(0)
            .instructions(vec![])
            .name("")
            .build()
            .unwrap();
        assert_eq!(settings.fee, Some(0));
        assert_eq!(settings.instructions, Some(vec![]));
        assert_eq!(settings.name, Some(String::new()));
        assert_eq!(settings.rate_limit, None);
        assert_eq!(settings.trigger, None);
    }

    #[test]
    fn test_rate_limit_bound() {
        let settings = ThreadSettings::builder().rate_limit(32).build().unwrap();
        assert_eq!(settings.rate_limit, Some(32));

        match ThreadSettings::builder().rate_limit(33).build() {
            Err(MetronomeError::RateLimitOutOfRange(33)) => {}
            other => panic!("expected RateLimitOutOfRange, got {other:?}"),
        }
    }

    #[test]
    fn test_trigger_patch_is_validated() {
        let oversized = Trigger::Account {
            address: solana_sdk::pubkey::Pubkey::new_unique(),
            offset: 0,
            size: 4096,
        };
        assert!(matches!(
            ThreadSettings::builder().trigger(oversized).build(),
            Err(MetronomeError::AccountSliceTooLarge { size: 4096 })
        ));
    }

    #[test]
    fn test_wire_form_none_fields() {
        // five absent options serialize as five zero bytes
        let settings = ThreadSettings::builder().build().unwrap();
        assert_eq!(settings.try_to_vec().unwrap(), vec![0, 0, 0, 0, 0]);
    }
}
