//! Trigger and trigger-context wire model.
//!
//! Both enums serialize as Borsh: a one-byte discriminant in declaration
//! order followed by the variant fields. The discriminant table is part of
//! the thread program's ABI, so decoding matches on it exhaustively and
//! surfaces unknown values rather than defaulting. Earlier program revisions
//! shipped fewer context variants; a discriminant above the known range is
//! reported as unknown, never mapped onto a historical shape.

use anchor_lang::{AnchorDeserialize, AnchorSerialize};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::MAX_ACCOUNT_SLICE_SIZE;
use crate::error::{MetronomeError, MetronomeResult};

/// The comparison operator of a price trigger.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Equality {
    GreaterThanOrEqual {},
    LessThanOrEqual {},
}

/// The condition that permits a thread's next execution cycle to begin.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum Trigger {
    /// Fire when a byte slice of the watched account's data changes.
    Account {
        /// The address of the account to monitor.
        address: Pubkey,
        /// The byte offset of the account data to monitor.
        offset: u64,
        /// The size of the byte slice to monitor (must be less than 1kb).
        size: u64,
    },
    /// Fire on a one-time or recurring schedule in cron syntax.
    Cron {
        /// The schedule in cron syntax.
        schedule: String,
        /// Whether triggering moments may be skipped if they are missed.
        /// If false, missed moments execute as soon as the network recovers.
        skippable: bool,
    },
    /// Fire immediately, once.
    Now {},
    /// Fire at or after the given slot.
    Slot { slot: u64 },
    /// Fire at or after the given epoch.
    Epoch { epoch: u64 },
    /// Fire at or after the given unix timestamp.
    Timestamp { unix_ts: i64 },
    /// Fire when an oracle price feed crosses a threshold.
    Pyth {
        /// The address of the price feed to monitor.
        price_feed: Pubkey,
        /// The operator used to compare the feed against the limit.
        equality: Equality,
        /// The limit price to compare the feed to.
        limit: i64,
    },
}

/// Recorded evidence of which trigger condition actually fired. Mirrors
/// [`Trigger`] variant-for-variant.
#[derive(AnchorSerialize, AnchorDeserialize, Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub enum TriggerContext {
    /// The hash of the monitored data slice at kickoff.
    Account { data_hash: u64 },
    /// The threshold moment the schedule was waiting for.
    Cron { started_at: i64 },
    Now,
    /// The threshold slot the trigger was waiting for.
    Slot { started_at: u64 },
    /// The threshold epoch the trigger was waiting for.
    Epoch { started_at: u64 },
    /// The threshold moment the trigger was waiting for.
    Timestamp { started_at: i64 },
    /// The limit price the trigger was waiting for.
    Pyth { price: i64 },
}

/// Discriminants 0..=6 are defined for both enums.
const MAX_KNOWN_DISCRIMINANT: u8 = 6;

const TRIGGER_INPUT_TAGS: [&str; 7] =
    ["account", "cron", "now", "slot", "epoch", "timestamp", "pyth"];

impl Trigger {
    /// Parse the externally tagged input form, e.g. `{"now":{}}` or
    /// `{"cron":{"schedule":"*/10 * * * * *","skippable":true}}`.
    pub fn from_json(input: &str) -> MetronomeResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(input).map_err(MetronomeError::serialization)?;
        Self::from_value(value)
    }

    /// Parse an already-deserialized input value. An unrecognized variant tag
    /// is rejected rather than coerced.
    pub fn from_value(value: serde_json::Value) -> MetronomeResult<Self> {
        let tag = value
            .as_object()
            .filter(|obj| obj.len() == 1)
            .and_then(|obj| obj.keys().next().cloned())
            .ok_or_else(|| {
                MetronomeError::serialization("trigger input must be a single-key object")
            })?;
        if !TRIGGER_INPUT_TAGS.contains(&tag.as_str()) {
            return Err(MetronomeError::UnsupportedTriggerVariant(tag));
        }
        serde_json::from_value(value).map_err(MetronomeError::serialization)
    }

    /// Check the bounds the thread program enforces at runtime, so a bad
    /// trigger fails here instead of costing a round trip.
    pub fn validate(&self) -> MetronomeResult<()> {
        if let Trigger::Account { size, .. } = self {
            if *size >= MAX_ACCOUNT_SLICE_SIZE {
                return Err(MetronomeError::AccountSliceTooLarge { size: *size });
            }
        }
        Ok(())
    }
}

impl TriggerContext {
    /// Whether this context records an activation of the given trigger
    /// variant. A thread whose context disagrees with its trigger is in an
    /// inconsistent state.
    pub fn matches(&self, trigger: &Trigger) -> bool {
        matches!(
            (self, trigger),
            (TriggerContext::Account { .. }, Trigger::Account { .. })
                | (TriggerContext::Cron { .. }, Trigger::Cron { .. })
                | (TriggerContext::Now, Trigger::Now {})
                | (TriggerContext::Slot { .. }, Trigger::Slot { .. })
                | (TriggerContext::Epoch { .. }, Trigger::Epoch { .. })
                | (TriggerContext::Timestamp { .. }, Trigger::Timestamp { .. })
                | (TriggerContext::Pyth { .. }, Trigger::Pyth { .. })
        )
    }
}

/// Encode a trigger to its wire form, validating program-enforced bounds
/// first.
pub fn encode_trigger(trigger: &Trigger) -> MetronomeResult<Vec<u8>> {
    trigger.validate()?;
    trigger.try_to_vec().map_err(MetronomeError::serialization)
}

/// Decode a wire trigger. The whole buffer must be consumed.
pub fn decode_trigger(data: &[u8]) -> MetronomeResult<Trigger> {
    let mut buf = data;
    let trigger = read_trigger(&mut buf)?;
    if !buf.is_empty() {
        return Err(MetronomeError::CorruptTrigger);
    }
    Ok(trigger)
}

/// Decode a wire trigger context. The whole buffer must be consumed.
pub fn decode_trigger_context(data: &[u8]) -> MetronomeResult<TriggerContext> {
    let mut buf = data;
    let context = read_trigger_context(&mut buf)?;
    if !buf.is_empty() {
        return Err(MetronomeError::CorruptTrigger);
    }
    Ok(context)
}

/// Read a trigger from the front of `buf`, advancing it. Used when the
/// trigger is embedded in a larger record.
pub(crate) fn read_trigger(buf: &mut &[u8]) -> MetronomeResult<Trigger> {
    let discriminant = *buf.first().ok_or(MetronomeError::CorruptTrigger)?;
    if discriminant > MAX_KNOWN_DISCRIMINANT {
        return Err(MetronomeError::UnknownTriggerVariant(discriminant));
    }
    <Trigger as AnchorDeserialize>::deserialize(buf).map_err(|_| MetronomeError::CorruptTrigger)
}

/// Read a trigger context from the front of `buf`, advancing it.
pub(crate) fn read_trigger_context(buf: &mut &[u8]) -> MetronomeResult<TriggerContext> {
    let discriminant = *buf.first().ok_or(MetronomeError::CorruptTrigger)?;
    if discriminant > MAX_KNOWN_DISCRIMINANT {
        return Err(MetronomeError::UnknownTriggerContextVariant(discriminant));
    }
    <TriggerContext as AnchorDeserialize>::deserialize(buf)
        .map_err(|_| MetronomeError::CorruptTrigger)
}
