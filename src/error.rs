/// Error types for the metronome SDK
///
/// Every fallible call in this crate resolves to one of the kinds below.
/// Encoding errors are raised at build time, before anything is submitted;
/// decoding errors are raised when interpreting externally sourced bytes and
/// are never coerced to a default value.
use solana_sdk::pubkey::Pubkey;
use thiserror::Error;

/// Main error type for the metronome SDK
#[derive(Error, Debug)]
pub enum MetronomeError {
    // Encoding errors (1000-1099)
    #[error("Unsupported trigger variant: {0}")]
    UnsupportedTriggerVariant(String),

    #[error("Account trigger may monitor at most {max} bytes, got {size}", max = crate::constants::MAX_ACCOUNT_SLICE_SIZE - 1)]
    AccountSliceTooLarge { size: u64 },

    #[error("Rate limit {0} exceeds the maximum allowed value")]
    RateLimitOutOfRange(u64),

    #[error("Serialization error: {0}")]
    Serialization(String),

    // Decoding errors (2000-2099)
    #[error("Malformed thread account data: {0}")]
    MalformedResource(String),

    #[error("Unknown trigger discriminant: {0}")]
    UnknownTriggerVariant(u8),

    #[error("Unknown trigger context discriminant: {0}")]
    UnknownTriggerContextVariant(u8),

    #[error("Corrupt trigger payload")]
    CorruptTrigger,

    #[error("Execution context does not match the thread's trigger variant")]
    InconsistentExecutionContext,

    // Derivation errors (3000-3099)
    #[error("No valid program address for the given seeds")]
    AddressSpaceExhausted,

    // Transport errors, passed through unchanged (4000-4099)
    #[error("Account not found: {0}")]
    AccountNotFound(Pubkey),

    #[error("RPC error: {0}")]
    Rpc(Box<solana_client::client_error::ClientError>),

    #[error("Anchor client error: {0}")]
    AnchorClient(Box<anchor_client::ClientError>),
}

impl MetronomeError {
    /// Get the error code for this error
    pub fn code(&self) -> u32 {
        match self {
            // Encoding errors
            MetronomeError::UnsupportedTriggerVariant(_) => 1000,
            MetronomeError::AccountSliceTooLarge { .. } => 1001,
            MetronomeError::RateLimitOutOfRange(_) => 1002,
            MetronomeError::Serialization(_) => 1003,

            // Decoding errors
            MetronomeError::MalformedResource(_) => 2000,
            MetronomeError::UnknownTriggerVariant(_) => 2001,
            MetronomeError::UnknownTriggerContextVariant(_) => 2002,
            MetronomeError::CorruptTrigger => 2003,
            MetronomeError::InconsistentExecutionContext => 2004,

            // Derivation errors
            MetronomeError::AddressSpaceExhausted => 3000,

            // Transport errors
            MetronomeError::AccountNotFound(_) => 4000,
            MetronomeError::Rpc(_) => 4001,
            MetronomeError::AnchorClient(_) => 4002,
        }
    }

    /// Create a new serialization error
    pub fn serialization<T: std::fmt::Display>(msg: T) -> Self {
        MetronomeError::Serialization(msg.to_string())
    }

    /// Create a new malformed-resource error
    pub fn malformed<T: std::fmt::Display>(msg: T) -> Self {
        MetronomeError::MalformedResource(msg.to_string())
    }
}

impl From<solana_client::client_error::ClientError> for MetronomeError {
    fn from(err: solana_client::client_error::ClientError) -> Self {
        Self::Rpc(Box::new(err))
    }
}

impl From<anchor_client::ClientError> for MetronomeError {
    fn from(err: anchor_client::ClientError) -> Self {
        Self::AnchorClient(Box::new(err))
    }
}

/// Result type for SDK operations
pub type MetronomeResult<T> = std::result::Result<T, MetronomeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        // Codes are stable across the taxonomy groups
        assert_eq!(MetronomeError::AccountSliceTooLarge { size: 2048 }.code(), 1001);
        assert_eq!(MetronomeError::UnknownTriggerVariant(99).code(), 2001);
        assert_eq!(MetronomeError::InconsistentExecutionContext.code(), 2004);
        assert_eq!(MetronomeError::AddressSpaceExhausted.code(), 3000);
        assert_eq!(MetronomeError::AccountNotFound(Pubkey::new_unique()).code(), 4000);
    }

    #[test]
    fn test_error_creation() {
        let ser_err = MetronomeError::serialization("buffer too small");
        assert_eq!(ser_err.code(), 1003);

        let decode_err = MetronomeError::malformed("unexpected end of input");
        assert_eq!(decode_err.code(), 2000);
    }
}
