/// Errors produced while turning a raw transaction into a [`Splain`](super::Splain).
///
/// Every variant aborts the current decode; nothing is partially decoded.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SplainError {
    /// The input string is not hexadecimal once the `0x` prefix is stripped.
    #[error("invalid hex: {context}")]
    InvalidHex { context: String },

    /// An RLP prefix or declared length points past the end of the buffer.
    #[error("malformed input: {context}")]
    MalformedInput { context: String },

    /// The outermost item is a string, not a list.
    #[error("not a transaction: {context}")]
    NotATransaction { context: String },

    /// The outer list ended before all nine fields were read.
    #[error("truncated transaction: only {decoded} of 9 fields present")]
    TruncatedTransaction { decoded: usize },

    /// Bytes remain after the ninth field. Only raised in strict mode.
    #[error("trailing data: {count} bytes after the last field")]
    TrailingData { count: usize },

    /// A valid but non-minimal encoding. Only raised in strict mode.
    #[error("non-canonical encoding at offset {offset}: {context}")]
    NonCanonical { offset: usize, context: String },
}

impl SplainError {
    pub fn malformed(context: impl Into<String>) -> Self {
        Self::MalformedInput {
            context: context.into(),
        }
    }

    pub fn non_canonical(offset: usize, context: impl Into<String>) -> Self {
        Self::NonCanonical {
            offset,
            context: context.into(),
        }
    }

    /// Stable name of the error kind, used in API responses and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InvalidHex { .. } => "invalid_hex",
            Self::MalformedInput { .. } => "malformed_input",
            Self::NotATransaction { .. } => "not_a_transaction",
            Self::TruncatedTransaction { .. } => "truncated_transaction",
            Self::TrailingData { .. } => "trailing_data",
            Self::NonCanonical { .. } => "non_canonical",
        }
    }
}
