pub mod annotate;
pub mod error;
pub mod rlp;
pub mod walk;

#[cfg(test)]
pub(crate) mod fixtures;

pub use error::SplainError;
pub use rlp::Mode;

use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use tracing::debug;

/// One annotated byte range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Token {
    /// Hex of exactly the bytes this token covers.
    pub hex: String,
    pub text: String,
    pub more: String,
}

/// Ordered tokens describing a whole transaction.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Splain {
    #[serde(rename = "Tokens")]
    pub tokens: Vec<Token>,
}

impl Splain {
    /// JSON document with tab indentation.
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        let mut out = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut out, PrettyFormatter::with_indent(b"\t"));
        self.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    /// Concatenation of every token's bytes, in order.
    pub fn covered_bytes(&self) -> Result<Vec<u8>, SplainError> {
        let mut out = Vec::new();
        for token in &self.tokens {
            out.extend(decode_hex_digits(&token.hex)?);
        }
        Ok(out)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SplainOptions {
    /// Emit length-prefix tokens and long explanations.
    pub verbose: bool,
    pub mode: Mode,
}

impl SplainOptions {
    pub fn verbose(verbose: bool) -> Self {
        Self {
            verbose,
            ..Self::default()
        }
    }
}

/// Decodes a hex string, with or without a leading `0x`.
pub fn parse_hex(input: &str) -> Result<Vec<u8>, SplainError> {
    let trimmed = input.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);
    decode_hex_digits(digits)
}

fn decode_hex_digits(digits: &str) -> Result<Vec<u8>, SplainError> {
    hex::decode(digits).map_err(|error| SplainError::InvalidHex {
        context: error.to_string(),
    })
}

pub fn splain_bytes(buffer: &[u8], options: SplainOptions) -> Result<Splain, SplainError> {
    let walked = walk::walk_with(buffer, options.mode)?;
    let splain = annotate::annotate(buffer, &walked, options.verbose);
    debug!(
        bytes = buffer.len(),
        consumed = walked.consumed(),
        tokens = splain.tokens.len(),
        verbose = options.verbose,
        "decoded legacy transaction"
    );
    Ok(splain)
}

pub fn splain_hex(input: &str, options: SplainOptions) -> Result<Splain, SplainError> {
    let buffer = parse_hex(input)?;
    splain_bytes(&buffer, options)
}
