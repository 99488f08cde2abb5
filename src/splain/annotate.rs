//! Turns a walked transaction into annotated tokens.
//!
//! Concise mode emits one token per field covering the whole encoding.
//! Verbose mode splits each field into a length-prefix token and a payload
//! token, and swaps in the long explanations.

use super::rlp::{RlpItem, RlpKind};
use super::walk::{FIELD_COUNT, FieldRole, Walk};
use super::{Splain, Token};
use alloy_primitives::U256;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Explanation {
    pub short: &'static str,
    pub long: Option<&'static str>,
}

impl Explanation {
    pub fn pick(&self, verbose: bool) -> &'static str {
        match (verbose, self.long) {
            (true, Some(long)) => long,
            _ => self.short,
        }
    }
}

/// Indexed by [`FieldRole::index`].
static EXPLANATIONS: [Explanation; FIELD_COUNT] = [
    Explanation {
        short: "The nonce is an incrementing sequence number used to prevent message replay",
        long: Some(
            "The nonce is a sequence number issued by the transaction creator used to prevent message replay. The nonce of each transaction of an account must be exactly 1 greater than the previous nonce used. The Ethereum yellow paper defines the nonce as 'A scalar value equal to the number of transactions sent from this address or, in the case of accounts with associated code, the number of contract-creations made by this account'",
        ),
    },
    Explanation {
        short: "The price of gas (in wei) that the sender is willing to pay.",
        long: Some(
            "The price of gas (in wei) that the sender is willing to pay. Gas is purchased with ether and serves to protect the limited resources of the network (computation, memory, and storage). The amount of ether spent for gas can be calculated by multiplying the Gas Price by the amount of gas consumed in the transaction (21000 gas for a standard transaction)",
        ),
    },
    Explanation {
        short: "The maximum amount of gas the originator is willing to pay for this transaction.",
        long: Some(
            "The maximum amount of gas the originator is willing to pay for this transaction. The amount of gas consumed depends on how much computation your transaction requires.",
        ),
    },
    Explanation {
        short: "The address of the user account or contract to interact with",
        long: Some(
            "An ethereum address is generated with the following steps\n1. Generate a public key by multiplying the private key 'k' by the Ethereum generator point G. The public key is the concatenated x + y coordinate of the result of this multiplication\n2. Take the Keccak-256 hash of that public key\n3. Take the last 20 bytes of that hash and encode to hexadecimal.",
        ),
    },
    Explanation {
        short: "The amount of ether (in wei) to send to the recipient address.",
        long: None,
    },
    Explanation {
        short: "Data being sent to a contract function. The first 4 bytes are known as the 'function selector'",
        long: Some(
            "Data being sent to a contract function. The first 4 bytes are known as the 'function selector'. The remaining data represents arguments to the chosen function",
        ),
    },
    Explanation {
        short: "Indicates both the chainID of the transaction and the parity (odd or even) of the y component of the public key",
        long: None,
    },
    Explanation {
        short: "Part of the signature pair (r,s). Represents the X-coordinate of an ephemeral public key created during the ECDSA signing process",
        long: None,
    },
    Explanation {
        short: "Part of the signature pair (r,s). Generated using the ECDSA signing algorithm",
        long: None,
    },
];

const CONTRACT_CREATION: &str = "This transaction is a special type of transaction for Contract Creation. Notice the address is the Zero Address 0x0";

pub fn explanation(role: FieldRole) -> &'static Explanation {
    &EXPLANATIONS[role.index()]
}

/// A decoded field value as the annotator sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldValue<'a> {
    /// Printed in decimal.
    Quantity(U256),
    /// Printed as minimal big-endian hex, so zero prints as nothing.
    Scalar(U256),
    Bytes(&'a [u8]),
}

impl FieldValue<'_> {
    pub fn is_empty_bytes(&self) -> bool {
        matches!(self, Self::Bytes([]))
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Quantity(value) => write!(f, "{value}"),
            Self::Scalar(value) => {
                let bytes = value.to_be_bytes::<32>();
                let start = bytes.iter().position(|byte| *byte != 0).unwrap_or(bytes.len());
                f.write_str(&hex::encode(&bytes[start..]))
            }
            Self::Bytes(bytes) => f.write_str(&hex::encode(bytes)),
        }
    }
}

pub fn field_value<'a>(buffer: &'a [u8], walk: &Walk, role: FieldRole) -> FieldValue<'a> {
    match walk.fields.integer(role) {
        Some(value) if role.is_quantity() => FieldValue::Quantity(value),
        Some(value) => FieldValue::Scalar(value),
        None => FieldValue::Bytes(walk.item(role).payload.slice(buffer)),
    }
}

/// Returns the one-line description and the extended explanation of a field.
pub fn describe(
    role: FieldRole,
    value: FieldValue<'_>,
    verbose: bool,
) -> (String, &'static str) {
    let more = explanation(role).pick(verbose);
    match role {
        FieldRole::Nonce => (format!("Nonce: {value}"), more),
        FieldRole::GasPrice => (format!("Gas Price: {value}"), more),
        FieldRole::GasLimit => (format!("Gas Limit: {value}"), more),
        FieldRole::Recipient if value.is_empty_bytes() => {
            ("Recipient Address: 0x0".to_string(), CONTRACT_CREATION)
        }
        FieldRole::Recipient => (format!("Recipient Address: 0x{value}"), more),
        FieldRole::Value => (format!("Value: {value}"), more),
        FieldRole::Data => (format!("Data: {value}"), more),
        FieldRole::SigV => (format!("Signature Prefix Value (v): {value}"), more),
        FieldRole::SigR => (format!("Signature (r) value: {value}"), more),
        FieldRole::SigS => (format!("Signature (s) value: {value}"), more),
    }
}

pub fn annotate(buffer: &[u8], walk: &Walk, verbose: bool) -> Splain {
    let mut tokens = Vec::with_capacity(1 + 2 * FIELD_COUNT);
    tokens.push(outer_token(buffer, &walk.outer));

    for role in FieldRole::ALL {
        let item = walk.item(role);
        let covered = if verbose {
            if let Some(token) = prefix_token(buffer, item) {
                tokens.push(token);
            }
            item.payload
        } else {
            item.encoded_range()
        };

        let (text, more) = describe(role, field_value(buffer, walk, role), verbose);
        tokens.push(Token {
            hex: hex::encode(covered.slice(buffer)),
            text,
            more: more.to_string(),
        });
    }

    Splain { tokens }
}

fn first_byte(buffer: &[u8], item: &RlpItem) -> u8 {
    buffer.get(item.offset).copied().unwrap_or_default()
}

fn outer_token(buffer: &[u8], outer: &RlpItem) -> Token {
    let prefix = first_byte(buffer, outer);
    let declared = outer.payload.len;
    let (text, more) = match outer.kind {
        RlpKind::LongList => {
            let length_hex = hex::encode(outer.length_bytes().slice(buffer));
            (
                format!(
                    "RLP Prefix. Tells us that this transaction is a list of length 0x{length_hex} ({declared} bytes)"
                ),
                format!(
                    "The first byte (0x{prefix:02x}-0xf7) tells us the length of the length (0x{length_hex}) of transaction"
                ),
            )
        }
        _ => (
            format!(
                "RLP Prefix. Tells us that this transaction is a list of length 0x{declared:02x} ({declared} bytes)"
            ),
            format!("The first byte (0x{prefix:02x}-0xc0) is the length of the transaction"),
        ),
    };

    Token {
        hex: hex::encode(outer.prefix_range().slice(buffer)),
        text,
        more,
    }
}

/// Only string prefixes get a token; single bytes have none and the walker
/// never hands over a list.
fn prefix_token(buffer: &[u8], item: &RlpItem) -> Option<Token> {
    let prefix = first_byte(buffer, item);
    let (text, more) = match item.kind {
        RlpKind::SingleByte | RlpKind::ShortList | RlpKind::LongList => return None,
        RlpKind::ShortString => (
            format!(
                "RLP Length Prefix. The next field is an RLP 'string' of length 0x{prefix:02x} - 0x80"
            ),
            String::new(),
        ),
        RlpKind::LongString => {
            let length_hex = hex::encode(item.length_bytes().slice(buffer));
            (
                format!(
                    "RLP Length Prefix. The next field is an RLP 'string' of length 0x{length_hex}"
                ),
                format!(
                    "The first byte (0x{prefix:02x}-0xb7) tells us the length of the length (0x{length_hex}) of the next field"
                ),
            )
        }
    };

    Some(Token {
        hex: hex::encode(item.prefix_range().slice(buffer)),
        text,
        more,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::splain::fixtures::{
        CONTRACT_TX, SIMPLE_TX, encode_list, encode_string, minimal_fields,
    };
    use crate::splain::rlp::decode_item;
    use crate::splain::parse_hex;
    use crate::splain::walk::walk;

    fn splain(tx: &str, verbose: bool) -> (Vec<u8>, Splain) {
        let buffer = parse_hex(tx).unwrap();
        let walked = walk(&buffer).unwrap();
        let splain = annotate(&buffer, &walked, verbose);
        (buffer, splain)
    }

    fn is_prefix_token(token: &Token) -> bool {
        token.text.starts_with("RLP Length Prefix")
    }

    #[test]
    fn test_concise_simple_transfer() {
        let (_, splain) = splain(SIMPLE_TX, false);
        let rows: Vec<(&str, &str)> = splain
            .tokens
            .iter()
            .map(|token| (token.hex.as_str(), token.text.as_str()))
            .collect();

        assert_eq!(
            rows,
            vec![
                (
                    "f86b",
                    "RLP Prefix. Tells us that this transaction is a list of length 0x6b (107 bytes)"
                ),
                ("80", "Nonce: 0"),
                ("85012a05f200", "Gas Price: 5000000000"),
                ("825208", "Gas Limit: 21000"),
                (
                    "949b0a420cd00b9d75fce4226262789f734046e549",
                    "Recipient Address: 0x9b0a420cd00b9d75fce4226262789f734046e549"
                ),
                ("87026bf86755a05b", "Value: 681664583147611"),
                ("80", "Data: "),
                ("26", "Signature Prefix Value (v): 26"),
                (
                    "a06a49585b2e6720633828f7a55e5f98709d9f6f4bfe869c9f5616ce46eb26566a",
                    "Signature (r) value: 6a49585b2e6720633828f7a55e5f98709d9f6f4bfe869c9f5616ce46eb26566a"
                ),
                (
                    "a0751d23163c267e0f141481964100620f3f228da1636fe90129687425d8a8f836",
                    "Signature (s) value: 751d23163c267e0f141481964100620f3f228da1636fe90129687425d8a8f836"
                ),
            ]
        );
        assert_eq!(
            splain.tokens[0].more,
            "The first byte (0xf8-0xf7) tells us the length of the length (0x6b) of transaction"
        );
        assert_eq!(
            splain.tokens[1].more,
            "The nonce is an incrementing sequence number used to prevent message replay"
        );
    }

    #[test]
    fn test_verbose_simple_transfer() {
        let (buffer, splain) = splain(SIMPLE_TX, true);

        // v is a single byte and has no prefix token
        assert_eq!(splain.tokens.len(), 1 + 8 + 9);
        assert_eq!(splain.tokens.iter().filter(|t| is_prefix_token(t)).count(), 8);

        assert_eq!(splain.tokens[1].hex, "80");
        assert_eq!(
            splain.tokens[1].text,
            "RLP Length Prefix. The next field is an RLP 'string' of length 0x80 - 0x80"
        );
        assert_eq!(splain.tokens[1].more, "");
        assert_eq!(splain.tokens[2].hex, "");
        assert_eq!(splain.tokens[2].text, "Nonce: 0");
        assert!(splain.tokens[2].more.starts_with("The nonce is a sequence number"));

        assert_eq!(splain.tokens[3].hex, "85");
        assert_eq!(splain.tokens[4].hex, "012a05f200");

        let v_token = splain
            .tokens
            .iter()
            .find(|token| token.text.starts_with("Signature Prefix"))
            .unwrap();
        assert_eq!(v_token.hex, "26");

        assert_eq!(splain.covered_bytes().unwrap(), buffer);
    }

    #[test]
    fn test_contract_creation() {
        let (buffer, concise) = splain(CONTRACT_TX, false);
        assert_eq!(
            concise.tokens[0].text,
            "RLP Prefix. Tells us that this transaction is a list of length 0x03db (987 bytes)"
        );
        assert_eq!(concise.tokens[0].hex, "f903db");

        let recipient = &concise.tokens[4];
        assert_eq!(recipient.hex, "80");
        assert_eq!(recipient.text, "Recipient Address: 0x0");
        assert_eq!(recipient.more, CONTRACT_CREATION);

        let data = &concise.tokens[6];
        assert!(data.hex.starts_with("b90386608060405234801561001057600080fd5b50"));
        assert!(data.text.starts_with("Data: 608060405234801561001057600080fd5b50"));
        assert_eq!(data.text.len(), "Data: ".len() + 902 * 2);
        assert_eq!(concise.covered_bytes().unwrap(), buffer);

        let (_, verbose) = splain(CONTRACT_TX, true);
        let data_prefix = verbose
            .tokens
            .iter()
            .find(|token| token.hex == "b90386")
            .unwrap();
        assert_eq!(
            data_prefix.text,
            "RLP Length Prefix. The next field is an RLP 'string' of length 0x0386"
        );
        assert_eq!(
            data_prefix.more,
            "The first byte (0xb9-0xb7) tells us the length of the length (0x0386) of the next field"
        );
        let recipient = verbose
            .tokens
            .iter()
            .find(|token| token.text.starts_with("Recipient"))
            .unwrap();
        assert_eq!(recipient.more, CONTRACT_CREATION);
    }

    #[test]
    fn test_short_list_outer_token() {
        let buffer = encode_list(&minimal_fields());
        let walked = walk(&buffer).unwrap();
        let splain = annotate(&buffer, &walked, false);
        let declared = buffer.len() - 1;

        assert_eq!(splain.tokens[0].hex, format!("{:02x}", buffer[0]));
        assert_eq!(
            splain.tokens[0].text,
            format!(
                "RLP Prefix. Tells us that this transaction is a list of length 0x{declared:02x} ({declared} bytes)"
            )
        );
        assert_eq!(splain.covered_bytes().unwrap(), buffer);
    }

    #[test]
    fn test_verbosity_only_adds_prefix_tokens() {
        for tx in [SIMPLE_TX, CONTRACT_TX] {
            let (_, concise) = splain(tx, false);
            let (_, verbose) = splain(tx, true);

            let concise_texts: Vec<&str> =
                concise.tokens.iter().map(|t| t.text.as_str()).collect();
            let verbose_texts: Vec<&str> = verbose
                .tokens
                .iter()
                .filter(|t| !is_prefix_token(t))
                .map(|t| t.text.as_str())
                .collect();
            assert_eq!(concise_texts, verbose_texts);
        }
    }

    #[test]
    fn test_annotation_is_deterministic() {
        for verbose in [false, true] {
            assert_eq!(splain(CONTRACT_TX, verbose).1, splain(CONTRACT_TX, verbose).1);
        }
    }

    #[test]
    fn test_explanation_table() {
        let with_long: Vec<FieldRole> = FieldRole::ALL
            .into_iter()
            .filter(|role| explanation(*role).long.is_some())
            .collect();
        assert_eq!(
            with_long,
            vec![
                FieldRole::Nonce,
                FieldRole::GasPrice,
                FieldRole::GasLimit,
                FieldRole::Recipient,
                FieldRole::Data
            ]
        );
        let value = explanation(FieldRole::Value);
        assert_eq!(value.pick(true), value.pick(false));
    }

    #[test]
    fn test_field_value_display() {
        assert_eq!(FieldValue::Quantity(U256::ZERO).to_string(), "0");
        assert_eq!(
            FieldValue::Quantity(U256::from(5_000_000_000u64)).to_string(),
            "5000000000"
        );
        assert_eq!(FieldValue::Scalar(U256::ZERO).to_string(), "");
        assert_eq!(FieldValue::Scalar(U256::from(0x26u64)).to_string(), "26");
        assert_eq!(FieldValue::Scalar(U256::from(0x0105u64)).to_string(), "0105");
        assert_eq!(FieldValue::Bytes(&[]).to_string(), "");
        assert_eq!(FieldValue::Bytes(&[0x0a, 0xff]).to_string(), "0aff");
    }

    #[test]
    fn test_describe_zero_and_empty() {
        let (text, _) = describe(FieldRole::Value, FieldValue::Quantity(U256::ZERO), false);
        assert_eq!(text, "Value: 0");
        let (text, more) = describe(FieldRole::Data, FieldValue::Bytes(&[]), true);
        assert_eq!(text, "Data: ");
        assert_eq!(more, explanation(FieldRole::Data).long.unwrap());
    }

    #[test]
    fn test_padded_signature_values_print_trimmed() {
        let mut fields = minimal_fields();
        fields[FieldRole::SigV.index()] = encode_string(&[0x00, 0x26]);
        fields[FieldRole::SigR.index()] = encode_string(&[0x00, 0x00]);
        let buffer = encode_list(&fields);
        let walked = walk(&buffer).unwrap();

        let concise = annotate(&buffer, &walked, false);
        let v = &concise.tokens[1 + FieldRole::SigV.index()];
        assert_eq!(v.hex, "820026");
        assert_eq!(v.text, "Signature Prefix Value (v): 26");
        let r = &concise.tokens[1 + FieldRole::SigR.index()];
        assert_eq!(r.text, "Signature (r) value: ");

        let verbose = annotate(&buffer, &walked, true);
        let v = verbose
            .tokens
            .iter()
            .find(|token| token.text.starts_with("Signature Prefix"))
            .unwrap();
        assert_eq!(v.hex, "0026");
        assert_eq!(v.text, "Signature Prefix Value (v): 26");
        assert_eq!(verbose.covered_bytes().unwrap(), buffer);
    }

    #[test]
    fn test_prefix_token_only_for_strings() {
        let single = decode_item(&[0x26], 0).unwrap();
        assert_eq!(prefix_token(&[0x26], &single), None);

        let list = [0xc2, 0x01, 0x02];
        let item = decode_item(&list, 0).unwrap();
        assert_eq!(prefix_token(&list, &item), None);

        let short = [0x82, 0x52, 0x08];
        let item = decode_item(&short, 0).unwrap();
        let token = prefix_token(&short, &item).unwrap();
        assert_eq!(token.hex, "82");
        assert_eq!(
            token.text,
            "RLP Length Prefix. The next field is an RLP 'string' of length 0x82 - 0x80"
        );
    }
}
