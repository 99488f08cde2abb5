//! Reference transactions and RLP builders shared by the unit tests.

use alloy_rlp::Header;

/// Plain ether transfer with an EIP-155 signature for chain id 1 (`v = 0x26`).
pub const SIMPLE_TX: &str = include_str!("../../tests/fixtures/simple_tx.hex");

/// Contract deployment: empty recipient, 902 bytes of init code.
pub const CONTRACT_TX: &str = include_str!("../../tests/fixtures/contract_tx.hex");

pub fn encode_string(payload: &[u8]) -> Vec<u8> {
    alloy_rlp::encode(payload)
}

/// Wraps already-encoded children in a list header.
pub fn encode_list(children: &[Vec<u8>]) -> Vec<u8> {
    let payload_length = children.iter().map(Vec::len).sum();
    let mut out = Vec::new();
    Header {
        list: true,
        payload_length,
    }
    .encode(&mut out);
    for child in children {
        out.extend_from_slice(child);
    }
    out
}

/// The nine fields of a transfer with every field as short as possible.
pub fn minimal_fields() -> Vec<Vec<u8>> {
    vec![
        alloy_rlp::encode(0u64),
        alloy_rlp::encode(1u64),
        alloy_rlp::encode(21_000u64),
        encode_string(&[0x11; 20]),
        alloy_rlp::encode(0u64),
        encode_string(&[]),
        alloy_rlp::encode(0x1bu64),
        alloy_rlp::encode(1u64),
        alloy_rlp::encode(2u64),
    ]
}
