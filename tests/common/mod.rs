//! Shared transactions and expected output for integration tests.

#![allow(dead_code)]

pub const SIMPLE_TX: &str = include_str!("../fixtures/simple_tx.hex");

pub const CONTRACT_TX: &str = include_str!("../fixtures/contract_tx.hex");

/// Concise rendering of [`SIMPLE_TX`], tab indented.
pub const SIMPLE_JSON: &str = r#"{
	"Tokens": [
		{
			"Hex": "f86b",
			"Text": "RLP Prefix. Tells us that this transaction is a list of length 0x6b (107 bytes)",
			"More": "The first byte (0xf8-0xf7) tells us the length of the length (0x6b) of transaction"
		},
		{
			"Hex": "80",
			"Text": "Nonce: 0",
			"More": "The nonce is an incrementing sequence number used to prevent message replay"
		},
		{
			"Hex": "85012a05f200",
			"Text": "Gas Price: 5000000000",
			"More": "The price of gas (in wei) that the sender is willing to pay."
		},
		{
			"Hex": "825208",
			"Text": "Gas Limit: 21000",
			"More": "The maximum amount of gas the originator is willing to pay for this transaction."
		},
		{
			"Hex": "949b0a420cd00b9d75fce4226262789f734046e549",
			"Text": "Recipient Address: 0x9b0a420cd00b9d75fce4226262789f734046e549",
			"More": "The address of the user account or contract to interact with"
		},
		{
			"Hex": "87026bf86755a05b",
			"Text": "Value: 681664583147611",
			"More": "The amount of ether (in wei) to send to the recipient address."
		},
		{
			"Hex": "80",
			"Text": "Data: ",
			"More": "Data being sent to a contract function. The first 4 bytes are known as the 'function selector'"
		},
		{
			"Hex": "26",
			"Text": "Signature Prefix Value (v): 26",
			"More": "Indicates both the chainID of the transaction and the parity (odd or even) of the y component of the public key"
		},
		{
			"Hex": "a06a49585b2e6720633828f7a55e5f98709d9f6f4bfe869c9f5616ce46eb26566a",
			"Text": "Signature (r) value: 6a49585b2e6720633828f7a55e5f98709d9f6f4bfe869c9f5616ce46eb26566a",
			"More": "Part of the signature pair (r,s). Represents the X-coordinate of an ephemeral public key created during the ECDSA signing process"
		},
		{
			"Hex": "a0751d23163c267e0f141481964100620f3f228da1636fe90129687425d8a8f836",
			"Text": "Signature (s) value: 751d23163c267e0f141481964100620f3f228da1636fe90129687425d8a8f836",
			"More": "Part of the signature pair (r,s). Generated using the ECDSA signing algorithm"
		}
	]
}"#;

pub fn tx_bytes(tx: &str) -> Vec<u8> {
    hex::decode(tx.trim_start_matches("0x")).expect("fixture is valid hex")
}
