//! Walks the nine fields of a legacy transaction.
//!
//! The walker is a single forward cursor: decode the outer list, then peel one
//! item per field in wire order. It never backtracks.

use super::error::SplainError;
use super::rlp::{ByteRange, Mode, RlpItem, decode_item_with};
use alloy_primitives::{Address, U256};
use tracing::debug;

pub const FIELD_COUNT: usize = 9;

const ADDRESS_LEN: usize = 20;

/// Semantic role of a transaction field, in wire order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldRole {
    Nonce,
    GasPrice,
    GasLimit,
    Recipient,
    Value,
    Data,
    SigV,
    SigR,
    SigS,
}

impl FieldRole {
    pub const ALL: [FieldRole; FIELD_COUNT] = [
        Self::Nonce,
        Self::GasPrice,
        Self::GasLimit,
        Self::Recipient,
        Self::Value,
        Self::Data,
        Self::SigV,
        Self::SigR,
        Self::SigS,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Nonce => "nonce",
            Self::GasPrice => "gasPrice",
            Self::GasLimit => "gasLimit",
            Self::Recipient => "recipient",
            Self::Value => "value",
            Self::Data => "data",
            Self::SigV => "sigV",
            Self::SigR => "sigR",
            Self::SigS => "sigS",
        }
    }

    /// Roles rendered as decimal numbers rather than hex.
    pub fn is_quantity(self) -> bool {
        matches!(
            self,
            Self::Nonce | Self::GasPrice | Self::GasLimit | Self::Value
        )
    }
}

/// Typed view of a decoded legacy transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionFields {
    pub nonce: U256,
    pub gas_price: U256,
    pub gas_limit: U256,
    /// `None` for contract creation.
    pub recipient: Option<Address>,
    pub value: U256,
    pub data: Vec<u8>,
    pub v: U256,
    pub r: U256,
    pub s: U256,
}

impl TransactionFields {
    pub fn is_contract_creation(&self) -> bool {
        self.recipient.is_none()
    }

    /// The decoded value of an integer field; `None` for recipient and data.
    pub fn integer(&self, role: FieldRole) -> Option<U256> {
        match role {
            FieldRole::Nonce => Some(self.nonce),
            FieldRole::GasPrice => Some(self.gas_price),
            FieldRole::GasLimit => Some(self.gas_limit),
            FieldRole::Value => Some(self.value),
            FieldRole::SigV => Some(self.v),
            FieldRole::SigR => Some(self.r),
            FieldRole::SigS => Some(self.s),
            FieldRole::Recipient | FieldRole::Data => None,
        }
    }

    fn from_items(
        buffer: &[u8],
        items: &[RlpItem; FIELD_COUNT],
        mode: Mode,
    ) -> Result<Self, SplainError> {
        let integer = |role: FieldRole| decode_integer(buffer, &items[role.index()], role, mode);
        let recipient_item = &items[FieldRole::Recipient.index()];
        let recipient = match recipient_item.payload.slice(buffer) {
            [] => None,
            bytes if bytes.len() == ADDRESS_LEN => Some(Address::from_slice(bytes)),
            bytes => {
                return Err(SplainError::malformed(format!(
                    "recipient at offset {} is {} bytes, expected 0 or 20",
                    recipient_item.offset,
                    bytes.len()
                )));
            }
        };

        Ok(Self {
            nonce: integer(FieldRole::Nonce)?,
            gas_price: integer(FieldRole::GasPrice)?,
            gas_limit: integer(FieldRole::GasLimit)?,
            recipient,
            value: integer(FieldRole::Value)?,
            data: items[FieldRole::Data.index()].payload.slice(buffer).to_vec(),
            v: integer(FieldRole::SigV)?,
            r: integer(FieldRole::SigR)?,
            s: integer(FieldRole::SigS)?,
        })
    }
}

fn decode_integer(
    buffer: &[u8],
    item: &RlpItem,
    role: FieldRole,
    mode: Mode,
) -> Result<U256, SplainError> {
    let bytes = item.payload.slice(buffer);
    if mode.is_strict() && bytes.first() == Some(&0) {
        return Err(SplainError::non_canonical(
            item.offset,
            format!("{} has a leading zero byte", role.name()),
        ));
    }
    U256::try_from_be_slice(bytes).ok_or_else(|| {
        SplainError::malformed(format!(
            "{} at offset {} is {} bytes, wider than 256 bits",
            role.name(),
            item.offset,
            bytes.len()
        ))
    })
}

/// Result of walking a transaction: where everything is, and what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Walk {
    pub outer: RlpItem,
    pub items: [RlpItem; FIELD_COUNT],
    pub fields: TransactionFields,
}

impl Walk {
    pub fn item(&self, role: FieldRole) -> &RlpItem {
        &self.items[role.index()]
    }

    /// Payload ranges of the nine fields, in wire order.
    pub fn field_ranges(&self) -> [ByteRange; FIELD_COUNT] {
        self.items.map(|item| item.payload)
    }

    /// Bytes covered from the start of the buffer through the last field.
    pub fn consumed(&self) -> usize {
        self.items[FIELD_COUNT - 1].end()
    }
}

pub fn walk(buffer: &[u8]) -> Result<Walk, SplainError> {
    walk_with(buffer, Mode::Lenient)
}

pub fn walk_with(buffer: &[u8], mode: Mode) -> Result<Walk, SplainError> {
    let outer = decode_item_with(buffer, 0, mode)?;
    if !outer.kind.is_list() {
        return Err(SplainError::NotATransaction {
            context: format!("outer item is a {}, expected a list", outer.kind),
        });
    }

    // Fields may not run past the end of the outer list.
    let body = &buffer[..outer.end()];
    let mut cursor = outer.payload.offset;
    let mut items = Vec::with_capacity(FIELD_COUNT);

    for role in FieldRole::ALL {
        if cursor >= body.len() {
            return Err(SplainError::TruncatedTransaction {
                decoded: items.len(),
            });
        }
        let item = decode_item_with(body, cursor, mode)?;
        if item.kind.is_list() {
            return Err(SplainError::malformed(format!(
                "{} at offset {} is a {}, expected a string",
                role.name(),
                cursor,
                item.kind
            )));
        }
        cursor = item.end();
        items.push(item);
    }

    let items: [RlpItem; FIELD_COUNT] = items
        .try_into()
        .map_err(|items: Vec<RlpItem>| SplainError::TruncatedTransaction {
            decoded: items.len(),
        })?;

    let trailing = buffer.len() - cursor;
    if trailing > 0 {
        if mode.is_strict() {
            return Err(SplainError::TrailingData { count: trailing });
        }
        debug!(trailing, "ignoring bytes after the last field");
    }

    let fields = TransactionFields::from_items(buffer, &items, mode)?;
    Ok(Walk {
        outer,
        items,
        fields,
    })
}
