//! Storage projection: field kind to semantic column type.
//!
//! The persistence layer maps these tokens onto its own column definition
//! language. Nothing here is a dialect literal.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::types::{EntityDef, FieldType};

/// Fraction digits stored for currency amounts.
pub const CURRENCY_SCALE: u8 = 2;

/// The semantic storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum StorageType {
    /// Unbounded text.
    Text,
    /// Exact integer.
    Integer,
    /// Fixed-point decimal with `scale` fraction digits.
    Decimal { scale: u8 },
    /// Calendar date without time.
    Date,
    /// Timestamp with timezone.
    TimestampTz,
    /// Boolean, `false` when unset.
    Boolean,
    /// Ordered sequence of text.
    TextArray,
}

impl StorageType {
    /// Stable token for the type, independent of any storage dialect.
    pub fn token(&self) -> &'static str {
        match self {
            StorageType::Text => "text",
            StorageType::Integer => "integer",
            StorageType::Decimal { .. } => "decimal",
            StorageType::Date => "date",
            StorageType::TimestampTz => "timestamptz",
            StorageType::Boolean => "boolean",
            StorageType::TextArray => "text[]",
        }
    }

    pub fn fraction_digits(&self) -> Option<u8> {
        match self {
            StorageType::Decimal { scale } => Some(*scale),
            _ => None,
        }
    }

    /// The value a column holds when a row leaves it unset, if any.
    pub fn column_default(&self) -> Option<serde_json::Value> {
        match self {
            StorageType::Boolean => Some(serde_json::Value::Bool(false)),
            _ => None,
        }
    }

    pub fn is_sequence(&self) -> bool {
        matches!(self, StorageType::TextArray)
    }
}

impl fmt::Display for StorageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageType::Decimal { scale } => write!(f, "decimal({scale})"),
            other => f.write_str(other.token()),
        }
    }
}

/// Map a field kind to its storage type. Unknown kinds store as text.
pub fn storage_type(field_type: &FieldType) -> StorageType {
    match field_type {
        FieldType::Text
        | FieldType::RichText
        | FieldType::Select
        | FieldType::Url
        | FieldType::Email => StorageType::Text,
        FieldType::Number => StorageType::Integer,
        FieldType::Currency => StorageType::Decimal {
            scale: CURRENCY_SCALE,
        },
        FieldType::Date => StorageType::Date,
        FieldType::Datetime => StorageType::TimestampTz,
        FieldType::Boolean => StorageType::Boolean,
        FieldType::MultiSelect | FieldType::Tags => StorageType::TextArray,
        FieldType::Unknown(_) => StorageType::Text,
    }
}

/// Column layout of an entity in declaration order.
pub fn storage_columns(entity: &EntityDef) -> Vec<(&str, StorageType)> {
    entity
        .fields
        .iter()
        .map(|f| (f.name.as_str(), storage_type(&f.type_)))
        .collect()
}
