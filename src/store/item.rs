//! Persisted item layout.
//!
//! One item per visit: `id` (string, partition key) and `ts` (number,
//! milliseconds since epoch). Values use the typed attribute encoding of the
//! managed table, e.g. `{"id": {"S": "abc"}, "ts": {"N": "1700000000000"}}`.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// A single typed attribute value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttributeValue {
    S(String),
    /// Numbers travel as decimal strings.
    N(String),
}

impl AttributeValue {
    pub fn as_s(&self) -> Option<&str> {
        match self {
            AttributeValue::S(s) => Some(s),
            AttributeValue::N(_) => None,
        }
    }

    pub fn as_n(&self) -> Option<&str> {
        match self {
            AttributeValue::N(n) => Some(n),
            AttributeValue::S(_) => None,
        }
    }
}

pub type Item = HashMap<String, AttributeValue>;

/// A visit as returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub id: String,
    /// Absent when the stored item carries no numeric `ts`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ts: Option<i64>,
}

impl VisitRecord {
    pub fn new(id: impl Into<String>, ts: i64) -> Self {
        Self { id: id.into(), ts: Some(ts) }
    }

    /// Encode into the persisted layout.
    pub fn to_item(&self) -> Item {
        let mut item = Item::new();
        item.insert("id".to_string(), AttributeValue::S(self.id.clone()));
        if let Some(ts) = self.ts {
            item.insert("ts".to_string(), AttributeValue::N(ts.to_string()));
        }
        item
    }

    /// Decode from the persisted layout.
    ///
    /// A missing or non-string `id` is a decode error. A missing `ts` decodes
    /// to `None`; a present but non-numeric `ts` is a decode error.
    pub fn from_item(item: &Item) -> Result<Self, StoreError> {
        let id = item
            .get("id")
            .and_then(AttributeValue::as_s)
            .ok_or_else(|| StoreError::Decode("item has no string attribute `id`".into()))?
            .to_string();

        let ts = match item.get("ts").and_then(AttributeValue::as_n) {
            Some(n) => Some(n.parse::<i64>().map_err(|e| {
                StoreError::Decode(format!("attribute `ts` is not an integer ({}): {}", n, e))
            })?),
            None => None,
        };

        Ok(Self { id, ts })
    }
}
