//! Schema-first encode/decode at the store boundary.
//!
//! Values are decoded straight into typed records with serde; a shape
//! mismatch fails fast with `StoreError::Decode` instead of being patched up
//! field by field.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

use super::{StoreError, StorePath, TreeStore};

pub fn decode<T: DeserializeOwned>(path: &StorePath, value: Value) -> Result<T, StoreError> {
    serde_json::from_value(value).map_err(|source| StoreError::Decode {
        path: path.to_string(),
        source,
    })
}

pub fn encode<T: Serialize + ?Sized>(path: &StorePath, value: &T) -> Result<Value, StoreError> {
    serde_json::to_value(value).map_err(|source| StoreError::Encode {
        path: path.to_string(),
        source,
    })
}

pub async fn get_typed<T: DeserializeOwned>(
    store: &dyn TreeStore,
    path: &StorePath,
) -> Result<Option<T>, StoreError> {
    match store.get(path).await? {
        Some(value) => decode(path, value).map(Some),
        None => Ok(None),
    }
}

/// Decode every child of a keyed collection, ordered by key.
pub async fn get_children<T: DeserializeOwned>(
    store: &dyn TreeStore,
    path: &StorePath,
) -> Result<Vec<T>, StoreError> {
    let Some(value) = store.get(path).await? else {
        return Ok(Vec::new());
    };
    match value {
        Value::Object(children) => children
            .into_iter()
            .map(|(key, child)| decode(&path.child(&key), child))
            .collect(),
        // Collections written as JSON arrays come back positionally.
        Value::Array(children) => children
            .into_iter()
            .enumerate()
            .filter(|(_, child)| !child.is_null())
            .map(|(i, child)| decode(&path.child(i.to_string()), child))
            .collect(),
        other => Err(StoreError::Decode {
            path: path.to_string(),
            source: serde::de::Error::custom(format!("expected a collection, got {other}")),
        }),
    }
}

pub async fn set_typed<T: Serialize + ?Sized>(
    store: &dyn TreeStore,
    path: &StorePath,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = encode(path, value)?;
    store.set(path, encoded).await
}

pub async fn push_typed<T: Serialize + ?Sized>(
    store: &dyn TreeStore,
    path: &StorePath,
    value: &T,
) -> Result<String, StoreError> {
    let encoded = encode(path, value)?;
    store.push(path, encoded).await
}

/// Builder for a partial update field map.
#[derive(Debug, Default)]
pub struct FieldMap {
    fields: Map<String, Value>,
}

impl FieldMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<T: Serialize + ?Sized>(
        mut self,
        base: &StorePath,
        field: impl Into<String>,
        value: &T,
    ) -> Result<Self, StoreError> {
        let field = field.into();
        let encoded = encode(&base.child(&field), value)?;
        self.fields.insert(field, encoded);
        Ok(self)
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.fields
    }
}
