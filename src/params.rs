//! Coercion of loosely-typed request parameters into typed values.

use axum::extract::{rejection::PathRejection, Path};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use uuid::Uuid;

use crate::error::AppError;

/// A foreign identifier as submitted by a client, before it is resolved
/// against the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum RawRef {
    #[default]
    Missing,
    /// Present but not a UUID, so it can never resolve.
    Malformed(String),
    Id(Uuid),
}

impl RawRef {
    pub fn id(&self) -> Option<Uuid> {
        match self {
            RawRef::Id(id) => Some(*id),
            _ => None,
        }
    }
}

impl From<Uuid> for RawRef {
    fn from(id: Uuid) -> Self {
        RawRef::Id(id)
    }
}

impl From<Value> for RawRef {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => RawRef::Missing,
            Value::String(s) if s.trim().is_empty() => RawRef::Missing,
            Value::String(s) => match Uuid::parse_str(s.trim()) {
                Ok(id) => RawRef::Id(id),
                Err(_) => RawRef::Malformed(s),
            },
            other => RawRef::Malformed(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RawRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(RawRef::from)
    }
}

/// Keeps an explicit `null` distinct from an absent field: use with
/// `#[serde(default, deserialize_with = "present")]` on an `Option<Option<T>>`.
pub fn present<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// A path id that is not a UUID cannot name a row.
pub fn path_id(
    path: Result<Path<Uuid>, PathRejection>,
    entity: &'static str,
) -> Result<Uuid, AppError> {
    path.map(|Path(id)| id)
        .map_err(|_| AppError::NotFound(entity))
}
