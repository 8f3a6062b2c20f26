// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Helper for building event metadata.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{CoreError, Result};

/// Arbitrary structured data attached to an event under `metaData`.
///
/// # Example
///
/// ```
/// use bugsnag_notify_core::Metadata;
///
/// let metadata = Metadata::new()
///     .insert("accountType", "premium")
///     .insert("retries", 3)
///     .insert("flags", serde_json::json!({ "beta": true }));
/// assert_eq!(metadata.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata {
	inner: Map<String, Value>,
}

impl Metadata {
	pub fn new() -> Self {
		Self { inner: Map::new() }
	}

	/// Inserts a key-value pair, replacing any previous value for the key.
	pub fn insert<K, V>(mut self, key: K, value: V) -> Self
	where
		K: Into<String>,
		V: Into<Value>,
	{
		self.inner.insert(key.into(), value.into());
		self
	}

	/// Serializes `value` and inserts it under `key`.
	///
	/// Fails if the value cannot be represented as JSON, e.g. a map with
	/// non-string keys.
	pub fn try_insert<K, V>(mut self, key: K, value: &V) -> Result<Self>
	where
		K: Into<String>,
		V: Serialize + ?Sized,
	{
		let value = serde_json::to_value(value)?;
		self.inner.insert(key.into(), value);
		Ok(self)
	}

	/// Merges another Metadata into this one.
	///
	/// If both contain the same key, the value from `other` takes precedence.
	pub fn merge(mut self, other: Metadata) -> Self {
		self.inner.extend(other.inner);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.inner.is_empty()
	}

	pub fn len(&self) -> usize {
		self.inner.len()
	}

	pub fn get(&self, key: &str) -> Option<&Value> {
		self.inner.get(key)
	}

	pub fn into_map(self) -> Map<String, Value> {
		self.inner
	}

	pub fn into_value(self) -> Value {
		Value::Object(self.inner)
	}
}

impl From<Metadata> for Value {
	fn from(metadata: Metadata) -> Self {
		metadata.into_value()
	}
}

impl From<Map<String, Value>> for Metadata {
	fn from(map: Map<String, Value>) -> Self {
		Self { inner: map }
	}
}

impl TryFrom<Value> for Metadata {
	type Error = CoreError;

	/// Only a JSON object converts; anything else is rejected.
	fn try_from(value: Value) -> Result<Self> {
		match value {
			Value::Object(map) => Ok(Self { inner: map }),
			Value::Null => Err(CoreError::InvalidMetadata("null")),
			Value::Bool(_) => Err(CoreError::InvalidMetadata("boolean")),
			Value::Number(_) => Err(CoreError::InvalidMetadata("number")),
			Value::String(_) => Err(CoreError::InvalidMetadata("string")),
			Value::Array(_) => Err(CoreError::InvalidMetadata("array")),
		}
	}
}

impl<K, V> FromIterator<(K, V)> for Metadata
where
	K: Into<String>,
	V: Into<Value>,
{
	fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
		Self {
			inner: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
		}
	}
}
