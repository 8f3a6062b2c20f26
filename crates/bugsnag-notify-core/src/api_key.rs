// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Redacted wrapper for the notifier API key.
//!
//! The key is the only credential this library handles. It never appears in
//! `Debug`, `Display` or serialized output, and is zeroized on drop.
//!
//! ```
//! use bugsnag_notify_core::ApiKey;
//!
//! let key = ApiKey::new("0123456789abcdef");
//! assert_eq!(format!("{key}"), "[REDACTED]");
//! assert_eq!(key.expose(), "0123456789abcdef");
//! ```

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use zeroize::Zeroize;

/// The redaction placeholder used in all output.
pub const REDACTED: &str = "[REDACTED]";

/// A Bugsnag project API key.
#[derive(Clone, PartialEq, Eq, Zeroize)]
#[zeroize(drop)]
pub struct ApiKey {
	inner: String,
}

impl ApiKey {
	pub fn new(key: impl Into<String>) -> Self {
		Self { inner: key.into() }
	}

	/// Explicitly access the raw key.
	///
	/// Only the request builder should need this.
	pub fn expose(&self) -> &str {
		&self.inner
	}
}

impl fmt::Debug for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_tuple("ApiKey").field(&REDACTED).finish()
	}
}

impl fmt::Display for ApiKey {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(REDACTED)
	}
}

impl Serialize for ApiKey {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_str(REDACTED)
	}
}

impl<'de> Deserialize<'de> for ApiKey {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let key = String::deserialize(deserializer)?;
		if key == REDACTED {
			return Err(serde::de::Error::custom(
				"api key is the redaction placeholder, not a real key",
			));
		}
		Ok(ApiKey::new(key))
	}
}
