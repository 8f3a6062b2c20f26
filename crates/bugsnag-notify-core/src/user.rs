// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! End-user identity attached to events.

use serde::{Deserialize, Serialize};

/// Identity of the current end user.
///
/// Fields are opaque and passed through to the payload verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
	pub id: String,
	pub username: String,
	pub email: String,
}

impl User {
	pub fn new(id: impl Into<String>, username: impl Into<String>, email: impl Into<String>) -> Self {
		Self {
			id: id.into(),
			username: username.into(),
			email: email.into(),
		}
	}
}
