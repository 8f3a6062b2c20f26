// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifier configuration.

use std::collections::BTreeSet;

use serde::Deserialize;

use crate::api_key::ApiKey;
use crate::error::{CoreError, Result};
use crate::user::User;

/// Default ingestion endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://notify.bugsnag.com";

/// Static notifier configuration, supplied once at startup.
///
/// A `Configuration` cannot be changed after it is built; share it behind an
/// `Arc` when several notifiers or tasks need it. It can be loaded from a
/// config file but is never serialized, so the token cannot be written out.
///
/// # Example
///
/// ```
/// use bugsnag_notify_core::{Configuration, User};
///
/// let config = Configuration::builder()
///     .token("0123456789abcdef")
///     .code_version("1.4.2")
///     .context("checkout")
///     .release_stage("production")
///     .notify_release_stages(["production", "staging"])
///     .user(User::new("42", "Leeroy Jenkins", "support@bugsnag.com"))
///     .build()?;
///
/// assert!(config.should_notify());
/// # Ok::<(), bugsnag_notify_core::CoreError>(())
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "RawConfiguration")]
pub struct Configuration {
	token: ApiKey,
	code_version: String,
	context: String,
	release_stage: String,
	notify_release_stages: BTreeSet<String>,
	user: Option<User>,
	endpoint: String,
}

impl Configuration {
	/// Creates a new builder for constructing a Configuration.
	pub fn builder() -> ConfigurationBuilder {
		ConfigurationBuilder::new()
	}

	pub fn token(&self) -> &ApiKey {
		&self.token
	}

	pub fn code_version(&self) -> &str {
		&self.code_version
	}

	pub fn context(&self) -> &str {
		&self.context
	}

	pub fn release_stage(&self) -> &str {
		&self.release_stage
	}

	pub fn notify_release_stages(&self) -> &BTreeSet<String> {
		&self.notify_release_stages
	}

	pub fn user(&self) -> Option<&User> {
		self.user.as_ref()
	}

	/// Ingestion URL, without a trailing slash.
	pub fn endpoint(&self) -> &str {
		&self.endpoint
	}

	/// Whether events for the configured release stage should be transmitted.
	///
	/// An empty allow-list transmits unconditionally.
	pub fn should_notify(&self) -> bool {
		self.notify_release_stages.is_empty()
			|| self.notify_release_stages.contains(&self.release_stage)
	}
}

/// Builder for constructing a [`Configuration`].
#[derive(Debug, Default)]
pub struct ConfigurationBuilder {
	token: Option<ApiKey>,
	code_version: Option<String>,
	context: Option<String>,
	release_stage: Option<String>,
	notify_release_stages: BTreeSet<String>,
	user: Option<User>,
	endpoint: Option<String>,
}

impl ConfigurationBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	/// Sets the project API key.
	pub fn token(mut self, token: impl Into<String>) -> Self {
		self.token = Some(ApiKey::new(token));
		self
	}

	/// Sets the version of the reporting application.
	///
	/// Example: `1.2.3` or a git commit SHA
	pub fn code_version(mut self, version: impl Into<String>) -> Self {
		self.code_version = Some(version.into());
		self
	}

	/// Sets the context label attached to every event.
	pub fn context(mut self, context: impl Into<String>) -> Self {
		self.context = Some(context.into());
		self
	}

	/// Sets the release stage.
	///
	/// Example: `production`, `staging`, `development`
	pub fn release_stage(mut self, stage: impl Into<String>) -> Self {
		self.release_stage = Some(stage.into());
		self
	}

	/// Replaces the release-stage allow-list.
	pub fn notify_release_stages<I, S>(mut self, stages: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.notify_release_stages = stages.into_iter().map(Into::into).collect();
		self
	}

	/// Adds one stage to the release-stage allow-list.
	pub fn notify_release_stage(mut self, stage: impl Into<String>) -> Self {
		self.notify_release_stages.insert(stage.into());
		self
	}

	pub fn user(mut self, user: User) -> Self {
		self.user = Some(user);
		self
	}

	/// Overrides the ingestion endpoint (on-premise installs).
	pub fn endpoint(mut self, url: impl Into<String>) -> Self {
		self.endpoint = Some(url.into());
		self
	}

	/// Builds the Configuration.
	///
	/// Fails with [`CoreError::MissingField`] when a required field is unset.
	/// Empty strings are accepted and passed through as given.
	pub fn build(self) -> Result<Configuration> {
		let token = self.token.ok_or(CoreError::MissingField("token"))?;
		let code_version = required(self.code_version, "code_version")?;
		let context = required(self.context, "context")?;
		let release_stage = required(self.release_stage, "release_stage")?;

		let endpoint = self
			.endpoint
			.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string())
			.trim_end_matches('/')
			.to_string();
		if endpoint.is_empty() {
			return Err(CoreError::MissingField("endpoint"));
		}

		Ok(Configuration {
			token,
			code_version,
			context,
			release_stage,
			notify_release_stages: self.notify_release_stages,
			user: self.user,
			endpoint,
		})
	}
}

fn required(value: Option<String>, field: &'static str) -> Result<String> {
	value.ok_or(CoreError::MissingField(field))
}

/// On-disk shape of a configuration; validated through the builder.
#[derive(Deserialize)]
struct RawConfiguration {
	token: Option<ApiKey>,
	code_version: Option<String>,
	context: Option<String>,
	release_stage: Option<String>,
	#[serde(default)]
	notify_release_stages: BTreeSet<String>,
	user: Option<User>,
	endpoint: Option<String>,
}

impl TryFrom<RawConfiguration> for Configuration {
	type Error = CoreError;

	fn try_from(raw: RawConfiguration) -> Result<Self> {
		ConfigurationBuilder {
			token: raw.token,
			code_version: raw.code_version,
			context: raw.context,
			release_stage: raw.release_stage,
			notify_release_stages: raw.notify_release_stages,
			user: raw.user,
			endpoint: raw.endpoint,
		}
		.build()
	}
}
