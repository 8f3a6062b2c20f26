// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! A single event to report.

use crate::metadata::Metadata;
use crate::severity::Severity;

/// Metadata key reserved for the rendered application model.
pub const MODEL_KEY: &str = "model";

/// One notification, built per call and discarded once serialized.
#[derive(Debug, Clone, PartialEq)]
pub struct Event {
	pub severity: Severity,
	/// Free-form message, reported as the exception's error class.
	pub message: String,
	pub metadata: Metadata,
	/// Rendered application state, merged into metadata under [`MODEL_KEY`].
	pub model: Option<String>,
}

impl Event {
	pub fn new(severity: Severity, message: impl Into<String>) -> Self {
		Self {
			severity,
			message: message.into(),
			metadata: Metadata::new(),
			model: None,
		}
	}

	pub fn metadata(mut self, metadata: Metadata) -> Self {
		self.metadata = metadata;
		self
	}

	/// Attaches application state rendered by `render`.
	///
	/// The closure runs once, immediately.
	pub fn model<F>(mut self, render: F) -> Self
	where
		F: FnOnce() -> String,
	{
		self.model = Some(render());
		self
	}

	/// Metadata as it appears on the wire, with the model merged in.
	pub fn wire_metadata(&self) -> Metadata {
		match &self.model {
			Some(model) => self.metadata.clone().insert(MODEL_KEY, model.as_str()),
			None => self.metadata.clone(),
		}
	}
}
