// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Event payload in the Bugsnag ingestion schema (payload version 5).
//!
//! Building a payload is pure: no I/O, no clock, no randomness. The same
//! configuration and event always produce the same bytes.

use serde::ser::SerializeSeq;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

use crate::config::Configuration;
use crate::error::Result;
use crate::event::Event;
use crate::metadata::Metadata;
use crate::severity::Severity;
use crate::user::User;

/// Schema version sent in the body and the `Bugsnag-Payload-Version` header.
pub const PAYLOAD_VERSION: &str = "5";
/// Notifier name reported to the ingestion API.
pub const NOTIFIER_NAME: &str = "bugsnag-notify-rust";
/// Notifier version reported to the ingestion API.
pub const NOTIFIER_VERSION: &str = env!("CARGO_PKG_VERSION");
/// Notifier homepage reported to the ingestion API.
pub const NOTIFIER_URL: &str = "https://docs.bugsnag.com/api/error-reporting/";
/// Application type reported in `app.type`.
pub const APP_TYPE: &str = "rust";

/// Top-level request body.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Payload<'a> {
	payload_version: &'static str,
	notifier: NotifierInfo,
	events: [EventPayload<'a>; 1],
}

#[derive(Debug, Serialize)]
struct NotifierInfo {
	name: &'static str,
	version: &'static str,
	url: &'static str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EventPayload<'a> {
	exceptions: [ExceptionPayload<'a>; 1],
	context: &'a str,
	severity: Severity,
	#[serde(rename = "metaData")]
	metadata: Map<String, Value>,
	app: AppPayload<'a>,
	#[serde(skip_serializing_if = "Option::is_none")]
	user: Option<UserPayload<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExceptionPayload<'a> {
	error_class: &'a str,
	stacktrace: EmptyStacktrace,
}

/// No frames are ever captured; always serializes as `[]`.
#[derive(Debug)]
struct EmptyStacktrace;

impl Serialize for EmptyStacktrace {
	fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_seq(Some(0))?.end()
	}
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct AppPayload<'a> {
	version: &'a str,
	release_stage: &'a str,
	#[serde(rename = "type")]
	app_type: &'static str,
}

#[derive(Debug, Serialize)]
struct UserPayload<'a> {
	id: &'a str,
	name: &'a str,
	email: &'a str,
}

impl<'a> From<&'a User> for UserPayload<'a> {
	fn from(user: &'a User) -> Self {
		Self {
			id: &user.id,
			name: &user.username,
			email: &user.email,
		}
	}
}

impl<'a> Payload<'a> {
	/// Assembles the payload for one event.
	pub fn build(config: &'a Configuration, event: &'a Event) -> Self {
		let metadata = event.wire_metadata().into_map();

		Self {
			payload_version: PAYLOAD_VERSION,
			notifier: NotifierInfo {
				name: NOTIFIER_NAME,
				version: NOTIFIER_VERSION,
				url: NOTIFIER_URL,
			},
			events: [EventPayload {
				exceptions: [ExceptionPayload {
					error_class: &event.message,
					stacktrace: EmptyStacktrace,
				}],
				context: config.context(),
				severity: event.severity,
				metadata,
				app: AppPayload {
					version: config.code_version(),
					release_stage: config.release_stage(),
					app_type: APP_TYPE,
				},
				user: config.user().map(UserPayload::from),
			}],
		}
	}

	pub fn to_value(&self) -> Result<Value> {
		Ok(serde_json::to_value(self)?)
	}

	/// Serializes the payload to a UTF-8 JSON request body.
	pub fn to_vec(&self) -> Result<Vec<u8>> {
		Ok(serde_json::to_vec(self)?)
	}
}

/// Builds the JSON document for a single notification.
///
/// `model`, when given, renders application state into the `model`
/// metadata key.
pub fn build_payload(
	config: &Configuration,
	severity: Severity,
	message: &str,
	metadata: Metadata,
	model: Option<&dyn Fn() -> String>,
) -> Result<Value> {
	let mut event = Event::new(severity, message).metadata(metadata);
	if let Some(render) = model {
		event = event.model(render);
	}
	Payload::build(config, &event).to_value()
}
