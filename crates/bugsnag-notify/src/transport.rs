// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Outbound request descriptor and the transport that delivers it.

use std::fmt;

use async_trait::async_trait;
use bugsnag_notify_core::{ApiKey, Configuration, PAYLOAD_VERSION, REDACTED};
use reqwest::header::CONTENT_TYPE;
use reqwest::Client;
use tracing::debug;

use crate::error::{NotifyError, TransportError};

/// Header carrying the project API key.
pub const API_KEY_HEADER: &str = "Bugsnag-Api-Key";
/// Header carrying the payload schema version.
pub const PAYLOAD_VERSION_HEADER: &str = "Bugsnag-Payload-Version";

/// A fully-formed ingestion request, ready to hand to a [`Transport`].
#[derive(Clone)]
pub struct NotifyRequest {
	pub url: String,
	api_key: ApiKey,
	pub body: Vec<u8>,
}

impl NotifyRequest {
	/// Method used for every ingestion request.
	pub const METHOD: &'static str = "POST";

	/// Creates the request for `body` against the configured endpoint.
	pub fn new(config: &Configuration, body: Vec<u8>) -> Self {
		Self {
			url: config.endpoint().to_string(),
			api_key: config.token().clone(),
			body,
		}
	}

	pub fn method(&self) -> &'static str {
		Self::METHOD
	}

	/// Ingestion headers, in send order. Includes the raw API key.
	pub fn headers(&self) -> [(&'static str, &str); 2] {
		[
			(API_KEY_HEADER, self.api_key.expose()),
			(PAYLOAD_VERSION_HEADER, PAYLOAD_VERSION),
		]
	}
}

impl fmt::Debug for NotifyRequest {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("NotifyRequest")
			.field("method", &Self::METHOD)
			.field("url", &self.url)
			.field(
				"headers",
				&[
					(API_KEY_HEADER, REDACTED),
					(PAYLOAD_VERSION_HEADER, PAYLOAD_VERSION),
				],
			)
			.field("body_len", &self.body.len())
			.finish()
	}
}

/// Delivers a [`NotifyRequest`].
///
/// Implementations send exactly once and never inspect the response body;
/// only success or failure is reported.
#[async_trait]
pub trait Transport: Send + Sync {
	async fn send(&self, request: NotifyRequest) -> Result<(), TransportError>;
}

/// [`Transport`] backed by a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpTransport {
	client: Client,
}

impl HttpTransport {
	/// Creates a transport with the notifier User-Agent and no timeout.
	pub fn new() -> Result<Self, NotifyError> {
		let client = crate::http::builder()
			.build()
			.map_err(NotifyError::HttpClient)?;
		Ok(Self { client })
	}

	/// Wraps an existing client, e.g. one configured with a timeout or proxy.
	pub fn with_client(client: Client) -> Self {
		Self { client }
	}
}

#[async_trait]
impl Transport for HttpTransport {
	async fn send(&self, request: NotifyRequest) -> Result<(), TransportError> {
		let mut builder = self
			.client
			.post(&request.url)
			.header(CONTENT_TYPE, "application/json");
		for (name, value) in request.headers() {
			builder = builder.header(name, value);
		}

		let response = builder.body(request.body).send().await?;

		let status = response.status();
		debug!(status = status.as_u16(), "Ingestion endpoint responded");
		if !status.is_success() {
			return Err(TransportError::Status(status.as_u16()));
		}

		Ok(())
	}
}
