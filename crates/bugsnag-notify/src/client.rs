// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Notifier client: release-stage filtering and dispatch.

use std::sync::Arc;

use bugsnag_notify_core::{Configuration, Event, Metadata, Payload, Severity};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{NotifyError, Result};
use crate::transport::{HttpTransport, NotifyRequest, Transport};

/// Outcome of a notify call that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Delivery {
	/// One request was dispatched and the transport reported success.
	Sent,
	/// The release-stage filter skipped the event; nothing was sent.
	Suppressed,
}

/// Reports `event` using `config`, dispatching through `transport`.
///
/// Performs at most one transport call. Serialization failures are returned
/// before any network access; transport failures surface as
/// [`NotifyError::SendFailed`]. Nothing is retried.
pub async fn notify(
	config: &Configuration,
	transport: &dyn Transport,
	event: Event,
) -> Result<Delivery> {
	if !config.should_notify() {
		info!(
			error_class = %event.message,
			severity = %event.severity,
			release_stage = %config.release_stage(),
			"Event suppressed: release stage is not in notify_release_stages"
		);
		return Ok(Delivery::Suppressed);
	}

	let body = Payload::build(config, &event).to_vec()?;
	let request = NotifyRequest::new(config, body);

	debug!(
		url = %request.url,
		severity = %event.severity,
		bytes = request.body.len(),
		"Sending event"
	);

	match transport.send(request).await {
		Ok(()) => {
			debug!(severity = %event.severity, "Event delivered");
			Ok(Delivery::Sent)
		}
		Err(e) => {
			warn!(error = %e, severity = %event.severity, "Failed to deliver event");
			Err(NotifyError::SendFailed(e))
		}
	}
}

/// Creates a notifier that delivers over HTTPS with the default client.
pub fn create_client(config: Configuration) -> Result<Notifier> {
	Notifier::new(config)
}

/// Severity-scoped handle for reporting events.
///
/// Cloning is cheap; clones share the same configuration and transport.
/// The notifier holds no mutable state, so concurrent calls are independent.
///
/// # Example
///
/// ```ignore
/// use bugsnag_notify::{create_client, Configuration, Metadata};
///
/// let config = Configuration::builder()
///     .token("your_api_key")
///     .code_version(env!("CARGO_PKG_VERSION"))
///     .context("checkout")
///     .release_stage("production")
///     .build()?;
/// let bugsnag = create_client(config)?;
///
/// bugsnag
///     .error("Auth failed", Metadata::new().insert("accountType", "premium"))
///     .await?;
/// ```
#[derive(Clone)]
pub struct Notifier {
	config: Arc<Configuration>,
	transport: Arc<dyn Transport>,
}

impl Notifier {
	/// Creates a notifier backed by [`HttpTransport`].
	pub fn new(config: Configuration) -> Result<Self> {
		let transport = HttpTransport::new()?;
		Ok(Self::with_transport(config, Arc::new(transport)))
	}

	/// Creates a notifier that dispatches through `transport`.
	pub fn with_transport(config: Configuration, transport: Arc<dyn Transport>) -> Self {
		info!(
			endpoint = %config.endpoint(),
			release_stage = %config.release_stage(),
			enabled = config.should_notify(),
			"Bugsnag notifier initialized"
		);

		Self {
			config: Arc::new(config),
			transport,
		}
	}

	pub fn config(&self) -> &Configuration {
		&self.config
	}

	/// Reports an event at the given severity.
	pub async fn notify(
		&self,
		severity: Severity,
		message: impl Into<String>,
		metadata: Metadata,
	) -> Result<Delivery> {
		self.notify_event(Event::new(severity, message).metadata(metadata))
			.await
	}

	/// Reports a pre-built event.
	pub async fn notify_event(&self, event: Event) -> Result<Delivery> {
		notify(&self.config, self.transport.as_ref(), event).await
	}

	/// Reports an event from a background task.
	///
	/// The returned handle resolves to the same result as
	/// [`notify_event`](Self::notify_event); dropping it does not cancel the
	/// send. Must be called within a tokio runtime.
	pub fn spawn(&self, event: Event) -> JoinHandle<Result<Delivery>> {
		let notifier = self.clone();
		tokio::spawn(async move { notifier.notify_event(event).await })
	}

	pub async fn error(&self, message: impl Into<String>, metadata: Metadata) -> Result<Delivery> {
		self.notify(Severity::Error, message, metadata).await
	}

	pub async fn warning(
		&self,
		message: impl Into<String>,
		metadata: Metadata,
	) -> Result<Delivery> {
		self.notify(Severity::Warning, message, metadata).await
	}

	pub async fn info(&self, message: impl Into<String>, metadata: Metadata) -> Result<Delivery> {
		self.notify(Severity::Info, message, metadata).await
	}

	/// Like [`error`](Self::error), with application state rendered by `model`.
	pub async fn error_with_model<F>(
		&self,
		message: impl Into<String>,
		metadata: Metadata,
		model: F,
	) -> Result<Delivery>
	where
		F: FnOnce() -> String,
	{
		self.notify_with_model(Severity::Error, message, metadata, model)
			.await
	}

	pub async fn warning_with_model<F>(
		&self,
		message: impl Into<String>,
		metadata: Metadata,
		model: F,
	) -> Result<Delivery>
	where
		F: FnOnce() -> String,
	{
		self.notify_with_model(Severity::Warning, message, metadata, model)
			.await
	}

	pub async fn info_with_model<F>(
		&self,
		message: impl Into<String>,
		metadata: Metadata,
		model: F,
	) -> Result<Delivery>
	where
		F: FnOnce() -> String,
	{
		self.notify_with_model(Severity::Info, message, metadata, model)
			.await
	}

	async fn notify_with_model<F>(
		&self,
		severity: Severity,
		message: impl Into<String>,
		metadata: Metadata,
		model: F,
	) -> Result<Delivery>
	where
		F: FnOnce() -> String,
	{
		let event = Event::new(severity, message)
			.metadata(metadata)
			.model(model);
		self.notify_event(event).await
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::error::TransportError;
	use bugsnag_notify_core::{User, MODEL_KEY};
	use proptest::prelude::*;
	use serde_json::{json, Value};
	use std::sync::atomic::{AtomicBool, Ordering};
	use std::sync::Mutex;

	struct RecordingTransport {
		requests: Mutex<Vec<NotifyRequest>>,
		should_fail: AtomicBool,
	}

	impl RecordingTransport {
		fn new() -> Arc<Self> {
			Arc::new(Self {
				requests: Mutex::new(Vec::new()),
				should_fail: AtomicBool::new(false),
			})
		}

		fn failing() -> Arc<Self> {
			let transport = Self::new();
			transport.should_fail.store(true, Ordering::SeqCst);
			transport
		}

		fn sent(&self) -> Vec<NotifyRequest> {
			self.requests.lock().unwrap().clone()
		}

		fn bodies(&self) -> Vec<Value> {
			self.sent()
				.iter()
				.map(|r| serde_json::from_slice(&r.body).unwrap())
				.collect()
		}
	}

	#[async_trait::async_trait]
	impl Transport for RecordingTransport {
		async fn send(&self, request: NotifyRequest) -> std::result::Result<(), TransportError> {
			self.requests.lock().unwrap().push(request);
			if self.should_fail.load(Ordering::SeqCst) {
				return Err(TransportError::Other("connection reset".to_string()));
			}
			Ok(())
		}
	}

	fn builder() -> bugsnag_notify_core::ConfigurationBuilder {
		Configuration::builder()
			.token("token_123")
			.code_version("1.0.0")
			.context("tests")
			.release_stage("production")
	}

	fn notifier(config: Configuration, transport: &Arc<RecordingTransport>) -> Notifier {
		Notifier::with_transport(config, transport.clone())
	}

	/// Shared buffer for formatted log output.
	#[derive(Clone, Default)]
	struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

	impl CapturedLogs {
		fn lines(&self) -> Vec<String> {
			let buf = self.0.lock().unwrap();
			String::from_utf8_lossy(&buf).lines().map(str::to_string).collect()
		}
	}

	impl std::io::Write for CapturedLogs {
		fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
			self.0.lock().unwrap().extend_from_slice(buf);
			Ok(buf.len())
		}

		fn flush(&mut self) -> std::io::Result<()> {
			Ok(())
		}
	}

	impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for CapturedLogs {
		type Writer = Self;

		fn make_writer(&'a self) -> Self::Writer {
			self.clone()
		}
	}

	#[tokio::test]
	async fn test_error_sends_one_request() {
		let transport = RecordingTransport::new();
		let bugsnag = notifier(builder().build().unwrap(), &transport);

		let delivery = bugsnag
			.error("Auth failed", Metadata::new().insert("accountType", "premium"))
			.await
			.unwrap();

		assert_eq!(delivery, Delivery::Sent);
		let sent = transport.sent();
		assert_eq!(sent.len(), 1);
		assert_eq!(sent[0].method(), "POST");
		assert_eq!(sent[0].url, "https://notify.bugsnag.com");
		assert_eq!(sent[0].headers()[0], ("Bugsnag-Api-Key", "token_123"));
		assert_eq!(sent[0].headers()[1], ("Bugsnag-Payload-Version", "5"));

		let body = &transport.bodies()[0];
		assert_eq!(body["payloadVersion"], "5");
		assert_eq!(body["events"][0]["severity"], "error");
		assert_eq!(body["events"][0]["exceptions"][0]["errorClass"], "Auth failed");
		assert_eq!(body["events"][0]["metaData"]["accountType"], "premium");
	}

	#[tokio::test]
	async fn test_severity_bound_methods() {
		let transport = RecordingTransport::new();
		let bugsnag = notifier(builder().build().unwrap(), &transport);

		bugsnag.error("e", Metadata::new()).await.unwrap();
		bugsnag.warning("w", Metadata::new()).await.unwrap();
		bugsnag.info("i", Metadata::new()).await.unwrap();

		let severities: Vec<_> = transport
			.bodies()
			.iter()
			.map(|b| b["events"][0]["severity"].as_str().unwrap().to_string())
			.collect();
		assert_eq!(severities, vec!["error", "warning", "info"]);
	}

	#[tokio::test]
	async fn test_filtered_stage_sends_nothing() {
		let transport = RecordingTransport::new();
		let config = builder()
			.release_stage("development")
			.notify_release_stages(["production", "staging"])
			.build()
			.unwrap();
		let bugsnag = notifier(config, &transport);

		let delivery = bugsnag.error("ignored", Metadata::new()).await.unwrap();

		assert_eq!(delivery, Delivery::Suppressed);
		assert!(transport.sent().is_empty());
	}

	#[tokio::test]
	async fn test_suppressed_even_when_transport_would_fail() {
		let transport = RecordingTransport::failing();
		let config = builder()
			.release_stage("development")
			.notify_release_stages(["production"])
			.build()
			.unwrap();

		let delivery = notifier(config, &transport)
			.info("ignored", Metadata::new())
			.await
			.unwrap();

		assert_eq!(delivery, Delivery::Suppressed);
		assert!(transport.sent().is_empty());
	}

	#[test]
	fn test_suppression_logs_once_at_info() {
		let logs = CapturedLogs::default();
		let subscriber = tracing_subscriber::fmt()
			.with_writer(logs.clone())
			.with_max_level(tracing::Level::TRACE)
			.with_ansi(false)
			.finish();

		let transport = RecordingTransport::new();
		let config = builder()
			.release_stage("development")
			.notify_release_stages(["production"])
			.build()
			.unwrap();

		let delivery = tracing::subscriber::with_default(subscriber, || {
			let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
			runtime.block_on(notifier(config, &transport).error("Auth failed", Metadata::new()))
		})
		.unwrap();
		assert_eq!(delivery, Delivery::Suppressed);

		let lines = logs.lines();
		let suppressed: Vec<_> = lines
			.iter()
			.filter(|line| line.contains("Event suppressed"))
			.collect();
		assert_eq!(suppressed.len(), 1);
		assert!(suppressed[0].contains("INFO"));
		assert!(suppressed[0].contains("error_class=Auth failed"));
		assert!(suppressed[0].contains("release_stage=development"));

		assert!(!lines.iter().any(|line| line.contains("Sending event")));
		assert!(!lines.iter().any(|line| line.contains("token_123")));
	}

	#[tokio::test]
	async fn test_listed_stage_sends() {
		let transport = RecordingTransport::new();
		let config = builder()
			.notify_release_stages(["production"])
			.build()
			.unwrap();

		let delivery = notifier(config, &transport)
			.warning("sent", Metadata::new())
			.await
			.unwrap();

		assert_eq!(delivery, Delivery::Sent);
		assert_eq!(transport.sent().len(), 1);
	}

	#[tokio::test]
	async fn test_transport_failure_is_generic_send_failed() {
		let transport = RecordingTransport::failing();
		let bugsnag = notifier(builder().build().unwrap(), &transport);

		let result = bugsnag.error("boom", Metadata::new()).await;

		let err = result.unwrap_err();
		assert!(matches!(err, NotifyError::SendFailed(_)));
		assert_eq!(err.to_string(), "failed to send event");
		assert_eq!(transport.sent().len(), 1, "no retries");
	}

	#[tokio::test]
	async fn test_user_included_when_configured() {
		let transport = RecordingTransport::new();
		let config = builder()
			.user(User::new("42", "Leeroy Jenkins", "support@bugsnag.com"))
			.build()
			.unwrap();

		notifier(config, &transport)
			.error("x", Metadata::new())
			.await
			.unwrap();

		assert_eq!(
			transport.bodies()[0]["events"][0]["user"],
			json!({ "id": "42", "name": "Leeroy Jenkins", "email": "support@bugsnag.com" })
		);
	}

	#[tokio::test]
	async fn test_model_hook_populates_metadata() {
		let transport = RecordingTransport::new();
		let bugsnag = notifier(builder().build().unwrap(), &transport);
		let state = ("login", 3);

		bugsnag
			.error_with_model("Auth failed", Metadata::new(), || {
				format!("page={} attempts={}", state.0, state.1)
			})
			.await
			.unwrap();

		assert_eq!(
			transport.bodies()[0]["events"][0]["metaData"][MODEL_KEY],
			"page=login attempts=3"
		);
	}

	#[tokio::test]
	async fn test_model_variant_respects_release_stage_filter() {
		let transport = RecordingTransport::new();
		let config = builder()
			.release_stage("development")
			.notify_release_stages(["production"])
			.build()
			.unwrap();

		let delivery = notifier(config, &transport)
			.warning_with_model("x", Metadata::new(), || "state".to_string())
			.await
			.unwrap();
		assert_eq!(delivery, Delivery::Suppressed);
	}

	#[tokio::test]
	async fn test_spawn_delivers_in_background() {
		let transport = RecordingTransport::new();
		let bugsnag = notifier(builder().build().unwrap(), &transport);

		let handle = bugsnag.spawn(Event::new(Severity::Info, "background"));
		let delivery = handle.await.unwrap().unwrap();

		assert_eq!(delivery, Delivery::Sent);
		assert_eq!(transport.sent().len(), 1);
	}

	#[tokio::test]
	async fn test_concurrent_notifies_are_independent() {
		let transport = RecordingTransport::new();
		let bugsnag = notifier(builder().build().unwrap(), &transport);

		let handles: Vec<_> = (0..10)
			.map(|i| bugsnag.spawn(Event::new(Severity::Info, format!("event {i}"))))
			.collect();
		for handle in handles {
			handle.await.unwrap().unwrap();
		}

		let mut messages: Vec<_> = transport
			.bodies()
			.iter()
			.map(|b| b["events"][0]["exceptions"][0]["errorClass"].as_str().unwrap().to_string())
			.collect();
		messages.sort();
		assert_eq!(messages.len(), 10);
		messages.dedup();
		assert_eq!(messages.len(), 10);
	}

	#[tokio::test]
	async fn test_free_notify_function() {
		let transport = RecordingTransport::new();
		let config = builder().build().unwrap();

		let delivery = notify(
			&config,
			transport.as_ref(),
			Event::new(Severity::Warning, "direct"),
		)
		.await
		.unwrap();

		assert_eq!(delivery, Delivery::Sent);
		assert_eq!(transport.bodies()[0]["events"][0]["severity"], "warning");
	}

	#[test]
	fn test_create_client_uses_http_transport() {
		let bugsnag = create_client(builder().build().unwrap()).unwrap();
		assert_eq!(bugsnag.config().endpoint(), "https://notify.bugsnag.com");
	}

	proptest! {
		#[test]
		fn empty_allow_list_always_dispatches(stage in "[a-z]{0,12}") {
			let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
			let transport = RecordingTransport::new();
			let config = builder().release_stage(stage).build().unwrap();

			let delivery = runtime
				.block_on(notifier(config, &transport).error("x", Metadata::new()))
				.unwrap();

			prop_assert_eq!(delivery, Delivery::Sent);
			prop_assert_eq!(transport.sent().len(), 1);
		}

		#[test]
		fn unlisted_stage_never_dispatches(
			stage in "[a-z]{0,12}",
			stages in proptest::collection::btree_set("[a-z]{0,12}", 1..5),
		) {
			prop_assume!(!stages.contains(&stage));
			let runtime = tokio::runtime::Builder::new_current_thread().build().unwrap();
			let transport = RecordingTransport::new();
			let config = builder()
				.release_stage(stage)
				.notify_release_stages(stages)
				.build()
				.unwrap();

			let delivery = runtime
				.block_on(notifier(config, &transport).error("x", Metadata::new()))
				.unwrap();

			prop_assert_eq!(delivery, Delivery::Suppressed);
			prop_assert!(transport.sent().is_empty());
		}
	}
}
