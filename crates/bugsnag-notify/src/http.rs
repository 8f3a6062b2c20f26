// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights
// reserved. SPDX-License-Identifier: Proprietary

//! HTTP client construction with a consistent User-Agent header.

use bugsnag_notify_core::{NOTIFIER_NAME, NOTIFIER_VERSION};
use reqwest::{Client, ClientBuilder};

/// Creates a new HTTP client builder with the notifier User-Agent header.
///
/// No request timeout is set; callers that need one can add it before
/// building.
///
/// # Example
/// ```ignore
/// let client = bugsnag_notify::http::builder()
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
pub fn builder() -> ClientBuilder {
	Client::builder().user_agent(user_agent())
}

/// Returns the notifier User-Agent string.
///
/// Format: `{notifier}/{version}`
pub fn user_agent() -> String {
	format!("{NOTIFIER_NAME}/{NOTIFIER_VERSION}")
}
