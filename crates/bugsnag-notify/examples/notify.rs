// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Example: report an error event with the bugsnag-notify SDK.
//!
//! Run with:
//!   BUGSNAG_API_KEY=... cargo run --example notify -p bugsnag-notify

use bugsnag_notify::{create_client, Configuration, Delivery, Metadata, User};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	tracing_subscriber::fmt()
		.with_env_filter(
			EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let api_key = std::env::var("BUGSNAG_API_KEY")?;
	let release_stage =
		std::env::var("BUGSNAG_RELEASE_STAGE").unwrap_or_else(|_| "development".to_string());

	let mut builder = Configuration::builder()
		.token(api_key)
		.code_version(env!("CARGO_PKG_VERSION"))
		.context("examples/notify")
		.release_stage(&release_stage)
		.notify_release_stages(["production", "staging", "development"])
		.user(User::new("42", "Leeroy Jenkins", "support@bugsnag.com"));
	if let Ok(endpoint) = std::env::var("BUGSNAG_ENDPOINT") {
		builder = builder.endpoint(endpoint);
	}

	let bugsnag = create_client(builder.build()?)?;

	println!("Reporting test error (release stage: {release_stage})...");
	let delivery = bugsnag
		.error_with_model(
			"Example error from bugsnag-notify",
			Metadata::new()
				.insert("accountType", "premium")
				.insert("example", true),
			|| format!("Model {{ page: {:?} }}", "Login"),
		)
		.await?;

	match delivery {
		Delivery::Sent => println!("Event sent."),
		Delivery::Suppressed => println!("Event suppressed by release-stage filter."),
	}

	Ok(())
}
