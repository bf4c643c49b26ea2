// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

use crate::error::EventSinkError;
use crate::event::ProvisioningEvent;
use crate::sink::EventSink;

/// Writes each event to the `tracing` subscriber as a structured `info` record.
pub struct TracingEventSink {
	name: String,
}

impl TracingEventSink {
	pub fn new() -> Self {
		Self {
			name: "tracing".to_string(),
		}
	}
}

impl Default for TracingEventSink {
	fn default() -> Self {
		Self::new()
	}
}

impl EventSink for TracingEventSink {
	fn name(&self) -> &str {
		&self.name
	}

	fn publish(&self, event: &ProvisioningEvent) -> Result<(), EventSinkError> {
		let payload = serde_json::to_string(event)
			.map_err(|e| EventSinkError::Permanent(format!("failed to serialize event: {e}")))?;

		tracing::info!(
			target: "kiln::events",
			event_type = %event.kind(),
			timestamp = %event.timestamp().to_rfc3339(),
			payload = %payload,
			"provisioning event"
		);
		Ok(())
	}
}
