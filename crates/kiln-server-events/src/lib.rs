// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Domain events emitted by provisioning.
//!
//! Events are handed to an [`EventBus`] only after the transaction that created
//! the entity has committed. The bus fans each event out to its [`EventSink`]s
//! and to in-process subscribers.

pub mod bus;
pub mod error;
pub mod event;
pub mod sink;

pub use bus::EventBus;
pub use error::EventSinkError;
pub use event::{EventKind, ProvisioningEvent};
pub use sink::{EventSink, TracingEventSink};
