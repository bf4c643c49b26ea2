// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Configuration sections. Each section has a resolved type and a partial
//! `*Layer` type used while merging sources.

mod admin;
mod database;
mod logging;
mod users;

pub use admin::{AdminConfig, AdminConfigLayer};
pub use database::{DatabaseConfig, DatabaseConfigLayer};
pub use logging::{LoggingConfig, LoggingConfigLayer};
pub use users::{UsersConfig, UsersConfigLayer};
