// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

//! Kiln server bootstrap binary.
//!
//! Applies migrations and makes sure the well-known admin account exists with
//! the configured credentials.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use kiln_server_auth::{Argon2CredentialIssuer, CredentialIssuer};
use kiln_server_db::UnitOfWork;
use kiln_server_events::{EventBus, EventSink, TracingEventSink};
use kiln_server_provisioning::{ensure_admin, AdminResetter, UserProvisioner};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Kiln server - user and organization provisioning.
#[derive(Parser, Debug)]
#[command(name = "kiln-server", about = "Kiln provisioning server", version)]
struct Args {
	/// Path to a TOML config file (defaults to /etc/kiln/server.toml)
	#[arg(long, env = "KILN_SERVER_CONFIG")]
	config: Option<PathBuf>,

	#[command(subcommand)]
	command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
	/// Show version information
	Version,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let args = Args::parse();

	if let Some(Command::Version) = args.command {
		println!("kiln-server version: {}", env!("CARGO_PKG_VERSION"));
		return Ok(());
	}

	// Load .env file if present
	dotenvy::dotenv().ok();

	let config = match args.config {
		Some(path) => kiln_server_config::load_config_with_file(path)?,
		None => kiln_server_config::load_config()?,
	};

	tracing_subscriber::registry()
		.with(
			tracing_subscriber::EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| config.logging.level.clone().into()),
		)
		.with(tracing_subscriber::fmt::layer())
		.init();

	tracing::info!(database = %config.database.url, "starting kiln-server");

	let pool = kiln_server_db::create_pool(&config.database.url).await?;
	kiln_server_db::run_migrations(&pool).await?;

	let sinks: Vec<Arc<dyn EventSink>> = vec![Arc::new(TracingEventSink::new())];
	let events = EventBus::new(sinks);
	let issuer: Arc<dyn CredentialIssuer> = Arc::new(Argon2CredentialIssuer::new());
	let provisioner = UserProvisioner::new(config.users.clone(), issuer.clone(), events);
	let resetter = AdminResetter::new(issuer);

	let mut uow = UnitOfWork::begin(&pool).await?;
	let admin = match ensure_admin(&mut uow, &provisioner, &resetter, &config.admin).await {
		Ok(admin) => admin,
		Err(e) => {
			tracing::error!(error = %e, "admin bootstrap failed, rolling back");
			uow.rollback().await?;
			return Err(e.into());
		}
	};
	uow.commit().await?;

	tracing::info!(
		user_id = %admin.id,
		login = %admin.login,
		org_id = %admin.org_id,
		"admin account ready"
	);

	pool.close().await;
	Ok(())
}
