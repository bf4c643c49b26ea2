// Copyright (c) 2025 Geoffrey Huntley <ghuntley@ghuntley.com>. All rights reserved.
// SPDX-License-Identifier: Proprietary

mod common;

use common::{drain, harness};
use kiln_server_auth::{Password, DEFAULT_ADMIN_USER_ID};
use kiln_server_config::{AdminConfig, UsersConfig};
use kiln_server_db::testing::{count_rows, create_test_pool, insert_org_row, insert_user_row};
use kiln_server_db::{AccountFilter, UnitOfWork, UserStore};
use kiln_server_events::ProvisioningEvent;
use kiln_server_provisioning::{ensure_admin, AdminCredentials, ProvisioningError};

fn credentials(password: &str) -> AdminCredentials {
	AdminCredentials {
		login: "admin".to_string(),
		email: "admin@localhost".to_string(),
		password: Password::new(password),
	}
}

#[tokio::test]
async fn repeated_resets_reissue_salt_and_encoding() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	insert_user_row(&pool, 1, "admin", 1, false).await;
	let h = harness(UsersConfig::default());
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();

	let first = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials("s3cret"))
		.await
		.unwrap();
	let second = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials("s3cret"))
		.await
		.unwrap();

	assert_ne!(first.salt, second.salt);
	assert_ne!(first.rands, second.rands);
	assert_ne!(first.password, second.password);
	assert!(h
		.issuer
		.verify_password("s3cret", &second.salt, &second.password)
		.unwrap());

	let stored = uow
		.get_user_by_id(DEFAULT_ADMIN_USER_ID, AccountFilter::Any)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(stored.password, second.password);
	assert!(stored.is_admin);
}

#[tokio::test]
async fn empty_password_reset_keeps_encoding_but_changes_salt() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	insert_user_row(&pool, 1, "admin", 1, false).await;
	let h = harness(UsersConfig::default());
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();

	let with_password = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials("s3cret"))
		.await
		.unwrap();
	let without_password = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials(""))
		.await
		.unwrap();

	assert_eq!(without_password.password, with_password.password);
	assert_ne!(without_password.salt, with_password.salt);
	// The kept encoding no longer matches the account's salt.
	assert!(!h
		.issuer
		.verify_password("s3cret", &without_password.salt, &without_password.password)
		.unwrap());
}

#[tokio::test]
async fn reset_overwrites_login_and_email() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	insert_user_row(&pool, 1, "admin", 1, false).await;
	let h = harness(UsersConfig::default());
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();

	let reset = AdminCredentials {
		login: "root".to_string(),
		email: "root@example.com".to_string(),
		password: Password::new("pw"),
	};
	h.resetter
		.reset_admin_credentials(&mut uow, &reset)
		.await
		.unwrap();
	uow.commit().await.unwrap();

	let mut uow = UnitOfWork::begin(&pool).await.unwrap();
	let stored = uow
		.get_user_by_id(DEFAULT_ADMIN_USER_ID, AccountFilter::Any)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(stored.login, "root");
	assert_eq!(stored.email, "root@example.com");
	assert!(stored.updated >= stored.created);
}

#[tokio::test]
async fn missing_admin_is_reported_by_id() {
	let pool = create_test_pool().await;
	let h = harness(UsersConfig::default());
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();

	let err = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials("pw"))
		.await
		.unwrap_err();
	assert!(matches!(err, ProvisioningError::AdminNotFound(id) if id == DEFAULT_ADMIN_USER_ID));
	assert!(err.to_string().contains("id 1"));
}

#[tokio::test]
async fn service_account_at_admin_id_is_never_reset() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	insert_user_row(&pool, 1, "sa-deployer", 1, true).await;
	let h = harness(UsersConfig::default());
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();

	let err = h
		.resetter
		.reset_admin_credentials(&mut uow, &credentials("pw"))
		.await
		.unwrap_err();
	assert!(matches!(err, ProvisioningError::AdminNotFound(_)));

	let untouched = uow
		.get_user_by_id(DEFAULT_ADMIN_USER_ID, AccountFilter::Any)
		.await
		.unwrap()
		.unwrap();
	assert_eq!(untouched.login, "sa-deployer");
	assert_eq!(untouched.salt, "saltsalt00");
}

#[tokio::test]
async fn ensure_admin_creates_then_resets() {
	let pool = create_test_pool().await;
	let mut h = harness(UsersConfig::default());
	let config = AdminConfig {
		password: Password::new("first"),
		..Default::default()
	};

	let mut uow = UnitOfWork::begin(&pool).await.unwrap();
	let created = ensure_admin(&mut uow, &h.provisioner, &h.resetter, &config)
		.await
		.unwrap();
	uow.commit().await.unwrap();

	assert_eq!(created.id, DEFAULT_ADMIN_USER_ID);
	assert!(created.is_admin);
	assert_eq!(created.login, "admin");
	assert_eq!(drain(&mut h.events).len(), 2);

	let config = AdminConfig {
		password: Password::new("second"),
		..Default::default()
	};
	let mut uow = UnitOfWork::begin(&pool).await.unwrap();
	let reset = ensure_admin(&mut uow, &h.provisioner, &h.resetter, &config)
		.await
		.unwrap();
	uow.commit().await.unwrap();

	assert_eq!(reset.id, DEFAULT_ADMIN_USER_ID);
	assert!(h
		.issuer
		.verify_password("second", &reset.salt, &reset.password)
		.unwrap());
	assert_eq!(count_rows(&pool, "user").await, 1);
	assert!(!drain(&mut h.events)
		.iter()
		.any(|e| matches!(e, ProvisioningEvent::UserCreated { .. })));
}

#[tokio::test]
async fn ensure_admin_recreates_missing_admin_at_fixed_id() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	// Row 1 was deleted at some point; later accounts remain.
	insert_user_row(&pool, 2, "bob", 1, false).await;
	insert_user_row(&pool, 3, "carol", 1, false).await;
	let h = harness(UsersConfig::default());

	for password in ["first", "second"] {
		let config = AdminConfig {
			password: Password::new(password),
			..Default::default()
		};
		let mut uow = UnitOfWork::begin(&pool).await.unwrap();
		let admin = ensure_admin(&mut uow, &h.provisioner, &h.resetter, &config)
			.await
			.unwrap();
		uow.commit().await.unwrap();

		assert_eq!(admin.id, DEFAULT_ADMIN_USER_ID);
		assert!(admin.is_admin);
		assert!(h
			.issuer
			.verify_password(password, &admin.salt, &admin.password)
			.unwrap());
	}

	assert_eq!(count_rows(&pool, "user").await, 3);
}

#[tokio::test]
async fn ensure_admin_leaves_account_holding_admin_login_alone() {
	let pool = create_test_pool().await;
	insert_org_row(&pool, 1, "Main Org.").await;
	insert_user_row(&pool, 4, "admin", 1, false).await;
	let mut h = harness(UsersConfig::default());

	let mut uow = UnitOfWork::begin(&pool).await.unwrap();
	let existing = ensure_admin(&mut uow, &h.provisioner, &h.resetter, &AdminConfig::default())
		.await
		.unwrap();
	uow.commit().await.unwrap();

	assert_eq!(existing.id.get(), 4);
	assert_eq!(existing.salt, "saltsalt00");
	assert_eq!(count_rows(&pool, "user").await, 1);
	assert!(drain(&mut h.events).is_empty());
}
