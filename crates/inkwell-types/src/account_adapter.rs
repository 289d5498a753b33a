//! Adapter that manages and stores account identities and other sensitive data.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::prelude::*;

/// A stored account, password hash never included
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountRecord {
	pub account_id: AccountId,
	pub email: Box<str>,
	pub first_name: Box<str>,
	pub last_name: Box<str>,
	pub is_active: bool,
	pub is_staff: bool,
	pub is_superuser: bool,
	pub created_at: Timestamp,
}

/// Data needed to create a new account. `password_hash` is the already
/// hashed credential; adapters never see plaintext passwords.
#[derive(Debug)]
pub struct CreateAccountData<'a> {
	pub email: &'a str,
	pub first_name: &'a str,
	pub last_name: &'a str,
	pub password_hash: &'a str,
	pub is_staff: bool,
	pub is_active: bool,
}

/// Field-wise account update; `None` leaves the column untouched
#[derive(Debug, Default)]
pub struct UpdateAccountData<'a> {
	pub email: Option<&'a str>,
	pub first_name: Option<&'a str>,
	pub last_name: Option<&'a str>,
	pub password_hash: Option<&'a str>,
	pub is_staff: Option<bool>,
	pub is_active: Option<bool>,
}

impl UpdateAccountData<'_> {
	pub fn is_empty(&self) -> bool {
		self.email.is_none()
			&& self.first_name.is_none()
			&& self.last_name.is_none()
			&& self.password_hash.is_none()
			&& self.is_staff.is_none()
			&& self.is_active.is_none()
	}
}

/// Options for listing accounts (admin surface)
#[derive(Debug, Default)]
pub struct ListAccountsOptions<'a> {
	/// Free-text search across email, first name, last name
	pub q: Option<&'a str>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

/// An Inkwell account adapter.
///
/// Responsible for storing and managing all sensitive data used for
/// authentication: account rows, password hashes, and the instance JWT
/// signing secret.
#[async_trait]
pub trait AccountAdapter: Debug + Send + Sync {
	/// Returns the HS256 signing secret, generating and persisting one on
	/// first use
	async fn read_jwt_secret(&self) -> ApiResult<Box<str>>;

	/// Creates a new account. A duplicate email surfaces as
	/// `Error::Conflict` from the unique constraint, not from a pre-check.
	async fn create_account(&self, data: CreateAccountData<'_>) -> ApiResult<AccountRecord>;

	async fn read_account(&self, account_id: AccountId) -> ApiResult<AccountRecord>;
	async fn read_account_by_email(&self, email: &str) -> ApiResult<AccountRecord>;

	/// Reads the stored password hash for credential verification
	async fn read_password_hash(&self, email: &str) -> ApiResult<(AccountId, Box<str>)>;

	async fn update_account(
		&self,
		account_id: AccountId,
		data: UpdateAccountData<'_>,
	) -> ApiResult<AccountRecord>;

	/// Deletes an account; the content store cascades the author's posts
	async fn delete_account(&self, account_id: AccountId) -> ApiResult<()>;

	async fn list_accounts(&self, opts: &ListAccountsOptions<'_>) -> ApiResult<Vec<AccountRecord>>;
}

// vim: ts=4
