//! SQLite-backed account adapter: account rows, password hashes, and the
//! instance JWT signing secret.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use inkwell::account_adapter::{
	AccountAdapter, AccountRecord, CreateAccountData, ListAccountsOptions, UpdateAccountData,
};
use inkwell::prelude::*;

mod account;
mod schema;
mod secret;
mod utils;

#[derive(Debug)]
pub struct AccountAdapterSqlite {
	db: SqlitePool,
	jwt_secret: Box<str>,
}

impl AccountAdapterSqlite {
	pub async fn new(path: impl AsRef<Path>) -> ApiResult<Self> {
		let opts = sqlite::SqliteConnectOptions::new()
			.filename(path.as_ref())
			.create_if_missing(true)
			.journal_mode(sqlite::SqliteJournalMode::Wal);
		let db = sqlite::SqlitePoolOptions::new()
			.max_connections(5)
			.connect_with(opts)
			.await
			.inspect_err(|err| error!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		schema::init_db(&db)
			.await
			.inspect_err(|err| error!("DB: {:#?}", err))
			.or(Err(Error::DbError))?;

		let jwt_secret = secret::ensure_jwt_secret(&db).await?;

		Ok(Self { db, jwt_secret })
	}
}

#[async_trait]
impl AccountAdapter for AccountAdapterSqlite {
	async fn read_jwt_secret(&self) -> ApiResult<Box<str>> {
		Ok(self.jwt_secret.clone())
	}

	async fn create_account(&self, data: CreateAccountData<'_>) -> ApiResult<AccountRecord> {
		account::create(&self.db, data).await
	}

	async fn read_account(&self, account_id: AccountId) -> ApiResult<AccountRecord> {
		account::read(&self.db, account_id).await
	}

	async fn read_account_by_email(&self, email: &str) -> ApiResult<AccountRecord> {
		account::read_by_email(&self.db, email).await
	}

	async fn read_password_hash(&self, email: &str) -> ApiResult<(AccountId, Box<str>)> {
		account::read_password_hash(&self.db, email).await
	}

	async fn update_account(
		&self,
		account_id: AccountId,
		data: UpdateAccountData<'_>,
	) -> ApiResult<AccountRecord> {
		account::update(&self.db, account_id, data).await
	}

	async fn delete_account(&self, account_id: AccountId) -> ApiResult<()> {
		account::delete(&self.db, account_id).await
	}

	async fn list_accounts(&self, opts: &ListAccountsOptions<'_>) -> ApiResult<Vec<AccountRecord>> {
		account::list(&self.db, opts).await
	}
}

// vim: ts=4
