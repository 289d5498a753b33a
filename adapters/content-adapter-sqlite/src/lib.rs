//! SQLite-backed content adapter: posts, configuration entries, and
//! contact messages.

use async_trait::async_trait;
use sqlx::sqlite::{self, SqlitePool};
use std::path::Path;

use inkwell::config::ConfigCategory;
use inkwell::content_adapter::{
	ConfigEntryRecord, ContactMessageRecord, ContentAdapter, CreateConfigData,
	CreateContactMessageData, CreatePostData, ListConfigsOptions, ListPostsOptions, PostRecord,
	UpdatePostData,
};
use inkwell::prelude::*;

mod config;
mod contact;
mod post;
mod schema;
mod utils;

#[derive(Debug)]
pub struct ContentAdapterSqlite {
	db: SqlitePool,
}

impl ContentAdapterSqlite {
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

		Ok(Self { db })
	}
}

#[async_trait]
impl ContentAdapter for ContentAdapterSqlite {
	// Posts
	//*******
	async fn list_posts(&self, opts: &ListPostsOptions<'_>) -> ApiResult<Vec<PostRecord>> {
		post::list(&self.db, opts).await
	}

	async fn read_post_by_slug(&self, slug: &str) -> ApiResult<PostRecord> {
		post::read_by_slug(&self.db, slug).await
	}

	async fn create_post(
		&self,
		author_id: AccountId,
		data: &CreatePostData<'_>,
	) -> ApiResult<PostRecord> {
		post::create(&self.db, author_id, data).await
	}

	async fn update_post(&self, post_id: i64, data: &UpdatePostData<'_>) -> ApiResult<PostRecord> {
		post::update(&self.db, post_id, data).await
	}

	async fn set_post_published(&self, post_id: i64, is_published: bool) -> ApiResult<PostRecord> {
		post::set_published(&self.db, post_id, is_published).await
	}

	async fn delete_post(&self, post_id: i64) -> ApiResult<()> {
		post::delete(&self.db, post_id).await
	}

	async fn delete_posts_by_author(&self, author_id: AccountId) -> ApiResult<u32> {
		post::delete_by_author(&self.db, author_id).await
	}

	// Configuration entries
	//***********************
	async fn list_configs(
		&self,
		opts: &ListConfigsOptions<'_>,
	) -> ApiResult<Vec<ConfigEntryRecord>> {
		config::list(&self.db, opts).await
	}

	async fn read_config(&self, key: &str) -> ApiResult<ConfigEntryRecord> {
		config::read(&self.db, key).await
	}

	async fn create_config(&self, data: &CreateConfigData<'_>) -> ApiResult<ConfigEntryRecord> {
		config::create(&self.db, data).await
	}

	async fn update_config_value(
		&self,
		key: &str,
		value: Option<&str>,
	) -> ApiResult<ConfigEntryRecord> {
		config::update_value(&self.db, key, value).await
	}

	async fn delete_config(&self, key: &str) -> ApiResult<()> {
		config::delete(&self.db, key).await
	}

	async fn reset_configs_to_default(&self, category: Option<ConfigCategory>) -> ApiResult<u32> {
		config::reset_to_default(&self.db, category).await
	}

	async fn seed_configs(&self, entries: &[CreateConfigData<'_>]) -> ApiResult<u32> {
		config::seed(&self.db, entries).await
	}

	// Contact messages
	//******************
	async fn create_contact_message(
		&self,
		data: &CreateContactMessageData<'_>,
	) -> ApiResult<ContactMessageRecord> {
		contact::create(&self.db, data).await
	}

	async fn list_contact_messages(
		&self,
		unread_only: bool,
	) -> ApiResult<Vec<ContactMessageRecord>> {
		contact::list(&self.db, unread_only).await
	}

	async fn read_contact_message(&self, message_id: i64) -> ApiResult<ContactMessageRecord> {
		contact::read(&self.db, message_id).await
	}

	async fn update_contact_message_read(
		&self,
		message_id: i64,
		is_read: bool,
	) -> ApiResult<ContactMessageRecord> {
		contact::update_read(&self.db, message_id, is_read).await
	}

	async fn delete_contact_message(&self, message_id: i64) -> ApiResult<()> {
		contact::delete(&self.db, message_id).await
	}
}

// vim: ts=4
