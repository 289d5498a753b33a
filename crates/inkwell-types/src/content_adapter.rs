//! Adapter that stores the content entities: posts, configuration
//! entries, and contact messages.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::fmt::Debug;

use crate::config::{ConfigCategory, ConfigType};
use crate::prelude::*;

// Posts //
//*******//

/// A stored blog post, author fields joined in
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostRecord {
	pub post_id: i64,
	pub title: Box<str>,
	pub content: Box<str>,
	pub slug: Box<str>,
	pub author_id: AccountId,
	pub author_email: Box<str>,
	pub author_name: Box<str>,
	pub is_published: bool,
	pub image: Option<Box<str>>,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

/// How the slug of a new or renamed post is assigned.
///
/// `Derived` slugs come from the title; on a UNIQUE violation the adapter
/// retries with `-1`, `-2`, ... suffixes until an unused slug is found.
/// `Explicit` slugs were supplied by the caller; a collision is a
/// `Conflict`, never silently suffixed.
#[derive(Debug, Clone, Copy)]
pub enum SlugSpec<'a> {
	Explicit(&'a str),
	Derived(&'a str),
}

impl<'a> SlugSpec<'a> {
	pub fn base(&self) -> &'a str {
		match self {
			SlugSpec::Explicit(s) | SlugSpec::Derived(s) => s,
		}
	}
}

/// Author email and display name are denormalized into the post row at
/// creation time; the adapters keep sensitive account data and content in
/// separate stores, so there is no join to the accounts table.
#[derive(Debug)]
pub struct CreatePostData<'a> {
	pub title: &'a str,
	pub content: &'a str,
	pub slug: SlugSpec<'a>,
	pub is_published: bool,
	pub image: Option<&'a str>,
	pub author_email: &'a str,
	pub author_name: &'a str,
}

/// Field-wise post update; `None` leaves the column untouched
#[derive(Debug, Default)]
pub struct UpdatePostData<'a> {
	pub title: Option<&'a str>,
	pub content: Option<&'a str>,
	pub slug: Option<&'a str>,
	pub is_published: Option<bool>,
	pub image: Option<Option<&'a str>>,
}

/// Options for listing posts
#[derive(Debug, Default)]
pub struct ListPostsOptions<'a> {
	/// Restrict to published posts (visibility rule for non-staff readers)
	pub published_only: bool,
	/// With `published_only`, additionally include unpublished posts owned
	/// by this account (authors always see their own)
	pub viewer_id: Option<AccountId>,
	/// Filter by author email
	pub author_email: Option<&'a str>,
	/// Filter by author id (my_posts)
	pub author_id: Option<AccountId>,
	/// Substring search across title and content
	pub search: Option<&'a str>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

// Configuration entries //
//***********************//

/// A stored configuration entry. The raw value is text; interpretation
/// is governed entirely by `typ`.
#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigEntryRecord {
	pub key: Box<str>,
	pub value: Option<Box<str>>,
	pub default_value: Option<Box<str>>,
	pub category: ConfigCategory,
	#[serde(rename = "type")]
	pub typ: ConfigType,
	pub label: Box<str>,
	pub description: Option<Box<str>>,
	pub is_required: bool,
	pub is_public: bool,
	pub order: i64,
	pub created_at: Timestamp,
	pub updated_at: Timestamp,
}

impl ConfigEntryRecord {
	/// Live value if set and non-empty, else the default
	pub fn effective_raw(&self) -> Option<&str> {
		match self.value.as_deref() {
			Some(v) if !v.is_empty() => Some(v),
			_ => self.default_value.as_deref().filter(|v| !v.is_empty()),
		}
	}
}

#[derive(Debug, Clone)]
pub struct CreateConfigData<'a> {
	pub key: &'a str,
	pub value: Option<&'a str>,
	pub default_value: Option<&'a str>,
	pub category: ConfigCategory,
	pub typ: ConfigType,
	pub label: &'a str,
	pub description: Option<&'a str>,
	pub is_required: bool,
	pub is_public: bool,
	pub order: i64,
}

/// Options for listing configuration entries
#[derive(Debug, Default)]
pub struct ListConfigsOptions<'a> {
	pub category: Option<ConfigCategory>,
	/// Substring search across key, label, description
	pub search: Option<&'a str>,
	pub public_only: bool,
}

// Contact messages //
//******************//

#[skip_serializing_none]
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageRecord {
	pub message_id: i64,
	pub name: Box<str>,
	pub email: Box<str>,
	pub phone: Option<Box<str>>,
	pub subject: Box<str>,
	pub message: Box<str>,
	pub is_read: bool,
	pub created_at: Timestamp,
}

#[derive(Debug)]
pub struct CreateContactMessageData<'a> {
	pub name: &'a str,
	pub email: &'a str,
	pub phone: Option<&'a str>,
	pub subject: &'a str,
	pub message: &'a str,
}

/// An Inkwell content adapter.
///
/// Stores posts, configuration entries, and contact messages. Uniqueness
/// of slugs and configuration keys is enforced by the store's constraints,
/// with violation detection instead of check-then-write.
#[async_trait]
pub trait ContentAdapter: Debug + Send + Sync {
	// Posts
	//*******
	async fn list_posts(&self, opts: &ListPostsOptions<'_>) -> ApiResult<Vec<PostRecord>>;
	async fn read_post_by_slug(&self, slug: &str) -> ApiResult<PostRecord>;
	async fn create_post(
		&self,
		author_id: AccountId,
		data: &CreatePostData<'_>,
	) -> ApiResult<PostRecord>;
	async fn update_post(&self, post_id: i64, data: &UpdatePostData<'_>) -> ApiResult<PostRecord>;
	async fn set_post_published(&self, post_id: i64, is_published: bool) -> ApiResult<PostRecord>;
	async fn delete_post(&self, post_id: i64) -> ApiResult<()>;
	/// Account deletion cascades to the author's posts; returns how many
	/// were removed
	async fn delete_posts_by_author(&self, author_id: AccountId) -> ApiResult<u32>;

	// Configuration entries
	//***********************
	async fn list_configs(&self, opts: &ListConfigsOptions<'_>) -> ApiResult<Vec<ConfigEntryRecord>>;
	async fn read_config(&self, key: &str) -> ApiResult<ConfigEntryRecord>;
	/// A duplicate key surfaces as `Error::Conflict` from the unique
	/// constraint
	async fn create_config(&self, data: &CreateConfigData<'_>) -> ApiResult<ConfigEntryRecord>;
	async fn update_config_value(
		&self,
		key: &str,
		value: Option<&str>,
	) -> ApiResult<ConfigEntryRecord>;
	async fn delete_config(&self, key: &str) -> ApiResult<()>;
	/// Copies each non-empty default over the live value; returns how many
	/// entries were actually reset
	async fn reset_configs_to_default(&self, category: Option<ConfigCategory>) -> ApiResult<u32>;
	/// Idempotent seeding: one transaction of insert-if-absent per entry,
	/// safe to run concurrently at process start. Returns inserted count.
	async fn seed_configs(&self, entries: &[CreateConfigData<'_>]) -> ApiResult<u32>;

	// Contact messages
	//******************
	async fn create_contact_message(
		&self,
		data: &CreateContactMessageData<'_>,
	) -> ApiResult<ContactMessageRecord>;
	async fn list_contact_messages(&self, unread_only: bool)
	-> ApiResult<Vec<ContactMessageRecord>>;
	async fn read_contact_message(&self, message_id: i64) -> ApiResult<ContactMessageRecord>;
	async fn update_contact_message_read(
		&self,
		message_id: i64,
		is_read: bool,
	) -> ApiResult<ContactMessageRecord>;
	async fn delete_contact_message(&self, message_id: i64) -> ApiResult<()>;
}

// vim: ts=4
