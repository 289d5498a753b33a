//! Configuration service: validation, typed access, and bulk operations
//! over the content adapter.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use inkwell_types::config::{ConfigCategory, ConfigValue};
use inkwell_types::content_adapter::{
	ConfigEntryRecord, ContentAdapter, CreateConfigData, ListConfigsOptions,
};

use crate::prelude::*;
use crate::value;

/// Outcome of one failed item in a bulk update
#[derive(Debug, Serialize)]
pub struct BulkError {
	pub key: String,
	pub reason: String,
}

/// Bulk updates report per-item outcomes; the batch never aborts on the
/// first failure.
#[derive(Debug)]
pub struct BulkOutcome {
	pub updated: Vec<ConfigEntryRecord>,
	pub errors: Vec<BulkError>,
}

/// Main interface for accessing and managing configuration entries.
/// Owned by the application state and passed explicitly to handlers; no
/// ambient global configuration exists.
#[derive(Clone)]
pub struct ConfigService {
	content: Arc<dyn ContentAdapter>,
}

impl ConfigService {
	pub fn new(content: Arc<dyn ContentAdapter>) -> Self {
		Self { content }
	}

	/// Typed read that fails closed: an absent key yields the supplied
	/// default, not an error.
	pub async fn get(&self, key: &str, default: ConfigValue) -> ApiResult<ConfigValue> {
		match self.content.read_config(key).await {
			Ok(entry) => Ok(value::effective_value(&entry)),
			Err(Error::NotFound) => Ok(default),
			Err(err) => Err(err),
		}
	}

	/// Validate and persist a new value for an existing entry
	pub async fn set(&self, key: &str, raw: Option<&str>) -> ApiResult<ConfigEntryRecord> {
		let entry = self.content.read_config(key).await?;

		let mut errors = FieldErrors::new("Error updating configuration");
		if let Some(raw) = raw {
			if let Err(reason) = value::validate_value(entry.typ, raw) {
				errors.add("value", reason);
			}
		}
		if let Err(reason) =
			value::validate_required(entry.is_required, raw, entry.default_value.as_deref())
		{
			errors.add("value", reason);
		}
		errors.into_result()?;

		self.content.update_config_value(key, raw).await
	}

	/// Validate and create a new entry. A duplicate key is reported as a
	/// field error on `key` once the store's unique constraint fires.
	pub async fn create(&self, data: &CreateConfigData<'_>) -> ApiResult<ConfigEntryRecord> {
		let mut errors = FieldErrors::new("Error creating configuration");
		if data.key.is_empty() {
			errors.add("key", "Key is required");
		}
		if data.label.is_empty() {
			errors.add("label", "Label is required");
		}
		if let Some(raw) = data.value {
			if let Err(reason) = value::validate_value(data.typ, raw) {
				errors.add("value", reason);
			}
		}
		if let Some(raw) = data.default_value {
			if let Err(reason) = value::validate_value(data.typ, raw) {
				errors.add("defaultValue", reason);
			}
		}
		if let Err(reason) = value::validate_required(data.is_required, data.value, data.default_value)
		{
			errors.add("value", reason);
		}
		errors.into_result()?;

		match self.content.create_config(data).await {
			Err(Error::Conflict(_)) => Err(Error::field("key", "This key is already in use")),
			res => res,
		}
	}

	/// Required entries cannot be deleted
	pub async fn delete(&self, key: &str) -> ApiResult<()> {
		let entry = self.content.read_config(key).await?;
		if entry.is_required {
			return Err(Error::Validation("Cannot delete a required configuration".into()));
		}
		self.content.delete_config(key).await
	}

	pub async fn list(&self, opts: &ListConfigsOptions<'_>) -> ApiResult<Vec<ConfigEntryRecord>> {
		self.content.list_configs(opts).await
	}

	/// Entries grouped by category, preserving the store's
	/// (category, order, label) ordering within each group
	pub async fn list_grouped(
		&self,
		opts: &ListConfigsOptions<'_>,
	) -> ApiResult<Vec<(ConfigCategory, Vec<ConfigEntryRecord>)>> {
		let entries = self.content.list_configs(opts).await?;
		let mut grouped: Vec<(ConfigCategory, Vec<ConfigEntryRecord>)> = Vec::new();
		for entry in entries {
			match grouped.last_mut() {
				Some((cat, bucket)) if *cat == entry.category => bucket.push(entry),
				_ => grouped.push((entry.category, vec![entry])),
			}
		}
		Ok(grouped)
	}

	/// Public map: key -> effective typed value, `is_public` entries only
	pub async fn public_map(&self) -> ApiResult<BTreeMap<String, ConfigValue>> {
		let opts = ListConfigsOptions { public_only: true, ..Default::default() };
		let entries = self.content.list_configs(&opts).await?;
		Ok(entries
			.into_iter()
			.map(|e| {
				let v = value::effective_value(&e);
				(e.key.into_string(), v)
			})
			.collect())
	}

	/// Public map grouped by category
	pub async fn public_map_grouped(
		&self,
	) -> ApiResult<BTreeMap<&'static str, BTreeMap<String, ConfigValue>>> {
		let opts = ListConfigsOptions { public_only: true, ..Default::default() };
		let entries = self.content.list_configs(&opts).await?;
		let mut grouped: BTreeMap<&'static str, BTreeMap<String, ConfigValue>> = BTreeMap::new();
		for e in entries {
			let v = value::effective_value(&e);
			grouped.entry(e.category.as_str()).or_default().insert(e.key.into_string(), v);
		}
		Ok(grouped)
	}

	/// Public site/seo/social maps for the site-info endpoint
	pub async fn site_info(&self) -> ApiResult<BTreeMap<&'static str, BTreeMap<String, ConfigValue>>> {
		let mut info = BTreeMap::new();
		for category in [ConfigCategory::Site, ConfigCategory::Seo, ConfigCategory::Social] {
			let opts = ListConfigsOptions {
				category: Some(category),
				public_only: true,
				..Default::default()
			};
			let entries = self.content.list_configs(&opts).await?;
			info.insert(
				category.as_str(),
				entries
					.into_iter()
					.map(|e| {
						let v = value::effective_value(&e);
						(e.key.into_string(), v)
					})
					.collect(),
			);
		}
		Ok(info)
	}

	/// Apply `set` per item independently, collecting per-item outcomes
	pub async fn bulk_set(&self, items: &[(String, Option<String>)]) -> ApiResult<BulkOutcome> {
		let mut outcome = BulkOutcome { updated: Vec::new(), errors: Vec::new() };

		for (key, raw) in items {
			if key.is_empty() {
				outcome
					.errors
					.push(BulkError { key: key.clone(), reason: "Key is required".into() });
				continue;
			}
			match self.set(key, raw.as_deref()).await {
				Ok(entry) => outcome.updated.push(entry),
				Err(Error::NotFound) => outcome
					.errors
					.push(BulkError { key: key.clone(), reason: "Configuration not found".into() }),
				Err(Error::FieldValidation(errs)) => {
					let reason = errs
						.errors
						.values()
						.flatten()
						.next()
						.cloned()
						.unwrap_or_else(|| errs.message.clone());
					outcome.errors.push(BulkError { key: key.clone(), reason });
				}
				Err(err) => {
					warn!("bulk update failed for '{}': {}", key, err);
					outcome
						.errors
						.push(BulkError { key: key.clone(), reason: "Update failed".into() });
				}
			}
		}

		Ok(outcome)
	}

	/// Overwrite live values with defaults for every matching entry that
	/// has one; entries lacking a default are left untouched and not
	/// counted.
	pub async fn reset_to_defaults(&self, category: Option<ConfigCategory>) -> ApiResult<u32> {
		let count = self.content.reset_configs_to_default(category).await?;
		info!("{} configurations reset to defaults", count);
		Ok(count)
	}

	/// Reset a single entry; an entry without a default is left untouched
	/// and reports 0
	pub async fn reset_key_to_default(&self, key: &str) -> ApiResult<u32> {
		let entry = self.content.read_config(key).await?;
		match entry.default_value.as_deref().filter(|v| !v.is_empty()) {
			Some(default) => {
				self.content.update_config_value(key, Some(default)).await?;
				info!("Configuration '{}' reset to default", key);
				Ok(1)
			}
			None => Ok(0),
		}
	}

	/// Seed the built-in default entries; idempotent and safe to run
	/// concurrently at process start.
	pub async fn seed_defaults(&self) -> ApiResult<u32> {
		let entries = crate::seed::default_entries();
		let inserted = self.content.seed_configs(&entries).await?;
		if inserted > 0 {
			info!("Seeded {} default configurations", inserted);
		}
		Ok(inserted)
	}
}

impl std::fmt::Debug for ConfigService {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("ConfigService").finish_non_exhaustive()
	}
}

// vim: ts=4
