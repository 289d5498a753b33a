//! Integration tests for configuration storage: key uniqueness, filtered
//! listing, idempotent seeding, and reset-to-defaults.

#[cfg(test)]
mod tests {
	use inkwell::config::{ConfigCategory, ConfigType};
	use inkwell::content_adapter::{ContentAdapter, CreateConfigData, ListConfigsOptions};
	use inkwell::prelude::*;
	use inkwell_content_adapter_sqlite::ContentAdapterSqlite;
	use tempfile::TempDir;

	async fn create_test_adapter() -> (ContentAdapterSqlite, TempDir) {
		let tmp_dir = TempDir::new().expect("Failed to create temp dir");
		let db_path = tmp_dir.path().join("content.db");
		let adapter = ContentAdapterSqlite::new(db_path).await.expect("Failed to create adapter");
		(adapter, tmp_dir)
	}

	fn entry<'a>(key: &'a str, category: ConfigCategory) -> CreateConfigData<'a> {
		CreateConfigData {
			key,
			value: None,
			default_value: None,
			category,
			typ: ConfigType::Text,
			label: "Test entry",
			description: None,
			is_required: false,
			is_public: false,
			order: 0,
		}
	}

	#[tokio::test]
	async fn test_create_read_update_value() {
		let (adapter, _tmp) = create_test_adapter().await;

		let created = adapter
			.create_config(&entry("site_title", ConfigCategory::Site))
			.await
			.expect("create failed");
		assert_eq!(created.key.as_ref(), "site_title");
		assert!(created.value.is_none());

		let updated = adapter
			.update_config_value("site_title", Some("Hello"))
			.await
			.expect("update failed");
		assert_eq!(updated.value.as_deref(), Some("Hello"));

		let cleared =
			adapter.update_config_value("site_title", None).await.expect("clear failed");
		assert!(cleared.value.is_none());

		let read = adapter.read_config("site_title").await.expect("read failed");
		assert_eq!(read.key, created.key);
	}

	#[tokio::test]
	async fn test_duplicate_key_is_conflict() {
		let (adapter, _tmp) = create_test_adapter().await;

		adapter
			.create_config(&entry("dup_key", ConfigCategory::General))
			.await
			.expect("create failed");
		let res = adapter.create_config(&entry("dup_key", ConfigCategory::Site)).await;

		assert!(matches!(res, Err(Error::Conflict(_))));
	}

	#[tokio::test]
	async fn test_update_unknown_key_not_found() {
		let (adapter, _tmp) = create_test_adapter().await;
		let res = adapter.update_config_value("missing", Some("x")).await;
		assert!(matches!(res, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_list_filters_and_ordering() {
		let (adapter, _tmp) = create_test_adapter().await;

		let mut a = entry("seo_title", ConfigCategory::Seo);
		a.label = "SEO title";
		a.is_public = true;
		a.order = 1;
		adapter.create_config(&a).await.expect("create failed");

		let mut b = entry("seo_description", ConfigCategory::Seo);
		b.label = "SEO description";
		b.order = 0;
		adapter.create_config(&b).await.expect("create failed");

		let mut c = entry("site_name", ConfigCategory::Site);
		c.label = "Site name";
		c.is_public = true;
		adapter.create_config(&c).await.expect("create failed");

		// Category filter, ordered by sort_order within the category
		let opts =
			ListConfigsOptions { category: Some(ConfigCategory::Seo), ..Default::default() };
		let seo = adapter.list_configs(&opts).await.expect("list failed");
		assert_eq!(seo.len(), 2);
		assert_eq!(seo[0].key.as_ref(), "seo_description");
		assert_eq!(seo[1].key.as_ref(), "seo_title");

		// Public only never includes non-public entries
		let opts = ListConfigsOptions { public_only: true, ..Default::default() };
		let public = adapter.list_configs(&opts).await.expect("list failed");
		assert_eq!(public.len(), 2);
		assert!(public.iter().all(|e| e.is_public));

		// Search across key and label
		let opts = ListConfigsOptions { search: Some("description"), ..Default::default() };
		let found = adapter.list_configs(&opts).await.expect("list failed");
		assert_eq!(found.len(), 1);
		assert_eq!(found[0].key.as_ref(), "seo_description");
	}

	#[tokio::test]
	async fn test_delete_config() {
		let (adapter, _tmp) = create_test_adapter().await;

		adapter
			.create_config(&entry("doomed", ConfigCategory::General))
			.await
			.expect("create failed");
		adapter.delete_config("doomed").await.expect("delete failed");

		assert!(matches!(adapter.read_config("doomed").await, Err(Error::NotFound)));
		assert!(matches!(adapter.delete_config("doomed").await, Err(Error::NotFound)));
	}

	#[tokio::test]
	async fn test_seed_is_idempotent() {
		let (adapter, _tmp) = create_test_adapter().await;

		let mut seeded = entry("seeded_key", ConfigCategory::General);
		seeded.default_value = Some("default");

		let first = adapter.seed_configs(&[seeded.clone()]).await.expect("seed failed");
		assert_eq!(first, 1);

		// Operator edits the value; reseeding must not clobber it
		adapter
			.update_config_value("seeded_key", Some("edited"))
			.await
			.expect("update failed");
		let second = adapter.seed_configs(&[seeded]).await.expect("reseed failed");
		assert_eq!(second, 0);

		let read = adapter.read_config("seeded_key").await.expect("read failed");
		assert_eq!(read.value.as_deref(), Some("edited"));
	}

	#[tokio::test]
	async fn test_reset_to_defaults_counts_only_entries_with_defaults() {
		let (adapter, _tmp) = create_test_adapter().await;

		let mut with_default = entry("has_default", ConfigCategory::Site);
		with_default.value = Some("live");
		with_default.default_value = Some("factory");
		adapter.create_config(&with_default).await.expect("create failed");

		let mut without_default = entry("no_default", ConfigCategory::Site);
		without_default.value = Some("live");
		adapter.create_config(&without_default).await.expect("create failed");

		let mut other_cat = entry("other_cat", ConfigCategory::General);
		other_cat.value = Some("live");
		other_cat.default_value = Some("factory");
		adapter.create_config(&other_cat).await.expect("create failed");

		// Scoped to one category
		let reset = adapter
			.reset_configs_to_default(Some(ConfigCategory::Site))
			.await
			.expect("reset failed");
		assert_eq!(reset, 1);

		let read = adapter.read_config("has_default").await.expect("read failed");
		assert_eq!(read.value.as_deref(), Some("factory"));
		let read = adapter.read_config("no_default").await.expect("read failed");
		assert_eq!(read.value.as_deref(), Some("live"));
		let read = adapter.read_config("other_cat").await.expect("read failed");
		assert_eq!(read.value.as_deref(), Some("live"));

		// Unscoped picks up the remaining entry with a default
		let reset = adapter.reset_configs_to_default(None).await.expect("reset failed");
		assert_eq!(reset, 2);
	}
}

// vim: ts=4
