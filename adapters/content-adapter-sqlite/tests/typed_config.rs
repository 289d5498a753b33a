//! End-to-end tests of the typed configuration service over the SQLite
//! adapter: write-time validation, lenient read-time coercion, and the
//! typed round-trip.

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use inkwell::config::{ConfigCategory, ConfigType, ConfigValue};
	use inkwell::content_adapter::{ContentAdapter, CreateConfigData};
	use inkwell::prelude::*;
	use inkwell_config::ConfigService;
	use inkwell_content_adapter_sqlite::ContentAdapterSqlite;
	use tempfile::TempDir;

	async fn create_test_service() -> (ConfigService, Arc<ContentAdapterSqlite>, TempDir) {
		let tmp_dir = TempDir::new().expect("Failed to create temp dir");
		let db_path = tmp_dir.path().join("content.db");
		let adapter =
			Arc::new(ContentAdapterSqlite::new(db_path).await.expect("Failed to create adapter"));
		(ConfigService::new(adapter.clone()), adapter, tmp_dir)
	}

	fn entry<'a>(key: &'a str, typ: ConfigType) -> CreateConfigData<'a> {
		CreateConfigData {
			key,
			value: None,
			default_value: None,
			category: ConfigCategory::General,
			typ,
			label: "Test entry",
			description: None,
			is_required: false,
			is_public: false,
			order: 0,
		}
	}

	#[tokio::test]
	async fn test_number_round_trip() {
		let (svc, _adapter, _tmp) = create_test_service().await;
		svc.create(&entry("answer", ConfigType::Number)).await.expect("create failed");

		// "abc" fails validation with a field error on value
		let res = svc.set("answer", Some("abc")).await;
		match res {
			Err(Error::FieldValidation(errs)) => assert!(errs.errors.contains_key("value")),
			other => panic!("expected field validation error, got {:?}", other),
		}

		// "42" round-trips as integer 42
		svc.set("answer", Some("42")).await.expect("set failed");
		let value = svc.get("answer", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Int(42));

		svc.set("answer", Some("2.5")).await.expect("set failed");
		let value = svc.get("answer", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Float(2.5));
	}

	#[tokio::test]
	async fn test_boolean_round_trip_and_leniency() {
		let (svc, adapter, _tmp) = create_test_service().await;
		svc.create(&entry("flag", ConfigType::Boolean)).await.expect("create failed");

		svc.set("flag", Some("YES")).await.expect("set failed");
		let value = svc.get("flag", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Bool(true));

		// "maybe" is rejected at write time
		assert!(svc.set("flag", Some("maybe")).await.is_err());

		// ...but stale stored data is read leniently as false, never an error
		adapter.update_config_value("flag", Some("maybe")).await.expect("raw update failed");
		let value = svc.get("flag", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Bool(false));
	}

	#[tokio::test]
	async fn test_malformed_json_reads_as_raw_string() {
		let (svc, adapter, _tmp) = create_test_service().await;
		svc.create(&entry("blob", ConfigType::Json)).await.expect("create failed");

		svc.set("blob", Some(r#"{"a": [1, 2]}"#)).await.expect("set failed");
		let value = svc.get("blob", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Json(serde_json::json!({"a": [1, 2]})));

		// Malformed stored JSON (written behind the service's back) comes
		// back verbatim instead of erroring
		adapter.update_config_value("blob", Some("{broken")).await.expect("raw update failed");
		let value = svc.get("blob", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Text("{broken".into()));
	}

	#[tokio::test]
	async fn test_get_absent_key_returns_default() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		let value = svc
			.get("never_created", ConfigValue::Text("fallback".into()))
			.await
			.expect("get failed");
		assert_eq!(value, ConfigValue::Text("fallback".into()));
	}

	#[tokio::test]
	async fn test_required_entry_validation() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		// Required with neither value nor default is rejected at creation
		let mut required = entry("must_have", ConfigType::Text);
		required.is_required = true;
		assert!(svc.create(&required).await.is_err());

		// Supplying a default makes it valid
		required.default_value = Some("fallback");
		svc.create(&required).await.expect("create failed");

		// Clearing the value is fine while the default still covers it
		svc.set("must_have", None).await.expect("clear failed");
		let value = svc.get("must_have", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Text("fallback".into()));
	}

	#[tokio::test]
	async fn test_required_entry_without_default_keeps_value() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		let mut required = entry("strict", ConfigType::Text);
		required.is_required = true;
		required.value = Some("set");
		svc.create(&required).await.expect("create failed");

		// Clearing the only value of a required entry is a field error
		assert!(svc.set("strict", None).await.is_err());
	}

	#[tokio::test]
	async fn test_public_map_excludes_private_entries() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		let mut public = entry("shown", ConfigType::Text);
		public.is_public = true;
		public.value = Some("visible");
		svc.create(&public).await.expect("create failed");

		let mut private = entry("hidden", ConfigType::Text);
		private.value = Some("secret");
		svc.create(&private).await.expect("create failed");

		let map = svc.public_map().await.expect("public map failed");
		assert!(map.contains_key("shown"));
		assert!(!map.contains_key("hidden"));
	}

	#[tokio::test]
	async fn test_bulk_set_reports_per_item_outcomes() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		svc.create(&entry("good", ConfigType::Text)).await.expect("create failed");
		svc.create(&entry("numeric", ConfigType::Number)).await.expect("create failed");

		let items = vec![
			("good".to_string(), Some("ok".to_string())),
			("numeric".to_string(), Some("not a number".to_string())),
			("missing".to_string(), Some("x".to_string())),
		];
		let outcome = svc.bulk_set(&items).await.expect("bulk failed");

		assert_eq!(outcome.updated.len(), 1);
		assert_eq!(outcome.updated[0].key.as_ref(), "good");
		assert_eq!(outcome.errors.len(), 2);

		// The valid item was persisted even though siblings failed
		let value = svc.get("good", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Text("ok".into()));
	}

	#[tokio::test]
	async fn test_delete_refuses_required_entries() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		let mut required = entry("keystone", ConfigType::Text);
		required.is_required = true;
		required.default_value = Some("x");
		svc.create(&required).await.expect("create failed");

		assert!(matches!(svc.delete("keystone").await, Err(Error::Validation(_))));

		svc.create(&entry("optional", ConfigType::Text)).await.expect("create failed");
		svc.delete("optional").await.expect("delete failed");
	}

	#[tokio::test]
	async fn test_seed_defaults_idempotent_via_service() {
		let (svc, _adapter, _tmp) = create_test_service().await;

		let first = svc.seed_defaults().await.expect("seed failed");
		assert!(first > 0);
		let second = svc.seed_defaults().await.expect("reseed failed");
		assert_eq!(second, 0);

		// The seeded site name resolves through its default
		let value = svc.get("site_name", ConfigValue::Null).await.expect("get failed");
		assert_eq!(value, ConfigValue::Text("Inkwell".into()));
	}
}

// vim: ts=4
