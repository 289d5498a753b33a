//! Configuration management handlers (admin) and public configuration
//! reads.

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;
use std::collections::BTreeMap;

use inkwell_core::extract::Auth;
use inkwell_types::config::{ConfigCategory, ConfigType, ConfigValue};
use inkwell_types::content_adapter::{ConfigEntryRecord, CreateConfigData, ListConfigsOptions};

use crate::prelude::*;
use crate::service::{BulkError, ConfigService};
use crate::value;

fn service(app: &App) -> ConfigService {
	ConfigService::new(app.content_adapter.clone())
}

/// Full configuration view with the converted value alongside the raw one
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigView {
	pub key: Box<str>,
	pub value: Option<Box<str>>,
	pub value_typed: ConfigValue,
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

impl From<ConfigEntryRecord> for ConfigView {
	fn from(entry: ConfigEntryRecord) -> Self {
		let value_typed = value::effective_value(&entry);
		ConfigView {
			key: entry.key,
			value: entry.value,
			value_typed,
			default_value: entry.default_value,
			category: entry.category,
			typ: entry.typ,
			label: entry.label,
			description: entry.description,
			is_required: entry.is_required,
			is_public: entry.is_public,
			order: entry.order,
			created_at: entry.created_at,
			updated_at: entry.updated_at,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct ListConfigsQuery {
	pub category: Option<String>,
	pub search: Option<String>,
	#[serde(default)]
	pub group_by_category: Option<String>,
}

fn parse_category(raw: &str) -> ApiResult<ConfigCategory> {
	ConfigCategory::parse(raw)
		.ok_or_else(|| Error::Validation(format!("Unknown category: {}", raw)))
}

fn flag_is_true(raw: Option<&str>) -> bool {
	raw.is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroupView {
	pub category: ConfigCategory,
	pub label: &'static str,
	pub configurations: Vec<ConfigView>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ConfigListing {
	Flat(Vec<ConfigView>),
	Grouped(Vec<CategoryGroupView>),
}

/// GET /api/configurations - List configuration entries (staff only).
/// Supports ?category=, ?search= and ?group_by_category=true.
pub async fn list_configs(
	State(app): State<App>,
	Auth(auth): Auth,
	Query(query): Query<ListConfigsQuery>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ConfigListing>>)> {
	auth.require_staff()?;

	let category = query.category.as_deref().map(parse_category).transpose()?;
	let opts = ListConfigsOptions {
		category,
		search: query.search.as_deref(),
		..Default::default()
	};

	let svc = service(&app);
	if flag_is_true(query.group_by_category.as_deref()) {
		let grouped = svc.list_grouped(&opts).await?;
		let groups: Vec<CategoryGroupView> = grouped
			.into_iter()
			.map(|(category, entries)| CategoryGroupView {
				category,
				label: category.label(),
				configurations: entries.into_iter().map(ConfigView::from).collect(),
			})
			.collect();
		let count = groups.len();
		let response = ApiResponse::new(ConfigListing::Grouped(groups)).with_count(count);
		Ok((StatusCode::OK, Json(response)))
	} else {
		let entries = svc.list(&opts).await?;
		let views: Vec<ConfigView> = entries.into_iter().map(ConfigView::from).collect();
		let count = views.len();
		let response = ApiResponse::new(ConfigListing::Flat(views)).with_count(count);
		Ok((StatusCode::OK, Json(response)))
	}
}

/// GET /api/configurations/{key} - Read one entry (staff only)
pub async fn get_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(key): Path<String>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ConfigView>>)> {
	auth.require_staff()?;

	let entry = app.content_adapter.read_config(&key).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(entry.into()))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigReq {
	pub key: String,
	pub value: Option<String>,
	pub default_value: Option<String>,
	pub category: ConfigCategory,
	#[serde(rename = "type")]
	pub typ: ConfigType,
	pub label: String,
	pub description: Option<String>,
	#[serde(default)]
	pub is_required: bool,
	#[serde(default)]
	pub is_public: bool,
	#[serde(default)]
	pub order: i64,
}

/// POST /api/configurations - Create a new entry (staff only)
pub async fn create_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateConfigReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ConfigView>>)> {
	auth.require_staff()?;

	let data = CreateConfigData {
		key: &req.key,
		value: req.value.as_deref(),
		default_value: req.default_value.as_deref(),
		category: req.category,
		typ: req.typ,
		label: &req.label,
		description: req.description.as_deref(),
		is_required: req.is_required,
		is_public: req.is_public,
		order: req.order,
	};
	let entry = service(&app).create(&data).await?;

	info!("Configuration '{}' created by {}", entry.key, auth.email);
	let response =
		ApiResponse::new(ConfigView::from(entry)).with_message("Configuration created successfully");
	Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct UpdateConfigReq {
	#[serde(default)]
	pub value: Patch<String>,
}

/// PATCH /api/configurations/{key} - Update an entry's value (staff only).
/// An explicit `null` clears the live value back to the default.
pub async fn update_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(key): Path<String>,
	Json(req): Json<UpdateConfigReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ConfigView>>)> {
	auth.require_staff()?;

	let entry = match req.value.as_option() {
		Some(raw) => service(&app).set(&key, raw.map(String::as_str)).await?,
		None => app.content_adapter.read_config(&key).await?,
	};

	info!("Configuration '{}' updated by {}", key, auth.email);
	let response =
		ApiResponse::new(ConfigView::from(entry)).with_message("Configuration updated successfully");
	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/configurations/{key} - Delete an entry (staff only).
/// Required entries are refused with 400.
pub async fn delete_config(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(key): Path<String>,
) -> ApiResult<StatusCode> {
	auth.require_staff()?;

	service(&app).delete(&key).await?;
	info!("Configuration '{}' deleted by {}", key, auth.email);
	Ok(StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
pub struct BulkItemReq {
	pub key: String,
	#[serde(default)]
	pub value: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct BulkUpdateReq {
	pub configurations: Vec<BulkItemReq>,
}

#[derive(Debug, Serialize)]
pub struct BulkUpdateRes {
	pub updated: Vec<ConfigView>,
	pub errors: Vec<BulkError>,
}

/// POST /api/configurations/bulk_update - Apply value updates per entry
/// independently, reporting which keys succeeded and which failed.
pub async fn bulk_update(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<BulkUpdateReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<BulkUpdateRes>>)> {
	auth.require_staff()?;

	if req.configurations.is_empty() {
		return Err(Error::Validation("No configurations provided".into()));
	}

	let items: Vec<(String, Option<String>)> =
		req.configurations.into_iter().map(|c| (c.key, c.value)).collect();
	let outcome = service(&app).bulk_set(&items).await?;

	let message = format!("{} configurations updated successfully", outcome.updated.len());
	let response = ApiResponse::new(BulkUpdateRes {
		updated: outcome.updated.into_iter().map(ConfigView::from).collect(),
		errors: outcome.errors,
	})
	.with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct ResetToDefaultsReq {
	#[serde(default)]
	pub key: Option<String>,
	#[serde(default)]
	pub category: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ResetToDefaultsRes {
	pub reset: u32,
}

/// POST /api/configurations/reset_to_defaults - Restore defaults for one
/// key, one category, or everything
pub async fn reset_to_defaults(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<ResetToDefaultsReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ResetToDefaultsRes>>)> {
	auth.require_staff()?;

	let reset = if let Some(key) = req.key.as_deref() {
		service(&app).reset_key_to_default(key).await?
	} else {
		let category = req.category.as_deref().map(parse_category).transpose()?;
		service(&app).reset_to_defaults(category).await?
	};

	let message = format!("{} configurations reset to default values", reset);
	let response = ApiResponse::new(ResetToDefaultsRes { reset }).with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

#[derive(Debug, Serialize)]
pub struct ChoiceView {
	pub value: &'static str,
	pub label: &'static str,
}

/// GET /api/configurations/categories - The closed category set
pub async fn list_categories(
	Auth(auth): Auth,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<ChoiceView>>>)> {
	auth.require_staff()?;

	let choices = ConfigCategory::ALL
		.iter()
		.map(|c| ChoiceView { value: c.as_str(), label: c.label() })
		.collect();
	Ok((StatusCode::OK, Json(ApiResponse::new(choices))))
}

/// GET /api/configurations/types - The closed value-type set
pub async fn list_types(
	Auth(auth): Auth,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<ChoiceView>>>)> {
	auth.require_staff()?;

	let choices = ConfigType::ALL
		.iter()
		.map(|t| ChoiceView { value: t.as_str(), label: t.label() })
		.collect();
	Ok((StatusCode::OK, Json(ApiResponse::new(choices))))
}

// Public endpoints //
//******************//

#[derive(Debug, Deserialize)]
pub struct PublicConfigsQuery {
	#[serde(default)]
	pub group_by_category: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum PublicConfigs {
	Flat(BTreeMap<String, ConfigValue>),
	Grouped(BTreeMap<&'static str, BTreeMap<String, ConfigValue>>),
}

/// GET /api/public/configurations - Unauthenticated key -> typed value
/// map of public entries
pub async fn public_configurations(
	State(app): State<App>,
	Query(query): Query<PublicConfigsQuery>,
) -> ApiResult<(StatusCode, Json<PublicConfigs>)> {
	let svc = service(&app);
	let body = if flag_is_true(query.group_by_category.as_deref()) {
		PublicConfigs::Grouped(svc.public_map_grouped().await?)
	} else {
		PublicConfigs::Flat(svc.public_map().await?)
	};
	Ok((StatusCode::OK, Json(body)))
}

/// GET /api/public/site-info - Public site/seo/social configuration maps
pub async fn site_info(
	State(app): State<App>,
) -> ApiResult<(StatusCode, Json<BTreeMap<&'static str, BTreeMap<String, ConfigValue>>>)> {
	Ok((StatusCode::OK, Json(service(&app).site_info().await?)))
}

// vim: ts=4
