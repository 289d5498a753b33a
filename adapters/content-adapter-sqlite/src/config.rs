//! Configuration entry storage.
//!
//! Key uniqueness comes from the primary key; creation detects the
//! constraint violation instead of pre-checking. Seeding uses
//! INSERT OR IGNORE inside one transaction so concurrent process starts
//! are safe and never overwrite operator edits.

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use inkwell::config::{ConfigCategory, ConfigType};
use inkwell::content_adapter::{ConfigEntryRecord, CreateConfigData, ListConfigsOptions};
use inkwell::prelude::*;

const COLUMNS: &str = "key, value, default_value, category, type, label, description, \
	is_required, is_public, sort_order, created_at, updated_at";

fn row_to_record(row: &SqliteRow) -> Result<ConfigEntryRecord, sqlx::Error> {
	let category: &str = row.try_get("category")?;
	let typ: &str = row.try_get("type")?;
	Ok(ConfigEntryRecord {
		key: row.try_get("key")?,
		value: row.try_get("value")?,
		default_value: row.try_get("default_value")?,
		category: ConfigCategory::parse(category).ok_or(sqlx::Error::RowNotFound)?,
		typ: ConfigType::parse(typ).ok_or(sqlx::Error::RowNotFound)?,
		label: row.try_get("label")?,
		description: row.try_get("description")?,
		is_required: row.try_get("is_required")?,
		is_public: row.try_get("is_public")?,
		order: row.try_get("sort_order")?,
		created_at: Timestamp(row.try_get("created_at")?),
		updated_at: Timestamp(row.try_get("updated_at")?),
	})
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListConfigsOptions<'_>,
) -> ApiResult<Vec<ConfigEntryRecord>> {
	let mut query =
		sqlx::QueryBuilder::new(format!("SELECT {} FROM configurations WHERE 1=1", COLUMNS));

	if let Some(category) = opts.category {
		query.push(" AND category = ").push_bind(category.as_str());
	}
	if opts.public_only {
		query.push(" AND is_public = 1");
	}
	if let Some(search) = opts.search {
		let pattern = format!("%{}%", search);
		query
			.push(" AND (key LIKE ")
			.push_bind(pattern.clone())
			.push(" OR label LIKE ")
			.push_bind(pattern.clone())
			.push(" OR description LIKE ")
			.push_bind(pattern)
			.push(")");
	}

	query.push(" ORDER BY category, sort_order, label");

	let res = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(res.iter().map(row_to_record))
}

pub(crate) async fn read(db: &SqlitePool, key: &str) -> ApiResult<ConfigEntryRecord> {
	let query = format!("SELECT {} FROM configurations WHERE key = ?", COLUMNS);
	let res = sqlx::query(&query).bind(key).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn create(
	db: &SqlitePool,
	data: &CreateConfigData<'_>,
) -> ApiResult<ConfigEntryRecord> {
	let query = format!(
		"INSERT INTO configurations (key, value, default_value, category, type, label, description, is_required, is_public, sort_order)
		VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?) RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query)
		.bind(data.key)
		.bind(data.value)
		.bind(data.default_value)
		.bind(data.category.as_str())
		.bind(data.typ.as_str())
		.bind(data.label)
		.bind(data.description)
		.bind(data.is_required)
		.bind(data.is_public)
		.bind(data.order)
		.fetch_one(db)
		.await;

	match res {
		Err(err) if is_unique_violation(&err) => Err(Error::Conflict("key already in use".into())),
		res => map_res(res, row_to_record),
	}
}

pub(crate) async fn update_value(
	db: &SqlitePool,
	key: &str,
	value: Option<&str>,
) -> ApiResult<ConfigEntryRecord> {
	let query = format!(
		"UPDATE configurations SET value = ?, updated_at = unixepoch() WHERE key = ? RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query).bind(value).bind(key).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn delete(db: &SqlitePool, key: &str) -> ApiResult<()> {
	let res = sqlx::query("DELETE FROM configurations WHERE key = ?")
		.bind(key)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 { Err(Error::NotFound) } else { Ok(()) }
}

pub(crate) async fn reset_to_default(
	db: &SqlitePool,
	category: Option<ConfigCategory>,
) -> ApiResult<u32> {
	let mut query = sqlx::QueryBuilder::new(
		"UPDATE configurations SET value = default_value, updated_at = unixepoch()
		WHERE default_value IS NOT NULL AND default_value != ''",
	);
	if let Some(category) = category {
		query.push(" AND category = ").push_bind(category.as_str());
	}

	let res = query
		.build()
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	Ok(res.rows_affected() as u32)
}

pub(crate) async fn seed(db: &SqlitePool, entries: &[CreateConfigData<'_>]) -> ApiResult<u32> {
	let mut tx = db.begin().await.inspect_err(inspect).map_err(|_| Error::DbError)?;

	let mut inserted = 0u32;
	for data in entries {
		let res = sqlx::query(
			"INSERT OR IGNORE INTO configurations (key, value, default_value, category, type, label, description, is_required, is_public, sort_order)
			VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
		)
		.bind(data.key)
		.bind(data.value)
		.bind(data.default_value)
		.bind(data.category.as_str())
		.bind(data.typ.as_str())
		.bind(data.label)
		.bind(data.description)
		.bind(data.is_required)
		.bind(data.is_public)
		.bind(data.order)
		.execute(&mut *tx)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;
		inserted += res.rows_affected() as u32;
	}

	tx.commit().await.inspect_err(inspect).map_err(|_| Error::DbError)?;
	Ok(inserted)
}

// vim: ts=4
