//! Contact message storage

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use inkwell::content_adapter::{ContactMessageRecord, CreateContactMessageData};
use inkwell::prelude::*;

const COLUMNS: &str = "message_id, name, email, phone, subject, message, is_read, created_at";

fn row_to_record(row: &SqliteRow) -> Result<ContactMessageRecord, sqlx::Error> {
	Ok(ContactMessageRecord {
		message_id: row.try_get("message_id")?,
		name: row.try_get("name")?,
		email: row.try_get("email")?,
		phone: row.try_get("phone")?,
		subject: row.try_get("subject")?,
		message: row.try_get("message")?,
		is_read: row.try_get("is_read")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(
	db: &SqlitePool,
	data: &CreateContactMessageData<'_>,
) -> ApiResult<ContactMessageRecord> {
	let query = format!(
		"INSERT INTO contact_messages (name, email, phone, subject, message)
		VALUES (?, ?, ?, ?, ?) RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query)
		.bind(data.name)
		.bind(data.email)
		.bind(data.phone)
		.bind(data.subject)
		.bind(data.message)
		.fetch_one(db)
		.await;
	map_res(res, row_to_record)
}

pub(crate) async fn list(
	db: &SqlitePool,
	unread_only: bool,
) -> ApiResult<Vec<ContactMessageRecord>> {
	let query = if unread_only {
		format!(
			"SELECT {} FROM contact_messages WHERE is_read = 0 ORDER BY created_at DESC, message_id DESC",
			COLUMNS
		)
	} else {
		format!(
			"SELECT {} FROM contact_messages ORDER BY created_at DESC, message_id DESC",
			COLUMNS
		)
	};
	let res = sqlx::query(&query)
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(res.iter().map(row_to_record))
}

pub(crate) async fn read(db: &SqlitePool, message_id: i64) -> ApiResult<ContactMessageRecord> {
	let query = format!("SELECT {} FROM contact_messages WHERE message_id = ?", COLUMNS);
	let res = sqlx::query(&query).bind(message_id).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn update_read(
	db: &SqlitePool,
	message_id: i64,
	is_read: bool,
) -> ApiResult<ContactMessageRecord> {
	let query = format!(
		"UPDATE contact_messages SET is_read = ? WHERE message_id = ? RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query).bind(is_read).bind(message_id).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn delete(db: &SqlitePool, message_id: i64) -> ApiResult<()> {
	let res = sqlx::query("DELETE FROM contact_messages WHERE message_id = ?")
		.bind(message_id)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 { Err(Error::NotFound) } else { Ok(()) }
}

// vim: ts=4
