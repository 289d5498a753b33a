//! Account row management

use sqlx::{Row, SqlitePool, sqlite::SqliteRow};

use crate::utils::*;
use inkwell::account_adapter::{
	AccountRecord, CreateAccountData, ListAccountsOptions, UpdateAccountData,
};
use inkwell::prelude::*;

const COLUMNS: &str =
	"account_id, email, first_name, last_name, is_active, is_staff, is_superuser, created_at";

fn row_to_record(row: &SqliteRow) -> Result<AccountRecord, sqlx::Error> {
	Ok(AccountRecord {
		account_id: AccountId(row.try_get("account_id")?),
		email: row.try_get("email")?,
		first_name: row.try_get("first_name")?,
		last_name: row.try_get("last_name")?,
		is_active: row.try_get("is_active")?,
		is_staff: row.try_get("is_staff")?,
		is_superuser: row.try_get("is_superuser")?,
		created_at: Timestamp(row.try_get("created_at")?),
	})
}

pub(crate) async fn create(
	db: &SqlitePool,
	data: CreateAccountData<'_>,
) -> ApiResult<AccountRecord> {
	let query = format!(
		"INSERT INTO accounts (email, first_name, last_name, password, is_staff, is_active)
		VALUES (?, ?, ?, ?, ?, ?) RETURNING {}",
		COLUMNS
	);
	let res = sqlx::query(&query)
		.bind(data.email)
		.bind(data.first_name)
		.bind(data.last_name)
		.bind(data.password_hash)
		.bind(data.is_staff)
		.bind(data.is_active)
		.fetch_one(db)
		.await;

	match res {
		Err(err) if is_unique_violation(&err) => {
			Err(Error::Conflict("email already in use".into()))
		}
		res => map_res(res, row_to_record),
	}
}

pub(crate) async fn read(db: &SqlitePool, account_id: AccountId) -> ApiResult<AccountRecord> {
	let query = format!("SELECT {} FROM accounts WHERE account_id = ?", COLUMNS);
	let res = sqlx::query(&query).bind(account_id.0).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn read_by_email(db: &SqlitePool, email: &str) -> ApiResult<AccountRecord> {
	let query = format!("SELECT {} FROM accounts WHERE email = ?", COLUMNS);
	let res = sqlx::query(&query).bind(email).fetch_one(db).await;
	map_res(res, row_to_record)
}

pub(crate) async fn read_password_hash(
	db: &SqlitePool,
	email: &str,
) -> ApiResult<(AccountId, Box<str>)> {
	let res = sqlx::query("SELECT account_id, password FROM accounts WHERE email = ?")
		.bind(email)
		.fetch_one(db)
		.await;
	map_res(res, |row| Ok((AccountId(row.try_get("account_id")?), row.try_get("password")?)))
}

pub(crate) async fn update(
	db: &SqlitePool,
	account_id: AccountId,
	data: UpdateAccountData<'_>,
) -> ApiResult<AccountRecord> {
	if data.is_empty() {
		return read(db, account_id).await;
	}

	let mut query = sqlx::QueryBuilder::new("UPDATE accounts SET ");
	let mut set = query.separated(", ");
	if let Some(email) = data.email {
		set.push("email = ").push_bind_unseparated(email);
	}
	if let Some(first_name) = data.first_name {
		set.push("first_name = ").push_bind_unseparated(first_name);
	}
	if let Some(last_name) = data.last_name {
		set.push("last_name = ").push_bind_unseparated(last_name);
	}
	if let Some(password_hash) = data.password_hash {
		set.push("password = ").push_bind_unseparated(password_hash);
	}
	if let Some(is_staff) = data.is_staff {
		set.push("is_staff = ").push_bind_unseparated(is_staff);
	}
	if let Some(is_active) = data.is_active {
		set.push("is_active = ").push_bind_unseparated(is_active);
	}
	query.push(" WHERE account_id = ").push_bind(account_id.0);
	query.push(" RETURNING ").push(COLUMNS);

	let res = query.build().fetch_one(db).await;
	match res {
		Err(err) if is_unique_violation(&err) => {
			Err(Error::Conflict("email already in use".into()))
		}
		res => map_res(res, row_to_record),
	}
}

pub(crate) async fn delete(db: &SqlitePool, account_id: AccountId) -> ApiResult<()> {
	let res = sqlx::query("DELETE FROM accounts WHERE account_id = ?")
		.bind(account_id.0)
		.execute(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	if res.rows_affected() == 0 { Err(Error::NotFound) } else { Ok(()) }
}

pub(crate) async fn list(
	db: &SqlitePool,
	opts: &ListAccountsOptions<'_>,
) -> ApiResult<Vec<AccountRecord>> {
	let mut query = sqlx::QueryBuilder::new(format!("SELECT {} FROM accounts WHERE 1=1", COLUMNS));

	if let Some(q) = opts.q {
		let pattern = format!("%{}%", q);
		query
			.push(" AND (email LIKE ")
			.push_bind(pattern.clone())
			.push(" OR first_name LIKE ")
			.push_bind(pattern.clone())
			.push(" OR last_name LIKE ")
			.push_bind(pattern)
			.push(")");
	}

	query.push(" ORDER BY created_at DESC, account_id DESC");
	query.push(" LIMIT ").push_bind(opts.limit.unwrap_or(100));
	query.push(" OFFSET ").push_bind(opts.offset.unwrap_or(0));

	let res = query
		.build()
		.fetch_all(db)
		.await
		.inspect_err(inspect)
		.map_err(|_| Error::DbError)?;

	collect_res(res.iter().map(row_to_record))
}

// vim: ts=4
