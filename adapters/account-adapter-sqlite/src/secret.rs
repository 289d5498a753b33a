//! JWT signing secret bootstrap

use sqlx::{Row, SqlitePool};

use crate::utils::inspect;
use inkwell::prelude::*;

/// Get or generate the HS256 signing secret
pub(crate) async fn ensure_jwt_secret(db: &SqlitePool) -> ApiResult<Box<str>> {
	// Try to read existing secret
	let res = sqlx::query("SELECT value FROM vars WHERE key = 'jwt_secret'")
		.fetch_optional(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	if let Some(row) = res {
		return row.try_get("value").inspect_err(inspect).or(Err(Error::DbError));
	}

	// Generate new secret (32 random bytes, base64 encoded)
	use base64::Engine;
	use rand::Rng;
	let mut secret_bytes = [0u8; 32];
	rand::rng().fill_bytes(&mut secret_bytes);
	let secret_str = base64::engine::general_purpose::STANDARD.encode(secret_bytes);

	// INSERT OR IGNORE keeps a concurrently written secret; re-read after
	sqlx::query("INSERT OR IGNORE INTO vars (key, value) VALUES ('jwt_secret', ?)")
		.bind(&secret_str)
		.execute(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	let row = sqlx::query("SELECT value FROM vars WHERE key = 'jwt_secret'")
		.fetch_one(db)
		.await
		.inspect_err(inspect)
		.or(Err(Error::DbError))?;

	info!("Generated new JWT secret");
	row.try_get("value").inspect_err(inspect).or(Err(Error::DbError))
}

// vim: ts=4
