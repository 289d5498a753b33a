//! Database schema initialization and migrations

use sqlx::{Sqlite, SqlitePool, Transaction};

/// Get the current database version from vars table
async fn get_db_version(tx: &mut Transaction<'_, Sqlite>) -> i64 {
	sqlx::query_scalar::<_, String>("SELECT value FROM vars WHERE key = 'db_version'")
		.fetch_optional(&mut **tx)
		.await
		.ok()
		.flatten()
		.and_then(|v| v.parse().ok())
		.unwrap_or(0)
}

/// Set the database version in vars table
async fn set_db_version(tx: &mut Transaction<'_, Sqlite>, version: i64) {
	let _ = sqlx::query("INSERT OR REPLACE INTO vars (key, value) VALUES ('db_version', ?)")
		.bind(version.to_string())
		.execute(&mut **tx)
		.await;
}

// Current schema version - update this when adding new migrations
const CURRENT_DB_VERSION: i64 = 1;

/// Initialize the database schema and run migrations
pub(crate) async fn init_db(db: &SqlitePool) -> Result<(), sqlx::Error> {
	let mut tx = db.begin().await?;

	// Create vars table first (needed for version tracking)
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS vars (
			key text NOT NULL,
			value text NOT NULL,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(key)
		)",
	)
	.execute(&mut *tx)
	.await?;

	let version = get_db_version(&mut tx).await;

	// Schema creation - safe to run every time (uses IF NOT EXISTS)

	// Posts
	// author_email/author_name are denormalized; account rows live in the
	// account adapter's store
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS posts (
			post_id INTEGER PRIMARY KEY AUTOINCREMENT,
			title text NOT NULL,
			content text NOT NULL,
			slug text NOT NULL,
			author_id integer NOT NULL,
			author_email text NOT NULL,
			author_name text NOT NULL DEFAULT '',
			is_published boolean NOT NULL DEFAULT 0,
			image text,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query("CREATE UNIQUE INDEX IF NOT EXISTS idx_posts_slug ON posts (slug)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_author ON posts (author_id)")
		.execute(&mut *tx)
		.await?;
	sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_published ON posts (is_published)")
		.execute(&mut *tx)
		.await?;

	// Configuration entries
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS configurations (
			key text NOT NULL,
			value text,
			default_value text,
			category text NOT NULL DEFAULT 'general',
			type text NOT NULL DEFAULT 'text',
			label text NOT NULL,
			description text,
			is_required boolean NOT NULL DEFAULT 0,
			is_public boolean NOT NULL DEFAULT 0,
			sort_order integer NOT NULL DEFAULT 0,
			created_at INTEGER DEFAULT (unixepoch()),
			updated_at INTEGER DEFAULT (unixepoch()),
			PRIMARY KEY(key)
		)",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE INDEX IF NOT EXISTS idx_configurations_category ON configurations (category)",
	)
	.execute(&mut *tx)
	.await?;

	// Contact messages
	sqlx::query(
		"CREATE TABLE IF NOT EXISTS contact_messages (
			message_id INTEGER PRIMARY KEY AUTOINCREMENT,
			name text NOT NULL,
			email text NOT NULL,
			phone text,
			subject text NOT NULL,
			message text NOT NULL,
			is_read boolean NOT NULL DEFAULT 0,
			created_at INTEGER DEFAULT (unixepoch())
		)",
	)
	.execute(&mut *tx)
	.await?;

	// Triggers for automatic updated_at on UPDATE
	sqlx::query(
		"CREATE TRIGGER IF NOT EXISTS posts_updated_at AFTER UPDATE ON posts FOR EACH ROW \
			BEGIN UPDATE posts SET updated_at = unixepoch() WHERE post_id = NEW.post_id; END",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE TRIGGER IF NOT EXISTS configurations_updated_at AFTER UPDATE ON configurations FOR EACH ROW \
			BEGIN UPDATE configurations SET updated_at = unixepoch() WHERE key = NEW.key; END",
	)
	.execute(&mut *tx)
	.await?;
	sqlx::query(
		"CREATE TRIGGER IF NOT EXISTS vars_updated_at AFTER UPDATE ON vars FOR EACH ROW \
			BEGIN UPDATE vars SET updated_at = unixepoch() WHERE key = NEW.key; END",
	)
	.execute(&mut *tx)
	.await?;

	if version == 0 {
		set_db_version(&mut tx, CURRENT_DB_VERSION).await;
	}

	tx.commit().await?;

	Ok(())
}
