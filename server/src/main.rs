use std::{env, path::PathBuf, sync::Arc};

use inkwell::AppBuilder;
use inkwell_account_adapter_sqlite::AccountAdapterSqlite;
use inkwell_content_adapter_sqlite::ContentAdapterSqlite;

struct Config {
	db_dir: PathBuf,
	listen: String,
}

impl Config {
	fn from_env() -> Self {
		Config {
			db_dir: PathBuf::from(env::var("DB_DIR").unwrap_or_else(|_| "./data".to_string())),
			listen: env::var("LISTEN").unwrap_or_else(|_| "127.0.0.1:8000".to_string()),
		}
	}
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
	let config = Config::from_env();
	tokio::fs::create_dir_all(&config.db_dir).await?;

	let mut builder = AppBuilder::new();

	let account_adapter = AccountAdapterSqlite::new(config.db_dir.join("accounts.db")).await?;
	let content_adapter = ContentAdapterSqlite::new(config.db_dir.join("content.db")).await?;

	builder
		.listen(config.listen)
		.account_adapter(Arc::new(account_adapter))
		.content_adapter(Arc::new(content_adapter));

	builder.run().await?;

	Ok(())
}

// vim: ts=4
