//! App state type

use std::sync::Arc;

use inkwell_types::account_adapter::AccountAdapter;
use inkwell_types::content_adapter::ContentAdapter;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Access tokens authenticate individual requests; refresh tokens only
/// mint new access tokens.
pub const ACCESS_TOKEN_EXPIRY: i64 = 3600;
pub const REFRESH_TOKEN_EXPIRY: i64 = 7 * 86400;

#[derive(Debug)]
pub struct AppOptions {
	pub listen: Box<str>,
	/// Minimum accepted password length at registration
	pub password_min_length: usize,
	/// Seed the default configuration entries at startup
	pub seed_defaults: bool,
}

impl Default for AppOptions {
	fn default() -> Self {
		Self { listen: "127.0.0.1:8000".into(), password_min_length: 8, seed_defaults: true }
	}
}

pub struct AppState {
	pub opts: AppOptions,

	pub account_adapter: Arc<dyn AccountAdapter>,
	pub content_adapter: Arc<dyn ContentAdapter>,
}

pub type App = Arc<AppState>;

// vim: ts=4
