//! App builder - constructs and runs the Inkwell application

use std::sync::Arc;

use inkwell_config::ConfigService;
use inkwell_types::account_adapter::AccountAdapter;
use inkwell_types::content_adapter::ContentAdapter;

use crate::prelude::*;
use crate::routes;
use inkwell_core::app::{AppOptions, VERSION};

pub struct AppBuilder {
	opts: AppOptions,
	account_adapter: Option<Arc<dyn AccountAdapter>>,
	content_adapter: Option<Arc<dyn ContentAdapter>>,
}

impl AppBuilder {
	pub fn new() -> Self {
		tracing_subscriber::fmt()
			.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
			.with_target(false)
			.init();
		AppBuilder { opts: AppOptions::default(), account_adapter: None, content_adapter: None }
	}

	// Opts
	pub fn listen(&mut self, listen: impl Into<Box<str>>) -> &mut Self {
		self.opts.listen = listen.into();
		self
	}
	pub fn password_min_length(&mut self, len: usize) -> &mut Self {
		self.opts.password_min_length = len;
		self
	}
	pub fn seed_defaults(&mut self, seed: bool) -> &mut Self {
		self.opts.seed_defaults = seed;
		self
	}

	// Adapters
	pub fn account_adapter(&mut self, account_adapter: Arc<dyn AccountAdapter>) -> &mut Self {
		self.account_adapter = Some(account_adapter);
		self
	}
	pub fn content_adapter(&mut self, content_adapter: Arc<dyn ContentAdapter>) -> &mut Self {
		self.content_adapter = Some(content_adapter);
		self
	}

	pub async fn run(self) -> ApiResult<()> {
		info!("Inkwell CMS backend v{}", VERSION);

		let Some(account_adapter) = self.account_adapter else {
			error!("FATAL: No account adapter configured");
			return Err(Error::Internal("No account adapter configured".to_string()));
		};
		let Some(content_adapter) = self.content_adapter else {
			error!("FATAL: No content adapter configured");
			return Err(Error::Internal("No content adapter configured".to_string()));
		};

		let app: App = Arc::new(AppState { opts: self.opts, account_adapter, content_adapter });

		// Seed the built-in configuration entries; insert-if-absent per key,
		// so restarts and concurrent starts never clobber operator edits.
		if app.opts.seed_defaults {
			ConfigService::new(app.content_adapter.clone()).seed_defaults().await?;
		}

		let router = routes::init(app.clone());

		let listener = tokio::net::TcpListener::bind(app.opts.listen.as_ref()).await?;
		info!("Listening on {}", app.opts.listen);
		axum::serve(listener, router)
			.await
			.map_err(|err| Error::Internal(format!("server error: {}", err)))?;

		Ok(())
	}
}

impl Default for AppBuilder {
	fn default() -> Self {
		Self::new()
	}
}

// vim: ts=4
