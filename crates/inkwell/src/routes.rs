use axum::{
	Json, Router, middleware,
	routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use inkwell_core::middleware::{optional_auth, require_auth};
use inkwell_core::app::VERSION;

use crate::prelude::*;

async fn get_health() -> Json<serde_json::Value> {
	Json(serde_json::json!({ "status": "ok", "version": VERSION }))
}

/// Routes requiring a valid bearer token; the middleware rejects with 401
/// before the handler runs.
fn protected_routes(app: App) -> Router<App> {
	Router::new()
		.route(
			"/api/auth/profile",
			get(inkwell_auth::handler::get_profile)
				.put(inkwell_auth::handler::update_profile)
				.patch(inkwell_auth::handler::update_profile),
		)
		.route(
			"/api/auth/users",
			get(inkwell_auth::manage::list_accounts).post(inkwell_auth::manage::create_account),
		)
		.route(
			"/api/auth/users/{id}",
			get(inkwell_auth::manage::get_account)
				.patch(inkwell_auth::manage::update_account)
				.delete(inkwell_auth::manage::delete_account),
		)
		.route("/api/auth/users/{id}/toggle_staff", post(inkwell_auth::manage::toggle_staff))
		.route("/api/auth/users/{id}/toggle_active", post(inkwell_auth::manage::toggle_active))
		.route(
			"/api/configurations",
			get(inkwell_config::handler::list_configs).post(inkwell_config::handler::create_config),
		)
		.route("/api/configurations/bulk_update", post(inkwell_config::handler::bulk_update))
		.route(
			"/api/configurations/reset_to_defaults",
			post(inkwell_config::handler::reset_to_defaults),
		)
		.route("/api/configurations/categories", get(inkwell_config::handler::list_categories))
		.route("/api/configurations/types", get(inkwell_config::handler::list_types))
		.route(
			"/api/configurations/{key}",
			get(inkwell_config::handler::get_config)
				.patch(inkwell_config::handler::update_config)
				.delete(inkwell_config::handler::delete_config),
		)
		.layer(middleware::from_fn_with_state(app, require_auth))
}

/// Routes where authentication is optional or checked per handler: the
/// post and contact surfaces mix public reads/submissions with
/// authenticated mutations on the same paths.
fn optional_routes(app: App) -> Router<App> {
	Router::new()
		.route(
			"/api/posts",
			get(inkwell_post::handler::list_posts).post(inkwell_post::handler::create_post),
		)
		.route("/api/posts/my_posts", get(inkwell_post::handler::my_posts))
		.route(
			"/api/posts/{slug}",
			get(inkwell_post::handler::get_post)
				.patch(inkwell_post::handler::update_post)
				.delete(inkwell_post::handler::delete_post),
		)
		.route("/api/posts/{slug}/toggle_publish", post(inkwell_post::handler::toggle_publish))
		.route(
			"/api/contact",
			post(inkwell_contact::handler::post_contact).get(inkwell_contact::handler::list_messages),
		)
		.route(
			"/api/contact/{id}",
			get(inkwell_contact::handler::get_message)
				.delete(inkwell_contact::handler::delete_message),
		)
		.route("/api/contact/{id}/toggle_read", post(inkwell_contact::handler::toggle_read))
		.layer(middleware::from_fn_with_state(app, optional_auth))
}

/// Fully public routes
fn public_routes() -> Router<App> {
	Router::new()
		.route("/api/health", get(get_health))
		.route("/api/auth/register", post(inkwell_auth::handler::post_register))
		.route("/api/auth/login", post(inkwell_auth::handler::post_login))
		.route("/api/auth/token/refresh", post(inkwell_auth::handler::post_refresh))
		.route("/api/public/configurations", get(inkwell_config::handler::public_configurations))
		.route("/api/public/site-info", get(inkwell_config::handler::site_info))
}

pub fn init(app: App) -> Router {
	Router::new()
		.merge(public_routes())
		.merge(optional_routes(app.clone()))
		.merge(protected_routes(app.clone()))
		.layer(TraceLayer::new_for_http())
		.layer(CorsLayer::permissive())
		.with_state(app)
}

// vim: ts=4
