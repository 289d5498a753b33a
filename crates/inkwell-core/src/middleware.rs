//! Bearer-token middleware layers.
//!
//! `require_auth` rejects with 401 when the token is missing or invalid;
//! `optional_auth` attaches the auth context when present and passes
//! everything else through. Both insert `Auth` as a request extension for
//! the extractors in [`crate::extract`].

use axum::{
	body::Body,
	extract::State,
	http::{Request, response::Response},
	middleware::Next,
};

use crate::extract::{Auth, AuthCtx};
use crate::prelude::*;
use crate::token::{self, TokenKind};

fn bearer_token(req: &Request<Body>) -> Option<&str> {
	req.headers()
		.get(axum::http::header::AUTHORIZATION)
		.and_then(|h| h.to_str().ok())
		.and_then(|h| h.strip_prefix("Bearer "))
}

async fn authenticate(app: &App, token: &str) -> ApiResult<AuthCtx> {
	let secret = app.account_adapter.read_jwt_secret().await?;
	let claims = token::validate_token(token, TokenKind::Access, &secret)?;

	// The claims snapshot is enough to build the context; the account row
	// is still consulted so deactivated accounts lose access immediately.
	let account = app
		.account_adapter
		.read_account(AccountId(claims.sub))
		.await
		.map_err(|_| Error::Unauthorized)?;
	if !account.is_active {
		return Err(Error::Unauthorized);
	}

	Ok(AuthCtx {
		account_id: account.account_id,
		email: account.email,
		first_name: account.first_name,
		last_name: account.last_name,
		is_staff: account.is_staff,
	})
}

pub async fn require_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ApiResult<Response<Body>> {
	let token = bearer_token(&req).ok_or(Error::Unauthorized)?;
	let ctx = authenticate(&app, token).await?;
	req.extensions_mut().insert(Auth(ctx));

	Ok(next.run(req).await)
}

pub async fn optional_auth(
	State(app): State<App>,
	mut req: Request<Body>,
	next: Next,
) -> ApiResult<Response<Body>> {
	if let Some(token) = bearer_token(&req) {
		if let Ok(ctx) = authenticate(&app, token).await {
			req.extensions_mut().insert(Auth(ctx));
		}
	}

	Ok(next.run(req).await)
}

// vim: ts=4
