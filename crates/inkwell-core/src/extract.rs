//! Custom extractors for Inkwell-specific data

use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::prelude::*;

/// Context struct for an authenticated caller
#[derive(Debug, Clone)]
pub struct AuthCtx {
	pub account_id: AccountId,
	pub email: Box<str>,
	pub first_name: Box<str>,
	pub last_name: Box<str>,
	pub is_staff: bool,
}

impl AuthCtx {
	/// Staff gate: authenticated but not permitted is 403
	pub fn require_staff(&self) -> ApiResult<()> {
		if self.is_staff { Ok(()) } else { Err(Error::PermissionDenied) }
	}
}

// Auth //
//******//
#[derive(Debug, Clone)]
pub struct Auth(pub AuthCtx);

impl<S> FromRequestParts<S> for Auth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		if let Some(auth) = parts.extensions.get::<Auth>().cloned() {
			Ok(auth)
		} else {
			Err(Error::Unauthorized)
		}
	}
}

// OptionalAuth //
//**************//
/// Optional auth extractor that doesn't fail if auth is missing
#[derive(Debug, Clone)]
pub struct OptionalAuth(pub Option<AuthCtx>);

impl OptionalAuth {
	pub fn is_staff(&self) -> bool {
		self.0.as_ref().is_some_and(|a| a.is_staff)
	}
}

impl<S> FromRequestParts<S> for OptionalAuth
where
	S: Send + Sync,
{
	type Rejection = Error;

	async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
		let auth = parts.extensions.get::<Auth>().cloned().map(|a| a.0);
		Ok(OptionalAuth(auth))
	}
}

// vim: ts=4
