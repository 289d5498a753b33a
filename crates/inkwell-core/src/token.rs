//! JWT issuance and validation.
//!
//! Both token kinds embed a snapshot of a few profile fields (email,
//! first/last name) so the caller need not re-fetch the account for
//! display. The snapshot can go stale until the next token issuance;
//! this is accepted.

use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::app::{ACCESS_TOKEN_EXPIRY, REFRESH_TOKEN_EXPIRY};
use crate::prelude::*;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
	Access,
	Refresh,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct TokenClaims {
	/// Account id
	pub sub: i64,
	pub email: Box<str>,
	#[serde(rename = "firstName")]
	pub first_name: Box<str>,
	#[serde(rename = "lastName")]
	pub last_name: Box<str>,
	pub staff: bool,
	pub typ: TokenKind,
	pub iat: Timestamp,
	pub exp: Timestamp,
}

/// Profile snapshot embedded in tokens at issuance
#[derive(Clone, Debug)]
pub struct TokenProfile<'a> {
	pub account_id: AccountId,
	pub email: &'a str,
	pub first_name: &'a str,
	pub last_name: &'a str,
	pub is_staff: bool,
}

fn generate(profile: &TokenProfile<'_>, kind: TokenKind, secret: &str) -> ApiResult<Box<str>> {
	let expiry = match kind {
		TokenKind::Access => ACCESS_TOKEN_EXPIRY,
		TokenKind::Refresh => REFRESH_TOKEN_EXPIRY,
	};
	let claims = TokenClaims {
		sub: profile.account_id.0,
		email: profile.email.into(),
		first_name: profile.first_name.into(),
		last_name: profile.last_name.into(),
		staff: profile.is_staff,
		typ: kind,
		iat: Timestamp::now(),
		exp: Timestamp::from_now(expiry),
	};

	let token = encode(
		&jsonwebtoken::Header::new(Algorithm::HS256),
		&claims,
		&EncodingKey::from_secret(secret.as_bytes()),
	)
	.map_err(|err| Error::Internal(format!("token encoding failed: {}", err)))?;

	Ok(token.into())
}

pub fn create_access_token(profile: &TokenProfile<'_>, secret: &str) -> ApiResult<Box<str>> {
	generate(profile, TokenKind::Access, secret)
}

pub fn create_refresh_token(profile: &TokenProfile<'_>, secret: &str) -> ApiResult<Box<str>> {
	generate(profile, TokenKind::Refresh, secret)
}

/// Decode and validate a token, checking that it is of the expected kind.
/// An access token is never accepted where a refresh token is required
/// and vice versa.
pub fn validate_token(token: &str, kind: TokenKind, secret: &str) -> ApiResult<TokenClaims> {
	let data = decode::<TokenClaims>(
		token,
		&DecodingKey::from_secret(secret.as_bytes()),
		&Validation::new(Algorithm::HS256),
	)
	.map_err(|_| Error::Unauthorized)?;

	if data.claims.typ != kind {
		return Err(Error::Unauthorized);
	}

	Ok(data.claims)
}

#[cfg(test)]
mod tests {
	use super::*;

	const SECRET: &str = "test-secret";

	fn profile() -> TokenProfile<'static> {
		TokenProfile {
			account_id: AccountId(7),
			email: "alice@example.com",
			first_name: "Alice",
			last_name: "Doe",
			is_staff: true,
		}
	}

	#[test]
	fn test_access_token_round_trip() {
		let token = create_access_token(&profile(), SECRET).unwrap_or_default();
		let claims = match validate_token(&token, TokenKind::Access, SECRET) {
			Ok(c) => c,
			Err(e) => panic!("expected valid token: {}", e),
		};

		assert_eq!(claims.sub, 7);
		assert_eq!(claims.email.as_ref(), "alice@example.com");
		assert!(claims.staff);
	}

	#[test]
	fn test_refresh_token_not_accepted_as_access() {
		let token = create_refresh_token(&profile(), SECRET).unwrap_or_default();
		assert!(validate_token(&token, TokenKind::Access, SECRET).is_err());
		assert!(validate_token(&token, TokenKind::Refresh, SECRET).is_ok());
	}

	#[test]
	fn test_wrong_secret_rejected() {
		let token = create_access_token(&profile(), SECRET).unwrap_or_default();
		assert!(validate_token(&token, TokenKind::Access, "other-secret").is_err());
	}
}

// vim: ts=4
