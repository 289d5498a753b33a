//! Registration, login, token refresh, and self-profile handlers.

use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use inkwell_core::extract::Auth;
use inkwell_core::hasher;
use inkwell_core::token::{self, TokenKind, TokenProfile};
use inkwell_types::account_adapter::{AccountRecord, CreateAccountData, UpdateAccountData};
use inkwell_types::utils::{is_valid_email, normalize_email};

use crate::password;
use crate::prelude::*;

/// Profile view returned to the account itself
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileView {
	pub id: AccountId,
	pub email: Box<str>,
	pub first_name: Box<str>,
	pub last_name: Box<str>,
	pub is_staff: bool,
	pub date_joined: Timestamp,
}

impl From<AccountRecord> for ProfileView {
	fn from(account: AccountRecord) -> Self {
		ProfileView {
			id: account.account_id,
			email: account.email,
			first_name: account.first_name,
			last_name: account.last_name,
			is_staff: account.is_staff,
			date_joined: account.created_at,
		}
	}
}

fn token_profile(account: &AccountRecord) -> TokenProfile<'_> {
	TokenProfile {
		account_id: account.account_id,
		email: &account.email,
		first_name: &account.first_name,
		last_name: &account.last_name,
		is_staff: account.is_staff,
	}
}

// Register //
//**********//

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterReq {
	pub email: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	pub password: String,
	pub password_confirm: String,
}

/// POST /api/auth/register - Create a new account
pub async fn post_register(
	State(app): State<App>,
	Json(req): Json<RegisterReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProfileView>>)> {
	let email = normalize_email(&req.email);

	let mut errors = FieldErrors::new("Error creating account");
	if !is_valid_email(&email) {
		errors.add("email", "Invalid email address");
	}
	if let Err(reason) = password::validate_strength(&req.password, app.opts.password_min_length) {
		errors.add("password", reason);
	}
	if req.password != req.password_confirm {
		errors.add("passwordConfirm", "Passwords do not match");
	}
	errors.into_result()?;

	let password_hash = hasher::generate_password_hash(req.password.into()).await?;
	let data = CreateAccountData {
		email: &email,
		first_name: req.first_name.trim(),
		last_name: req.last_name.trim(),
		password_hash: &password_hash,
		is_staff: false,
		is_active: true,
	};

	let account = match app.account_adapter.create_account(data).await {
		Err(Error::Conflict(_)) => {
			return Err(Error::field("email", "This email is already in use"));
		}
		res => res?,
	};

	info!("Account registered: {}", account.email);
	let response =
		ApiResponse::new(ProfileView::from(account)).with_message("Account created successfully");
	Ok((StatusCode::CREATED, Json(response)))
}

// Login //
//*******//

#[derive(Debug, Deserialize)]
pub struct LoginReq {
	pub email: String,
	pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginRes {
	pub access: Box<str>,
	pub refresh: Box<str>,
	pub user: ProfileView,
}

/// POST /api/auth/login - Verify credentials and issue the token pair
pub async fn post_login(
	State(app): State<App>,
	Json(req): Json<LoginReq>,
) -> ApiResult<(StatusCode, Json<LoginRes>)> {
	let email = normalize_email(&req.email);

	let login = async {
		let (account_id, hash) = app.account_adapter.read_password_hash(&email).await?;
		hasher::check_password(req.password.into(), hash).await?;

		let account = app.account_adapter.read_account(account_id).await?;
		if !account.is_active {
			return Err(Error::Unauthorized);
		}
		Ok(account)
	}
	.await;

	let account = match login {
		Ok(account) => account,
		Err(_) => {
			// Throttle guessing and avoid leaking which step failed
			tokio::time::sleep(std::time::Duration::from_secs(1)).await;
			return Err(Error::Unauthorized);
		}
	};

	let secret = app.account_adapter.read_jwt_secret().await?;
	let profile = token_profile(&account);
	let access = token::create_access_token(&profile, &secret)?;
	let refresh = token::create_refresh_token(&profile, &secret)?;

	info!("Login: {}", account.email);
	Ok((StatusCode::OK, Json(LoginRes { access, refresh, user: account.into() })))
}

// Token refresh //
//***************//

#[derive(Debug, Deserialize)]
pub struct RefreshReq {
	pub refresh: String,
}

#[derive(Debug, Serialize)]
pub struct RefreshRes {
	pub access: Box<str>,
}

/// POST /api/auth/token/refresh - Mint a new access token from a valid
/// refresh token without re-checking credentials
pub async fn post_refresh(
	State(app): State<App>,
	Json(req): Json<RefreshReq>,
) -> ApiResult<(StatusCode, Json<RefreshRes>)> {
	let secret = app.account_adapter.read_jwt_secret().await?;
	let claims = token::validate_token(&req.refresh, TokenKind::Refresh, &secret)?;

	// Re-read the account so a deactivated or deleted account cannot keep
	// refreshing; this also refreshes the embedded profile snapshot.
	let account = app
		.account_adapter
		.read_account(AccountId(claims.sub))
		.await
		.map_err(|_| Error::Unauthorized)?;
	if !account.is_active {
		return Err(Error::Unauthorized);
	}

	let access = token::create_access_token(&token_profile(&account), &secret)?;
	Ok((StatusCode::OK, Json(RefreshRes { access })))
}

// Profile //
//*********//

/// GET /api/auth/profile - The caller's own profile
pub async fn get_profile(
	State(app): State<App>,
	Auth(auth): Auth,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProfileView>>)> {
	let account = app.account_adapter.read_account(auth.account_id).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(account.into()))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProfileReq {
	pub first_name: Option<String>,
	pub last_name: Option<String>,
}

/// PUT/PATCH /api/auth/profile - Update the caller's display name.
/// The email is the login identifier and stays immutable here.
pub async fn update_profile(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<UpdateProfileReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ProfileView>>)> {
	let data = UpdateAccountData {
		first_name: req.first_name.as_deref().map(str::trim),
		last_name: req.last_name.as_deref().map(str::trim),
		..Default::default()
	};

	let account = if data.is_empty() {
		app.account_adapter.read_account(auth.account_id).await?
	} else {
		app.account_adapter.update_account(auth.account_id, data).await?
	};

	let response =
		ApiResponse::new(ProfileView::from(account)).with_message("Profile updated successfully");
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
