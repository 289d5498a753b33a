//! Admin account management.
//!
//! Staff only. Self-protection invariants are policy violations, not
//! permission failures: deleting yourself, revoking your own staff flag,
//! or deactivating yourself all fail with 400 and leave the account
//! unchanged.

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use inkwell_core::extract::Auth;
use inkwell_core::hasher;
use inkwell_types::account_adapter::{
	AccountRecord, CreateAccountData, ListAccountsOptions, UpdateAccountData,
};
use inkwell_types::utils::{is_valid_email, normalize_email};

use crate::password;
use crate::prelude::*;

/// Account view for the management surface, includes status flags
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountView {
	pub id: AccountId,
	pub email: Box<str>,
	pub first_name: Box<str>,
	pub last_name: Box<str>,
	pub is_staff: bool,
	pub is_active: bool,
	pub date_joined: Timestamp,
}

impl From<AccountRecord> for AccountView {
	fn from(account: AccountRecord) -> Self {
		AccountView {
			id: account.account_id,
			email: account.email,
			first_name: account.first_name,
			last_name: account.last_name,
			is_staff: account.is_staff,
			is_active: account.is_active,
			date_joined: account.created_at,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct ListAccountsQuery {
	pub search: Option<String>,
	pub limit: Option<u32>,
	pub offset: Option<u32>,
}

/// GET /api/auth/users - List accounts with free-text search across
/// email and names
pub async fn list_accounts(
	State(app): State<App>,
	Auth(auth): Auth,
	Query(query): Query<ListAccountsQuery>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<AccountView>>>)> {
	auth.require_staff()?;

	let opts = ListAccountsOptions {
		q: query.search.as_deref(),
		limit: query.limit,
		offset: query.offset,
	};
	let accounts = app.account_adapter.list_accounts(&opts).await?;
	let views: Vec<AccountView> = accounts.into_iter().map(AccountView::from).collect();
	let count = views.len();
	Ok((StatusCode::OK, Json(ApiResponse::new(views).with_count(count))))
}

/// GET /api/auth/users/{id}
pub async fn get_account(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
	auth.require_staff()?;

	let account = app.account_adapter.read_account(AccountId(id)).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(account.into()))))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAccountReq {
	pub email: String,
	#[serde(default)]
	pub first_name: String,
	#[serde(default)]
	pub last_name: String,
	pub password: String,
	pub password_confirm: String,
	#[serde(default)]
	pub is_staff: bool,
	#[serde(default = "default_true")]
	pub is_active: bool,
}

fn default_true() -> bool {
	true
}

/// POST /api/auth/users - Create an account with explicit flags
pub async fn create_account(
	State(app): State<App>,
	Auth(auth): Auth,
	Json(req): Json<CreateAccountReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
	auth.require_staff()?;

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
		is_staff: req.is_staff,
		is_active: req.is_active,
	};

	let account = match app.account_adapter.create_account(data).await {
		Err(Error::Conflict(_)) => {
			return Err(Error::field("email", "This email is already in use"));
		}
		res => res?,
	};

	info!("Account {} created by {}", account.email, auth.email);
	let response =
		ApiResponse::new(AccountView::from(account)).with_message("Account created successfully");
	Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAccountReq {
	pub email: Option<String>,
	pub first_name: Option<String>,
	pub last_name: Option<String>,
	pub password: Option<String>,
	pub password_confirm: Option<String>,
	pub is_staff: Option<bool>,
	pub is_active: Option<bool>,
}

/// PATCH /api/auth/users/{id} - Update an account; the self-protection
/// invariants apply when the target is the caller.
pub async fn update_account(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
	Json(req): Json<UpdateAccountReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
	auth.require_staff()?;

	let target = AccountId(id);
	if target == auth.account_id {
		if req.is_staff == Some(false) {
			return Err(Error::Validation("You cannot revoke your own staff status".into()));
		}
		if req.is_active == Some(false) {
			return Err(Error::Validation("You cannot deactivate your own account".into()));
		}
	}

	let email = req.email.as_deref().map(normalize_email);

	let mut errors = FieldErrors::new("Error updating account");
	if let Some(email) = &email {
		if !is_valid_email(email) {
			errors.add("email", "Invalid email address");
		}
	}
	if let Some(pw) = &req.password {
		if let Err(reason) = password::validate_strength(pw, app.opts.password_min_length) {
			errors.add("password", reason);
		}
		if req.password_confirm.as_deref() != Some(pw.as_str()) {
			errors.add("passwordConfirm", "Passwords do not match");
		}
	}
	errors.into_result()?;

	let password_hash = match req.password {
		Some(pw) => Some(hasher::generate_password_hash(pw.into()).await?),
		None => None,
	};

	let data = UpdateAccountData {
		email: email.as_deref(),
		first_name: req.first_name.as_deref().map(str::trim),
		last_name: req.last_name.as_deref().map(str::trim),
		password_hash: password_hash.as_deref(),
		is_staff: req.is_staff,
		is_active: req.is_active,
	};

	let account = match app.account_adapter.update_account(target, data).await {
		Err(Error::Conflict(_)) => {
			return Err(Error::field("email", "This email is already in use"));
		}
		res => res?,
	};

	info!("Account {} updated by {}", account.email, auth.email);
	let response =
		ApiResponse::new(AccountView::from(account)).with_message("Account updated successfully");
	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/auth/users/{id} - Delete an account; the author's posts
/// cascade. Deleting yourself is refused.
pub async fn delete_account(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
	auth.require_staff()?;

	let target = AccountId(id);
	if target == auth.account_id {
		return Err(Error::Validation("You cannot delete your own account".into()));
	}

	// 404 before delete so a missing target is reported as such
	let account = app.account_adapter.read_account(target).await?;
	app.account_adapter.delete_account(target).await?;
	let cascaded = app.content_adapter.delete_posts_by_author(target).await?;

	info!("Account {} deleted by {} ({} posts cascaded)", account.email, auth.email, cascaded);
	Ok(StatusCode::NO_CONTENT)
}

/// POST /api/auth/users/{id}/toggle_staff - Flip the staff flag.
/// Revoking your own staff flag is refused.
pub async fn toggle_staff(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
	auth.require_staff()?;

	let target = AccountId(id);
	let account = app.account_adapter.read_account(target).await?;

	if target == auth.account_id && account.is_staff {
		return Err(Error::Validation("You cannot revoke your own staff status".into()));
	}

	let data = UpdateAccountData { is_staff: Some(!account.is_staff), ..Default::default() };
	let account = app.account_adapter.update_account(target, data).await?;

	let message = if account.is_staff {
		"Staff status granted successfully"
	} else {
		"Staff status revoked successfully"
	};
	info!("Staff flag of {} toggled to {} by {}", account.email, account.is_staff, auth.email);
	let response = ApiResponse::new(AccountView::from(account)).with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

/// POST /api/auth/users/{id}/toggle_active - Flip the active flag.
/// Deactivating yourself is refused.
pub async fn toggle_active(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<ApiResponse<AccountView>>)> {
	auth.require_staff()?;

	let target = AccountId(id);
	if target == auth.account_id {
		return Err(Error::Validation("You cannot deactivate your own account".into()));
	}

	let account = app.account_adapter.read_account(target).await?;
	let data = UpdateAccountData { is_active: Some(!account.is_active), ..Default::default() };
	let account = app.account_adapter.update_account(target, data).await?;

	let message = if account.is_active {
		"Account activated successfully"
	} else {
		"Account deactivated successfully"
	};
	info!("Active flag of {} toggled to {} by {}", account.email, account.is_active, auth.email);
	let response = ApiResponse::new(AccountView::from(account)).with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

// vim: ts=4
