//! Contact-form submission and the staff inbox.
//!
//! Messages are immutable once stored; the only exposed mutation is the
//! read/unread flag.

use axum::{
	Json,
	extract::{Path, Query, State},
	http::StatusCode,
};
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use inkwell_core::extract::Auth;
use inkwell_types::content_adapter::{ContactMessageRecord, CreateContactMessageData};
use inkwell_types::utils::is_valid_email;

use crate::prelude::*;

const MIN_NAME_LENGTH: usize = 2;
const MIN_MESSAGE_LENGTH: usize = 10;

#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessageView {
	pub id: i64,
	pub name: Box<str>,
	pub email: Box<str>,
	pub phone: Option<Box<str>>,
	pub subject: Box<str>,
	pub message: Box<str>,
	pub is_read: bool,
	pub created_at: Timestamp,
}

impl From<ContactMessageRecord> for ContactMessageView {
	fn from(msg: ContactMessageRecord) -> Self {
		ContactMessageView {
			id: msg.message_id,
			name: msg.name,
			email: msg.email,
			phone: msg.phone,
			subject: msg.subject,
			message: msg.message,
			is_read: msg.is_read,
			created_at: msg.created_at,
		}
	}
}

#[derive(Debug, Deserialize)]
pub struct SubmitContactReq {
	pub name: String,
	pub email: String,
	#[serde(default)]
	pub phone: Option<String>,
	pub subject: String,
	pub message: String,
}

fn validate_submission(req: &SubmitContactReq) -> ApiResult<()> {
	let mut errors = FieldErrors::new("Error submitting message");
	if req.name.trim().chars().count() < MIN_NAME_LENGTH {
		errors.add("name", "Name must be at least 2 characters long");
	}
	if !is_valid_email(req.email.trim()) {
		errors.add("email", "Invalid email address");
	}
	if req.subject.trim().is_empty() {
		errors.add("subject", "Subject is required");
	}
	if req.message.trim().chars().count() < MIN_MESSAGE_LENGTH {
		errors.add("message", "Message must be at least 10 characters long");
	}
	errors.into_result()
}

/// POST /api/contact - Public message submission; validation runs before
/// any write
pub async fn post_contact(
	State(app): State<App>,
	Json(req): Json<SubmitContactReq>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ContactMessageView>>)> {
	validate_submission(&req)?;

	let data = CreateContactMessageData {
		name: req.name.trim(),
		email: req.email.trim(),
		phone: req.phone.as_deref().map(str::trim).filter(|p| !p.is_empty()),
		subject: req.subject.trim(),
		message: req.message.trim(),
	};
	let msg = app.content_adapter.create_contact_message(&data).await?;

	info!("Contact message {} received from {}", msg.message_id, msg.email);
	let response =
		ApiResponse::new(ContactMessageView::from(msg)).with_message("Message sent successfully");
	Ok((StatusCode::CREATED, Json(response)))
}

#[derive(Debug, Deserialize)]
pub struct ListMessagesQuery {
	#[serde(default)]
	pub unread: Option<String>,
}

/// GET /api/contact - Staff inbox, newest first, optional ?unread=true
pub async fn list_messages(
	State(app): State<App>,
	Auth(auth): Auth,
	Query(query): Query<ListMessagesQuery>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Vec<ContactMessageView>>>)> {
	auth.require_staff()?;

	let unread_only = query.unread.as_deref().is_some_and(|v| v.eq_ignore_ascii_case("true"));
	let messages = app.content_adapter.list_contact_messages(unread_only).await?;
	let views: Vec<ContactMessageView> =
		messages.into_iter().map(ContactMessageView::from).collect();
	let count = views.len();
	Ok((StatusCode::OK, Json(ApiResponse::new(views).with_count(count))))
}

/// GET /api/contact/{id}
pub async fn get_message(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ContactMessageView>>)> {
	auth.require_staff()?;

	let msg = app.content_adapter.read_contact_message(id).await?;
	Ok((StatusCode::OK, Json(ApiResponse::new(msg.into()))))
}

/// POST /api/contact/{id}/toggle_read - Flip the read flag
pub async fn toggle_read(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<(StatusCode, Json<ApiResponse<ContactMessageView>>)> {
	auth.require_staff()?;

	let msg = app.content_adapter.read_contact_message(id).await?;
	let msg = app.content_adapter.update_contact_message_read(id, !msg.is_read).await?;

	let message = if msg.is_read { "Message marked as read" } else { "Message marked as unread" };
	let response = ApiResponse::new(ContactMessageView::from(msg)).with_message(message);
	Ok((StatusCode::OK, Json(response)))
}

/// DELETE /api/contact/{id}
pub async fn delete_message(
	State(app): State<App>,
	Auth(auth): Auth,
	Path(id): Path<i64>,
) -> ApiResult<StatusCode> {
	auth.require_staff()?;

	app.content_adapter.delete_contact_message(id).await?;
	info!("Contact message {} deleted by {}", id, auth.email);
	Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
	use super::*;

	fn req() -> SubmitContactReq {
		SubmitContactReq {
			name: "Alice".into(),
			email: "alice@example.com".into(),
			phone: None,
			subject: "Hello".into(),
			message: "A sufficiently long message.".into(),
		}
	}

	#[test]
	fn test_valid_submission_passes() {
		assert!(validate_submission(&req()).is_ok());
	}

	#[test]
	fn test_short_name_rejected() {
		let mut r = req();
		r.name = " a ".into();
		assert!(validate_submission(&r).is_err());
	}

	#[test]
	fn test_short_message_rejected() {
		let mut r = req();
		r.message = "too short".into();
		assert!(validate_submission(&r).is_err());
	}

	#[test]
	fn test_bad_email_rejected() {
		let mut r = req();
		r.email = "not-an-email".into();
		assert!(validate_submission(&r).is_err());
	}
}

// vim: ts=4
