//! Error taxonomy shared by every Inkwell crate.
//!
//! Handlers return `ApiResult<T>`; the `IntoResponse` impl maps each variant
//! to its HTTP status and a JSON body. Validation failures carry a
//! field -> reasons mapping so clients can attach messages to form fields.

use axum::{Json, http::StatusCode, response::IntoResponse};
use serde::Serialize;
use std::collections::BTreeMap;

pub type ApiResult<T> = std::result::Result<T, Error>;

/// Per-field validation failure detail, returned as HTTP 400.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct FieldErrors {
	pub message: String,
	pub errors: BTreeMap<String, Vec<String>>,
}

impl FieldErrors {
	pub fn new(message: impl Into<String>) -> Self {
		Self { message: message.into(), errors: BTreeMap::new() }
	}

	pub fn add(&mut self, field: impl Into<String>, reason: impl Into<String>) {
		self.errors.entry(field.into()).or_default().push(reason.into());
	}

	pub fn with(mut self, field: impl Into<String>, reason: impl Into<String>) -> Self {
		self.add(field, reason);
		self
	}

	pub fn is_empty(&self) -> bool {
		self.errors.is_empty()
	}

	/// Convert into an error if any field failed, otherwise pass through
	pub fn into_result(self) -> ApiResult<()> {
		if self.is_empty() { Ok(()) } else { Err(Error::FieldValidation(self)) }
	}
}

#[derive(Debug)]
pub enum Error {
	NotFound,
	Unauthorized,
	PermissionDenied,
	Validation(String),
	FieldValidation(FieldErrors),
	Conflict(String),
	DbError,
	Internal(String),

	// externals
	Io(std::io::Error),
}

impl Error {
	/// Single-field validation error, the common case
	pub fn field(field: impl Into<String>, reason: impl Into<String>) -> Self {
		Error::FieldValidation(FieldErrors::new("Validation failed").with(field, reason))
	}
}

impl From<std::io::Error> for Error {
	fn from(err: std::io::Error) -> Self {
		Self::Io(err)
	}
}

impl std::fmt::Display for Error {
	fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
		match self {
			Error::NotFound => write!(f, "not found"),
			Error::Unauthorized => write!(f, "unauthorized"),
			Error::PermissionDenied => write!(f, "permission denied"),
			Error::Validation(msg) => write!(f, "validation error: {}", msg),
			Error::FieldValidation(errs) => write!(f, "validation error: {}", errs.message),
			Error::Conflict(msg) => write!(f, "conflict: {}", msg),
			Error::DbError => write!(f, "database error"),
			Error::Internal(msg) => write!(f, "internal error: {}", msg),
			Error::Io(err) => write!(f, "io error: {}", err),
		}
	}
}

impl std::error::Error for Error {}

#[derive(Serialize)]
struct ErrorBody {
	message: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	errors: Option<BTreeMap<String, Vec<String>>>,
}

impl IntoResponse for Error {
	fn into_response(self) -> axum::response::Response {
		let (status, body) = match self {
			Error::NotFound => (
				StatusCode::NOT_FOUND,
				ErrorBody { message: "Not found".into(), errors: None },
			),
			Error::Unauthorized => (
				StatusCode::UNAUTHORIZED,
				ErrorBody { message: "Authentication required".into(), errors: None },
			),
			Error::PermissionDenied => (
				StatusCode::FORBIDDEN,
				ErrorBody { message: "Permission denied".into(), errors: None },
			),
			Error::Validation(msg) => (StatusCode::BAD_REQUEST, ErrorBody { message: msg, errors: None }),
			Error::FieldValidation(errs) => (
				StatusCode::BAD_REQUEST,
				ErrorBody { message: errs.message, errors: Some(errs.errors) },
			),
			Error::Conflict(msg) => (StatusCode::BAD_REQUEST, ErrorBody { message: msg, errors: None }),
			Error::DbError | Error::Internal(_) | Error::Io(_) => {
				tracing::error!("internal error: {}", self);
				(
					StatusCode::INTERNAL_SERVER_ERROR,
					ErrorBody { message: "Internal server error".into(), errors: None },
				)
			}
		};
		(status, Json(body)).into_response()
	}
}


// vim: ts=4
