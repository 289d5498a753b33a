pub use crate::error::{ApiResult, Error, FieldErrors};
pub use crate::types::{AccountId, ApiResponse, Patch, Timestamp};

pub use tracing::{debug, debug_span, error, error_span, info, info_span, warn, warn_span};

// vim: ts=4
