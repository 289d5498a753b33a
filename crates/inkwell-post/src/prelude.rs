pub use inkwell_core::app::App;
pub use inkwell_types::error::{ApiResult, Error, FieldErrors};
pub use inkwell_types::types::{AccountId, ApiResponse, Patch, Timestamp};

pub use tracing::{debug, error, info, warn};

// vim: ts=4
