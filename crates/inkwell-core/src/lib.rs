//! Core infrastructure shared by the Inkwell feature crates: application
//! state, authentication extractors and middleware, token issuance, and
//! password hashing.

pub mod app;
pub mod extract;
pub mod hasher;
pub mod middleware;
pub mod prelude;
pub mod token;

pub use app::{App, AppOptions, AppState};
pub use extract::{Auth, AuthCtx, OptionalAuth};

// vim: ts=4
