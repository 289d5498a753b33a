//! Inkwell is a self-hosted content-management backend.
//!
//! # Features
//!
//! - Accounts with email login and JWT access/refresh tokens
//! - Blog posts with derived, collision-free URL slugs
//! - Dynamic site configuration: text-stored values with a declared type,
//!   validated on write and coerced on read
//! - Contact-form intake with a staff inbox
//! - Storage behind adapter traits; SQLite adapters included

// Re-export shared types and adapter traits from inkwell-types
pub use inkwell_types::account_adapter;
pub use inkwell_types::config;
pub use inkwell_types::content_adapter;
pub use inkwell_types::error;
pub use inkwell_types::types;
pub use inkwell_types::utils;

// Feature crate re-exports
pub use inkwell_auth as auth;
pub use inkwell_config as site_config;
pub use inkwell_contact as contact;
pub use inkwell_core::extract;
pub use inkwell_core::hasher;
pub use inkwell_core::token;
pub use inkwell_post as post;

// Local modules
pub mod app;
pub mod prelude;
pub mod routes;

pub use crate::app::AppBuilder;
pub use inkwell_core::app::{App, AppOptions, AppState, VERSION};

// vim: ts=4
