//! Contact-message intake and the staff inbox.

pub mod handler;

mod prelude;

// vim: ts=4
