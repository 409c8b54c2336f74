//! Session Management Module
//!
//! - [`store`] - process-wide session holder with atomic replace/clear

pub mod store;

pub use store::{Session, SessionStore};
