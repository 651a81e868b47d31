//! Core use-case services.
//!
//! # Responsibility
//! - Expose name-keyed roster operations on top of the model.
//! - Track list filters and the current result view for front-ends.
//!
//! # See also
//! - `logic` for command execution and persistence.

pub mod events;
pub mod filter;
pub mod roster_service;
