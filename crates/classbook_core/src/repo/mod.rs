//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the whole-book load/save contract used by the logic layer.
//! - Isolate JSON wire details from model and service code.
//!
//! # Invariants
//! - Loaded data passes the same validation as live mutations.
//! - Repository APIs return semantic errors (`InvalidData`) in addition to
//!   I/O and decode errors.

pub mod address_book_repo;
pub mod sample;
