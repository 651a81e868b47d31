//! Roster domain model: persons, groups, memberships, and assignments.
//!
//! # Responsibility
//! - Define the canonical records used by service, storage, and commands.
//! - Enforce data-integrity rules at the point of mutation.
//!
//! # Invariants
//! - Field values are valid by construction.
//! - A group exclusively owns its member details and assignments; persons
//!   are shared by value and kept in step by the `AddressBook`.

pub mod address_book;
pub mod assignment;
pub mod error;
pub mod fields;
pub mod group;
pub mod member;
pub mod person;
pub mod validation;
