//! Person domain model.
//!
//! # Responsibility
//! - Define the contact record shared by the global person list and groups.
//! - Provide weak (`is_same_person`) and strong (`==`) identity checks.
//!
//! # Invariants
//! - Every field is valid by construction (see `model::fields`).
//! - Two persons with the same name are the same person, even when other
//!   fields differ.

use crate::model::fields::{Address, Email, PersonName, Phone, Tag};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// One student, tutor, or lecturer in the address book.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Person {
    pub name: PersonName,
    pub phone: Phone,
    pub email: Email,
    pub address: Address,
    #[serde(default)]
    pub tags: BTreeSet<Tag>,
}

impl Person {
    pub fn new(
        name: PersonName,
        phone: Phone,
        email: Email,
        address: Address,
        tags: BTreeSet<Tag>,
    ) -> Self {
        Self {
            name,
            phone,
            email,
            address,
            tags,
        }
    }

    /// Returns true if both persons have the same name.
    pub fn is_same_person(&self, other: &Person) -> bool {
        self.name == other.name
    }

    /// Returns a copy with every field set in `descriptor` replaced.
    pub fn edited(&self, descriptor: &EditPersonDescriptor) -> Person {
        Person {
            name: descriptor.name.clone().unwrap_or_else(|| self.name.clone()),
            phone: descriptor.phone.clone().unwrap_or_else(|| self.phone.clone()),
            email: descriptor.email.clone().unwrap_or_else(|| self.email.clone()),
            address: descriptor
                .address
                .clone()
                .unwrap_or_else(|| self.address.clone()),
            tags: descriptor.tags.clone().unwrap_or_else(|| self.tags.clone()),
        }
    }
}

impl Display for Person {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Phone: {}; Email: {}; Address: {}; Tags: [",
            self.name, self.phone, self.email, self.address
        )?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        f.write_str("]")
    }
}

/// Partial update for a person; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditPersonDescriptor {
    pub name: Option<PersonName>,
    pub phone: Option<Phone>,
    pub email: Option<Email>,
    pub address: Option<Address>,
    pub tags: Option<BTreeSet<Tag>>,
}

impl EditPersonDescriptor {
    pub fn is_any_field_edited(&self) -> bool {
        self.name.is_some()
            || self.phone.is_some()
            || self.email.is_some()
            || self.address.is_some()
            || self.tags.is_some()
    }
}
