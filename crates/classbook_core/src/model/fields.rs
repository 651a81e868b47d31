//! Validated string value types.
//!
//! # Responsibility
//! - Wrap raw strings into typed fields that are valid by construction.
//! - Keep (de)serialization aligned with validation: a malformed persisted
//!   value fails decoding instead of entering the model.
//!
//! # Invariants
//! - Every constructor trims surrounding whitespace before validating.
//! - Values are immutable once built; edits replace the whole value.

use crate::model::validation::{
    is_valid_assignment_name, is_valid_email, is_valid_group_name, is_valid_person_name,
    is_valid_phone, is_valid_tag, ValidationError,
};
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

macro_rules! validated_field {
    ($(#[$meta:meta])* $name:ident, $check:expr, $error:path) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(String);

        impl $name {
            /// Validates and wraps `value`.
            pub fn parse(value: impl AsRef<str>) -> Result<Self, ValidationError> {
                let trimmed = value.as_ref().trim();
                let check: fn(&str) -> bool = $check;
                if check(trimmed) {
                    Ok(Self(trimmed.to_string()))
                } else {
                    Err($error(value.as_ref().to_string()))
                }
            }

            pub fn as_str(&self) -> &str {
                self.0.as_str()
            }
        }

        impl TryFrom<String> for $name {
            type Error = ValidationError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                Self::parse(value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl Display for $name {
            fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl PartialEq<str> for $name {
            fn eq(&self, other: &str) -> bool {
                self.0 == other
            }
        }
    };
}

validated_field!(
    /// Person display name; also the person's weak identity.
    PersonName,
    is_valid_person_name,
    ValidationError::InvalidPersonName
);
validated_field!(Phone, is_valid_phone, ValidationError::InvalidPhone);
validated_field!(Email, is_valid_email, ValidationError::InvalidEmail);
validated_field!(
    /// Free-form postal address; only blank values are rejected.
    Address,
    |value| !value.is_empty(),
    ValidationError::InvalidAddress
);
validated_field!(Tag, is_valid_tag, ValidationError::InvalidTag);
validated_field!(
    /// Group (tutorial section) name, e.g. `CS2103T T12`.
    GroupName,
    is_valid_group_name,
    ValidationError::InvalidGroupName
);
validated_field!(
    /// Assignment name, unique within its group (case-sensitive).
    AssignmentName,
    is_valid_assignment_name,
    ValidationError::InvalidAssignmentName
);

/// Parses every raw tag, failing on the first invalid one.
pub fn parse_tags<I, S>(values: I) -> Result<std::collections::BTreeSet<Tag>, ValidationError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    values.into_iter().map(Tag::parse).collect()
}

#[cfg(test)]
mod tests {
    use super::{parse_tags, Address, GroupName, PersonName, Tag};
    use crate::model::validation::ValidationError;

    #[test]
    fn parse_trims_input() {
        let name = PersonName::parse("  Alex Yeoh ").unwrap();
        assert_eq!(name.as_str(), "Alex Yeoh");
    }

    #[test]
    fn blank_address_is_rejected() {
        let err = Address::parse("   ").unwrap_err();
        assert_eq!(err, ValidationError::InvalidAddress("   ".to_string()));
    }

    #[test]
    fn serde_rejects_invalid_group_name() {
        let err = serde_json::from_str::<GroupName>("\"bad;name\"").unwrap_err();
        assert!(err.to_string().contains("invalid group name"));
    }

    #[test]
    fn tags_deduplicate_and_sort() {
        let tags = parse_tags(["friends", "CS", "friends"]).unwrap();
        let names: Vec<&str> = tags.iter().map(Tag::as_str).collect();
        assert_eq!(names, vec!["CS", "friends"]);
    }
}
