//! Domain error taxonomy for roster mutations and lookups.

use crate::model::fields::{AssignmentName, GroupName, PersonName};
use crate::model::validation::ValidationError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ModelResult<T> = Result<T, ModelError>;

/// Not-found, duplicate, and validation failures raised by the model.
#[derive(Debug, Clone, PartialEq)]
pub enum ModelError {
    PersonNotFound(PersonName),
    GroupNotFound(GroupName),
    AssignmentNotFound {
        group: GroupName,
        assignment: AssignmentName,
    },
    MemberNotFound {
        group: GroupName,
        person: PersonName,
    },
    DuplicatePerson(PersonName),
    DuplicateGroup(GroupName),
    DuplicateAssignment {
        group: GroupName,
        assignment: AssignmentName,
    },
    DuplicateMember {
        group: GroupName,
        person: PersonName,
    },
    Validation(ValidationError),
}

impl ModelError {
    /// Returns true for any of the `*NotFound` variants.
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::PersonNotFound(_)
                | Self::GroupNotFound(_)
                | Self::AssignmentNotFound { .. }
                | Self::MemberNotFound { .. }
        )
    }
}

impl Display for ModelError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PersonNotFound(name) => write!(f, "person not found: {name}"),
            Self::GroupNotFound(name) => write!(f, "group not found: {name}"),
            Self::AssignmentNotFound { group, assignment } => {
                write!(f, "assignment `{assignment}` not found in group {group}")
            }
            Self::MemberNotFound { group, person } => {
                write!(f, "{person} does not exist in group {group}")
            }
            Self::DuplicatePerson(name) => {
                write!(f, "a person named {name} already exists in the address book")
            }
            Self::DuplicateGroup(name) => {
                write!(f, "a group named {name} already exists in the address book")
            }
            Self::DuplicateAssignment { group, assignment } => write!(
                f,
                "another assignment named `{assignment}` already exists in group {group}"
            ),
            Self::DuplicateMember { group, person } => {
                write!(f, "{person} already exists in group {group}")
            }
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ModelError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ModelError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}
