//! Address book repository contracts and JSON file implementation.
//!
//! # Responsibility
//! - Load and save the whole address book as one JSON document.
//! - Translate between the model and its wire shape.
//!
//! # Invariants
//! - Save rewrites the whole file; there are no partial updates.
//! - Group members reference persons by name. References that do not
//!   resolve on load are dropped, not reported as errors.
//! - Every other malformed value fails the load with `InvalidData`.
//!
//! # See also
//! - `model::address_book`

use crate::model::address_book::AddressBook;
use crate::model::assignment::Assignment;
use crate::model::error::ModelError;
use crate::model::fields::{AssignmentName, GroupName, PersonName, Tag};
use crate::model::group::Group;
use crate::model::member::{Attendance, GroupMemberDetail, Role};
use crate::model::person::Person;
use crate::model::validation::{validate_score, WEEKS_PER_SEMESTER};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use serde_json::error::Category;
use std::cell::RefCell;
use std::collections::{BTreeMap, BTreeSet};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::time::Instant;

pub type RepoResult<T> = Result<T, RepoError>;

/// Storage error for address book persistence.
#[derive(Debug)]
pub enum RepoError {
    Io { path: PathBuf, source: std::io::Error },
    Json(serde_json::Error),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { path, source } => write!(f, "storage I/O error at `{}`: {source}", path.display()),
            Self::Json(err) => write!(f, "invalid address book JSON: {err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted address book data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::Json(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<serde_json::Error> for RepoError {
    fn from(value: serde_json::Error) -> Self {
        Self::Json(value)
    }
}

impl From<ModelError> for RepoError {
    fn from(value: ModelError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

/// Repository interface for whole-book load/save.
pub trait AddressBookRepository {
    /// Reads the stored book; `Ok(None)` when nothing has been saved yet.
    fn read(&self) -> RepoResult<Option<AddressBook>>;
    /// Replaces the stored book with `book`.
    fn save(&self, book: &AddressBook) -> RepoResult<()>;
    /// Storage location, when file-backed.
    fn path(&self) -> Option<&Path>;
}

/// JSON-file-backed repository.
pub struct JsonAddressBookRepository {
    path: PathBuf,
}

impl JsonAddressBookRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn io_error(&self, source: std::io::Error) -> RepoError {
        RepoError::Io {
            path: self.path.clone(),
            source,
        }
    }
}

impl AddressBookRepository for JsonAddressBookRepository {
    fn read(&self) -> RepoResult<Option<AddressBook>> {
        let started_at = Instant::now();
        if !self.path.exists() {
            info!(
                "event=storage_read module=repo status=missing path={}",
                self.path.display()
            );
            return Ok(None);
        }

        let text = std::fs::read_to_string(&self.path).map_err(|err| self.io_error(err))?;
        match decode_address_book(&text) {
            Ok(book) => {
                info!(
                    "event=storage_read module=repo status=ok persons={} groups={} duration_ms={}",
                    book.persons().len(),
                    book.groups().len(),
                    started_at.elapsed().as_millis()
                );
                Ok(Some(book))
            }
            Err(err) => {
                error!(
                    "event=storage_read module=repo status=error error_code=decode_failed error={}",
                    err
                );
                Err(err)
            }
        }
    }

    fn save(&self, book: &AddressBook) -> RepoResult<()> {
        let started_at = Instant::now();
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|err| self.io_error(err))?;
            }
        }
        let text = encode_address_book(book)?;
        std::fs::write(&self.path, text).map_err(|err| {
            error!(
                "event=storage_save module=repo status=error error_code=write_failed error={}",
                err
            );
            self.io_error(err)
        })?;
        info!(
            "event=storage_save module=repo status=ok duration_ms={}",
            started_at.elapsed().as_millis()
        );
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        Some(self.path.as_path())
    }
}

/// Repository keeping the saved book in memory only.
#[derive(Default)]
pub struct InMemoryAddressBookRepository {
    stored: RefCell<Option<AddressBook>>,
    saves: RefCell<usize>,
}

impl InMemoryAddressBookRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_book(book: AddressBook) -> Self {
        Self {
            stored: RefCell::new(Some(book)),
            saves: RefCell::new(0),
        }
    }

    /// Number of successful saves so far.
    pub fn save_count(&self) -> usize {
        *self.saves.borrow()
    }
}

impl AddressBookRepository for InMemoryAddressBookRepository {
    fn read(&self) -> RepoResult<Option<AddressBook>> {
        Ok(self.stored.borrow().clone())
    }

    fn save(&self, book: &AddressBook) -> RepoResult<()> {
        *self.stored.borrow_mut() = Some(book.clone());
        *self.saves.borrow_mut() += 1;
        Ok(())
    }

    fn path(&self) -> Option<&Path> {
        None
    }
}

impl<R: AddressBookRepository + ?Sized> AddressBookRepository for &R {
    fn read(&self) -> RepoResult<Option<AddressBook>> {
        (**self).read()
    }

    fn save(&self, book: &AddressBook) -> RepoResult<()> {
        (**self).save(book)
    }

    fn path(&self) -> Option<&Path> {
        (**self).path()
    }
}

// Wire shapes.

#[derive(Debug, Default, Serialize, Deserialize)]
struct StoredAddressBook {
    #[serde(default)]
    persons: Vec<Person>,
    #[serde(default)]
    groups: Vec<StoredGroup>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredGroup {
    name: GroupName,
    #[serde(default)]
    tags: BTreeSet<Tag>,
    #[serde(default)]
    members: Vec<StoredMember>,
    #[serde(default)]
    assignments: Vec<Assignment>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredMember {
    person: PersonName,
    #[serde(default)]
    role: Role,
    #[serde(default)]
    attendance: Vec<bool>,
    #[serde(default)]
    grades: BTreeMap<AssignmentName, f32>,
}

/// Serializes `book` into the pretty-printed storage document.
pub fn encode_address_book(book: &AddressBook) -> RepoResult<String> {
    let stored = StoredAddressBook {
        persons: book.persons().to_vec(),
        groups: book.groups().iter().map(stored_group).collect(),
    };
    Ok(serde_json::to_string_pretty(&stored)?)
}

/// Parses a storage document into a validated address book.
///
/// Malformed JSON is `Json`; well-formed JSON carrying invalid values is
/// `InvalidData`.
pub fn decode_address_book(text: &str) -> RepoResult<AddressBook> {
    let stored: StoredAddressBook = serde_json::from_str(text).map_err(|err| match err.classify() {
        Category::Data => RepoError::InvalidData(err.to_string()),
        _ => RepoError::Json(err),
    })?;
    let persons = AddressBook::from_parts(stored.persons, Vec::new())?;

    let groups = stored
        .groups
        .into_iter()
        .map(|stored_group| model_group(&persons, stored_group))
        .collect::<RepoResult<Vec<Group>>>()?;
    Ok(AddressBook::from_parts(persons.persons().to_vec(), groups)?)
}

fn stored_group(group: &Group) -> StoredGroup {
    StoredGroup {
        name: group.name().clone(),
        tags: group.tags().clone(),
        members: group
            .members()
            .iter()
            .map(|detail| StoredMember {
                person: detail.person().name.clone(),
                role: detail.role(),
                attendance: detail.attendance().to_vec(),
                grades: detail.grades().clone(),
            })
            .collect(),
        assignments: group.assignments().to_vec(),
    }
}

fn model_group(book: &AddressBook, stored: StoredGroup) -> RepoResult<Group> {
    let known_assignments: BTreeSet<&AssignmentName> =
        stored.assignments.iter().map(Assignment::name).collect();

    let mut members = Vec::with_capacity(stored.members.len());
    for member in stored.members {
        let Ok(person) = book.person(&member.person) else {
            warn!(
                "event=storage_read module=repo status=dropped reason=unknown_person group={} person={}",
                stored.name, member.person
            );
            continue;
        };

        let mut grades = BTreeMap::new();
        for (assignment, score) in member.grades {
            if !known_assignments.contains(&assignment) {
                warn!(
                    "event=storage_read module=repo status=dropped reason=unknown_assignment group={} assignment={}",
                    stored.name, assignment
                );
                continue;
            }
            let score = validate_score(score).map_err(|err| {
                RepoError::InvalidData(format!(
                    "grade of {} for `{}` in group {}: {err}",
                    member.person, assignment, stored.name
                ))
            })?;
            grades.insert(assignment, score);
        }

        members.push(GroupMemberDetail::with_state(
            person.clone(),
            member.role,
            attendance_from(&member.attendance),
            grades,
        ));
    }

    Ok(Group::with_parts(
        stored.name,
        stored.tags,
        members,
        stored.assignments,
    )?)
}

/// Pads or truncates persisted attendance to the fixed week count.
fn attendance_from(values: &[bool]) -> Attendance {
    let mut attendance = [false; WEEKS_PER_SEMESTER];
    for (slot, present) in attendance.iter_mut().zip(values.iter()) {
        *slot = *present;
    }
    attendance
}

#[cfg(test)]
mod tests {
    use super::{attendance_from, decode_address_book, RepoError};

    #[test]
    fn attendance_is_padded_and_truncated() {
        let short = attendance_from(&[true, true]);
        assert_eq!(short.iter().filter(|value| **value).count(), 2);

        let long = attendance_from(&[true; 20]);
        assert_eq!(long.len(), 13);
    }

    #[test]
    fn empty_document_decodes_to_empty_book() {
        let book = decode_address_book("{}").unwrap();
        assert!(book.persons().is_empty());
        assert!(book.groups().is_empty());
    }

    #[test]
    fn duplicate_persons_are_invalid_data() {
        let text = r#"{
            "persons": [
                {"name": "Alex Yeoh", "phone": "87438807", "email": "alex@example.com", "address": "Blk 30"},
                {"name": "Alex Yeoh", "phone": "99272758", "email": "other@example.com", "address": "Blk 31"}
            ]
        }"#;
        let err = decode_address_book(text).unwrap_err();
        assert!(matches!(err, RepoError::InvalidData(_)));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = decode_address_book("{ not json").unwrap_err();
        assert!(matches!(err, RepoError::Json(_)));
    }
}
