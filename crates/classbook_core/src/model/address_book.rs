//! Address book aggregate root.
//!
//! # Responsibility
//! - Hold the unique person list and the unique group list.
//! - Apply cross-entity rules: person edits propagate into memberships and
//!   person deletion cascades out of every group.
//!
//! # Invariants
//! - No two persons share a name.
//! - No two groups share a name (name lookups must be unambiguous).
//! - Every group member is also present in the person list.
//! - Failed operations leave the book unchanged.

use crate::model::assignment::Assignment;
use crate::model::error::{ModelError, ModelResult};
use crate::model::fields::{AssignmentName, GroupName, PersonName};
use crate::model::group::Group;
use crate::model::person::Person;
use chrono::NaiveDate;
use log::debug;

/// In-memory roster state: persons plus groups.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AddressBook {
    persons: Vec<Person>,
    groups: Vec<Group>,
}

impl AddressBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a book from loaded collections, enforcing uniqueness.
    pub fn from_parts(persons: Vec<Person>, groups: Vec<Group>) -> ModelResult<Self> {
        let mut book = Self::new();
        for person in persons {
            book.add_person(person)?;
        }
        for group in groups {
            book.add_group(group)?;
        }
        Ok(book)
    }

    /// Replaces all data with a copy of `other`.
    pub fn reset_data(&mut self, other: &AddressBook) {
        self.persons = other.persons.clone();
        self.groups = other.groups.clone();
    }

    pub fn clear(&mut self) {
        self.persons.clear();
        self.groups.clear();
    }

    // Persons.

    pub fn persons(&self) -> &[Person] {
        &self.persons
    }

    /// Returns true if a person with the same name exists.
    pub fn has_person(&self, person: &Person) -> bool {
        self.persons.iter().any(|item| item.is_same_person(person))
    }

    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        if self.has_person(&person) {
            return Err(ModelError::DuplicatePerson(person.name));
        }
        self.persons.push(person);
        Ok(())
    }

    /// Looks a person up by exact name.
    pub fn person(&self, name: &PersonName) -> ModelResult<&Person> {
        self.persons
            .iter()
            .find(|item| &item.name == name)
            .ok_or_else(|| ModelError::PersonNotFound(name.clone()))
    }

    /// Replaces `target` with `edited` everywhere, including group
    /// memberships.
    pub fn set_person(&mut self, target: &Person, edited: Person) -> ModelResult<()> {
        let index = self
            .persons
            .iter()
            .position(|item| item == target)
            .ok_or_else(|| ModelError::PersonNotFound(target.name.clone()))?;
        let collides = self
            .persons
            .iter()
            .enumerate()
            .any(|(other, item)| other != index && item.is_same_person(&edited));
        if collides {
            return Err(ModelError::DuplicatePerson(edited.name));
        }

        for group in &mut self.groups {
            group.replace_person(target, edited.clone());
        }
        self.persons[index] = edited;
        Ok(())
    }

    /// Removes `person` from the book and from every group.
    pub fn remove_person(&mut self, person: &Person) -> ModelResult<Person> {
        let index = self
            .persons
            .iter()
            .position(|item| item == person)
            .ok_or_else(|| ModelError::PersonNotFound(person.name.clone()))?;
        self.delete_person_from_all_groups(person);
        Ok(self.persons.remove(index))
    }

    // Groups.

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    /// Returns true if a group with the same name exists.
    pub fn has_group(&self, group: &Group) -> bool {
        self.groups.iter().any(|item| item.is_same_group(group))
    }

    pub fn add_group(&mut self, group: Group) -> ModelResult<()> {
        if self.has_group(&group) {
            return Err(ModelError::DuplicateGroup(group.name().clone()));
        }
        self.groups.push(group);
        Ok(())
    }

    pub fn group(&self, name: &GroupName) -> ModelResult<&Group> {
        self.groups
            .iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| ModelError::GroupNotFound(name.clone()))
    }

    pub fn group_mut(&mut self, name: &GroupName) -> ModelResult<&mut Group> {
        self.groups
            .iter_mut()
            .find(|item| item.name() == name)
            .ok_or_else(|| ModelError::GroupNotFound(name.clone()))
    }

    /// Replaces the group called `target` with `edited`.
    ///
    /// Renaming onto another group's name fails; keeping the own name
    /// succeeds.
    pub fn set_group(&mut self, target: &GroupName, edited: Group) -> ModelResult<()> {
        let index = self.group_index(target)?;
        let collides = self
            .groups
            .iter()
            .enumerate()
            .any(|(other, item)| other != index && item.is_same_group(&edited));
        if collides {
            return Err(ModelError::DuplicateGroup(edited.name().clone()));
        }
        self.groups[index] = edited;
        Ok(())
    }

    /// Removes a group together with all of its member details.
    pub fn remove_group(&mut self, name: &GroupName) -> ModelResult<Group> {
        let index = self.group_index(name)?;
        Ok(self.groups.remove(index))
    }

    // Memberships.

    pub fn add_person_to_group(&mut self, person: &Person, group: &GroupName) -> ModelResult<()> {
        let person = self.known_person(person)?;
        self.group_mut(group)?.add(person)?;
        Ok(())
    }

    pub fn delete_person_from_group(
        &mut self,
        person: &Person,
        group: &GroupName,
    ) -> ModelResult<()> {
        self.group_mut(group)?.remove(person)?;
        Ok(())
    }

    /// Removes `person` from every group containing them.
    ///
    /// Returns how many groups were touched; a second call returns 0.
    pub fn delete_person_from_all_groups(&mut self, person: &Person) -> usize {
        let mut removed = 0;
        for group in &mut self.groups {
            if group.contains(person) && group.remove(person).is_ok() {
                removed += 1;
            }
        }
        debug!(
            "event=person_cascade_delete module=model status=ok groups_removed={}",
            removed
        );
        removed
    }

    pub fn is_person_in_group(&self, person: &Person, group: &GroupName) -> ModelResult<bool> {
        Ok(self.group(group)?.contains(person))
    }

    // Attendance.

    pub fn mark_attendance(
        &mut self,
        person: &Person,
        group: &GroupName,
        week: i64,
    ) -> ModelResult<()> {
        self.group_mut(group)?.mark_attendance(person, week)
    }

    pub fn unmark_attendance(
        &mut self,
        person: &Person,
        group: &GroupName,
        week: i64,
    ) -> ModelResult<()> {
        self.group_mut(group)?.unmark_attendance(person, week)
    }

    // Assignments.

    pub fn add_assignment_to_group(
        &mut self,
        name: AssignmentName,
        deadline: NaiveDate,
        group: &GroupName,
        penalty: f32,
    ) -> ModelResult<Assignment> {
        Ok(self
            .group_mut(group)?
            .add_assignment(name, deadline, penalty)?
            .clone())
    }

    pub fn edit_assignment(
        &mut self,
        name: &AssignmentName,
        new_name: Option<AssignmentName>,
        deadline: Option<NaiveDate>,
        group: &GroupName,
        penalty: Option<f32>,
    ) -> ModelResult<Assignment> {
        Ok(self
            .group_mut(group)?
            .edit_assignment(name, new_name, deadline, penalty)?
            .clone())
    }

    pub fn remove_assignment_from_group(
        &mut self,
        name: &AssignmentName,
        group: &GroupName,
    ) -> ModelResult<Assignment> {
        self.group_mut(group)?.remove_assignment(name)
    }

    pub fn is_assignment_in_group(
        &self,
        name: &AssignmentName,
        group: &GroupName,
    ) -> ModelResult<bool> {
        Ok(self.group(group)?.has_assignment(name))
    }

    /// Grades as of the local current date; returns the stored score.
    pub fn grade_assignment(
        &mut self,
        person: &Person,
        group: &GroupName,
        assignment: &AssignmentName,
        score: f32,
    ) -> ModelResult<f32> {
        self.group_mut(group)?
            .grade_assignment(person, assignment, score)
    }

    pub fn grade(
        &self,
        person: &Person,
        group: &GroupName,
        assignment: &AssignmentName,
    ) -> ModelResult<Option<f32>> {
        self.group(group)?.grade(person, assignment)
    }

    fn group_index(&self, name: &GroupName) -> ModelResult<usize> {
        self.groups
            .iter()
            .position(|item| item.name() == name)
            .ok_or_else(|| ModelError::GroupNotFound(name.clone()))
    }

    /// Resolves `person` to the stored record so groups share its exact
    /// field values.
    fn known_person(&self, person: &Person) -> ModelResult<Person> {
        self.persons
            .iter()
            .find(|item| *item == person)
            .cloned()
            .ok_or_else(|| ModelError::PersonNotFound(person.name.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::AddressBook;
    use crate::model::error::ModelError;
    use crate::model::fields::{Address, Email, GroupName, PersonName, Phone};
    use crate::model::group::Group;
    use crate::model::person::{EditPersonDescriptor, Person};
    use std::collections::BTreeSet;

    fn person(name: &str) -> Person {
        Person::new(
            PersonName::parse(name).unwrap(),
            Phone::parse("91031282").unwrap(),
            Email::parse("person@example.com").unwrap(),
            Address::parse("Blk 436 Serangoon Gardens Street 26").unwrap(),
            BTreeSet::new(),
        )
    }

    fn group_name(value: &str) -> GroupName {
        GroupName::parse(value).unwrap()
    }

    fn book_with_two_groups() -> (AddressBook, Person) {
        let mut book = AddressBook::new();
        let alex = person("Alex Yeoh");
        book.add_person(alex.clone()).unwrap();
        for name in ["T12", "T13"] {
            book.add_group(Group::new(group_name(name), BTreeSet::new()))
                .unwrap();
            book.add_person_to_group(&alex, &group_name(name)).unwrap();
        }
        (book, alex)
    }

    #[test]
    fn duplicate_person_by_name_is_rejected() {
        let mut book = AddressBook::new();
        book.add_person(person("Alex Yeoh")).unwrap();
        let mut twin = person("Alex Yeoh");
        twin.phone = Phone::parse("12345678").unwrap();
        let err = book.add_person(twin).unwrap_err();
        assert!(matches!(err, ModelError::DuplicatePerson(_)));
    }

    #[test]
    fn lookup_by_name_reports_not_found() {
        let book = AddressBook::new();
        let err = book.person(&PersonName::parse("Nobody").unwrap()).unwrap_err();
        assert!(err.is_not_found());
        let err = book.group(&group_name("T99")).unwrap_err();
        assert!(matches!(err, ModelError::GroupNotFound(_)));
    }

    #[test]
    fn remove_person_cascades_out_of_every_group() {
        let (mut book, alex) = book_with_two_groups();
        book.remove_person(&alex).unwrap();
        assert!(book.groups().iter().all(|group| !group.contains(&alex)));

        assert_eq!(book.delete_person_from_all_groups(&alex), 0);
        let err = book.remove_person(&alex).unwrap_err();
        assert!(matches!(err, ModelError::PersonNotFound(_)));
    }

    #[test]
    fn adding_unknown_person_to_group_fails() {
        let (mut book, _) = book_with_two_groups();
        let err = book
            .add_person_to_group(&person("Stranger"), &group_name("T12"))
            .unwrap_err();
        assert!(matches!(err, ModelError::PersonNotFound(_)));
    }

    #[test]
    fn person_edit_propagates_into_groups() {
        let (mut book, alex) = book_with_two_groups();
        book.mark_attendance(&alex, &group_name("T12"), 1).unwrap();

        let edited = alex.edited(&EditPersonDescriptor {
            email: Some(Email::parse("alex@u.nus.edu").unwrap()),
            ..EditPersonDescriptor::default()
        });
        book.set_person(&alex, edited.clone()).unwrap();

        let t12 = book.group(&group_name("T12")).unwrap();
        assert!(t12.contains(&edited));
        assert_eq!(t12.member(&edited).unwrap().attendance_count(), 1);
        assert!(book.group(&group_name("T13")).unwrap().contains(&edited));
    }

    #[test]
    fn rename_group_onto_existing_name_fails_but_own_name_succeeds() {
        let (mut book, alex) = book_with_two_groups();
        let t12 = book.group(&group_name("T12")).unwrap().clone();

        let collide = t12.renamed(group_name("T13"), BTreeSet::new());
        let err = book.set_group(&group_name("T12"), collide).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateGroup(_)));

        let same = t12.renamed(group_name("T12"), BTreeSet::new());
        book.set_group(&group_name("T12"), same).unwrap();
        assert!(book.group(&group_name("T12")).unwrap().contains(&alex));
    }

    #[test]
    fn remove_group_drops_its_members() {
        let (mut book, alex) = book_with_two_groups();
        let removed = book.remove_group(&group_name("T12")).unwrap();
        assert!(removed.contains(&alex));
        assert_eq!(book.groups().len(), 1);
        assert!(book.has_person(&alex));
    }
}
