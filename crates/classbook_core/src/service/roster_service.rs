//! Roster façade used by the command layer.
//!
//! # Responsibility
//! - Own the in-memory address book together with list filters and the
//!   current result view.
//! - Resolve persons and groups by name before delegating to the model.
//! - Notify subscribers after every successful change.
//!
//! # Invariants
//! - Failed operations leave the book, filters, and view untouched and emit
//!   nothing.
//! - Filtered lists are snapshots in storage order.
//!
//! # See also
//! - `model::address_book`
//! - `service::events`

use crate::model::address_book::AddressBook;
use crate::model::assignment::Assignment;
use crate::model::error::{ModelError, ModelResult};
use crate::model::fields::{AssignmentName, GroupName, PersonName};
use crate::model::group::Group;
use crate::model::member::GroupMemberDetail;
use crate::model::person::Person;
use crate::service::events::{EventBus, Listener, ListenerId, ResultView, RosterEvent};
use crate::service::filter::{GroupFilter, PersonFilter};
use chrono::NaiveDate;
use log::debug;

/// Use-case façade over one `AddressBook`.
#[derive(Debug, Default)]
pub struct RosterService {
    book: AddressBook,
    person_filter: PersonFilter,
    group_filter: GroupFilter,
    view: ResultView,
    events: EventBus,
}

impl RosterService {
    /// Creates a service over `book` showing every person.
    pub fn new(book: AddressBook) -> Self {
        Self {
            book,
            ..Self::default()
        }
    }

    pub fn address_book(&self) -> &AddressBook {
        &self.book
    }

    /// Replaces the whole book and resets both filters.
    pub fn set_address_book(&mut self, book: AddressBook) {
        self.book.reset_data(&book);
        self.person_filter = PersonFilter::All;
        self.group_filter = GroupFilter::All;
        self.emit(RosterEvent::PersonsChanged);
        self.emit(RosterEvent::GroupsChanged);
    }

    /// Empties the book.
    pub fn clear(&mut self) {
        self.set_address_book(AddressBook::new());
        self.set_view(ResultView::Persons);
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    pub fn subscribe(&mut self, listener: Listener) -> ListenerId {
        self.events.subscribe(listener)
    }

    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    // Persons.

    pub fn has_person(&self, person: &Person) -> bool {
        self.book.has_person(person)
    }

    pub fn person(&self, name: &PersonName) -> ModelResult<&Person> {
        self.book.person(name)
    }

    pub fn add_person(&mut self, person: Person) -> ModelResult<()> {
        self.book.add_person(person)?;
        self.person_filter = PersonFilter::All;
        self.emit(RosterEvent::PersonsChanged);
        self.set_view(ResultView::Persons);
        Ok(())
    }

    /// Replaces the person named `target`; group memberships follow the edit.
    pub fn set_person(&mut self, target: &PersonName, edited: Person) -> ModelResult<()> {
        let current = self.book.person(target)?.clone();
        let new_name = edited.name.clone();
        self.book.set_person(&current, edited)?;
        self.emit(RosterEvent::PersonsChanged);
        self.emit(RosterEvent::GroupsChanged);
        let view = match &self.view {
            ResultView::Attendance { person, group } if person == target && *person != new_name => {
                Some(ResultView::Attendance {
                    person: new_name,
                    group: group.clone(),
                })
            }
            _ => None,
        };
        if let Some(view) = view {
            self.set_view(view);
        }
        Ok(())
    }

    /// Deletes a person and removes them from every group.
    pub fn delete_person(&mut self, name: &PersonName) -> ModelResult<Person> {
        let current = self.book.person(name)?.clone();
        let removed = self.book.remove_person(&current)?;
        self.emit(RosterEvent::PersonsChanged);
        self.emit(RosterEvent::GroupsChanged);
        if matches!(&self.view, ResultView::Attendance { person, .. } if person == name) {
            self.set_view(ResultView::Persons);
        }
        Ok(removed)
    }

    pub fn filtered_persons(&self) -> Vec<&Person> {
        self.book
            .persons()
            .iter()
            .filter(|person| self.person_filter.matches(person))
            .collect()
    }

    pub fn person_filter(&self) -> &PersonFilter {
        &self.person_filter
    }

    /// Applies `filter` and switches the view to the person list.
    pub fn update_person_filter(&mut self, filter: PersonFilter) {
        self.person_filter = filter;
        self.emit(RosterEvent::PersonsChanged);
        self.set_view(ResultView::Persons);
    }

    // Groups.

    pub fn has_group(&self, group: &Group) -> bool {
        self.book.has_group(group)
    }

    pub fn group(&self, name: &GroupName) -> ModelResult<&Group> {
        self.book.group(name)
    }

    pub fn add_group(&mut self, group: Group) -> ModelResult<()> {
        self.book.add_group(group)?;
        self.group_filter = GroupFilter::All;
        self.emit(RosterEvent::GroupsChanged);
        self.set_view(ResultView::Groups);
        Ok(())
    }

    /// Replaces the group named `target`, keeping members and assignments.
    pub fn set_group(&mut self, target: &GroupName, edited: Group) -> ModelResult<()> {
        let new_name = edited.name().clone();
        self.book.set_group(target, edited)?;
        self.emit(RosterEvent::GroupsChanged);
        let view = match &self.view {
            ResultView::GroupDetails { group } if group == target => {
                Some(ResultView::GroupDetails { group: new_name })
            }
            ResultView::Attendance { person, group } if group == target => {
                Some(ResultView::Attendance {
                    person: person.clone(),
                    group: new_name,
                })
            }
            _ => None,
        };
        if let Some(view) = view {
            self.set_view(view);
        }
        Ok(())
    }

    pub fn delete_group(&mut self, name: &GroupName) -> ModelResult<Group> {
        let removed = self.book.remove_group(name)?;
        self.emit(RosterEvent::GroupsChanged);
        let showing_removed = match &self.view {
            ResultView::GroupDetails { group } | ResultView::Attendance { group, .. } => {
                group == name
            }
            _ => false,
        };
        if showing_removed {
            self.set_view(ResultView::Groups);
        }
        Ok(removed)
    }

    pub fn filtered_groups(&self) -> Vec<&Group> {
        self.book
            .groups()
            .iter()
            .filter(|group| self.group_filter.matches(group))
            .collect()
    }

    pub fn group_filter(&self) -> &GroupFilter {
        &self.group_filter
    }

    /// Applies `filter` and switches the view to the group list.
    pub fn update_group_filter(&mut self, filter: GroupFilter) {
        self.group_filter = filter;
        self.emit(RosterEvent::GroupsChanged);
        self.set_view(ResultView::Groups);
    }

    /// Switches the view to the member list of `name`.
    pub fn show_group_details(&mut self, name: &GroupName) -> ModelResult<&Group> {
        self.book.group(name)?;
        self.set_view(ResultView::GroupDetails {
            group: name.clone(),
        });
        self.book.group(name)
    }

    /// Switches the view to one member's attendance record.
    pub fn show_attendance(
        &mut self,
        person: &PersonName,
        group: &GroupName,
    ) -> ModelResult<&GroupMemberDetail> {
        self.member_detail(person, group)?;
        self.set_view(ResultView::Attendance {
            person: person.clone(),
            group: group.clone(),
        });
        self.member_detail(person, group)
    }

    pub fn member_detail(
        &self,
        person: &PersonName,
        group: &GroupName,
    ) -> ModelResult<&GroupMemberDetail> {
        let person = self.book.person(person)?;
        let group = self.book.group(group)?;
        group
            .member(person)
            .ok_or_else(|| ModelError::MemberNotFound {
                group: group.name().clone(),
                person: person.name.clone(),
            })
    }

    // Memberships.

    pub fn add_person_to_group(&mut self, person: &PersonName, group: &GroupName) -> ModelResult<()> {
        let person = self.book.person(person)?.clone();
        self.book.add_person_to_group(&person, group)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(())
    }

    pub fn delete_person_from_group(
        &mut self,
        person: &PersonName,
        group: &GroupName,
    ) -> ModelResult<()> {
        let person = self.book.person(person)?.clone();
        self.book.delete_person_from_group(&person, group)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(())
    }

    /// Returns the number of groups the person was removed from.
    pub fn delete_person_from_all_groups(&mut self, person: &PersonName) -> ModelResult<usize> {
        let person = self.book.person(person)?.clone();
        let removed = self.book.delete_person_from_all_groups(&person);
        if removed > 0 {
            self.emit(RosterEvent::GroupsChanged);
        }
        Ok(removed)
    }

    pub fn is_person_in_group(&self, person: &PersonName, group: &GroupName) -> ModelResult<bool> {
        let person = self.book.person(person)?;
        self.book.is_person_in_group(person, group)
    }

    // Attendance.

    pub fn mark_attendance(
        &mut self,
        person: &PersonName,
        group: &GroupName,
        week: i64,
    ) -> ModelResult<()> {
        let person = self.book.person(person)?.clone();
        self.book.mark_attendance(&person, group, week)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(())
    }

    pub fn unmark_attendance(
        &mut self,
        person: &PersonName,
        group: &GroupName,
        week: i64,
    ) -> ModelResult<()> {
        let person = self.book.person(person)?.clone();
        self.book.unmark_attendance(&person, group, week)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(())
    }

    // Assignments.

    pub fn add_assignment_to_group(
        &mut self,
        name: AssignmentName,
        deadline: NaiveDate,
        group: &GroupName,
        penalty: f32,
    ) -> ModelResult<Assignment> {
        let added = self
            .book
            .add_assignment_to_group(name, deadline, group, penalty)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(added)
    }

    pub fn edit_assignment(
        &mut self,
        name: &AssignmentName,
        new_name: Option<AssignmentName>,
        deadline: Option<NaiveDate>,
        group: &GroupName,
        penalty: Option<f32>,
    ) -> ModelResult<Assignment> {
        let edited = self
            .book
            .edit_assignment(name, new_name, deadline, group, penalty)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(edited)
    }

    pub fn remove_assignment_from_group(
        &mut self,
        name: &AssignmentName,
        group: &GroupName,
    ) -> ModelResult<Assignment> {
        let removed = self.book.remove_assignment_from_group(name, group)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(removed)
    }

    pub fn is_assignment_in_group(
        &self,
        name: &AssignmentName,
        group: &GroupName,
    ) -> ModelResult<bool> {
        self.book.is_assignment_in_group(name, group)
    }

    /// Grades as of today; returns the stored (possibly penalized) score.
    pub fn grade_assignment(
        &mut self,
        person: &PersonName,
        group: &GroupName,
        assignment: &AssignmentName,
        score: f32,
    ) -> ModelResult<f32> {
        let person = self.book.person(person)?.clone();
        let stored = self
            .book
            .grade_assignment(&person, group, assignment, score)?;
        self.emit(RosterEvent::GroupsChanged);
        Ok(stored)
    }

    pub fn grade(
        &self,
        person: &PersonName,
        group: &GroupName,
        assignment: &AssignmentName,
    ) -> ModelResult<Option<f32>> {
        let person = self.book.person(person)?;
        self.book.grade(person, group, assignment)
    }

    fn set_view(&mut self, view: ResultView) {
        self.view = view.clone();
        self.emit(RosterEvent::ViewChanged(view));
    }

    fn emit(&mut self, event: RosterEvent) {
        debug!("event=roster_event module=service status=emit kind={:?}", event);
        self.events.emit(&event);
    }
}
