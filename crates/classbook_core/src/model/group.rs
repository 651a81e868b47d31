//! Group (tutorial section) domain model.
//!
//! # Responsibility
//! - Own the member details and assignments of one group.
//! - Keep members, assignments, and grades mutually consistent.
//!
//! # Invariants
//! - At most one `GroupMemberDetail` per person (strong equality).
//! - Assignment names are unique within the group (exact, case-sensitive).
//! - Every stored grade key names an assignment of this group.
//! - Members and assignments keep insertion order.

use crate::model::assignment::Assignment;
use crate::model::error::{ModelError, ModelResult};
use crate::model::fields::{AssignmentName, GroupName, Tag};
use crate::model::member::GroupMemberDetail;
use crate::model::person::Person;
use chrono::{Local, NaiveDate};
use std::collections::BTreeSet;
use std::fmt::{Display, Formatter};

/// A named roster of members with its own assignments.
#[derive(Debug, Clone)]
pub struct Group {
    name: GroupName,
    tags: BTreeSet<Tag>,
    members: Vec<GroupMemberDetail>,
    assignments: Vec<Assignment>,
}

/// Groups compare by name and tags only.
impl PartialEq for Group {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.tags == other.tags
    }
}

impl Group {
    /// Creates an empty group.
    pub fn new(name: GroupName, tags: BTreeSet<Tag>) -> Self {
        Self {
            name,
            tags,
            members: Vec::new(),
            assignments: Vec::new(),
        }
    }

    /// Rebuilds a group from persisted parts.
    ///
    /// Duplicate members or assignments are rejected the same way live
    /// mutations are.
    pub fn with_parts(
        name: GroupName,
        tags: BTreeSet<Tag>,
        members: Vec<GroupMemberDetail>,
        assignments: Vec<Assignment>,
    ) -> ModelResult<Self> {
        let mut group = Self::new(name, tags);
        for assignment in assignments {
            group.ensure_assignment_name_free(assignment.name(), None)?;
            group.assignments.push(assignment);
        }
        for detail in members {
            if group.contains(detail.person()) {
                return Err(group.duplicate_member(detail.person()));
            }
            group.members.push(detail);
        }
        Ok(group)
    }

    pub fn name(&self) -> &GroupName {
        &self.name
    }

    pub fn tags(&self) -> &BTreeSet<Tag> {
        &self.tags
    }

    /// Returns true if both groups share the same name.
    pub fn is_same_group(&self, other: &Group) -> bool {
        self.name == other.name
    }

    /// Returns a copy carrying `name` and `tags` but the same members and
    /// assignments.
    pub fn renamed(&self, name: GroupName, tags: BTreeSet<Tag>) -> Group {
        Group {
            name,
            tags,
            ..self.clone()
        }
    }

    // Members.

    pub fn members(&self) -> &[GroupMemberDetail] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn contains(&self, person: &Person) -> bool {
        self.members.iter().any(|detail| detail.person() == person)
    }

    pub fn member(&self, person: &Person) -> Option<&GroupMemberDetail> {
        self.members.iter().find(|detail| detail.person() == person)
    }

    pub fn member_mut(&mut self, person: &Person) -> Option<&mut GroupMemberDetail> {
        self.members
            .iter_mut()
            .find(|detail| detail.person() == person)
    }

    /// Adds `person` as a student with no attendance.
    pub fn add(&mut self, person: Person) -> ModelResult<&GroupMemberDetail> {
        if self.contains(&person) {
            return Err(self.duplicate_member(&person));
        }
        self.members.push(GroupMemberDetail::new(person));
        let index = self.members.len() - 1;
        Ok(&self.members[index])
    }

    /// Removes `person` and everything recorded about them in this group.
    pub fn remove(&mut self, person: &Person) -> ModelResult<GroupMemberDetail> {
        let index = self
            .members
            .iter()
            .position(|detail| detail.person() == person)
            .ok_or_else(|| self.member_not_found(person))?;
        Ok(self.members.remove(index))
    }

    /// Points the member detail of `old` at `new`, keeping role, attendance,
    /// and grades. Returns false when `old` is not a member.
    pub fn replace_person(&mut self, old: &Person, new: Person) -> bool {
        match self.member_mut(old) {
            Some(detail) => {
                detail.replace_person(new);
                true
            }
            None => false,
        }
    }

    pub fn mark_attendance(&mut self, person: &Person, week: i64) -> ModelResult<()> {
        let detail = self.require_member_mut(person)?;
        detail.mark_attendance(week)?;
        Ok(())
    }

    pub fn unmark_attendance(&mut self, person: &Person, week: i64) -> ModelResult<()> {
        let detail = self.require_member_mut(person)?;
        detail.unmark_attendance(week)?;
        Ok(())
    }

    // Assignments.

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn has_assignment(&self, name: &AssignmentName) -> bool {
        self.assignments.iter().any(|item| item.name() == name)
    }

    pub fn assignment(&self, name: &AssignmentName) -> ModelResult<&Assignment> {
        self.assignments
            .iter()
            .find(|item| item.name() == name)
            .ok_or_else(|| self.assignment_not_found(name))
    }

    pub fn add_assignment(
        &mut self,
        name: AssignmentName,
        deadline: NaiveDate,
        penalty: f32,
    ) -> ModelResult<&Assignment> {
        self.ensure_assignment_name_free(&name, None)?;
        let assignment = Assignment::new(name, deadline, penalty)?;
        self.assignments.push(assignment);
        let index = self.assignments.len() - 1;
        Ok(&self.assignments[index])
    }

    /// Edits the assignment called `name`; `None` arguments leave the
    /// matching field unchanged.
    ///
    /// A rename carries every member's stored grade over to the new name.
    pub fn edit_assignment(
        &mut self,
        name: &AssignmentName,
        new_name: Option<AssignmentName>,
        deadline: Option<NaiveDate>,
        penalty: Option<f32>,
    ) -> ModelResult<&Assignment> {
        let index = self.assignment_index(name)?;
        if let Some(new_name) = new_name.as_ref() {
            self.ensure_assignment_name_free(new_name, Some(index))?;
        }

        let mut updated = self.assignments[index].clone();
        if let Some(penalty) = penalty {
            updated.set_penalty(penalty)?;
        }
        if let Some(deadline) = deadline {
            updated.set_deadline(deadline);
        }
        if let Some(new_name) = new_name {
            if &new_name != name {
                for detail in &mut self.members {
                    detail.rename_grade(name, &new_name);
                }
            }
            updated.rename(new_name);
        }

        self.assignments[index] = updated;
        Ok(&self.assignments[index])
    }

    /// Removes the assignment and every grade recorded for it.
    pub fn remove_assignment(&mut self, name: &AssignmentName) -> ModelResult<Assignment> {
        let index = self.assignment_index(name)?;
        for detail in &mut self.members {
            detail.drop_grade(name);
        }
        Ok(self.assignments.remove(index))
    }

    /// Grades `person` on assignment `name` as of the local current date.
    pub fn grade_assignment(
        &mut self,
        person: &Person,
        name: &AssignmentName,
        score: f32,
    ) -> ModelResult<f32> {
        self.grade_assignment_on(person, name, score, Local::now().date_naive())
    }

    pub fn grade_assignment_on(
        &mut self,
        person: &Person,
        name: &AssignmentName,
        score: f32,
        today: NaiveDate,
    ) -> ModelResult<f32> {
        let assignment = self.assignment(name)?.clone();
        let detail = self.require_member_mut(person)?;
        Ok(detail.grade_assignment_on(&assignment, score, today)?)
    }

    pub fn grade(&self, person: &Person, name: &AssignmentName) -> ModelResult<Option<f32>> {
        let assignment = self.assignment(name)?;
        let detail = self
            .member(person)
            .ok_or_else(|| self.member_not_found(person))?;
        Ok(detail.grade(assignment.name()))
    }

    fn assignment_index(&self, name: &AssignmentName) -> ModelResult<usize> {
        self.assignments
            .iter()
            .position(|item| item.name() == name)
            .ok_or_else(|| self.assignment_not_found(name))
    }

    fn ensure_assignment_name_free(
        &self,
        name: &AssignmentName,
        except_index: Option<usize>,
    ) -> ModelResult<()> {
        let collides = self
            .assignments
            .iter()
            .enumerate()
            .any(|(index, item)| Some(index) != except_index && item.name() == name);
        if collides {
            return Err(ModelError::DuplicateAssignment {
                group: self.name.clone(),
                assignment: name.clone(),
            });
        }
        Ok(())
    }

    fn require_member_mut(&mut self, person: &Person) -> ModelResult<&mut GroupMemberDetail> {
        let missing = self.member_not_found(person);
        self.member_mut(person).ok_or(missing)
    }

    fn member_not_found(&self, person: &Person) -> ModelError {
        ModelError::MemberNotFound {
            group: self.name.clone(),
            person: person.name.clone(),
        }
    }

    fn duplicate_member(&self, person: &Person) -> ModelError {
        ModelError::DuplicateMember {
            group: self.name.clone(),
            person: person.name.clone(),
        }
    }

    fn assignment_not_found(&self, name: &AssignmentName) -> ModelError {
        ModelError::AssignmentNotFound {
            group: self.name.clone(),
            assignment: name.clone(),
        }
    }
}

impl Display for Group {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}\nTags: [", self.name)?;
        for tag in &self.tags {
            write!(f, "[{tag}]")?;
        }
        f.write_str("]\nMembers: [\n")?;
        for detail in &self.members {
            writeln!(f, "{detail}")?;
        }
        f.write_str("]")
    }
}

#[cfg(test)]
mod tests {
    use super::Group;
    use crate::model::error::ModelError;
    use crate::model::fields::{Address, AssignmentName, Email, GroupName, PersonName, Phone};
    use crate::model::person::Person;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    fn person(name: &str) -> Person {
        Person::new(
            PersonName::parse(name).unwrap(),
            Phone::parse("87438807").unwrap(),
            Email::parse("student@example.com").unwrap(),
            Address::parse("Blk 30 Geylang Street 29").unwrap(),
            BTreeSet::new(),
        )
    }

    fn group() -> Group {
        Group::new(GroupName::parse("CS2103T T12").unwrap(), BTreeSet::new())
    }

    fn name(value: &str) -> AssignmentName {
        AssignmentName::parse(value).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn add_then_contains_and_duplicate_add_fails() {
        let mut group = group();
        let alex = person("Alex Yeoh");
        group.add(alex.clone()).unwrap();
        assert!(group.contains(&alex));

        let err = group.add(alex).unwrap_err();
        assert!(matches!(err, ModelError::DuplicateMember { .. }));
        assert_eq!(group.len(), 1);
    }

    #[test]
    fn remove_missing_member_fails() {
        let mut group = group();
        let err = group.remove(&person("Bernice Yu")).unwrap_err();
        assert!(matches!(err, ModelError::MemberNotFound { .. }));
    }

    #[test]
    fn attendance_requires_membership() {
        let mut group = group();
        let err = group.mark_attendance(&person("Roy"), 3).unwrap_err();
        assert!(matches!(err, ModelError::MemberNotFound { .. }));
    }

    #[test]
    fn duplicate_assignment_name_is_case_sensitive() {
        let mut group = group();
        group.add_assignment(name("HW 1"), date(2025, 4, 21), 1.0).unwrap();
        group.add_assignment(name("hw 1"), date(2025, 4, 21), 1.0).unwrap();
        let err = group
            .add_assignment(name("HW 1"), date(2025, 5, 1), 1.0)
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateAssignment { .. }));
        assert_eq!(group.assignments().len(), 2);
    }

    #[test]
    fn edit_assignment_keeps_unspecified_fields() {
        let mut group = group();
        group.add_assignment(name("HW 1"), date(2025, 4, 21), 0.8).unwrap();

        let edited = group
            .edit_assignment(&name("HW 1"), None, Some(date(2025, 5, 1)), None)
            .unwrap();
        assert_eq!(edited.deadline(), date(2025, 5, 1));
        assert_eq!(edited.penalty(), 0.8);
        assert_eq!(edited.name().as_str(), "HW 1");
    }

    #[test]
    fn edit_assignment_rejects_collision_but_allows_same_name() {
        let mut group = group();
        group.add_assignment(name("HW 1"), date(2025, 4, 21), 1.0).unwrap();
        group.add_assignment(name("HW 2"), date(2025, 4, 28), 1.0).unwrap();

        let err = group
            .edit_assignment(&name("HW 2"), Some(name("HW 1")), None, None)
            .unwrap_err();
        assert!(matches!(err, ModelError::DuplicateAssignment { .. }));

        group
            .edit_assignment(&name("HW 2"), Some(name("HW 2")), None, Some(0.5))
            .unwrap();
        assert_eq!(group.assignment(&name("HW 2")).unwrap().penalty(), 0.5);
    }

    #[test]
    fn edit_missing_assignment_fails() {
        let mut group = group();
        let err = group
            .edit_assignment(&name("HW 9"), None, None, Some(0.5))
            .unwrap_err();
        assert!(matches!(err, ModelError::AssignmentNotFound { .. }));
    }

    #[test]
    fn rename_and_delete_assignment_keep_grades_consistent() {
        let mut group = group();
        let alex = person("Alex Yeoh");
        group.add(alex.clone()).unwrap();
        group.add_assignment(name("HW 1"), date(2099, 1, 1), 1.0).unwrap();
        group
            .grade_assignment_on(&alex, &name("HW 1"), 70.5, date(2025, 1, 1))
            .unwrap();

        group
            .edit_assignment(&name("HW 1"), Some(name("Homework 1")), None, None)
            .unwrap();
        assert_eq!(group.grade(&alex, &name("Homework 1")).unwrap(), Some(70.5));

        group.remove_assignment(&name("Homework 1")).unwrap();
        assert!(group.member(&alex).unwrap().grades().is_empty());
    }

    #[test]
    fn grading_applies_penalty_only_after_deadline() {
        let mut group = group();
        let alex = person("Alex Yeoh");
        group.add(alex.clone()).unwrap();
        group.add_assignment(name("HW1"), date(2020, 1, 1), 0.5).unwrap();

        let on_time = group
            .grade_assignment_on(&alex, &name("HW1"), 80.0, date(2020, 1, 1))
            .unwrap();
        assert_eq!(on_time, 80.0);

        let late = group.grade_assignment(&alex, &name("HW1"), 80.0).unwrap();
        assert_eq!(late, 40.0);
    }

    #[test]
    fn replace_person_keeps_member_state() {
        let mut group = group();
        let alex = person("Alex Yeoh");
        group.add(alex.clone()).unwrap();
        group.mark_attendance(&alex, 2).unwrap();

        let renamed = person("Alexander Yeoh");
        assert!(group.replace_person(&alex, renamed.clone()));
        assert!(!group.contains(&alex));
        assert_eq!(group.member(&renamed).unwrap().attendance_count(), 1);
    }

    #[test]
    fn equality_ignores_members() {
        let mut left = group();
        left.add(person("Alex Yeoh")).unwrap();
        assert_eq!(left, group());
    }
}
