//! Group membership join record.
//!
//! # Responsibility
//! - Track one person's participation in one group: role, weekly
//!   attendance, and assignment grades.
//!
//! # Invariants
//! - Attendance always holds exactly `WEEKS_PER_SEMESTER` slots.
//! - Week arguments are 1-based; out-of-range weeks never mutate state.
//! - Grades are keyed by assignment name; the owning group keeps keys in
//!   step with assignment renames and deletions.

use crate::model::assignment::Assignment;
use crate::model::fields::AssignmentName;
use crate::model::person::Person;
use crate::model::validation::{validate_score, week_slot, ValidationError, WEEKS_PER_SEMESTER};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Role a member plays within a group.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    #[default]
    Student,
    TeachingAssistant,
    Lecturer,
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Student => "Student",
            Self::TeachingAssistant => "Teaching Assistant",
            Self::Lecturer => "Lecturer",
        };
        f.write_str(label)
    }
}

/// Fixed-length attendance record, one slot per teaching week.
pub type Attendance = [bool; WEEKS_PER_SEMESTER];

/// Participation of one person in one group.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupMemberDetail {
    person: Person,
    role: Role,
    attendance: Attendance,
    grades: BTreeMap<AssignmentName, f32>,
}

impl GroupMemberDetail {
    /// Creates a student member with no attendance and no grades.
    pub fn new(person: Person) -> Self {
        Self::with_state(person, Role::Student, [false; WEEKS_PER_SEMESTER], BTreeMap::new())
    }

    /// Rebuilds a member from persisted state.
    pub fn with_state(
        person: Person,
        role: Role,
        attendance: Attendance,
        grades: BTreeMap<AssignmentName, f32>,
    ) -> Self {
        Self {
            person,
            role,
            attendance,
            grades,
        }
    }

    pub fn person(&self) -> &Person {
        &self.person
    }

    pub fn role(&self) -> Role {
        self.role
    }

    pub fn set_role(&mut self, role: Role) {
        self.role = role;
    }

    pub fn attendance(&self) -> &Attendance {
        &self.attendance
    }

    /// Number of weeks marked present.
    pub fn attendance_count(&self) -> usize {
        self.attendance.iter().filter(|present| **present).count()
    }

    /// Returns whether the member attended 1-based `week`.
    pub fn attended(&self, week: i64) -> Result<bool, ValidationError> {
        Ok(self.attendance[week_slot(week)?])
    }

    pub fn mark_attendance(&mut self, week: i64) -> Result<(), ValidationError> {
        let slot = week_slot(week)?;
        self.attendance[slot] = true;
        Ok(())
    }

    pub fn unmark_attendance(&mut self, week: i64) -> Result<(), ValidationError> {
        let slot = week_slot(week)?;
        self.attendance[slot] = false;
        Ok(())
    }

    pub fn grades(&self) -> &BTreeMap<AssignmentName, f32> {
        &self.grades
    }

    pub fn grade(&self, assignment: &AssignmentName) -> Option<f32> {
        self.grades.get(assignment).copied()
    }

    /// Grades `assignment` as of the local current date.
    pub fn grade_assignment(
        &mut self,
        assignment: &Assignment,
        score: f32,
    ) -> Result<f32, ValidationError> {
        self.grade_assignment_on(assignment, score, Local::now().date_naive())
    }

    /// Grades `assignment` as if graded on `today`; returns the stored score.
    ///
    /// Late grading multiplies the raw score by the assignment penalty.
    pub fn grade_assignment_on(
        &mut self,
        assignment: &Assignment,
        score: f32,
        today: NaiveDate,
    ) -> Result<f32, ValidationError> {
        let stored = assignment.adjusted_score(validate_score(score)?, today);
        self.grades.insert(assignment.name().clone(), stored);
        Ok(stored)
    }

    pub(crate) fn replace_person(&mut self, person: Person) {
        self.person = person;
    }

    pub(crate) fn rename_grade(&mut self, from: &AssignmentName, to: &AssignmentName) {
        if let Some(score) = self.grades.remove(from) {
            self.grades.insert(to.clone(), score);
        }
    }

    pub(crate) fn drop_grade(&mut self, assignment: &AssignmentName) {
        self.grades.remove(assignment);
    }
}

impl Display for GroupMemberDetail {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}; Role: {}, Attendance: {}/{} weeks",
            self.person.name,
            self.role,
            self.attendance_count(),
            WEEKS_PER_SEMESTER
        )
    }
}
