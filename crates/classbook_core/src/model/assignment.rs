//! Assignment domain model.
//!
//! # Invariants
//! - `penalty` is a multiplier in `[0.0, 1.0]`; `1.0` means no late penalty.
//! - Name uniqueness is enforced by the owning `Group`, not here.

use crate::model::fields::AssignmentName;
use crate::model::validation::{validate_penalty, ValidationError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};

/// Late penalty applied when no explicit value is given.
pub const DEFAULT_PENALTY: f32 = 1.0;

/// A gradable task with a deadline, scoped to one group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawAssignment")]
pub struct Assignment {
    name: AssignmentName,
    deadline: NaiveDate,
    penalty: f32,
}

/// Unchecked wire shape; decoding goes through `Assignment::new`.
#[derive(Deserialize)]
struct RawAssignment {
    name: AssignmentName,
    deadline: NaiveDate,
    #[serde(default = "default_penalty")]
    penalty: f32,
}

fn default_penalty() -> f32 {
    DEFAULT_PENALTY
}

impl TryFrom<RawAssignment> for Assignment {
    type Error = ValidationError;

    fn try_from(value: RawAssignment) -> Result<Self, Self::Error> {
        Self::new(value.name, value.deadline, value.penalty)
    }
}

impl Assignment {
    pub fn new(
        name: AssignmentName,
        deadline: NaiveDate,
        penalty: f32,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            name,
            deadline,
            penalty: validate_penalty(penalty)?,
        })
    }

    pub fn name(&self) -> &AssignmentName {
        &self.name
    }

    pub fn deadline(&self) -> NaiveDate {
        self.deadline
    }

    pub fn penalty(&self) -> f32 {
        self.penalty
    }

    /// Returns true when a submission graded on `today` counts as late.
    pub fn is_late_on(&self, today: NaiveDate) -> bool {
        today > self.deadline
    }

    /// Applies the late penalty to `score` when graded after the deadline.
    ///
    /// The penalty is a flat multiplier; how late the grading happens does
    /// not matter.
    pub fn adjusted_score(&self, score: f32, today: NaiveDate) -> f32 {
        if self.is_late_on(today) {
            score * self.penalty
        } else {
            score
        }
    }

    pub(crate) fn rename(&mut self, name: AssignmentName) {
        self.name = name;
    }

    pub(crate) fn set_deadline(&mut self, deadline: NaiveDate) {
        self.deadline = deadline;
    }

    pub(crate) fn set_penalty(&mut self, penalty: f32) -> Result<(), ValidationError> {
        self.penalty = validate_penalty(penalty)?;
        Ok(())
    }
}

impl Display for Assignment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} (due {}, late penalty x{})",
            self.name,
            self.deadline.format("%d-%m-%Y"),
            self.penalty
        )
    }
}

#[cfg(test)]
mod tests {
    use super::Assignment;
    use crate::model::fields::AssignmentName;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn grading_on_deadline_day_is_not_late() {
        let hw = Assignment::new(AssignmentName::parse("HW 1").unwrap(), date(2025, 4, 21), 0.5)
            .unwrap();
        assert_eq!(hw.adjusted_score(80.0, date(2025, 4, 21)), 80.0);
        assert_eq!(hw.adjusted_score(80.0, date(2025, 4, 22)), 40.0);
    }

    #[test]
    fn rejects_penalty_above_one() {
        let err = Assignment::new(AssignmentName::parse("HW 1").unwrap(), date(2025, 4, 21), 1.2)
            .unwrap_err();
        assert!(err.to_string().contains("late penalty"));
    }

    #[test]
    fn deserialize_rejects_negative_penalty() {
        let err = serde_json::from_str::<Assignment>(
            r#"{"name":"HW 1","deadline":"2025-04-21","penalty":-0.5}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("late penalty"));
    }

    #[test]
    fn penalty_defaults_when_missing_from_json() {
        let hw: Assignment =
            serde_json::from_str(r#"{"name":"HW 1","deadline":"2025-04-21"}"#).unwrap();
        assert_eq!(hw.penalty(), 1.0);
    }
}
