//! Field-level validation rules shared by all roster records.
//!
//! # Responsibility
//! - Hold the compiled patterns used by value-type constructors.
//! - Define the single `ValidationError` taxonomy for malformed input.
//!
//! # Invariants
//! - Patterns are anchored; partial matches never pass.
//! - Validation never mutates state; callers validate before writing.

use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Number of teaching weeks tracked per member.
pub const WEEKS_PER_SEMESTER: usize = 13;

static PERSON_NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ]*$").expect("valid person name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{3,}$").expect("valid phone regex"));
static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[\p{L}\p{N}]([\p{L}\p{N}+_.\-]*[\p{L}\p{N}])?@([\p{L}\p{N}]([\p{L}\p{N}\-]*[\p{L}\p{N}])?\.)*[\p{L}\p{N}]([\p{L}\p{N}\-]*[\p{L}\p{N}])?$",
    )
    .expect("valid email regex")
});
static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[\p{L}\p{N}]+$").expect("valid tag regex"));
static GROUP_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} '\-]*$").expect("valid group name regex")
});
static ASSIGNMENT_NAME_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\p{L}\p{N}][\p{L}\p{N} ]*$").expect("valid assignment name regex")
});

/// Validation failures for user- or file-provided field values.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    InvalidPersonName(String),
    InvalidPhone(String),
    InvalidEmail(String),
    InvalidAddress(String),
    InvalidTag(String),
    InvalidGroupName(String),
    InvalidAssignmentName(String),
    /// Week index outside `[1, WEEKS_PER_SEMESTER]`.
    WeekOutOfRange(i64),
    /// Late penalty must be a finite multiplier in `[0.0, 1.0]`.
    InvalidPenalty(f32),
    /// Scores must be finite and non-negative.
    InvalidScore(f32),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPersonName(value) => write!(
                f,
                "invalid name `{value}`: names should only contain alphanumeric characters and spaces, and it should not be blank"
            ),
            Self::InvalidPhone(value) => write!(
                f,
                "invalid phone `{value}`: phone numbers should only contain digits, and be at least 3 digits long"
            ),
            Self::InvalidEmail(value) => write!(
                f,
                "invalid email `{value}`: emails should be of the format local-part@domain"
            ),
            Self::InvalidAddress(value) => {
                write!(f, "invalid address `{value}`: addresses can take any value but must not be blank")
            }
            Self::InvalidTag(value) => write!(f, "invalid tag `{value}`: tag names should be alphanumeric"),
            Self::InvalidGroupName(value) => write!(
                f,
                "invalid group name `{value}`: group names should be alphanumeric and may contain spaces, `-` and `'`"
            ),
            Self::InvalidAssignmentName(value) => write!(
                f,
                "invalid assignment name `{value}`: assignment names should only contain alphanumeric characters and spaces"
            ),
            Self::WeekOutOfRange(week) => write!(
                f,
                "week number must be between 1 and {WEEKS_PER_SEMESTER} (inclusive), got {week}"
            ),
            Self::InvalidPenalty(value) => {
                write!(f, "late penalty must be between 0.0 and 1.0, got {value}")
            }
            Self::InvalidScore(value) => {
                write!(f, "score must be a non-negative number, got {value}")
            }
        }
    }
}

impl Error for ValidationError {}

pub(crate) fn is_valid_person_name(value: &str) -> bool {
    PERSON_NAME_RE.is_match(value)
}

pub(crate) fn is_valid_phone(value: &str) -> bool {
    PHONE_RE.is_match(value)
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    let Some((_, domain)) = value.rsplit_once('@') else {
        return false;
    };
    // Top-level label must be at least two characters long.
    let last_label = domain.rsplit('.').next().unwrap_or_default();
    EMAIL_RE.is_match(value) && last_label.chars().count() >= 2
}

pub(crate) fn is_valid_tag(value: &str) -> bool {
    TAG_RE.is_match(value)
}

pub(crate) fn is_valid_group_name(value: &str) -> bool {
    GROUP_NAME_RE.is_match(value)
}

pub(crate) fn is_valid_assignment_name(value: &str) -> bool {
    ASSIGNMENT_NAME_RE.is_match(value)
}

/// Validates a 1-based week index and returns its 0-based slot.
pub fn week_slot(week: i64) -> Result<usize, ValidationError> {
    if (1..=WEEKS_PER_SEMESTER as i64).contains(&week) {
        Ok((week - 1) as usize)
    } else {
        Err(ValidationError::WeekOutOfRange(week))
    }
}

/// Validates a late penalty multiplier.
pub fn validate_penalty(penalty: f32) -> Result<f32, ValidationError> {
    if penalty.is_finite() && (0.0..=1.0).contains(&penalty) {
        Ok(penalty)
    } else {
        Err(ValidationError::InvalidPenalty(penalty))
    }
}

/// Validates a raw assignment score.
pub fn validate_score(score: f32) -> Result<f32, ValidationError> {
    if score.is_finite() && score >= 0.0 {
        Ok(score)
    } else {
        Err(ValidationError::InvalidScore(score))
    }
}
