//! Prefix tokenizer and command-line parsing.
//!
//! # Responsibility
//! - Split `word args` lines into a command word and prefixed arguments.
//! - Convert argument strings into validated model values.
//!
//! # Invariants
//! - A prefix only counts when it starts the argument string or follows
//!   whitespace.
//! - Single-valued prefixes may appear at most once.

use crate::command::usage;
use crate::command::Command;
use crate::model::assignment::DEFAULT_PENALTY;
use crate::model::fields::{
    parse_tags, Address, AssignmentName, Email, GroupName, PersonName, Phone, Tag,
};
use crate::model::group::Group;
use crate::model::person::{EditPersonDescriptor, Person};
use crate::model::validation::ValidationError;
use chrono::NaiveDate;
use std::collections::{BTreeSet, HashMap};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Argument marker such as `n/`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Prefix(&'static str);

impl Prefix {
    pub const fn new(token: &'static str) -> Self {
        Self(token)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl Display for Prefix {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0)
    }
}

pub const PREFIX_NAME: Prefix = Prefix::new("n/");
pub const PREFIX_PHONE: Prefix = Prefix::new("p/");
pub const PREFIX_EMAIL: Prefix = Prefix::new("e/");
pub const PREFIX_ADDRESS: Prefix = Prefix::new("a/");
pub const PREFIX_TAG: Prefix = Prefix::new("t/");
pub const PREFIX_GROUP: Prefix = Prefix::new("g/");
pub const PREFIX_PERSON: Prefix = Prefix::new("P/");
pub const PREFIX_WEEK: Prefix = Prefix::new("w/");
pub const PREFIX_ASSIGNMENT: Prefix = Prefix::new("A/");
pub const PREFIX_SCORE: Prefix = Prefix::new("s/");
pub const PREFIX_DATE: Prefix = Prefix::new("d/");
pub const PREFIX_NEW_NAME: Prefix = Prefix::new("N/");
pub const PREFIX_LATE_PENALTY: Prefix = Prefix::new("l/");

/// Date format accepted by `d/`.
pub const DATE_FORMAT: &str = "%d-%m-%Y";

/// Parse failure for one input line.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseError {
    UnknownCommand(String),
    InvalidFormat { usage: &'static str },
    DuplicatePrefixes(Vec<Prefix>),
    InvalidIndex(String),
    InvalidDate(String),
    InvalidNumber { field: &'static str, value: String },
    NothingToEdit,
    InvalidValue(ValidationError),
}

impl Display for ParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownCommand(_) => {
                f.write_str("Unknown command. Type \"help\" to see the list of commands.")
            }
            Self::InvalidFormat { usage } => write!(f, "Invalid command format!\n{usage}"),
            Self::DuplicatePrefixes(prefixes) => {
                let joined: Vec<&str> = prefixes.iter().map(Prefix::as_str).collect();
                write!(
                    f,
                    "Multiple values specified for the following single-valued field(s): {}",
                    joined.join(" ")
                )
            }
            Self::InvalidIndex(value) => {
                write!(f, "Index `{value}` is not a non-zero unsigned integer.")
            }
            Self::InvalidDate(value) => {
                write!(f, "Invalid date `{value}`: dates should be in the format dd-MM-yyyy")
            }
            Self::InvalidNumber { field, value } => {
                write!(f, "Invalid {field} `{value}`: expected a number")
            }
            Self::NothingToEdit => f.write_str("At least one field to edit must be provided."),
            Self::InvalidValue(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ParseError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::InvalidValue(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ValidationError> for ParseError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidValue(value)
    }
}

pub type ParseResult<T> = Result<T, ParseError>;

/// One-based position in a displayed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Index(usize);

impl Index {
    /// Returns `None` for zero.
    pub fn from_one_based(value: usize) -> Option<Self> {
        (value > 0).then_some(Self(value))
    }

    pub fn one_based(self) -> usize {
        self.0
    }

    pub fn zero_based(self) -> usize {
        self.0 - 1
    }
}

impl Display for Index {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Tokenized arguments: the preamble plus values per prefix, in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMultimap {
    preamble: String,
    values: HashMap<Prefix, Vec<String>>,
}

impl ArgumentMultimap {
    /// Text before the first recognized prefix, trimmed.
    pub fn preamble(&self) -> &str {
        &self.preamble
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values.get(&prefix).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    pub fn contains_all(&self, prefixes: &[Prefix]) -> bool {
        prefixes.iter().all(|prefix| self.contains(*prefix))
    }

    /// Fails when any of `prefixes` was given more than once.
    pub fn verify_no_duplicate_prefixes(&self, prefixes: &[Prefix]) -> ParseResult<()> {
        let duplicated: Vec<Prefix> = prefixes
            .iter()
            .copied()
            .filter(|prefix| self.all_values(*prefix).len() > 1)
            .collect();
        if duplicated.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicatePrefixes(duplicated))
        }
    }
}

/// Splits `args` at every recognized prefix.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMultimap {
    let mut positions: Vec<(usize, Prefix)> = Vec::new();
    for prefix in prefixes {
        for (offset, _) in args.match_indices(prefix.as_str()) {
            let starts_token = offset == 0
                || args[..offset]
                    .chars()
                    .next_back()
                    .is_some_and(char::is_whitespace);
            if starts_token {
                positions.push((offset, *prefix));
            }
        }
    }
    positions.sort_by_key(|(offset, _)| *offset);

    let preamble_end = positions.first().map_or(args.len(), |(offset, _)| *offset);
    let mut map = ArgumentMultimap {
        preamble: args[..preamble_end].trim().to_string(),
        values: HashMap::new(),
    };
    for (i, (offset, prefix)) in positions.iter().enumerate() {
        let start = offset + prefix.as_str().len();
        let end = positions.get(i + 1).map_or(args.len(), |(next, _)| *next);
        map.values
            .entry(*prefix)
            .or_default()
            .push(args[start..end].trim().to_string());
    }
    map
}

/// Parses one full input line into a command.
pub fn parse_command(line: &str) -> ParseResult<Command> {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Err(ParseError::InvalidFormat {
            usage: usage::HELP,
        });
    }
    let (word, args) = match trimmed.find(char::is_whitespace) {
        Some(split) => trimmed.split_at(split),
        None => (trimmed, ""),
    };

    match word {
        "add" => parse_add_person(args),
        "edit" => parse_edit_person(args),
        "delete" => Ok(Command::DeletePerson(parse_index_or_usage(args, usage::DELETE)?)),
        "list" => Ok(Command::ListPersons),
        "find" => Ok(Command::FindPersons(parse_keywords(args, usage::FIND)?)),
        "clear" => Ok(Command::Clear),
        "add-group" => parse_add_group(args),
        "edit-group" => parse_edit_group(args),
        "delete-group" => Ok(Command::DeleteGroup(parse_index_or_usage(
            args,
            usage::DELETE_GROUP,
        )?)),
        "list-group" => Ok(Command::ListGroups),
        "find-group" => Ok(Command::FindGroups(parse_keywords(args, usage::FIND_GROUP)?)),
        "show-group-details" => parse_show_group_details(args),
        "add-to-group" => {
            let (person, group) = parse_person_and_group(args, usage::ADD_TO_GROUP)?;
            Ok(Command::AddToGroup { person, group })
        }
        "delete-from-group" => {
            let (person, group) = parse_person_and_group(args, usage::DELETE_FROM_GROUP)?;
            Ok(Command::DeleteFromGroup { person, group })
        }
        "mark-attendance" => {
            let (person, group, week) = parse_attendance(args, usage::MARK_ATTENDANCE)?;
            Ok(Command::MarkAttendance {
                person,
                group,
                week,
            })
        }
        "unmark-attendance" => {
            let (person, group, week) = parse_attendance(args, usage::UNMARK_ATTENDANCE)?;
            Ok(Command::UnmarkAttendance {
                person,
                group,
                week,
            })
        }
        "show-attendance" => {
            let (person, group) = parse_person_and_group(args, usage::SHOW_ATTENDANCE)?;
            Ok(Command::ShowAttendance { person, group })
        }
        "add-assignment" => parse_add_assignment(args),
        "edit-assignment" => parse_edit_assignment(args),
        "delete-assignment" => parse_delete_assignment(args),
        "grade-assignment" => parse_grade_assignment(args),
        "help" => Ok(Command::Help),
        "exit" => Ok(Command::Exit),
        other => Err(ParseError::UnknownCommand(other.to_string())),
    }
}

fn parse_add_person(args: &str) -> ParseResult<Command> {
    let map = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_TAG],
    );
    require(&map, &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS], usage::ADD)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS])?;

    let person = Person::new(
        PersonName::parse(required(&map, PREFIX_NAME, usage::ADD)?)?,
        Phone::parse(required(&map, PREFIX_PHONE, usage::ADD)?)?,
        Email::parse(required(&map, PREFIX_EMAIL, usage::ADD)?)?,
        Address::parse(required(&map, PREFIX_ADDRESS, usage::ADD)?)?,
        parse_tags(map.all_values(PREFIX_TAG))?,
    );
    Ok(Command::AddPerson(person))
}

fn parse_edit_person(args: &str) -> ParseResult<Command> {
    let map = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS, PREFIX_TAG],
    );
    let index = parse_index_or_usage(map.preamble(), usage::EDIT)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_PHONE, PREFIX_EMAIL, PREFIX_ADDRESS])?;

    let descriptor = EditPersonDescriptor {
        name: map.value(PREFIX_NAME).map(PersonName::parse).transpose()?,
        phone: map.value(PREFIX_PHONE).map(Phone::parse).transpose()?,
        email: map.value(PREFIX_EMAIL).map(Email::parse).transpose()?,
        address: map.value(PREFIX_ADDRESS).map(Address::parse).transpose()?,
        tags: parse_tags_for_edit(&map)?,
    };
    if !descriptor.is_any_field_edited() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(Command::EditPerson { index, descriptor })
}

fn parse_add_group(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_TAG]);
    require(&map, &[PREFIX_NAME], usage::ADD_GROUP)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME])?;

    let name = GroupName::parse(required(&map, PREFIX_NAME, usage::ADD_GROUP)?)?;
    let tags = parse_tags(map.all_values(PREFIX_TAG))?;
    Ok(Command::AddGroup(Group::new(name, tags)))
}

fn parse_edit_group(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_TAG]);
    let index = parse_index_or_usage(map.preamble(), usage::EDIT_GROUP)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME])?;

    let name = map.value(PREFIX_NAME).map(GroupName::parse).transpose()?;
    let tags = parse_tags_for_edit(&map)?;
    if name.is_none() && tags.is_none() {
        return Err(ParseError::NothingToEdit);
    }
    Ok(Command::EditGroup { index, name, tags })
}

fn parse_show_group_details(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_GROUP]);
    require(&map, &[PREFIX_GROUP], usage::SHOW_GROUP_DETAILS)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_GROUP])?;
    let group = GroupName::parse(required(&map, PREFIX_GROUP, usage::SHOW_GROUP_DETAILS)?)?;
    Ok(Command::ShowGroupDetails(group))
}

fn parse_person_and_group(args: &str, usage: &'static str) -> ParseResult<(PersonName, GroupName)> {
    let map = tokenize(args, &[PREFIX_PERSON, PREFIX_GROUP]);
    require(&map, &[PREFIX_PERSON, PREFIX_GROUP], usage)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_PERSON, PREFIX_GROUP])?;
    Ok((
        PersonName::parse(required(&map, PREFIX_PERSON, usage)?)?,
        GroupName::parse(required(&map, PREFIX_GROUP, usage)?)?,
    ))
}

fn parse_attendance(
    args: &str,
    usage: &'static str,
) -> ParseResult<(PersonName, GroupName, i64)> {
    let map = tokenize(args, &[PREFIX_PERSON, PREFIX_GROUP, PREFIX_WEEK]);
    require(&map, &[PREFIX_PERSON, PREFIX_GROUP, PREFIX_WEEK], usage)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_PERSON, PREFIX_GROUP, PREFIX_WEEK])?;
    Ok((
        PersonName::parse(required(&map, PREFIX_PERSON, usage)?)?,
        GroupName::parse(required(&map, PREFIX_GROUP, usage)?)?,
        parse_week(required(&map, PREFIX_WEEK, usage)?)?,
    ))
}

fn parse_add_assignment(args: &str) -> ParseResult<Command> {
    let map = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_GROUP, PREFIX_DATE, PREFIX_LATE_PENALTY],
    );
    require(&map, &[PREFIX_NAME, PREFIX_GROUP, PREFIX_DATE], usage::ADD_ASSIGNMENT)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_GROUP, PREFIX_DATE, PREFIX_LATE_PENALTY])?;

    Ok(Command::AddAssignment {
        name: AssignmentName::parse(required(&map, PREFIX_NAME, usage::ADD_ASSIGNMENT)?)?,
        group: GroupName::parse(required(&map, PREFIX_GROUP, usage::ADD_ASSIGNMENT)?)?,
        deadline: parse_date(required(&map, PREFIX_DATE, usage::ADD_ASSIGNMENT)?)?,
        penalty: map
            .value(PREFIX_LATE_PENALTY)
            .map(parse_penalty)
            .transpose()?
            .unwrap_or(DEFAULT_PENALTY),
    })
}

fn parse_edit_assignment(args: &str) -> ParseResult<Command> {
    let map = tokenize(
        args,
        &[PREFIX_NAME, PREFIX_GROUP, PREFIX_NEW_NAME, PREFIX_DATE, PREFIX_LATE_PENALTY],
    );
    require(&map, &[PREFIX_NAME, PREFIX_GROUP], usage::EDIT_ASSIGNMENT)?;
    map.verify_no_duplicate_prefixes(&[
        PREFIX_NAME,
        PREFIX_GROUP,
        PREFIX_NEW_NAME,
        PREFIX_DATE,
        PREFIX_LATE_PENALTY,
    ])?;

    let new_name = map.value(PREFIX_NEW_NAME).map(AssignmentName::parse).transpose()?;
    let deadline = map.value(PREFIX_DATE).map(parse_date).transpose()?;
    let penalty = map.value(PREFIX_LATE_PENALTY).map(parse_penalty).transpose()?;
    if new_name.is_none() && deadline.is_none() && penalty.is_none() {
        return Err(ParseError::NothingToEdit);
    }

    Ok(Command::EditAssignment {
        name: AssignmentName::parse(required(&map, PREFIX_NAME, usage::EDIT_ASSIGNMENT)?)?,
        group: GroupName::parse(required(&map, PREFIX_GROUP, usage::EDIT_ASSIGNMENT)?)?,
        new_name,
        deadline,
        penalty,
    })
}

fn parse_delete_assignment(args: &str) -> ParseResult<Command> {
    let map = tokenize(args, &[PREFIX_NAME, PREFIX_GROUP]);
    require(&map, &[PREFIX_NAME, PREFIX_GROUP], usage::DELETE_ASSIGNMENT)?;
    map.verify_no_duplicate_prefixes(&[PREFIX_NAME, PREFIX_GROUP])?;
    Ok(Command::DeleteAssignment {
        name: AssignmentName::parse(required(&map, PREFIX_NAME, usage::DELETE_ASSIGNMENT)?)?,
        group: GroupName::parse(required(&map, PREFIX_GROUP, usage::DELETE_ASSIGNMENT)?)?,
    })
}

fn parse_grade_assignment(args: &str) -> ParseResult<Command> {
    let prefixes = [PREFIX_PERSON, PREFIX_GROUP, PREFIX_ASSIGNMENT, PREFIX_SCORE];
    let map = tokenize(args, &prefixes);
    require(&map, &prefixes, usage::GRADE_ASSIGNMENT)?;
    map.verify_no_duplicate_prefixes(&prefixes)?;
    let score = required(&map, PREFIX_SCORE, usage::GRADE_ASSIGNMENT)?;
    Ok(Command::GradeAssignment {
        person: PersonName::parse(required(&map, PREFIX_PERSON, usage::GRADE_ASSIGNMENT)?)?,
        group: GroupName::parse(required(&map, PREFIX_GROUP, usage::GRADE_ASSIGNMENT)?)?,
        assignment: AssignmentName::parse(required(
            &map,
            PREFIX_ASSIGNMENT,
            usage::GRADE_ASSIGNMENT,
        )?)?,
        score: parse_number(score, "score")?,
    })
}

/// Parses a one-based index; zero, signs, and non-digits are rejected.
pub fn parse_index(value: &str) -> ParseResult<Index> {
    let trimmed = value.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|ch| ch.is_ascii_digit()) {
        return Err(ParseError::InvalidIndex(trimmed.to_string()));
    }
    trimmed
        .parse::<usize>()
        .ok()
        .and_then(Index::from_one_based)
        .ok_or_else(|| ParseError::InvalidIndex(trimmed.to_string()))
}

/// Parses a `dd-MM-yyyy` date.
pub fn parse_date(value: &str) -> ParseResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT)
        .map_err(|_| ParseError::InvalidDate(value.trim().to_string()))
}

fn parse_week(value: &str) -> ParseResult<i64> {
    value.trim().parse::<i64>().map_err(|_| ParseError::InvalidNumber {
        field: "week",
        value: value.trim().to_string(),
    })
}

fn parse_penalty(value: &str) -> ParseResult<f32> {
    parse_number(value, "late penalty")
}

fn parse_number(value: &str, field: &'static str) -> ParseResult<f32> {
    value
        .trim()
        .parse::<f32>()
        .ok()
        .filter(|number| number.is_finite())
        .ok_or_else(|| ParseError::InvalidNumber {
            field,
            value: value.trim().to_string(),
        })
}

/// A lone empty `t/` clears tags; no `t/` leaves them unchanged.
fn parse_tags_for_edit(map: &ArgumentMultimap) -> ParseResult<Option<BTreeSet<Tag>>> {
    let values = map.all_values(PREFIX_TAG);
    if values.is_empty() {
        return Ok(None);
    }
    if values.len() == 1 && values[0].is_empty() {
        return Ok(Some(BTreeSet::new()));
    }
    Ok(Some(parse_tags(values)?))
}

fn parse_keywords(args: &str, usage: &'static str) -> ParseResult<Vec<String>> {
    let keywords: Vec<String> = args.split_whitespace().map(str::to_string).collect();
    if keywords.is_empty() {
        return Err(ParseError::InvalidFormat { usage });
    }
    Ok(keywords)
}

fn parse_index_or_usage(value: &str, usage: &'static str) -> ParseResult<Index> {
    parse_index(value).map_err(|_| ParseError::InvalidFormat { usage })
}

fn require(map: &ArgumentMultimap, prefixes: &[Prefix], usage: &'static str) -> ParseResult<()> {
    if map.contains_all(prefixes) && map.preamble().is_empty() {
        Ok(())
    } else {
        Err(ParseError::InvalidFormat { usage })
    }
}

fn required<'a>(
    map: &'a ArgumentMultimap,
    prefix: Prefix,
    usage: &'static str,
) -> ParseResult<&'a str> {
    map.value(prefix).ok_or(ParseError::InvalidFormat { usage })
}
