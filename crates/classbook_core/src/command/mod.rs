//! Typed commands and their execution against `RosterService`.
//!
//! # Responsibility
//! - Represent every user command as a parsed, validated value.
//! - Execute commands and render user-facing feedback.
//!
//! # Invariants
//! - Index-based commands resolve against the currently filtered list.
//! - A failed command leaves the roster unchanged.
//!
//! # See also
//! - `command::parser` for the text syntax.

pub mod parser;
pub mod usage;

use crate::model::error::ModelError;
use crate::model::fields::{AssignmentName, GroupName, PersonName, Tag};
use crate::model::group::Group;
use crate::model::person::{EditPersonDescriptor, Person};
use crate::model::validation::WEEKS_PER_SEMESTER;
use crate::service::filter::{GroupFilter, PersonFilter};
use crate::service::roster_service::RosterService;
use chrono::NaiveDate;
use parser::{Index, DATE_FORMAT};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Outcome of a successful command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandResult {
    pub feedback: String,
    pub show_help: bool,
    pub exit: bool,
}

impl CommandResult {
    pub fn new(feedback: impl Into<String>) -> Self {
        Self {
            feedback: feedback.into(),
            show_help: false,
            exit: false,
        }
    }
}

/// Execution failure reported back to the user.
#[derive(Debug, Clone, PartialEq)]
pub enum CommandError {
    InvalidPersonIndex(Index),
    InvalidGroupIndex(Index),
    Model(ModelError),
}

impl Display for CommandError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidPersonIndex(_) => f.write_str(
                "The person index provided is invalid!\nEnsure that it is not out of range.",
            ),
            Self::InvalidGroupIndex(_) => f.write_str(
                "The group index provided is invalid!\nEnsure that it is not out of range.",
            ),
            Self::Model(err) => match err {
                ModelError::PersonNotFound(_) => f.write_str("This person does not exist!"),
                ModelError::GroupNotFound(_) => f.write_str("This group does not exist!"),
                ModelError::MemberNotFound { .. } => {
                    f.write_str("This person does not exist in the group!")
                }
                ModelError::AssignmentNotFound { .. } => f.write_str("Assignment not found!"),
                ModelError::DuplicatePerson(_) => {
                    f.write_str("This person already exists in the address book")
                }
                ModelError::DuplicateGroup(_) => {
                    f.write_str("This group already exists in the address book")
                }
                ModelError::DuplicateMember { .. } => {
                    f.write_str("This person already exists in the group")
                }
                ModelError::DuplicateAssignment { .. } => {
                    f.write_str("This assignment already exists in the group")
                }
                ModelError::Validation(err) => write!(f, "{err}"),
            },
        }
    }
}

impl Error for CommandError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Model(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ModelError> for CommandError {
    fn from(value: ModelError) -> Self {
        Self::Model(value)
    }
}

pub type CommandOutcome = Result<CommandResult, CommandError>;

/// Parsed user command.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    AddPerson(Person),
    EditPerson {
        index: Index,
        descriptor: EditPersonDescriptor,
    },
    DeletePerson(Index),
    ListPersons,
    FindPersons(Vec<String>),
    Clear,
    AddGroup(Group),
    EditGroup {
        index: Index,
        name: Option<GroupName>,
        tags: Option<BTreeSet<Tag>>,
    },
    DeleteGroup(Index),
    ListGroups,
    FindGroups(Vec<String>),
    ShowGroupDetails(GroupName),
    AddToGroup {
        person: PersonName,
        group: GroupName,
    },
    DeleteFromGroup {
        person: PersonName,
        group: GroupName,
    },
    MarkAttendance {
        person: PersonName,
        group: GroupName,
        week: i64,
    },
    UnmarkAttendance {
        person: PersonName,
        group: GroupName,
        week: i64,
    },
    ShowAttendance {
        person: PersonName,
        group: GroupName,
    },
    AddAssignment {
        name: AssignmentName,
        group: GroupName,
        deadline: NaiveDate,
        penalty: f32,
    },
    EditAssignment {
        name: AssignmentName,
        group: GroupName,
        new_name: Option<AssignmentName>,
        deadline: Option<NaiveDate>,
        penalty: Option<f32>,
    },
    DeleteAssignment {
        name: AssignmentName,
        group: GroupName,
    },
    GradeAssignment {
        person: PersonName,
        group: GroupName,
        assignment: AssignmentName,
        score: f32,
    },
    Help,
    Exit,
}

impl Command {
    /// Command word as typed by the user.
    pub fn word(&self) -> &'static str {
        match self {
            Self::AddPerson(_) => "add",
            Self::EditPerson { .. } => "edit",
            Self::DeletePerson(_) => "delete",
            Self::ListPersons => "list",
            Self::FindPersons(_) => "find",
            Self::Clear => "clear",
            Self::AddGroup(_) => "add-group",
            Self::EditGroup { .. } => "edit-group",
            Self::DeleteGroup(_) => "delete-group",
            Self::ListGroups => "list-group",
            Self::FindGroups(_) => "find-group",
            Self::ShowGroupDetails(_) => "show-group-details",
            Self::AddToGroup { .. } => "add-to-group",
            Self::DeleteFromGroup { .. } => "delete-from-group",
            Self::MarkAttendance { .. } => "mark-attendance",
            Self::UnmarkAttendance { .. } => "unmark-attendance",
            Self::ShowAttendance { .. } => "show-attendance",
            Self::AddAssignment { .. } => "add-assignment",
            Self::EditAssignment { .. } => "edit-assignment",
            Self::DeleteAssignment { .. } => "delete-assignment",
            Self::GradeAssignment { .. } => "grade-assignment",
            Self::Help => "help",
            Self::Exit => "exit",
        }
    }

    /// Returns true when a successful run changes persisted data.
    pub fn is_mutating(&self) -> bool {
        !matches!(
            self,
            Self::ListPersons
                | Self::FindPersons(_)
                | Self::ListGroups
                | Self::FindGroups(_)
                | Self::ShowGroupDetails(_)
                | Self::ShowAttendance { .. }
                | Self::Help
                | Self::Exit
        )
    }

    pub fn execute(self, roster: &mut RosterService) -> CommandOutcome {
        match self {
            Self::AddPerson(person) => {
                let feedback = format!("New person added: {person}");
                roster.add_person(person)?;
                Ok(CommandResult::new(feedback))
            }
            Self::EditPerson { index, descriptor } => {
                let target = person_at(roster, index)?;
                let edited = target.edited(&descriptor);
                let feedback = format!("Edited Person: {edited}");
                roster.set_person(&target.name, edited)?;
                Ok(CommandResult::new(feedback))
            }
            Self::DeletePerson(index) => {
                let target = person_at(roster, index)?;
                let removed = roster.delete_person(&target.name)?;
                Ok(CommandResult::new(format!("Deleted Person: {removed}")))
            }
            Self::ListPersons => {
                roster.update_person_filter(PersonFilter::All);
                Ok(CommandResult::new("Listed all persons"))
            }
            Self::FindPersons(keywords) => {
                roster.update_person_filter(PersonFilter::NameKeywords(keywords));
                Ok(CommandResult::new(format!(
                    "{} persons listed!",
                    roster.filtered_persons().len()
                )))
            }
            Self::Clear => {
                roster.clear();
                Ok(CommandResult::new("Address book has been cleared!"))
            }
            Self::AddGroup(group) => {
                let feedback = format!("New group added: {}", group.name());
                roster.add_group(group)?;
                Ok(CommandResult::new(feedback))
            }
            Self::EditGroup { index, name, tags } => {
                let target = group_at(roster, index)?;
                let edited = target.renamed(
                    name.unwrap_or_else(|| target.name().clone()),
                    tags.unwrap_or_else(|| target.tags().clone()),
                );
                let feedback = format!("Edited Group: {}", edited.name());
                roster.set_group(target.name(), edited)?;
                Ok(CommandResult::new(feedback))
            }
            Self::DeleteGroup(index) => {
                let target = group_at(roster, index)?;
                let removed = roster.delete_group(target.name())?;
                Ok(CommandResult::new(format!("Deleted Group: {}", removed.name())))
            }
            Self::ListGroups => {
                roster.update_group_filter(GroupFilter::All);
                Ok(CommandResult::new("Listed all groups"))
            }
            Self::FindGroups(keywords) => {
                roster.update_group_filter(GroupFilter::NameKeywords(keywords));
                Ok(CommandResult::new(format!(
                    "{} groups listed!",
                    roster.filtered_groups().len()
                )))
            }
            Self::ShowGroupDetails(name) => {
                let group = roster.show_group_details(&name)?;
                Ok(CommandResult::new(format!("Showing group details:\n{group}")))
            }
            Self::AddToGroup { person, group } => {
                roster.add_person_to_group(&person, &group)?;
                Ok(CommandResult::new(format!("Added {person} to group {group}")))
            }
            Self::DeleteFromGroup { person, group } => {
                roster.delete_person_from_group(&person, &group)?;
                Ok(CommandResult::new(format!("Removed {person} from group {group}")))
            }
            Self::MarkAttendance {
                person,
                group,
                week,
            } => {
                roster.mark_attendance(&person, &group, week)?;
                Ok(CommandResult::new(format!(
                    "Marked attendance for {person}!\nGroup: {group}\nWeek {week}"
                )))
            }
            Self::UnmarkAttendance {
                person,
                group,
                week,
            } => {
                roster.unmark_attendance(&person, &group, week)?;
                Ok(CommandResult::new(format!(
                    "Unmarked attendance for {person}!\nGroup: {group}\nWeek {week}"
                )))
            }
            Self::ShowAttendance { person, group } => {
                let detail = roster.show_attendance(&person, &group)?;
                let weeks: Vec<String> = detail
                    .attendance()
                    .iter()
                    .enumerate()
                    .filter(|(_, present)| **present)
                    .map(|(slot, _)| (slot + 1).to_string())
                    .collect();
                let weeks = if weeks.is_empty() {
                    "none".to_string()
                } else {
                    weeks.join(", ")
                };
                Ok(CommandResult::new(format!(
                    "Showing attendance for {person} in {group}\nTotal attendance: {}/{} weeks\nWeeks attended: {weeks}",
                    detail.attendance_count(),
                    WEEKS_PER_SEMESTER
                )))
            }
            Self::AddAssignment {
                name,
                group,
                deadline,
                penalty,
            } => {
                let added = roster.add_assignment_to_group(name, deadline, &group, penalty)?;
                Ok(CommandResult::new(format!(
                    "Added new assignment to group!\nGroup: {group}\nAssignment: {added}"
                )))
            }
            Self::EditAssignment {
                name,
                group,
                new_name,
                deadline,
                penalty,
            } => {
                let edited = roster.edit_assignment(&name, new_name, deadline, &group, penalty)?;
                Ok(CommandResult::new(format!(
                    "Assignment in group {group} has been edited: {}",
                    edited.name()
                )))
            }
            Self::DeleteAssignment { name, group } => {
                let removed = roster.remove_assignment_from_group(&name, &group)?;
                Ok(CommandResult::new(format!(
                    "Deleted assignment {} (due {}) from group {group}",
                    removed.name(),
                    removed.deadline().format(DATE_FORMAT)
                )))
            }
            Self::GradeAssignment {
                person,
                group,
                assignment,
                score,
            } => {
                let stored = roster.grade_assignment(&person, &group, &assignment, score)?;
                Ok(CommandResult::new(format!(
                    "Graded assignment {assignment} for {person}, {group} with {stored:.2} score"
                )))
            }
            Self::Help => Ok(CommandResult {
                feedback: usage::ALL.join("\n\n"),
                show_help: true,
                exit: false,
            }),
            Self::Exit => Ok(CommandResult {
                feedback: "Exiting address book as requested ...".to_string(),
                show_help: false,
                exit: true,
            }),
        }
    }
}

fn person_at(roster: &RosterService, index: Index) -> Result<Person, CommandError> {
    roster
        .filtered_persons()
        .get(index.zero_based())
        .map(|person| (*person).clone())
        .ok_or(CommandError::InvalidPersonIndex(index))
}

fn group_at(roster: &RosterService, index: Index) -> Result<Group, CommandError> {
    roster
        .filtered_groups()
        .get(index.zero_based())
        .map(|group| (*group).clone())
        .ok_or(CommandError::InvalidGroupIndex(index))
}

#[cfg(test)]
mod tests {
    use super::parser::parse_command;
    use super::{CommandError, CommandResult};
    use crate::model::error::ModelError;
    use crate::repo::sample::sample_address_book;
    use crate::service::roster_service::RosterService;

    fn run(roster: &mut RosterService, line: &str) -> Result<CommandResult, CommandError> {
        parse_command(line).unwrap().execute(roster)
    }

    #[test]
    fn delete_out_of_range_index_fails() {
        let mut roster = RosterService::new(sample_address_book());
        let err = run(&mut roster, "delete 99").unwrap_err();
        assert!(matches!(err, CommandError::InvalidPersonIndex(_)));
        assert_eq!(roster.address_book().persons().len(), 6);
    }

    #[test]
    fn find_narrows_index_space() {
        let mut roster = RosterService::new(sample_address_book());
        let result = run(&mut roster, "find bernice").unwrap();
        assert_eq!(result.feedback, "1 persons listed!");

        run(&mut roster, "delete 1").unwrap();
        assert!(roster
            .address_book()
            .persons()
            .iter()
            .all(|person| person.name.as_str() != "Bernice Yu"));
    }

    #[test]
    fn show_attendance_reports_total() {
        let mut roster = RosterService::new(sample_address_book());
        run(&mut roster, "mark-attendance P/Alex Yeoh g/CS2103T T12 w/1").unwrap();
        run(&mut roster, "mark-attendance P/Alex Yeoh g/CS2103T T12 w/3").unwrap();
        let result = run(&mut roster, "show-attendance P/Alex Yeoh g/CS2103T T12").unwrap();
        assert!(result.feedback.contains("Total attendance: 2/13 weeks"));
        assert!(result.feedback.contains("Weeks attended: 1, 3"));
    }

    #[test]
    fn week_out_of_range_surfaces_validation_message() {
        let mut roster = RosterService::new(sample_address_book());
        let err = run(&mut roster, "mark-attendance P/Alex Yeoh g/CS2103T T12 w/14").unwrap_err();
        assert!(matches!(err, CommandError::Model(ModelError::Validation(_))));
    }

    #[test]
    fn member_not_in_group_has_dedicated_message() {
        let mut roster = RosterService::new(sample_address_book());
        let err = run(&mut roster, "mark-attendance P/Roy Balakrishnan g/CS2103T T12 w/1")
            .unwrap_err();
        assert_eq!(err.to_string(), "This person does not exist in the group!");
    }

    #[test]
    fn exit_and_help_set_flags() {
        let mut roster = RosterService::default();
        assert!(run(&mut roster, "exit").unwrap().exit);
        assert!(run(&mut roster, "help").unwrap().show_help);
    }
}
