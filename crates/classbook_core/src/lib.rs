//! Core domain logic for Classbook.
//! This crate is the single source of truth for roster invariants.

pub mod command;
pub mod config;
pub mod logging;
pub mod logic;
pub mod model;
pub mod repo;
pub mod service;

pub use command::parser::{parse_command, ParseError};
pub use command::{Command, CommandError, CommandResult};
pub use config::{AppConfig, ConfigError, ConfigOverrides};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use logic::{Logic, LogicError};
pub use model::address_book::AddressBook;
pub use model::assignment::{Assignment, DEFAULT_PENALTY};
pub use model::error::{ModelError, ModelResult};
pub use model::fields::{Address, AssignmentName, Email, GroupName, PersonName, Phone, Tag};
pub use model::group::Group;
pub use model::member::{GroupMemberDetail, Role};
pub use model::person::{EditPersonDescriptor, Person};
pub use model::validation::{ValidationError, WEEKS_PER_SEMESTER};
pub use repo::address_book_repo::{
    AddressBookRepository, InMemoryAddressBookRepository, JsonAddressBookRepository, RepoError,
    RepoResult,
};
pub use service::events::{ListenerId, ResultView, RosterEvent};
pub use service::filter::{GroupFilter, PersonFilter};
pub use service::roster_service::RosterService;

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
