//! Command execution entry point for front-ends.
//!
//! # Responsibility
//! - Parse one input line, run it against the roster, and persist the
//!   book after successful mutating commands.
//!
//! # Invariants
//! - Parse and command failures never touch storage.
//! - A failed save keeps the in-memory change and reports `Storage`.

use crate::command::parser::{parse_command, ParseError};
use crate::command::{CommandError, CommandResult};
use crate::model::address_book::AddressBook;
use crate::repo::address_book_repo::{AddressBookRepository, RepoError, RepoResult};
use crate::repo::sample::sample_address_book;
use crate::service::roster_service::RosterService;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::Instant;

/// Failure of one executed line.
#[derive(Debug)]
pub enum LogicError {
    Parse(ParseError),
    Command(CommandError),
    Storage(RepoError),
}

impl Display for LogicError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(err) => write!(f, "{err}"),
            Self::Command(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "Could not save data to file: {err}"),
        }
    }
}

impl Error for LogicError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Parse(err) => Some(err),
            Self::Command(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<ParseError> for LogicError {
    fn from(value: ParseError) -> Self {
        Self::Parse(value)
    }
}

impl From<CommandError> for LogicError {
    fn from(value: CommandError) -> Self {
        Self::Command(value)
    }
}

impl From<RepoError> for LogicError {
    fn from(value: RepoError) -> Self {
        Self::Storage(value)
    }
}

/// Roster plus the repository it is saved to.
pub struct Logic<R: AddressBookRepository> {
    roster: RosterService,
    repo: R,
}

impl<R: AddressBookRepository> Logic<R> {
    /// Creates logic over `book` without reading storage.
    pub fn new(book: AddressBook, repo: R) -> Self {
        Self {
            roster: RosterService::new(book),
            repo,
        }
    }

    /// Loads the stored book, seeding the sample roster on first run.
    pub fn load(repo: R) -> RepoResult<Self> {
        let book = match repo.read()? {
            Some(book) => book,
            None => {
                info!("event=data_load module=logic status=sample reason=no_data_file");
                sample_address_book()
            }
        };
        Ok(Self::new(book, repo))
    }

    /// Like `load`, but starts empty when stored data cannot be read.
    pub fn load_or_empty(repo: R) -> Self {
        match repo.read() {
            Ok(Some(book)) => Self::new(book, repo),
            Ok(None) => Self::new(sample_address_book(), repo),
            Err(err) => {
                warn!(
                    "event=data_load module=logic status=fallback reason=unreadable error={}",
                    err
                );
                Self::new(AddressBook::new(), repo)
            }
        }
    }

    pub fn roster(&self) -> &RosterService {
        &self.roster
    }

    pub fn repository(&self) -> &R {
        &self.repo
    }

    /// Runs one command line.
    pub fn execute(&mut self, line: &str) -> Result<CommandResult, LogicError> {
        let started_at = Instant::now();
        let command = match parse_command(line) {
            Ok(command) => command,
            Err(err) => {
                info!("event=command_execute module=logic status=rejected stage=parse");
                return Err(err.into());
            }
        };
        let word = command.word();
        let mutating = command.is_mutating();

        let result = match command.execute(&mut self.roster) {
            Ok(result) => result,
            Err(err) => {
                info!(
                    "event=command_execute module=logic status=rejected stage=execute command={} duration_ms={}",
                    word,
                    started_at.elapsed().as_millis()
                );
                return Err(err.into());
            }
        };

        if mutating {
            if let Err(err) = self.repo.save(self.roster.address_book()) {
                error!(
                    "event=command_execute module=logic status=error stage=save command={} error={}",
                    word, err
                );
                return Err(err.into());
            }
        }

        info!(
            "event=command_execute module=logic status=ok command={} duration_ms={}",
            word,
            started_at.elapsed().as_millis()
        );
        Ok(result)
    }
}
