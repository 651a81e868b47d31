//! Keyword filters backing `find` and `find-group`.

use crate::model::group::Group;
use crate::model::person::Person;

/// Filter over the person list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum PersonFilter {
    #[default]
    All,
    /// Matches when any keyword equals a whole word of the name,
    /// ignoring case.
    NameKeywords(Vec<String>),
}

impl PersonFilter {
    pub fn matches(&self, person: &Person) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => keywords
                .iter()
                .any(|keyword| contains_word_ignore_case(person.name.as_str(), keyword)),
        }
    }
}

/// Filter over the group list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum GroupFilter {
    #[default]
    All,
    /// Matches when any keyword occurs inside the group name, ignoring case.
    NameKeywords(Vec<String>),
}

impl GroupFilter {
    pub fn matches(&self, group: &Group) -> bool {
        match self {
            Self::All => true,
            Self::NameKeywords(keywords) => {
                let name = group.name().as_str().to_lowercase();
                keywords
                    .iter()
                    .map(|keyword| keyword.trim().to_lowercase())
                    .any(|keyword| !keyword.is_empty() && name.contains(&keyword))
            }
        }
    }
}

fn contains_word_ignore_case(sentence: &str, word: &str) -> bool {
    let word = word.trim();
    if word.is_empty() {
        return false;
    }
    sentence
        .split_whitespace()
        .any(|candidate| candidate.to_lowercase() == word.to_lowercase())
}
