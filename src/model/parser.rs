// File: src/model/parser.rs
//! Turns one raw command line into a typed [`Command`].
//!
//! Dispatch is purely lexical: the first whitespace-delimited token selects
//! the command, after alias normalization. The parser owns the alias table
//! (injected at construction, mutated by `alias` registrations) and performs
//! no storage or I/O; every failure is a structured [`CommandError`] the
//! session renders as response text.
use crate::error::CommandError;
use crate::model::Task;
use crate::model::item::{FIELD_DELIMITER, RECORD_DATE_FORMAT};
use chrono::NaiveDate;
use std::collections::HashMap;
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

/// Canonical command keywords. Keywords are matched case-sensitively; the
/// alias table maps arbitrary shorthands onto them case-insensitively.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub enum Keyword {
    Todo,
    Deadline,
    Event,
    List,
    Mark,
    Unmark,
    Delete,
    Due,
    Find,
    Alias,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Add(Task),
    List,
    Mark(usize),
    Unmark(usize),
    Delete(usize),
    DueOn(NaiveDate),
    Find(String),
    Alias { short: String, canonical: Keyword },
}

#[derive(Debug, Default)]
pub struct Parser {
    aliases: HashMap<String, Keyword>,
}

impl Parser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a parser with aliases seeded from configuration. Entries whose
    /// canonical side is not a command keyword are skipped with a warning.
    pub fn with_aliases(seed: &HashMap<String, String>) -> Self {
        let mut parser = Self::new();
        for (short, canonical) in seed {
            match Keyword::from_str(canonical) {
                Ok(keyword) => {
                    parser.aliases.insert(short.to_lowercase(), keyword);
                }
                Err(_) => {
                    log::warn!("Ignoring alias `{short}`: `{canonical}` is not a command keyword");
                }
            }
        }
        parser
    }

    /// Registers a runtime alias and returns a confirmation. Aliases live
    /// for the session only and are never persisted.
    pub fn register_alias(&mut self, short: String, canonical: Keyword) -> String {
        let reply = format!("Got it. `{short}` now means `{}`.", canonical.as_ref());
        self.aliases.insert(short.to_lowercase(), canonical);
        reply
    }

    /// Resolves the leading token: exact keyword match first, then the alias
    /// table (case-insensitive). Built-in keywords cannot be shadowed.
    fn resolve(&self, token: &str) -> Option<Keyword> {
        Keyword::from_str(token)
            .ok()
            .or_else(|| self.aliases.get(&token.to_lowercase()).copied())
    }

    pub fn parse(&self, input: &str) -> Result<Command, CommandError> {
        let input = input.trim();
        let (head, rest) = match input.split_once(char::is_whitespace) {
            Some((head, rest)) => (head, rest.trim()),
            None => (input, ""),
        };
        if head.is_empty() {
            return Err(CommandError::Empty(
                "Type a command such as `todo`, `list`, or `bye`.".to_string(),
            ));
        }
        let keyword = self.resolve(head).ok_or_else(|| {
            CommandError::Invalid(format!(
                "I don't know what `{head}` means. Try `todo`, `deadline`, `event`, `list`, \
                 `mark`, `unmark`, `delete`, `due`, `find`, or `alias`."
            ))
        })?;
        match keyword {
            Keyword::Todo => parse_todo(rest),
            Keyword::Deadline => parse_deadline(rest),
            Keyword::Event => parse_event(rest),
            Keyword::List => Ok(Command::List),
            Keyword::Mark => parse_position(rest).map(Command::Mark),
            Keyword::Unmark => parse_position(rest).map(Command::Unmark),
            Keyword::Delete => parse_position(rest).map(Command::Delete),
            Keyword::Due => parse_due(rest).map(Command::DueOn),
            Keyword::Find => parse_find(rest),
            Keyword::Alias => parse_alias(rest),
        }
    }
}

fn parse_todo(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Empty(
            "The description of a todo cannot be empty.".to_string(),
        ));
    }
    validate_text(rest, "description")?;
    Ok(Command::Add(Task::todo(rest, false)))
}

fn parse_deadline(rest: &str) -> Result<Command, CommandError> {
    let Some((description, date)) = split_flag(rest, "/by") else {
        return Err(CommandError::Empty(
            "A deadline must follow the format `deadline <task> /by <yyyy-mm-dd>`.".to_string(),
        ));
    };
    if description.is_empty() {
        return Err(CommandError::Empty(
            "The description of a deadline cannot be empty.".to_string(),
        ));
    }
    if date.is_empty() {
        return Err(CommandError::Empty(
            "A deadline needs a date after `/by`.".to_string(),
        ));
    }
    validate_text(description, "description")?;
    let by = parse_iso_date(date)?;
    Ok(Command::Add(Task::deadline(description, by, false)))
}

fn parse_event(rest: &str) -> Result<Command, CommandError> {
    const FORMAT: &str = "An event must follow the format `event <name> /from <date> /to <date>`.";
    let Some((description, range)) = split_flag(rest, "/from") else {
        return Err(CommandError::Empty(FORMAT.to_string()));
    };
    let Some((from, to)) = split_flag(range, "/to") else {
        return Err(CommandError::Empty(FORMAT.to_string()));
    };
    if description.is_empty() {
        return Err(CommandError::Empty(
            "The description of an event cannot be empty.".to_string(),
        ));
    }
    if from.is_empty() || to.is_empty() {
        return Err(CommandError::Empty(FORMAT.to_string()));
    }
    validate_text(description, "description")?;
    validate_text(from, "date")?;
    validate_text(to, "date")?;
    // The two halves are joined as `<from> to <to>` in the record.
    if from.contains(" to ") || to.contains(" to ") {
        return Err(CommandError::Invalid(
            "An event date cannot contain the ` to ` separator.".to_string(),
        ));
    }
    // The fields stay free text, but a range that does parse must be ordered.
    if let (Ok(start), Ok(end)) = (
        NaiveDate::parse_from_str(from, RECORD_DATE_FORMAT),
        NaiveDate::parse_from_str(to, RECORD_DATE_FORMAT),
    ) && end < start
    {
        return Err(CommandError::Invalid(
            "An event cannot end before it starts.".to_string(),
        ));
    }
    Ok(Command::Add(Task::event(description, from, to, false)))
}

fn parse_position(rest: &str) -> Result<usize, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Index(
            "A task number is required; use a position from `list`.".to_string(),
        ));
    }
    rest.parse::<usize>().map_err(|_| {
        CommandError::Index(format!(
            "`{rest}` is not a task number; use a position from `list`."
        ))
    })
}

fn parse_due(rest: &str) -> Result<NaiveDate, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Empty(
            "`due` needs a date in yyyy-mm-dd form.".to_string(),
        ));
    }
    parse_iso_date(rest)
}

fn parse_find(rest: &str) -> Result<Command, CommandError> {
    if rest.is_empty() {
        return Err(CommandError::Empty(
            "A search keyword cannot be empty.".to_string(),
        ));
    }
    Ok(Command::Find(rest.to_string()))
}

fn parse_alias(rest: &str) -> Result<Command, CommandError> {
    let mut words = rest.split_whitespace();
    let (Some(short), Some(canonical), None) = (words.next(), words.next(), words.next()) else {
        return Err(CommandError::Empty(
            "An alias must follow the format `alias <short> <canonical>`.".to_string(),
        ));
    };
    let canonical = Keyword::from_str(canonical)
        .map_err(|_| CommandError::Invalid(format!("`{canonical}` is not a command keyword.")))?;
    Ok(Command::Alias {
        short: short.to_string(),
        canonical,
    })
}

/// First-match split on a `/flag` marker; both halves trimmed.
fn split_flag<'a>(text: &'a str, flag: &str) -> Option<(&'a str, &'a str)> {
    text.split_once(flag)
        .map(|(left, right)| (left.trim(), right.trim()))
}

fn parse_iso_date(token: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(token, RECORD_DATE_FORMAT)
        .map_err(|_| CommandError::Invalid(format!("`{token}` is not a valid yyyy-mm-dd date.")))
}

/// Text fields feed straight into the line-oriented persistence format, so
/// control characters and the field separator are rejected up front.
fn validate_text(value: &str, what: &str) -> Result<(), CommandError> {
    if value.chars().any(char::is_control) {
        return Err(CommandError::Invalid(format!(
            "A {what} cannot contain control characters."
        )));
    }
    if value.contains(FIELD_DELIMITER) {
        return Err(CommandError::Invalid(format!(
            "A {what} cannot contain the ` | ` separator."
        )));
    }
    Ok(())
}
