// File: tests/parser_tests.rs
use chrono::NaiveDate;
use std::collections::HashMap;
use taskline::error::CommandError;
use taskline::model::{Command, Keyword, Parser, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn test_parse_todo() {
    let parser = Parser::new();
    let cmd = parser.parse("todo read book").unwrap();
    assert_eq!(cmd, Command::Add(Task::todo("read book", false)));
}

#[test]
fn test_parse_deadline() {
    let parser = Parser::new();
    let cmd = parser.parse("deadline return book /by 2025-03-24").unwrap();
    assert_eq!(
        cmd,
        Command::Add(Task::deadline("return book", date(2025, 3, 24), false))
    );
}

#[test]
fn test_parse_event() {
    let parser = Parser::new();
    let cmd = parser
        .parse("event book club /from 2024-03-24 /to 2024-03-25")
        .unwrap();
    assert_eq!(
        cmd,
        Command::Add(Task::event("book club", "2024-03-24", "2024-03-25", false))
    );
}

#[test]
fn test_whitespace_around_flags_is_tolerated() {
    let parser = Parser::new();
    let cmd = parser
        .parse("  deadline return book   /by   2025-03-24  ")
        .unwrap();
    assert_eq!(
        cmd,
        Command::Add(Task::deadline("return book", date(2025, 3, 24), false))
    );
}

#[test]
fn test_empty_descriptions_are_rejected() {
    let parser = Parser::new();
    assert!(matches!(parser.parse("todo"), Err(CommandError::Empty(_))));
    assert!(matches!(parser.parse("todo   "), Err(CommandError::Empty(_))));
    assert!(matches!(
        parser.parse("deadline /by 2025-03-24"),
        Err(CommandError::Empty(_))
    ));
    assert!(matches!(
        parser.parse("event /from 2025-03-01 /to 2025-03-05"),
        Err(CommandError::Empty(_))
    ));
}

#[test]
fn test_deadline_without_by_flag_is_rejected() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("deadline return book"),
        Err(CommandError::Empty(_))
    ));
    assert!(matches!(
        parser.parse("deadline return book /by"),
        Err(CommandError::Empty(_))
    ));
}

#[test]
fn test_unparseable_dates_are_invalid() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("deadline finish /by not-a-date"),
        Err(CommandError::Invalid(_))
    ));
    assert!(matches!(
        parser.parse("deadline finish /by 24-03-2025"),
        Err(CommandError::Invalid(_))
    ));
    assert!(matches!(
        parser.parse("due soon"),
        Err(CommandError::Invalid(_))
    ));
}

#[test]
fn test_event_missing_flags_is_rejected() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("event party /from 2025-03-01"),
        Err(CommandError::Empty(_))
    ));
    assert!(matches!(
        parser.parse("event party /to 2025-03-05"),
        Err(CommandError::Empty(_))
    ));
}

#[test]
fn test_event_cannot_end_before_it_starts() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("event party /from 2025-03-05 /to 2025-03-01"),
        Err(CommandError::Invalid(_))
    ));
    // Same-day events are fine.
    assert!(
        parser
            .parse("event party /from 2025-03-05 /to 2025-03-05")
            .is_ok()
    );
}

#[test]
fn test_event_dates_may_be_free_text() {
    let parser = Parser::new();
    let cmd = parser.parse("event conf /from Monday /to Wednesday").unwrap();
    assert_eq!(
        cmd,
        Command::Add(Task::event("conf", "Monday", "Wednesday", false))
    );
}

#[test]
fn test_position_commands() {
    let parser = Parser::new();
    assert_eq!(parser.parse("mark 2").unwrap(), Command::Mark(2));
    assert_eq!(parser.parse("unmark 1").unwrap(), Command::Unmark(1));
    assert_eq!(parser.parse("delete 3").unwrap(), Command::Delete(3));
    // Range checking happens in the store; the parser accepts any integer.
    assert_eq!(parser.parse("mark 0").unwrap(), Command::Mark(0));
}

#[test]
fn test_non_integer_positions_are_index_errors() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("mark two"),
        Err(CommandError::Index(_))
    ));
    assert!(matches!(parser.parse("delete"), Err(CommandError::Index(_))));
    assert!(matches!(
        parser.parse("unmark -1"),
        Err(CommandError::Index(_))
    ));
}

#[test]
fn test_due_and_find() {
    let parser = Parser::new();
    assert_eq!(
        parser.parse("due 2025-03-24").unwrap(),
        Command::DueOn(date(2025, 3, 24))
    );
    assert_eq!(
        parser.parse("find book loan").unwrap(),
        Command::Find("book loan".to_string())
    );
    assert!(matches!(parser.parse("find"), Err(CommandError::Empty(_))));
}

#[test]
fn test_unrecognized_command() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("blah read book"),
        Err(CommandError::Invalid(_))
    ));
    // Keywords are case-sensitive without an alias.
    assert!(matches!(parser.parse("List"), Err(CommandError::Invalid(_))));
}

#[test]
fn test_alias_command_parses_and_registers() {
    let mut parser = Parser::new();
    let cmd = parser.parse("alias dl deadline").unwrap();
    assert_eq!(
        cmd,
        Command::Alias {
            short: "dl".to_string(),
            canonical: Keyword::Deadline,
        }
    );

    parser.register_alias("dl".to_string(), Keyword::Deadline);
    let cmd = parser.parse("dl return book /by 2025-03-24").unwrap();
    assert!(matches!(cmd, Command::Add(Task::Deadline { .. })));

    // Alias lookup is case-insensitive; keyword lookup is not.
    let cmd = parser.parse("DL return book /by 2025-03-24").unwrap();
    assert!(matches!(cmd, Command::Add(Task::Deadline { .. })));
}

#[test]
fn test_alias_validation() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("alias dl"),
        Err(CommandError::Empty(_))
    ));
    assert!(matches!(
        parser.parse("alias dl nonsense"),
        Err(CommandError::Invalid(_))
    ));
}

#[test]
fn test_seeded_aliases() {
    let mut seed = HashMap::new();
    seed.insert("t".to_string(), "todo".to_string());
    seed.insert("broken".to_string(), "frobnicate".to_string());

    let parser = Parser::with_aliases(&seed);
    assert_eq!(
        parser.parse("t read book").unwrap(),
        Command::Add(Task::todo("read book", false))
    );
    // Invalid seed entries are dropped, not fatal.
    assert!(matches!(
        parser.parse("broken read book"),
        Err(CommandError::Invalid(_))
    ));
}

#[test]
fn test_event_dates_cannot_contain_the_range_separator() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("event trip /from Mon 3pm to 4pm /to Friday"),
        Err(CommandError::Invalid(_))
    ));
}

#[test]
fn test_descriptions_protect_the_record_format() {
    let parser = Parser::new();
    assert!(matches!(
        parser.parse("todo read | book"),
        Err(CommandError::Invalid(_))
    ));
    assert!(matches!(
        parser.parse("todo read\tbook"),
        Err(CommandError::Invalid(_))
    ));
}
