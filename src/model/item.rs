// File: src/model/item.rs
use chrono::NaiveDate;
use std::fmt;

/// Separator between fields of one persisted record. Descriptions and date
/// texts must never contain it; the parser enforces this.
pub const FIELD_DELIMITER: &str = " | ";

/// Calendar form used in persisted records and user input (ISO 8601).
pub const RECORD_DATE_FORMAT: &str = "%Y-%m-%d";

/// Long form used for on-screen rendering, e.g. "Mar 24 2025".
pub const DISPLAY_DATE_FORMAT: &str = "%b %d %Y";

/// One tracked task. The three variants share a description and a done flag;
/// `done` is the only field that changes after creation, and only through
/// `mark_done` / `unmark_done`.
#[derive(Debug, Clone)]
pub enum Task {
    Todo {
        description: String,
        done: bool,
    },
    Deadline {
        description: String,
        by: NaiveDate,
        done: bool,
    },
    Event {
        description: String,
        from: String,
        to: String,
        done: bool,
    },
}

impl Task {
    pub fn todo(description: &str, done: bool) -> Self {
        Self::Todo {
            description: description.to_string(),
            done,
        }
    }

    pub fn deadline(description: &str, by: NaiveDate, done: bool) -> Self {
        Self::Deadline {
            description: description.to_string(),
            by,
            done,
        }
    }

    pub fn event(description: &str, from: &str, to: &str, done: bool) -> Self {
        Self::Event {
            description: description.to_string(),
            from: from.to_string(),
            to: to.to_string(),
            done,
        }
    }

    pub fn description(&self) -> &str {
        match self {
            Task::Todo { description, .. }
            | Task::Deadline { description, .. }
            | Task::Event { description, .. } => description,
        }
    }

    pub fn is_done(&self) -> bool {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done
            }
        }
    }

    fn set_done(&mut self, value: bool) {
        match self {
            Task::Todo { done, .. } | Task::Deadline { done, .. } | Task::Event { done, .. } => {
                *done = value;
            }
        }
    }

    /// Single-character status indicator, `"X"` done / `" "` not done.
    /// Doubles as the status field of the persisted record.
    pub fn status_icon(&self) -> &'static str {
        if self.is_done() { "X" } else { " " }
    }

    /// Leading tag of both the display rendering and the persisted record.
    pub fn type_tag(&self) -> &'static str {
        match self {
            Task::Todo { .. } => "T",
            Task::Deadline { .. } => "D",
            Task::Event { .. } => "E",
        }
    }

    /// Marks the task as done and returns a confirmation. Marking an
    /// already-done task is not an error.
    pub fn mark_done(&mut self) -> String {
        self.set_done(true);
        format!("Nice! I've marked this task as done:\n  {self}")
    }

    /// Marks the task as not done and returns a confirmation. Idempotent.
    pub fn unmark_done(&mut self) -> String {
        self.set_done(false);
        format!("OK, I've marked this task as not done yet:\n  {self}")
    }

    /// True for a deadline falling exactly on `date`; no range matching.
    pub fn due_on(&self, date: NaiveDate) -> bool {
        matches!(self, Task::Deadline { by, .. } if *by == date)
    }

    /// Encodes this task as one line of the persistence file.
    pub fn to_record(&self) -> String {
        let head = [self.type_tag(), self.status_icon(), self.description()].join(FIELD_DELIMITER);
        match self {
            Task::Todo { .. } => head,
            Task::Deadline { by, .. } => format!(
                "{head}{FIELD_DELIMITER}{}",
                by.format(RECORD_DATE_FORMAT)
            ),
            Task::Event { from, to, .. } => format!("{head}{FIELD_DELIMITER}{from} to {to}"),
        }
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}][{}] {}",
            self.type_tag(),
            self.status_icon(),
            self.description()
        )?;
        match self {
            Task::Todo { .. } => Ok(()),
            Task::Deadline { by, .. } => write!(f, " (by: {})", by.format(DISPLAY_DATE_FORMAT)),
            Task::Event { from, to, .. } => write!(f, " (from: {from} to: {to})"),
        }
    }
}

// Completion status is not part of task identity: two tasks are equal iff
// they are the same variant with the same description and date fields.
impl PartialEq for Task {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (
                Task::Todo { description: a, .. },
                Task::Todo { description: b, .. },
            ) => a == b,
            (
                Task::Deadline {
                    description: a,
                    by: by_a,
                    ..
                },
                Task::Deadline {
                    description: b,
                    by: by_b,
                    ..
                },
            ) => a == b && by_a == by_b,
            (
                Task::Event {
                    description: a,
                    from: from_a,
                    to: to_a,
                    ..
                },
                Task::Event {
                    description: b,
                    from: from_b,
                    to: to_b,
                    ..
                },
            ) => a == b && from_a == from_b && to_a == to_b,
            _ => false,
        }
    }
}

impl Eq for Task {}
