// File: src/session.rs
//! Session controller: the single orchestration point between a front end
//! and the task core.
//!
//! Any front end (a stdin loop, a chat window) submits raw command strings
//! through [`Session::respond`] and displays the returned text; persistence
//! happens as a side effect. Errors never escape `respond` — every failure
//! becomes response text and the session stays usable.
use crate::config::Config;
use crate::context::AppContext;
use crate::error::CommandError;
use crate::model::{Command, Parser};
use crate::storage::Storage;
use crate::store::TaskStore;
use anyhow::Result;

/// The one input that ends a session. Matched literally, before parsing.
pub const EXIT_COMMAND: &str = "bye";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SessionState {
    Running,
    Exiting,
}

pub struct Session {
    store: TaskStore,
    storage: Storage,
    parser: Parser,
    state: SessionState,
}

impl Session {
    /// Builds a session: resolves the task file, loads whatever it holds
    /// (empty when absent, partial when corrupted) and seeds the parser with
    /// the configured aliases.
    pub fn new(ctx: &dyn AppContext, config: &Config) -> Result<Self> {
        let storage = Storage::new(config.task_file_path(ctx)?);
        let tasks = match storage.load() {
            Ok(tasks) => tasks,
            Err(e) => {
                log::error!("Could not load tasks from {:?}: {e:#}", storage.path());
                Vec::new()
            }
        };
        log::info!("Loaded {} task(s) from {:?}", tasks.len(), storage.path());
        Ok(Self {
            store: TaskStore::with_tasks(tasks),
            storage,
            parser: Parser::with_aliases(&config.command_aliases),
            state: SessionState::Running,
        })
    }

    pub fn greeting() -> String {
        "Hello! I'm Taskline.\nWhat can I do for you?".to_string()
    }

    pub fn goodbye() -> String {
        "Bye. Hope to see you again soon!".to_string()
    }

    pub fn is_exiting(&self) -> bool {
        self.state == SessionState::Exiting
    }

    /// One complete turn: parse, optionally mutate, optionally persist,
    /// reply. Never panics or propagates an error past this boundary.
    pub fn respond(&mut self, raw: &str) -> String {
        let input = raw.trim();
        if input == EXIT_COMMAND {
            self.state = SessionState::Exiting;
            return Self::goodbye();
        }

        match self.parser.parse(input) {
            Ok(command) => self.execute(command),
            Err(e) => e.to_string(),
        }
    }

    fn execute(&mut self, command: Command) -> String {
        match command {
            Command::Add(task) => self.commit(|store| Ok(store.add(task))),
            Command::Mark(pos) => self.commit(move |store| store.mark_done(pos)),
            Command::Unmark(pos) => self.commit(move |store| store.unmark_done(pos)),
            Command::Delete(pos) => self.commit(move |store| store.delete(pos)),
            Command::List => self.store.list(),
            Command::DueOn(date) => self.store.due_on(date),
            Command::Find(keyword) => self.store.search(&keyword),
            Command::Alias { short, canonical } => self.parser.register_alias(short, canonical),
        }
    }

    /// Applies a mutation, then re-saves the whole store. If the save fails
    /// the mutation is rolled back, so memory and disk never diverge.
    fn commit<F>(&mut self, mutation: F) -> String
    where
        F: FnOnce(&mut TaskStore) -> Result<String, CommandError>,
    {
        let snapshot = self.store.snapshot();
        let reply = match mutation(&mut self.store) {
            Ok(reply) => reply,
            // Index errors happen before any mutation; nothing to roll back.
            Err(e) => return e.to_string(),
        };
        match self.storage.save(self.store.tasks()) {
            Ok(()) => reply,
            Err(e) => {
                self.store.restore(snapshot);
                log::error!("Save to {:?} failed: {e:#}", self.storage.path());
                format!("I couldn't save your tasks ({e}); the change was not applied.")
            }
        }
    }
}
