// File: src/store.rs
//! Ordered, insertion-preserving collection of tasks.
//!
//! The store is the sole owner and sole mutator of its tasks. User-facing
//! positions are 1-based and translated to 0-based offsets internally; every
//! position-taking operation fails with an index error outside `[1, size]`.
use crate::error::CommandError;
use crate::model::Task;
use chrono::NaiveDate;

#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Vec<Task>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Read-only view for the persistence layer; the codec never mutates.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Copy of the current contents, used by the session to roll a mutation
    /// back when the save that follows it fails.
    pub fn snapshot(&self) -> Vec<Task> {
        self.tasks.clone()
    }

    pub fn restore(&mut self, tasks: Vec<Task>) {
        self.tasks = tasks;
    }

    /// Appends a task and returns a confirmation with the new total.
    pub fn add(&mut self, task: Task) -> String {
        let rendered = task.to_string();
        self.tasks.push(task);
        format!(
            "Got it. I've added this task:\n  {rendered}\nNow you have {}.",
            count_phrase(self.tasks.len())
        )
    }

    pub fn mark_done(&mut self, pos: usize) -> Result<String, CommandError> {
        let idx = self.index_of(pos)?;
        Ok(self.tasks[idx].mark_done())
    }

    pub fn unmark_done(&mut self, pos: usize) -> Result<String, CommandError> {
        let idx = self.index_of(pos)?;
        Ok(self.tasks[idx].unmark_done())
    }

    /// Removes the task at `pos`; later positions shift down by one.
    pub fn delete(&mut self, pos: usize) -> Result<String, CommandError> {
        let idx = self.index_of(pos)?;
        let removed = self.tasks.remove(idx);
        Ok(format!(
            "Noted. I've removed this task:\n  {removed}\nNow you have {}.",
            count_phrase(self.tasks.len())
        ))
    }

    pub fn list(&self) -> String {
        if self.tasks.is_empty() {
            return "There are no tasks in your list.".to_string();
        }
        let mut out = String::from("Here are the tasks in your list:");
        for (i, task) in self.tasks.iter().enumerate() {
            out.push_str(&format!("\n{}. {task}", i + 1));
        }
        out
    }

    /// Deadlines falling exactly on `date`; no range matching.
    pub fn due_on(&self, date: NaiveDate) -> String {
        let due: Vec<&Task> = self.tasks.iter().filter(|t| t.due_on(date)).collect();
        if due.is_empty() {
            return format!("No deadlines due on {date}.");
        }
        let mut out = format!("Here are the deadlines due on {date}:");
        for task in due {
            out.push_str(&format!("\n  {task}"));
        }
        out
    }

    /// Case-sensitive substring search over descriptions (not the rendered
    /// form). Matches keep store order and are renumbered from 1.
    pub fn search(&self, keyword: &str) -> String {
        let found: Vec<&Task> = self
            .tasks
            .iter()
            .filter(|t| t.description().contains(keyword))
            .collect();
        if found.is_empty() {
            return "No matching tasks found.".to_string();
        }
        let mut out = String::from("Here are the matching tasks in your list:");
        for (n, task) in found.iter().enumerate() {
            out.push_str(&format!("\n{}. {task}", n + 1));
        }
        out
    }

    fn index_of(&self, pos: usize) -> Result<usize, CommandError> {
        if pos == 0 || pos > self.tasks.len() {
            return Err(self.out_of_range(pos));
        }
        Ok(pos - 1)
    }

    fn out_of_range(&self, pos: usize) -> CommandError {
        if self.tasks.is_empty() {
            CommandError::Index(format!("Task {pos} does not exist; the list is empty."))
        } else {
            CommandError::Index(format!(
                "Task {pos} does not exist; valid positions are 1 to {}.",
                self.tasks.len()
            ))
        }
    }
}

fn count_phrase(n: usize) -> String {
    if n == 1 {
        "1 task in the list".to_string()
    } else {
        format!("{n} tasks in the list")
    }
}
