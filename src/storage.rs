// File: src/storage.rs
// Line-oriented persistence for the task file.
//
// One task per line, fields separated by ` | `. Loading is tolerant: a line
// that fails to decode is logged and skipped, never aborting the whole load.
// Saving is a full rewrite through a temp file + rename under an exclusive
// sidecar lock, so a crash mid-write cannot clobber the previous contents.
use crate::error::DecodeError;
use crate::model::Task;
use crate::model::item::{FIELD_DELIMITER, RECORD_DATE_FORMAT};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use fs2::FileExt;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Storage {
    path: PathBuf,
}

impl Storage {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Decodes one persisted line back into a task.
    ///
    /// The first field selects the variant; the second is `X` for done and
    /// anything else for not done. Older files wrote events with the same
    /// `D` tag as deadlines; a `D` record whose last field is not a date but
    /// splits as `<from> to <to>` is accepted as such a legacy event.
    pub fn decode(line: &str) -> Result<Task, DecodeError> {
        let fields: Vec<&str> = line.split(FIELD_DELIMITER).collect();
        if fields.len() < 3 {
            return Err(DecodeError::MissingFields {
                expected: 3,
                found: fields.len(),
            });
        }
        let done = fields[1] == "X";
        let description = fields[2];
        if description.is_empty() {
            return Err(DecodeError::EmptyField("description"));
        }
        match fields[0] {
            "T" => Ok(Task::todo(description, done)),
            "D" => {
                let raw = field_at(&fields, 3)?;
                match NaiveDate::parse_from_str(raw, RECORD_DATE_FORMAT) {
                    Ok(by) => Ok(Task::deadline(description, by, done)),
                    Err(_) => match raw.split_once(" to ") {
                        Some((from, to)) => Ok(Task::event(description, from, to, done)),
                        None => Err(DecodeError::InvalidDate(raw.to_string())),
                    },
                }
            }
            "E" => {
                let raw = field_at(&fields, 3)?;
                let (from, to) = raw
                    .split_once(" to ")
                    .ok_or_else(|| DecodeError::InvalidRange(raw.to_string()))?;
                Ok(Task::event(description, from, to, done))
            }
            tag => Err(DecodeError::UnknownTag(tag.to_string())),
        }
    }

    /// Loads every decodable task from the file, in file order.
    ///
    /// A missing file is not an error: it is created empty (with parent
    /// directories) and an empty list is returned. Blank lines are ignored;
    /// corrupted lines are skipped with a warning.
    pub fn load(&self) -> Result<Vec<Task>> {
        if !self.path.exists() {
            self.ensure_parent()?;
            fs::File::create(&self.path)
                .with_context(|| format!("Failed to create task file {:?}", self.path))?;
            return Ok(Vec::new());
        }

        let contents = Self::with_lock(&self.path, || {
            fs::read_to_string(&self.path)
                .with_context(|| format!("Failed to read task file {:?}", self.path))
        })?;

        let mut tasks = Vec::new();
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match Self::decode(line) {
                Ok(task) => tasks.push(task),
                Err(e) => log::warn!("Skipping corrupted record `{line}`: {e}"),
            }
        }
        Ok(tasks)
    }

    /// Overwrites the file with one record per task, in store order.
    pub fn save(&self, tasks: &[Task]) -> Result<()> {
        self.ensure_parent()?;
        let mut contents = String::new();
        for task in tasks {
            contents.push_str(&task.to_record());
            contents.push('\n');
        }
        Self::with_lock(&self.path, || Self::atomic_write(&self.path, contents))
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory {parent:?}"))?;
        }
        Ok(())
    }

    /// Sidecar lock file path: `tasks.txt` -> `tasks.txt.lock`.
    fn get_lock_path(file_path: &Path) -> PathBuf {
        let mut lock_path = file_path.to_path_buf();
        if let Some(ext) = lock_path.extension() {
            let mut new_ext = ext.to_os_string();
            new_ext.push(".lock");
            lock_path.set_extension(new_ext);
        } else {
            lock_path.set_extension("lock");
        }
        lock_path
    }

    pub fn with_lock<F, T>(file_path: &Path, f: F) -> Result<T>
    where
        F: FnOnce() -> Result<T>,
    {
        let lock_path = Self::get_lock_path(file_path);
        let file = fs::OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        file.lock_exclusive()?;
        let result = f();
        file.unlock()?;
        result
    }

    pub fn atomic_write<P: AsRef<Path>, C: AsRef<[u8]>>(path: P, contents: C) -> Result<()> {
        let path = path.as_ref();
        let tmp_path = path.with_extension("tmp");
        fs::write(&tmp_path, contents)?;
        fs::rename(tmp_path, path)?;
        Ok(())
    }
}

fn field_at<'a>(fields: &[&'a str], idx: usize) -> Result<&'a str, DecodeError> {
    fields.get(idx).copied().ok_or(DecodeError::MissingFields {
        expected: idx + 1,
        found: fields.len(),
    })
}

#[cfg(test)]
mod codec_tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn decode_selects_variant_by_tag() {
        let todo = Storage::decode("T | X | read book").unwrap();
        assert_eq!(todo, Task::todo("read book", true));
        assert!(todo.is_done());

        let deadline = Storage::decode("D |   | return book | 2025-03-24").unwrap();
        assert_eq!(
            deadline,
            Task::deadline(
                "return book",
                NaiveDate::from_ymd_opt(2025, 3, 24).unwrap(),
                false
            )
        );
        assert!(!deadline.is_done());

        let event = Storage::decode("E | X | book club | 2025-03-01 to 2025-03-05").unwrap();
        assert_eq!(
            event,
            Task::event("book club", "2025-03-01", "2025-03-05", true)
        );
    }

    #[test]
    fn decode_accepts_legacy_event_with_deadline_tag() {
        let event = Storage::decode("D | X | book club | 2025-03-01 to 2025-03-05").unwrap();
        assert_eq!(
            event,
            Task::event("book club", "2025-03-01", "2025-03-05", true)
        );
    }

    #[test]
    fn decode_rejects_malformed_records() {
        assert!(matches!(
            Storage::decode("Z | X | mystery"),
            Err(DecodeError::UnknownTag(_))
        ));
        assert!(matches!(
            Storage::decode("garbage"),
            Err(DecodeError::MissingFields { .. })
        ));
        assert!(matches!(
            Storage::decode("D | X | report | not-a-date"),
            Err(DecodeError::InvalidDate(_))
        ));
        assert!(matches!(
            Storage::decode("E | X | party | just-one-date"),
            Err(DecodeError::InvalidRange(_))
        ));
    }

    #[test]
    fn status_field_is_exact_match_on_x() {
        assert!(Storage::decode("T | X | a").unwrap().is_done());
        assert!(!Storage::decode("T | x | a").unwrap().is_done());
        assert!(!Storage::decode("T | ? | a").unwrap().is_done());
    }
}
