//! Task storage and synchronous persistence.
//!
//! This module provides the `TaskStore` struct, the authoritative owner of
//! the task list. It assigns ids, applies the four mutations, and rewrites
//! the backing JSON file after every one of them, so the file is always
//! current when the process exits.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::task::Task;

/// Errors raised by store operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No task in the store has the requested id.
    #[error("Task {0} not found.")]
    NotFound(u64),
    #[error("task file error: {0}")]
    Io(#[from] std::io::Error),
    /// The task file exists but is not the expected JSON array.
    #[error("task file is not valid JSON: {0}")]
    Format(#[from] serde_json::Error),
}

/// In-memory task list plus the file it persists to.
#[derive(Debug)]
pub struct TaskStore {
    tasks: Vec<Task>,
    next_id: u64,
    path: PathBuf,
}

impl TaskStore {
    /// Load the store from `path`, starting empty if the file is absent.
    ///
    /// The next id to assign becomes one greater than the largest id on
    /// disk (1 for an empty store). A file that exists but cannot be
    /// parsed is fatal: the error propagates and no store is constructed.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        let mut tasks: Vec<Task> = Vec::new();
        if path.exists() {
            let mut buf = String::new();
            File::open(path).and_then(|mut f| f.read_to_string(&mut buf))?;
            // A zero-length file counts as an empty store, not a parse error.
            if !buf.trim().is_empty() {
                tasks = serde_json::from_str(&buf)?;
            }
        }
        let next_id = tasks.iter().map(|t| t.id).max().unwrap_or(0) + 1;
        Ok(TaskStore {
            tasks,
            next_id,
            path: path.to_path_buf(),
        })
    }

    /// Tasks in insertion order. The order is never re-sorted, even after
    /// edits or completions.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Get a task by id.
    pub fn get(&self, id: u64) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: u64) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Append a new incomplete task, returning its id.
    ///
    /// Ids are strictly increasing for the lifetime of the store; deleting
    /// a task never frees its id for reuse within the session. Titles are
    /// not validated here; rejecting empty input is the caller's job.
    pub fn add(&mut self, title: &str) -> Result<u64, StoreError> {
        let id = self.next_id;
        self.tasks.push(Task::new(id, title));
        self.next_id += 1;
        self.save()?;
        Ok(id)
    }

    /// Mark a task complete. Already-complete tasks stay complete.
    pub fn mark_complete(&mut self, id: u64) -> Result<(), StoreError> {
        let task = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        task.mark_complete();
        self.save()
    }

    /// Mark a task incomplete again.
    pub fn mark_uncomplete(&mut self, id: u64) -> Result<(), StoreError> {
        let task = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        task.mark_uncomplete();
        self.save()
    }

    /// Replace a task's title. An edited task always goes back to
    /// incomplete.
    pub fn edit(&mut self, id: u64, new_title: &str) -> Result<(), StoreError> {
        let task = self.get_mut(id).ok_or(StoreError::NotFound(id))?;
        task.title = new_title.to_string();
        task.mark_uncomplete();
        self.save()
    }

    /// Remove the task with the given id, if present.
    ///
    /// Unknown ids are a silent no-op, unlike `mark_complete` and `edit`.
    pub fn delete(&mut self, id: u64) -> Result<(), StoreError> {
        self.tasks.retain(|t| t.id != id);
        self.save()
    }

    /// Rewrite the whole file as a JSON array using temp file + rename.
    pub fn save(&self) -> Result<(), StoreError> {
        let tmp = self.path.with_extension("json.tmp");
        let mut f = File::create(&tmp)?;
        let data = serde_json::to_string_pretty(&self.tasks)?;
        f.write_all(data.as_bytes())?;
        f.flush()?;
        fs::rename(tmp, &self.path)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_store(dir: &TempDir) -> TaskStore {
        TaskStore::load(&dir.path().join("tasks.json")).expect("load empty store")
    }

    #[test]
    fn add_appends_incomplete_task() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let id = store.add("Buy milk").unwrap();

        assert_eq!(id, 1);
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].title, "Buy milk");
        assert!(!store.tasks()[0].completed);
    }

    #[test]
    fn ids_increase_across_interleaved_deletes() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);

        let a = store.add("one").unwrap();
        let b = store.add("two").unwrap();
        store.delete(b).unwrap();
        let c = store.add("three").unwrap();
        store.delete(a).unwrap();
        let d = store.add("four").unwrap();

        assert_eq!((a, b, c, d), (1, 2, 3, 4));
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![3, 4]);
    }

    #[test]
    fn mark_complete_flips_only_the_target() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("one").unwrap();
        store.add("two").unwrap();

        store.mark_complete(1).unwrap();

        assert!(store.get(1).unwrap().completed);
        assert!(!store.get(2).unwrap().completed);

        // Idempotent: completing again keeps it complete.
        store.mark_complete(1).unwrap();
        assert!(store.get(1).unwrap().completed);
    }

    #[test]
    fn mark_uncomplete_reopens_a_task() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("one").unwrap();
        store.mark_complete(1).unwrap();

        store.mark_uncomplete(1).unwrap();

        assert!(!store.get(1).unwrap().completed);
    }

    #[test]
    fn edit_updates_title_and_resets_completed() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("Buy milk").unwrap();
        store.mark_complete(1).unwrap();

        store.edit(1, "Buy oat milk").unwrap();

        let task = store.get(1).unwrap();
        assert_eq!(task.title, "Buy oat milk");
        assert!(!task.completed);
    }

    #[test]
    fn missing_ids_raise_not_found_except_for_delete() {
        let dir = TempDir::new().unwrap();
        let mut store = open_store(&dir);
        store.add("one").unwrap();

        assert!(matches!(
            store.mark_complete(99),
            Err(StoreError::NotFound(99))
        ));
        assert!(matches!(
            store.mark_uncomplete(99),
            Err(StoreError::NotFound(99))
        ));
        assert!(matches!(
            store.edit(99, "other"),
            Err(StoreError::NotFound(99))
        ));

        // Deleting an absent id is a no-op, not an error.
        store.delete(99).unwrap();
        assert_eq!(store.tasks().len(), 1);
    }

    #[test]
    fn round_trip_preserves_tasks_and_next_id() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        {
            let mut store = TaskStore::load(&path).unwrap();
            store.add("one").unwrap();
            store.add("two").unwrap();
            store.mark_complete(2).unwrap();
        }

        let mut reloaded = TaskStore::load(&path).unwrap();
        assert_eq!(reloaded.tasks().len(), 2);
        assert_eq!(reloaded.tasks()[0].title, "one");
        assert!(reloaded.tasks()[1].completed);
        assert_eq!(reloaded.add("three").unwrap(), 3);
    }

    #[test]
    fn on_disk_format_is_an_array_of_fixed_objects() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::load(&path).unwrap();
        store.add("Buy milk").unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let array = value.as_array().unwrap();
        assert_eq!(array.len(), 1);
        let obj = array[0].as_object().unwrap();
        assert_eq!(obj["task_id"], 1);
        assert_eq!(obj["title"], "Buy milk");
        assert_eq!(obj["completed"], false);
    }

    #[test]
    fn malformed_file_aborts_construction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            TaskStore::load(&path),
            Err(StoreError::Format(_))
        ));
    }

    #[test]
    fn blank_file_loads_as_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(&path, "").unwrap();

        let mut store = TaskStore::load(&path).unwrap();
        assert!(store.tasks().is_empty());
        assert_eq!(store.add("first").unwrap(), 1);
    }

    #[test]
    fn full_session_scenario() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("tasks.json");
        let mut store = TaskStore::load(&path).unwrap();

        store.add("Buy milk").unwrap();
        assert_eq!(store.tasks().len(), 1);
        assert_eq!(store.tasks()[0].id, 1);
        assert!(!store.tasks()[0].completed);

        store.add("Pay rent").unwrap();
        let ids: Vec<u64> = store.tasks().iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 2]);

        store.mark_complete(1).unwrap();
        assert!(store.get(1).unwrap().completed);
        assert!(!store.get(2).unwrap().completed);

        store.edit(1, "Buy oat milk").unwrap();
        assert_eq!(store.get(1).unwrap().title, "Buy oat milk");
        assert!(!store.get(1).unwrap().completed);

        store.delete(2).unwrap();
        assert_eq!(store.tasks().len(), 1);

        let mut reloaded = TaskStore::load(&path).unwrap();
        assert_eq!(reloaded.tasks(), store.tasks());
        // Highest surviving id is 1, so the reloaded store hands out 2.
        assert_eq!(reloaded.add("next").unwrap(), 2);
    }
}
