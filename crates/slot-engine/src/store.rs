//! Persistence collaborator: the sole writer of durable schedule state.
//!
//! The scheduling core never touches a store directly. [`crate::scheduler::Scheduler`]
//! lists existing items, runs the pure core, then hands the result to `create`.

use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use chrono::NaiveDate;
use fs4::fs_std::FileExt;
use tempfile::NamedTempFile;
use tracing::debug;
use uuid::Uuid;

use crate::error::{StoreError, StoreResult};
use crate::item::{DraftItem, ScheduleItem};

pub trait ScheduleStore {
    /// All items, or only those on `date`.
    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<ScheduleItem>>;

    /// Persist a new item, assigning its id and `completed = false`.
    fn create(&mut self, draft: DraftItem) -> StoreResult<ScheduleItem>;

    /// Replace the item with the same id.
    fn update(&mut self, item: ScheduleItem) -> StoreResult<()>;

    fn remove(&mut self, id: &str) -> StoreResult<()>;

    /// Exclusive access for a whole read-modify-write sequence, released when the
    /// guard drops. Stores that other processes can reach must override this.
    fn lock_exclusive(&self) -> StoreResult<StoreGuard> {
        Ok(StoreGuard::default())
    }
}

/// Held while a read-modify-write sequence runs against a store.
#[derive(Debug, Default)]
pub struct StoreGuard {
    // Closing the handle releases the advisory lock.
    _lock_file: Option<File>,
}

fn new_id() -> String {
    Uuid::new_v4().to_string()
}

fn filter_date(items: &[ScheduleItem], date: Option<NaiveDate>) -> Vec<ScheduleItem> {
    match date {
        Some(date) => items.iter().filter(|i| i.date == date).cloned().collect(),
        None => items.to_vec(),
    }
}

fn replace(items: &mut [ScheduleItem], item: ScheduleItem) -> StoreResult<()> {
    let slot = items
        .iter_mut()
        .find(|existing| existing.id == item.id)
        .ok_or_else(|| StoreError::NotFound(item.id.clone()))?;
    *slot = item;
    Ok(())
}

fn delete(items: &mut Vec<ScheduleItem>, id: &str) -> StoreResult<()> {
    let before = items.len();
    items.retain(|item| item.id != id);
    if items.len() == before {
        return Err(StoreError::NotFound(id.to_string()));
    }
    Ok(())
}

/// In-process store backed by a `Vec`.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    items: Vec<ScheduleItem>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-persisted items.
    pub fn with_items(items: Vec<ScheduleItem>) -> Self {
        MemoryStore { items }
    }
}

impl ScheduleStore for MemoryStore {
    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<ScheduleItem>> {
        Ok(filter_date(&self.items, date))
    }

    fn create(&mut self, draft: DraftItem) -> StoreResult<ScheduleItem> {
        let item = draft.into_item(new_id());
        self.items.push(item.clone());
        Ok(item)
    }

    fn update(&mut self, item: ScheduleItem) -> StoreResult<()> {
        replace(&mut self.items, item)
    }

    fn remove(&mut self, id: &str) -> StoreResult<()> {
        delete(&mut self.items, id)
    }
}

/// Store that keeps a JSON array of items in a single file.
///
/// A missing file reads as an empty schedule. Every write replaces the file
/// atomically, and [`ScheduleStore::lock_exclusive`] takes an advisory lock on a
/// sidecar `<file>.lock` so separate processes serialize their updates.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        JsonFileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.file_name().unwrap_or_default().to_os_string();
        name.push(".lock");
        self.path.with_file_name(name)
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }

    fn load(&self) -> StoreResult<Vec<ScheduleItem>> {
        let items: Vec<ScheduleItem> = match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Vec::new(),
            Ok(raw) => serde_json::from_str(&raw)?,
            Err(err) if err.kind() == ErrorKind::NotFound => Vec::new(),
            Err(err) => return Err(err.into()),
        };

        for item in &items {
            item.validate().map_err(|err| StoreError::InvalidRecord {
                id: item.id.clone(),
                reason: err.to_string(),
            })?;
        }
        Ok(items)
    }

    fn save(&self, items: &[ScheduleItem]) -> StoreResult<()> {
        let json = serde_json::to_string_pretty(items)?;
        let mut tmp = NamedTempFile::new_in(self.dir())?;
        tmp.write_all(json.as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|err| err.error)?;
        debug!(path = %self.path.display(), count = items.len(), "schedule saved");
        Ok(())
    }
}

impl ScheduleStore for JsonFileStore {
    fn list(&self, date: Option<NaiveDate>) -> StoreResult<Vec<ScheduleItem>> {
        Ok(filter_date(&self.load()?, date))
    }

    fn create(&mut self, draft: DraftItem) -> StoreResult<ScheduleItem> {
        let mut items = self.load()?;
        let item = draft.into_item(new_id());
        items.push(item.clone());
        self.save(&items)?;
        Ok(item)
    }

    fn update(&mut self, item: ScheduleItem) -> StoreResult<()> {
        let mut items = self.load()?;
        replace(&mut items, item)?;
        self.save(&items)
    }

    fn remove(&mut self, id: &str) -> StoreResult<()> {
        let mut items = self.load()?;
        delete(&mut items, id)?;
        self.save(&items)
    }

    fn lock_exclusive(&self) -> StoreResult<StoreGuard> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(self.lock_path())?;
        file.lock_exclusive()?;
        debug!(path = %self.path.display(), "store locked");
        Ok(StoreGuard {
            _lock_file: Some(file),
        })
    }
}
