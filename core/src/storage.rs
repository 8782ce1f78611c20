//! Persistence adapter: the whole [`CalorieAppData`] document round-trips
//! through one string-valued key. Every save is a full-document rewrite;
//! loading never fails — corrupted payloads are wiped and replaced with
//! an empty document.

use std::cell::RefCell;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{debug, warn};

use crate::models::CalorieAppData;

/// The fixed application-wide key the document lives under. The file
/// backend stores it as `<key>.json` in the data directory.
pub const STORAGE_KEY: &str = "spring-fest-calorie-data";

/// A single-key string store. Implementations only need to hold one
/// value; the adapter owns serialization and recovery.
pub trait Storage {
    fn read(&self) -> Result<Option<String>>;
    fn write(&self, raw: &str) -> Result<()>;
    fn remove(&self) -> Result<()>;
}

pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// The conventional document path inside a data directory.
    #[must_use]
    pub fn in_dir(dir: &Path) -> Self {
        Self::new(dir.join(format!("{STORAGE_KEY}.json")))
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Storage for FileStorage {
    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).with_context(|| format!("Failed to read {}", self.path.display())),
        }
    }

    fn write(&self, raw: &str) -> Result<()> {
        fs::write(&self.path, raw)
            .with_context(|| format!("Failed to write {}", self.path.display()))
    }

    fn remove(&self) -> Result<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e).with_context(|| format!("Failed to remove {}", self.path.display())),
        }
    }
}

/// In-memory store for tests. Single-threaded by design, like the rest
/// of the store.
#[derive(Default)]
pub struct MemoryStorage {
    cell: RefCell<Option<String>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_raw(raw: &str) -> Self {
        Self {
            cell: RefCell::new(Some(raw.to_string())),
        }
    }

    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.cell.borrow().clone()
    }
}

impl Storage for MemoryStorage {
    fn read(&self) -> Result<Option<String>> {
        Ok(self.cell.borrow().clone())
    }

    fn write(&self, raw: &str) -> Result<()> {
        *self.cell.borrow_mut() = Some(raw.to_string());
        Ok(())
    }

    fn remove(&self) -> Result<()> {
        *self.cell.borrow_mut() = None;
        Ok(())
    }
}

/// Load the document, recovering locally from every failure mode:
/// absent, blank, the literal strings `undefined`/`null` (a historical
/// artifact of the original frontend writing a stringified void value),
/// and malformed JSON. A corrupt stored value is wiped so the next load
/// starts clean. Missing top-level fields are backfilled by the serde
/// defaults on [`CalorieAppData`].
#[must_use]
pub fn load_app_data(storage: &dyn Storage) -> CalorieAppData {
    let raw = match storage.read() {
        Ok(Some(raw)) => raw,
        Ok(None) => return CalorieAppData::default(),
        Err(e) => {
            warn!("failed to read stored document, starting empty: {e:#}");
            return CalorieAppData::default();
        }
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "undefined" || trimmed == "null" {
        return CalorieAppData::default();
    }

    match serde_json::from_str(trimmed) {
        Ok(data) => data,
        Err(e) => {
            warn!("discarding corrupted document ({} bytes): {e}", raw.len());
            if let Err(e) = storage.remove() {
                warn!("failed to wipe corrupted document: {e:#}");
            }
            CalorieAppData::default()
        }
    }
}

/// Serialize and overwrite the single stored key with the whole document.
pub fn save_app_data(storage: &dyn Storage, data: &CalorieAppData) -> Result<()> {
    let raw = serde_json::to_string(data).context("Failed to serialize document")?;
    storage.write(&raw)?;
    debug!("saved document ({} bytes)", raw.len());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DailyData, SelectedDish};

    #[test]
    fn test_load_absent_yields_default() {
        let storage = MemoryStorage::new();
        assert_eq!(load_app_data(&storage), CalorieAppData::default());
    }

    #[test]
    fn test_load_recovers_from_garbage_payloads() {
        for raw in ["", "   ", "undefined", "null", "not json", "{broken", "123"] {
            let storage = MemoryStorage::with_raw(raw);
            let data = load_app_data(&storage);
            assert_eq!(data, CalorieAppData::default(), "payload: {raw:?}");
        }
    }

    #[test]
    fn test_load_default_document_shape() {
        // The recovered document is schema-complete, not merely empty.
        let storage = MemoryStorage::with_raw("undefined");
        let data = load_app_data(&storage);
        assert!(data.daily_records.is_empty());
        assert!(data.custom_dishes.is_empty());
        assert_eq!(data.preferences.default_cuisine, "全部");
        assert_eq!(data.preferences.default_type, "全部");
        assert!(!data.preferences.enable_notifications);
    }

    #[test]
    fn test_load_wipes_corrupted_value() {
        let storage = MemoryStorage::with_raw("not json");
        let _ = load_app_data(&storage);
        assert!(storage.raw().is_none());
    }

    #[test]
    fn test_load_keeps_blank_value_untouched() {
        // Blank and undefined/null payloads are not corruption; nothing
        // is wiped, the default document is simply returned.
        let storage = MemoryStorage::with_raw("undefined");
        let _ = load_app_data(&storage);
        assert_eq!(storage.raw().as_deref(), Some("undefined"));
    }

    #[test]
    fn test_round_trip() {
        let mut data = CalorieAppData::default();
        let mut daily = DailyData::empty("2026-02-17");
        daily.selected_dishes.push(SelectedDish { id: 1, quantity: 150 });
        daily.total_calories = 480.0;
        daily.saved_to_history = true;
        data.daily_records.insert("2026-02-17".to_string(), daily);
        data.preferences.default_cuisine = "川菜".to_string();

        let storage = MemoryStorage::new();
        save_app_data(&storage, &data).unwrap();
        assert_eq!(load_app_data(&storage), data);
    }

    #[test]
    fn test_partial_document_is_repaired() {
        // Older documents may miss top-level fields; they backfill with
        // defaults instead of failing to parse.
        let storage = MemoryStorage::with_raw(r#"{"dailyRecords":{}}"#);
        let data = load_app_data(&storage);
        assert!(data.custom_dishes.is_empty());
        assert_eq!(data.preferences.default_type, "全部");

        let storage = MemoryStorage::with_raw(r#"{"customDishes":[]}"#);
        let data = load_app_data(&storage);
        assert!(data.daily_records.is_empty());
    }

    #[test]
    fn test_partial_daily_record_is_repaired() {
        let raw = r#"{"dailyRecords":{"2026-02-17":{
            "date":"2026-02-17",
            "selectedDishes":[{"id":1,"quantity":150}],
            "totalCalories":480,"totalProtein":27,"totalFat":36,"totalCarbs":5
        }}}"#;
        let storage = MemoryStorage::with_raw(raw);
        let data = load_app_data(&storage);
        let daily = &data.daily_records["2026-02-17"];
        assert_eq!(daily.selected_dishes.len(), 1);
        assert!(daily.custom_dishes.is_empty());
        assert!(!daily.saved_to_history);
        assert!(daily.last_modified.is_empty());
    }

    #[test]
    fn test_file_storage_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::in_dir(dir.path());

        assert!(storage.read().unwrap().is_none());
        storage.write("{}").unwrap();
        assert_eq!(storage.read().unwrap().as_deref(), Some("{}"));
        storage.remove().unwrap();
        assert!(storage.read().unwrap().is_none());
        // Removing an absent key is fine.
        storage.remove().unwrap();
    }
}
