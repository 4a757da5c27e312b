// src/store.rs
use crate::error::{StoreError, StoreResult};
use crate::models::{PasswordCollection, PasswordRecord};
use log;
#[cfg(test)]
use std::cell::RefCell;
#[cfg(test)]
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufWriter, ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const DEFAULT_SLOT: &str = "passwords";

/// A place that holds named string values, one per slot.
pub trait SlotStorage {
    /// `Ok(None)` when the slot has never been written or was removed.
    fn read_slot(&self, slot: &str) -> StoreResult<Option<String>>;
    /// Replaces the slot value as a whole; readers never see a partial write.
    fn write_slot(&self, slot: &str, value: &str) -> StoreResult<()>;
    /// Removing an absent slot is not an error.
    fn remove_slot(&self, slot: &str) -> StoreResult<()>;
}

/// Slots stored as `<dir>/<slot>.json`.
#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    pub fn slot_path(&self, slot: &str) -> PathBuf {
        self.dir.join(format!("{}.json", slot))
    }
}

impl SlotStorage for FileStorage {
    fn read_slot(&self, slot: &str) -> StoreResult<Option<String>> {
        let path = self.slot_path(slot);
        match fs::read_to_string(&path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("Slot file {:?} not found", path);
                Ok(None)
            }
            Err(e) => {
                log::error!("Failed to read slot file {:?}: {:?}", path, e);
                Err(StoreError::Io(e))
            }
        }
    }

    fn write_slot(&self, slot: &str, value: &str) -> StoreResult<()> {
        let path = self.slot_path(slot);
        write_atomic(&path, value.as_bytes())
    }

    fn remove_slot(&self, slot: &str) -> StoreResult<()> {
        let path = self.slot_path(slot);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => {
                log::error!("Failed to remove slot file {:?}: {:?}", path, e);
                Err(StoreError::Io(e))
            }
        }
    }
}

/// Writes to a sibling temp file, syncs it, then renames it over `path`.
fn write_atomic(path: &Path, bytes: &[u8]) -> StoreResult<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            fs::create_dir_all(parent).map_err(|e| {
                log::error!("Failed to create storage directory {:?}: {:?}", parent, e);
                StoreError::Io(e)
            })?;
            log::info!("Created storage directory {:?}", parent);
        }
    }

    let temp_path = path.with_extension("json.tmp");
    let file = File::create(&temp_path).map_err(|e| {
        log::error!("Failed to create temp file {:?}: {:?}", temp_path, e);
        StoreError::Io(e)
    })?;

    let mut writer = BufWriter::new(file);
    writer.write_all(bytes)?;
    writer.flush()?;
    writer.get_ref().sync_all()?;

    fs::rename(&temp_path, path).map_err(|e| {
        log::error!("Failed to move {:?} into place at {:?}: {:?}", temp_path, path, e);
        let _ = fs::remove_file(&temp_path);
        StoreError::Io(e)
    })?;
    Ok(())
}

/// In-process slots. Nothing survives the value being dropped.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: RefCell<HashMap<String, String>>,
}

#[cfg(test)]
impl MemoryStorage {
    pub fn new() -> Self {
        MemoryStorage::default()
    }
}

#[cfg(test)]
impl SlotStorage for MemoryStorage {
    fn read_slot(&self, slot: &str) -> StoreResult<Option<String>> {
        Ok(self.slots.borrow().get(slot).cloned())
    }

    fn write_slot(&self, slot: &str, value: &str) -> StoreResult<()> {
        self.slots.borrow_mut().insert(slot.to_string(), value.to_string());
        Ok(())
    }

    fn remove_slot(&self, slot: &str) -> StoreResult<()> {
        self.slots.borrow_mut().remove(slot);
        Ok(())
    }
}

/// Durable owner of the password collection. Every mutation is a
/// read-modify-write of the whole collection.
#[derive(Debug)]
pub struct RecordStore<S: SlotStorage> {
    storage: S,
    slot: String,
}

impl<S: SlotStorage> RecordStore<S> {
    pub fn new(storage: S, slot: impl Into<String>) -> Self {
        RecordStore { storage, slot: slot.into() }
    }

    #[cfg(test)]
    pub fn storage(&self) -> &S {
        &self.storage
    }

    /// Strict load: reports unreadable or malformed slot content.
    pub fn try_load(&self) -> StoreResult<PasswordCollection> {
        let content = match self.storage.read_slot(&self.slot)? {
            Some(content) => content,
            None => {
                log::debug!("Slot '{}' is empty, starting with an empty collection", self.slot);
                return Ok(PasswordCollection::new());
            }
        };

        serde_json::from_str(&content).map_err(|e| {
            let msg = format!("Slot '{}' does not hold a record list: {}", self.slot, e);
            log::error!("try_load: {}", msg);
            StoreError::Deserialization(msg)
        })
    }

    /// Lenient load: any failure yields an empty collection.
    pub fn load(&self) -> PasswordCollection {
        match self.try_load() {
            Ok(collection) => collection,
            Err(e) => {
                log::warn!("Discarding unreadable password data in slot '{}': {}", self.slot, e);
                PasswordCollection::new()
            }
        }
    }

    pub fn save(&self, collection: &PasswordCollection) -> StoreResult<()> {
        let serialized = serde_json::to_string(collection).map_err(|e| {
            let msg = format!("JSON serialization failed: {}", e);
            log::error!("save: {}", msg);
            StoreError::Serialization(msg)
        })?;
        self.storage.write_slot(&self.slot, &serialized)?;
        log::info!("Saved {} record(s) to slot '{}'", collection.len(), self.slot);
        Ok(())
    }

    pub fn append(&self, record: PasswordRecord) -> StoreResult<()> {
        let mut collection = self.load();
        log::debug!("Appending record for '{}'", record.website);
        collection.push(record);
        self.save(&collection)
    }

    /// Removes the record at `index`. Out of range is a no-op returning `Ok(None)`.
    pub fn delete_at(&self, index: usize) -> StoreResult<Option<PasswordRecord>> {
        let mut collection = self.load();
        match collection.remove(index) {
            Some(removed) => {
                self.save(&collection)?;
                log::info!("Deleted record {} ('{}')", index, removed.website);
                Ok(Some(removed))
            }
            None => {
                log::warn!("delete_at: index {} out of range (len {})", index, collection.len());
                Ok(None)
            }
        }
    }

    pub fn clear(&self) -> StoreResult<()> {
        self.storage.remove_slot(&self.slot)?;
        log::info!("Cleared slot '{}'", self.slot);
        Ok(())
    }
}
