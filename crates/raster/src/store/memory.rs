//! In-memory store used by tests and dry runs

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use crate::grid::PixelGrid;

use super::{GridStore, StoreError};

/// Thread-safe map of id -> grid with save failure injection
#[derive(Debug, Default)]
pub struct MemoryStore {
    images: RwLock<HashMap<String, PixelGrid>>,
    fail_saves: AtomicBool,
    save_count: AtomicUsize,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: impl Into<String>, grid: PixelGrid) {
        let mut images = self.images.write().expect("MemoryStore lock poisoned");
        images.insert(id.into(), grid);
    }

    /// Current contents stored under `id`
    pub fn get(&self, id: &str) -> Option<PixelGrid> {
        let images = self.images.read().expect("MemoryStore lock poisoned");
        images.get(id).cloned()
    }

    /// Make every subsequent save fail (or succeed again)
    pub fn fail_saves(&self, fail: bool) {
        self.fail_saves.store(fail, Ordering::SeqCst);
    }

    /// Number of save calls, successful or not
    pub fn save_count(&self) -> usize {
        self.save_count.load(Ordering::SeqCst)
    }
}

impl GridStore for MemoryStore {
    fn load(&self, id: &str) -> Result<PixelGrid, StoreError> {
        self.get(id).ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    fn save(&self, id: &str, grid: &PixelGrid) -> Result<(), StoreError> {
        self.save_count.fetch_add(1, Ordering::SeqCst);
        if self.fail_saves.load(Ordering::SeqCst) {
            return Err(StoreError::Rejected(format!("save of {id} refused")));
        }
        self.insert(id, grid.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CellCoord, Pixel, Rgb};

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        let mut grid = PixelGrid::new(2, 2);
        grid.set(CellCoord::new(1, 0), Pixel::Opaque(Rgb::WHITE));

        store.save("sprite", &grid).unwrap();
        assert_eq!(store.load("sprite").unwrap(), grid);
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_memory_store_missing() {
        let store = MemoryStore::new();
        assert!(matches!(store.load("nope"), Err(StoreError::NotFound(id)) if id == "nope"));
    }

    #[test]
    fn test_memory_store_failure_injection() {
        let store = MemoryStore::new();
        store.fail_saves(true);
        assert!(store.save("sprite", &PixelGrid::new(1, 1)).is_err());
        assert!(store.get("sprite").is_none());
        assert_eq!(store.save_count(), 1);
    }
}
