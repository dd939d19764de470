//! Best survival time record
//!
//! A single scalar (seconds, one decimal) kept in storage next to settings.

use crate::persistence::Storage;
use crate::round_tenths;

/// Longest survival seen on this device
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct BestTime {
    secs: f64,
}

impl BestTime {
    /// Storage key
    const STORAGE_KEY: &'static str = "bestTime";

    pub fn new(secs: f64) -> Self {
        Self {
            secs: Self::sanitize(secs),
        }
    }

    fn sanitize(secs: f64) -> f64 {
        if secs.is_finite() && secs > 0.0 {
            round_tenths(secs)
        } else {
            0.0
        }
    }

    pub fn secs(&self) -> f64 {
        self.secs
    }

    /// Check if a survival time beats the record
    pub fn qualifies(&self, survived_secs: f64) -> bool {
        round_tenths(survived_secs) > self.secs
    }

    /// Record a survival time. Returns true if it set a new record.
    pub fn submit(&mut self, survived_secs: f64) -> bool {
        if !self.qualifies(survived_secs) {
            return false;
        }
        self.secs = Self::sanitize(survived_secs);
        true
    }

    /// Load the record; missing or unparsable values read as zero
    pub fn load(storage: &dyn Storage) -> Self {
        let secs = storage
            .get_item(Self::STORAGE_KEY)
            .and_then(|raw| raw.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        let best = Self::new(secs);
        log::info!("Best time: {:.1}s", best.secs);
        best
    }

    pub fn save(&self, storage: &mut dyn Storage) {
        if storage.set_item(Self::STORAGE_KEY, &format!("{:.1}", self.secs)) {
            log::info!("Best time saved ({:.1}s)", self.secs);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStorage;

    #[test]
    fn test_submit_strictly_greater() {
        let mut best = BestTime::new(12.3);
        assert!(!best.submit(12.3));
        assert!(!best.submit(12.29)); // rounds to 12.3
        assert!(best.submit(12.4));
        assert_eq!(best.secs(), 12.4);
    }

    #[test]
    fn test_first_run_sets_record() {
        let mut best = BestTime::default();
        assert!(best.submit(0.4));
        assert!(!best.submit(0.0));
    }

    #[test]
    fn test_load_garbage() {
        let mut storage = MemoryStorage::new();
        assert_eq!(BestTime::load(&storage).secs(), 0.0);

        storage.set_item(BestTime::STORAGE_KEY, "banana");
        assert_eq!(BestTime::load(&storage).secs(), 0.0);

        storage.set_item(BestTime::STORAGE_KEY, "-3");
        assert_eq!(BestTime::load(&storage).secs(), 0.0);
    }

    #[test]
    fn test_reads_browser_saved_record() {
        let mut storage = MemoryStorage::new();
        storage.set_item("bestTime", "17.4");
        assert_eq!(BestTime::load(&storage).secs(), 17.4);
    }

    #[test]
    fn test_save_load() {
        let mut storage = MemoryStorage::new();
        BestTime::new(42.5).save(&mut storage);
        assert_eq!(storage.get_item(BestTime::STORAGE_KEY).as_deref(), Some("42.5"));
        assert_eq!(BestTime::load(&storage).secs(), 42.5);
    }
}
