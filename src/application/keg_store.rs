// Keg state store - owns the latest accepted snapshot
use crate::domain::telemetry::{AcceptedSnapshot, KegRecord};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("keg index {index} out of range, {len} kegs tapped")]
    IndexOutOfRange { index: usize, len: usize },
}

/// Owner of the displayed state. Mutated only by accepted snapshots or
/// explicit navigation; every renderer reads through `current()`.
#[derive(Debug, Default)]
pub struct KegStateStore {
    update_id: i64,
    temperature: Option<f64>,
    kegs: Vec<KegRecord>,
    render_index: usize,
}

impl KegStateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole collection and temperature with the accepted
    /// snapshot. There is no per-keg merging, so no reader can observe a
    /// half-applied update. The render index is clamped when the
    /// collection shrinks.
    pub fn apply(&mut self, snapshot: AcceptedSnapshot) {
        self.update_id = snapshot.update_id;
        self.temperature = snapshot.temperature;
        self.kegs = snapshot.kegs;

        if self.render_index >= self.kegs.len() {
            self.render_index = self.kegs.len().saturating_sub(1);
        }
    }

    /// Navigate to a keg by index. Out of range is a no-op error.
    pub fn select(&mut self, index: usize) -> Result<(), StoreError> {
        if index >= self.kegs.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.kegs.len(),
            });
        }
        self.render_index = index;
        Ok(())
    }

    /// The keg currently selected for display, or None before the first
    /// snapshot lands or when the server reports no kegs.
    pub fn current(&self) -> Option<&KegRecord> {
        self.kegs.get(self.render_index)
    }

    pub fn kegs(&self) -> &[KegRecord] {
        &self.kegs
    }

    pub fn temperature(&self) -> Option<f64> {
        self.temperature
    }

    pub fn update_id(&self) -> i64 {
        self.update_id
    }

    pub fn render_index(&self) -> usize {
        self.render_index
    }

    pub fn is_empty(&self) -> bool {
        self.kegs.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::{Beer, Remaining, SeriesSpec};
    use std::collections::BTreeMap;

    fn keg(id: i64, name: &str) -> KegRecord {
        KegRecord {
            id,
            beer: Beer {
                id,
                name: name.to_string(),
                brand: None,
                abv: None,
                ibu: None,
                rating: None,
                attributes: BTreeMap::new(),
            },
            consumption: SeriesSpec::default(),
            remaining: Remaining { value: 0.5 },
            volume: None,
        }
    }

    fn snapshot(update_id: i64, kegs: Vec<KegRecord>) -> AcceptedSnapshot {
        AcceptedSnapshot {
            update_id,
            temperature: Some(68.0),
            kegs,
        }
    }

    #[test]
    fn test_apply_replaces_wholesale() {
        let mut store = KegStateStore::new();
        store.apply(snapshot(1, vec![keg(1, "Helles"), keg(2, "Stout")]));
        store.apply(snapshot(2, vec![keg(3, "Pils")]));

        // No residue of the first snapshot survives.
        assert_eq!(store.kegs().len(), 1);
        assert_eq!(store.kegs()[0].beer.name, "Pils");
        assert_eq!(store.update_id(), 2);
    }

    #[test]
    fn test_apply_b_equals_direct_b() {
        let mut store_ab = KegStateStore::new();
        store_ab.apply(snapshot(1, vec![keg(1, "Helles")]));
        store_ab.apply(snapshot(2, vec![keg(2, "Stout")]));

        let mut store_b = KegStateStore::new();
        store_b.apply(snapshot(2, vec![keg(2, "Stout")]));

        assert_eq!(store_ab.kegs().len(), store_b.kegs().len());
        assert_eq!(store_ab.kegs()[0].id, store_b.kegs()[0].id);
        assert_eq!(store_ab.update_id(), store_b.update_id());
    }

    #[test]
    fn test_render_index_clamped_on_shrink() {
        let mut store = KegStateStore::new();
        store.apply(snapshot(1, vec![keg(1, "a"), keg(2, "b"), keg(3, "c")]));
        store.select(2).unwrap();

        store.apply(snapshot(2, vec![keg(4, "d")]));
        assert_eq!(store.render_index(), 0);
        assert_eq!(store.current().unwrap().beer.name, "d");
    }

    #[test]
    fn test_select_out_of_range_is_noop_error() {
        let mut store = KegStateStore::new();
        store.apply(snapshot(1, vec![keg(1, "a")]));

        let err = store.select(1).unwrap_err();
        assert_eq!(err, StoreError::IndexOutOfRange { index: 1, len: 1 });
        assert_eq!(store.render_index(), 0);
    }

    #[test]
    fn test_current_is_none_when_empty() {
        let store = KegStateStore::new();
        assert!(store.current().is_none());

        let mut store = KegStateStore::new();
        store.apply(snapshot(1, vec![]));
        assert!(store.current().is_none());
        assert!(store.is_empty());
    }
}
