//! Experiment Store - ordered in-memory session list
//!
//! Records are appended in load order and discarded on [`ExperimentStore::clear`].
//! One record may be marked current; loading makes the newest record current.

use tracing::debug;

use super::ExperimentRecord;
use crate::{Error, Result};

/// In-memory list of loaded experiments plus the current selection.
///
/// ## Design
///
/// Records are never mutated after insertion. Every failing operation leaves
/// the list and the selection unchanged.
#[derive(Debug, Default)]
pub struct ExperimentStore {
    experiments: Vec<ExperimentRecord>,
    current: Option<usize>,
}

impl ExperimentStore {
    /// Create a new empty experiment store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if the store is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.experiments.is_empty()
    }

    /// Get the number of experiments in the store.
    #[must_use]
    pub fn len(&self) -> usize {
        self.experiments.len()
    }

    /// All loaded experiments in load order.
    #[must_use]
    pub fn experiments(&self) -> &[ExperimentRecord] {
        &self.experiments
    }

    /// Get an experiment by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&ExperimentRecord> {
        self.experiments.get(index)
    }

    /// Append an experiment and make it current.
    pub fn add(&mut self, experiment: ExperimentRecord) {
        debug!(name = experiment.name(), "adding experiment");
        self.experiments.push(experiment);
        self.current = Some(self.experiments.len() - 1);
    }

    /// Append several experiments in order; the last one becomes current.
    pub fn extend(&mut self, experiments: impl IntoIterator<Item = ExperimentRecord>) {
        for experiment in experiments {
            self.add(experiment);
        }
    }

    /// Make the experiment at `index` current.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidSelection`] if `index` is out of range.
    pub fn select(&mut self, index: usize) -> Result<&ExperimentRecord> {
        let len = self.experiments.len();
        let experiment = self
            .experiments
            .get(index)
            .ok_or(Error::InvalidSelection { index, len })?;
        self.current = Some(index);
        Ok(experiment)
    }

    /// Index of the current experiment.
    #[must_use]
    pub const fn current_index(&self) -> Option<usize> {
        self.current
    }

    /// The current experiment, if any.
    #[must_use]
    pub fn current(&self) -> Option<&ExperimentRecord> {
        self.current.and_then(|i| self.experiments.get(i))
    }

    /// List labels (`name (backend)`) in load order.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.experiments
            .iter()
            .map(ExperimentRecord::display_label)
            .collect()
    }

    /// Drop every experiment and the selection.
    pub fn clear(&mut self) {
        debug!(count = self.experiments.len(), "clearing experiments");
        self.experiments.clear();
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str) -> ExperimentRecord {
        ExperimentRecord::builder(name, format!("{name}.json")).build()
    }

    #[test]
    fn test_store_default() {
        let store = ExperimentStore::new();
        assert!(store.is_empty());
        assert_eq!(store.len(), 0);
        assert!(store.current().is_none());
    }

    #[test]
    fn test_add_makes_newest_current() {
        let mut store = ExperimentStore::new();
        store.add(record("a"));
        store.add(record("b"));
        assert_eq!(store.current().unwrap().name(), "b");
        assert_eq!(store.current_index(), Some(1));
    }

    #[test]
    fn test_select_out_of_range_keeps_selection() {
        let mut store = ExperimentStore::new();
        store.extend([record("a"), record("b")]);
        store.select(0).unwrap();

        let err = store.select(5).unwrap_err();
        assert!(matches!(err, Error::InvalidSelection { index: 5, len: 2 }));
        assert_eq!(store.current().unwrap().name(), "a");
    }

    #[test]
    fn test_clear() {
        let mut store = ExperimentStore::new();
        store.extend([record("a"), record("b")]);
        store.clear();
        assert!(store.is_empty());
        assert!(store.current().is_none());
    }
}
