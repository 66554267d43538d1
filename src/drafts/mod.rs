mod controller;
mod dom;

pub(crate) use controller::{DraftController, FormField};
pub(crate) use dom::attach_autosave_forms;

use crate::models::DraftRecord;
use crate::storage::{
    load_json_from_storage, remove_from_storage, save_json_to_storage, KeyValueStore,
};

/// Draft persistence keyed by the page-supplied draft key.
///
/// Every failure is absorbed: a read that cannot be decoded is a missing draft, and a
/// write that cannot be stored is dropped.
#[derive(Clone, Debug, Default)]
pub(crate) struct DraftStore<S> {
    backend: S,
}

impl<S: KeyValueStore> DraftStore<S> {
    pub fn new(backend: S) -> Self {
        Self { backend }
    }

    pub fn get(&self, key: &str) -> Option<DraftRecord> {
        load_json_from_storage(&self.backend, key)
    }

    pub fn put(&self, key: &str, record: &DraftRecord) {
        save_json_to_storage(&self.backend, key, record);
    }

    pub fn remove(&self, key: &str) {
        remove_from_storage(&self.backend, key);
    }
}
