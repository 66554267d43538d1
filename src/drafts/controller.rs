use super::DraftStore;
use crate::models::DraftRecord;
use crate::storage::KeyValueStore;

/// A text field whose value the controller reads and, at load time, fills.
pub(crate) trait FormField {
    fn value(&self) -> String;
    fn set_value(&self, value: &str);
}

/// Owns one form's draft lifecycle: restore on load, save on every input, clear on submit.
///
/// Two flags are tracked separately and set together:
/// - `has_draft` drives the `draft-exists` styling hook.
/// - `dirty` means there are unsaved changes; only it arms the unload guard.
pub(crate) struct DraftController<S, F> {
    key: String,
    store: DraftStore<S>,
    title: Option<F>,
    body: F,

    has_draft: bool,
    dirty: bool,
    guard_installed: bool,
}

impl<S: KeyValueStore, F: FormField> DraftController<S, F> {
    /// Returns `None` (skip setup) when the form has no key or no body field.
    pub fn new(key: &str, store: DraftStore<S>, title: Option<F>, body: Option<F>) -> Option<Self> {
        if key.is_empty() {
            return None;
        }
        let body = body?;

        Some(Self {
            key: key.to_string(),
            store,
            title,
            body,
            has_draft: false,
            dirty: false,
            guard_installed: false,
        })
    }

    /// Restores a stored draft into empty fields and installs the unload guard.
    ///
    /// A field that already holds a value (e.g. an edit form prefilled by the server) is
    /// never overwritten. Returns whether any field was filled.
    pub fn initialize(&mut self) -> bool {
        self.guard_installed = true;

        let Some(record) = self.store.get(&self.key) else {
            return false;
        };

        let mut restored = false;
        if let Some(title) = &self.title {
            restored |= fill_if_empty(title, &record.title);
        }
        restored |= fill_if_empty(&self.body, &record.body);

        if restored {
            self.has_draft = true;
            self.dirty = true;
        }
        restored
    }

    /// Input on the title or body: persist the current values unconditionally.
    pub fn on_input(&mut self) {
        let record = self.current_record();
        self.store.put(&self.key, &record);
        self.has_draft = true;
        self.dirty = true;
    }

    /// The owning form is being submitted. Clears the stored draft, then disarms and
    /// uninstalls the guard. The submit itself is left alone.
    pub fn on_submit(&mut self) {
        self.store.remove(&self.key);
        self.dirty = false;
        self.has_draft = false;
        self.guard_installed = false;
    }

    pub fn current_record(&self) -> DraftRecord {
        DraftRecord {
            title: self.title.as_ref().map(|t| t.value()).unwrap_or_default(),
            body: self.body.value(),
        }
    }

    pub fn has_draft(&self) -> bool {
        self.has_draft
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn guard_installed(&self) -> bool {
        self.guard_installed
    }

    /// Whether navigating away right now should prompt.
    pub fn should_warn_on_unload(&self) -> bool {
        self.guard_installed && self.dirty
    }
}

fn fill_if_empty<F: FormField>(field: &F, saved: &str) -> bool {
    if saved.is_empty() || !field.value().is_empty() {
        return false;
    }
    field.set_value(saved);
    true
}
