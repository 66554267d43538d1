use crate::api::ApiClient;
use crate::confirm::attach_confirmations;
use crate::drafts::attach_autosave_forms;
use crate::filter::attach_list_filters;
use crate::preview::attach_preview_triggers;
use crate::shortcuts::attach_shortcuts;
use crate::suggest::attach_suggestion_inputs;
use crate::theme::{apply_stored_theme, attach_theme, Theme};
use crate::util::listen;
use leptos::logging::log;
use std::cell::Cell;
use std::rc::Rc;

/// What attached to the current page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct Enhancements {
    pub theme: Theme,
    pub autosave_forms: usize,
    pub preview_triggers: usize,
    pub suggestion_inputs: usize,
    pub list_filters: usize,
}

impl std::fmt::Display for Enhancements {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "theme={} autosave={} preview={} suggest={} filter={}",
            self.theme,
            self.autosave_forms,
            self.preview_triggers,
            self.suggestion_inputs,
            self.list_filters
        )
    }
}

/// Attaches every enhancement to the markup that is present. Missing hooks are skipped.
pub(crate) fn enhance(document: &web_sys::Document) -> Enhancements {
    let client = ApiClient::from_env();

    let theme = attach_theme(document);
    // Confirmation listeners go first so they run ahead of the draft submit handler.
    attach_confirmations(document);
    let autosave_forms = attach_autosave_forms(document);
    let preview_triggers = attach_preview_triggers(document, &client);
    let suggestion_inputs = attach_suggestion_inputs(document, &client);
    let list_filters = attach_list_filters(document);
    attach_shortcuts(document);

    Enhancements {
        theme,
        autosave_forms,
        preview_triggers,
        suggestion_inputs,
        list_filters,
    }
}

/// Applies the stored theme right away and runs [`enhance`] once the document has been parsed.
pub fn boot() {
    let Some(document) = web_sys::window().and_then(|w| w.document()) else {
        return;
    };

    // `<html>` exists before parsing finishes; only the toggle has to wait.
    apply_stored_theme(&document);

    if document.ready_state() != "loading" {
        let attached = enhance(&document);
        log!("openbbs-forms: {attached}");
        return;
    }

    let done = Rc::new(Cell::new(false));
    let doc = document.clone();
    listen(&document, "DOMContentLoaded", move |_| {
        if done.replace(true) {
            return;
        }
        let attached = enhance(&doc);
        log!("openbbs-forms: {attached}");
    });
}
