use super::{DraftController, DraftStore, FormField};
use crate::storage::LocalStorage;
use crate::util::{listen, query_all, query_in, set_class};
use leptos::ev;
use leptos::logging::debug_warn;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};
use std::cell::RefCell;
use std::rc::Rc;
use web_sys::{HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

pub(crate) const AUTOSAVE_FORM_SELECTOR: &str = "form.autosave";
pub(crate) const DRAFT_CLASS: &str = "draft-exists";
const UNLOAD_MESSAGE: &str = "You have unsaved changes. Leave this page?";

#[derive(Clone)]
pub(crate) enum DomField {
    Input(HtmlInputElement),
    TextArea(HtmlTextAreaElement),
}

impl DomField {
    fn target(&self) -> &web_sys::EventTarget {
        match self {
            DomField::Input(el) => el.as_ref(),
            DomField::TextArea(el) => el.as_ref(),
        }
    }
}

impl FormField for DomField {
    fn value(&self) -> String {
        match self {
            DomField::Input(el) => el.value(),
            DomField::TextArea(el) => el.value(),
        }
    }

    fn set_value(&self, value: &str) {
        match self {
            DomField::Input(el) => el.set_value(value),
            DomField::TextArea(el) => el.set_value(value),
        }
    }
}

type PageDraft = DraftController<LocalStorage, DomField>;

/// Prompts before leaving the page while the form has unsaved changes.
fn install_unload_guard(controller: Rc<RefCell<PageDraft>>) -> WindowListenerHandle {
    window_event_listener(ev::beforeunload, move |event: web_sys::BeforeUnloadEvent| {
        let warn = controller
            .try_borrow()
            .map(|c| c.should_warn_on_unload())
            .unwrap_or(false);
        if warn {
            event.prevent_default();
            event.set_return_value(UNLOAD_MESSAGE);
        }
    })
}

/// Wires every `form.autosave` on the page. Returns how many forms were attached.
pub(crate) fn attach_autosave_forms(document: &web_sys::Document) -> usize {
    query_all::<HtmlFormElement>(document, AUTOSAVE_FORM_SELECTOR)
        .iter()
        .filter(|form| attach(form))
        .count()
}

fn attach(form: &HtmlFormElement) -> bool {
    // The key is opaque: used verbatim, only a missing or empty one skips setup.
    let key = form.get_attribute("data-key").unwrap_or_default();
    let title = query_in::<HtmlInputElement>(form, "input[name=\"title\"]").map(DomField::Input);
    let body =
        query_in::<HtmlTextAreaElement>(form, "textarea[name=\"body\"]").map(DomField::TextArea);

    let Some(mut controller) = DraftController::new(
        &key,
        DraftStore::new(LocalStorage),
        title.clone(),
        body.clone(),
    ) else {
        debug_warn!("drafts: autosave form without data-key or body field, skipping");
        return false;
    };

    controller.initialize();
    set_class(form, DRAFT_CLASS, controller.has_draft());

    let controller = Rc::new(RefCell::new(controller));
    let guard: Rc<RefCell<Option<WindowListenerHandle>>> = Rc::new(RefCell::new(None));
    if controller.borrow().guard_installed() {
        *guard.borrow_mut() = Some(install_unload_guard(controller.clone()));
    }

    for field in title.iter().chain(body.iter()) {
        let controller = controller.clone();
        let form = form.clone();
        listen(field.target(), "input", move |_| {
            let mut c = controller.borrow_mut();
            c.on_input();
            set_class(&form, DRAFT_CLASS, c.has_draft());
        });
    }

    let form_el = form.clone();
    listen(form, "submit", move |_| {
        let mut c = controller.borrow_mut();
        c.on_submit();
        if let Some(handle) = guard.borrow_mut().take() {
            handle.remove();
        }
        set_class(&form_el, DRAFT_CLASS, c.has_draft());
    });

    true
}
