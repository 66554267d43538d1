use crate::preview::PREVIEW_TRIGGER_SELECTOR;
use crate::suggest::SUGGEST_INPUT_SELECTOR;
use crate::util::query_one;
use leptos::ev;
use leptos_dom::helpers::window_event_listener;
use wasm_bindgen::JsCast;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub(crate) struct KeyPress {
    pub key: String,
    /// Ctrl on Linux/Windows, Cmd on macOS.
    pub command: bool,
    pub shift: bool,
    /// Focus is in an input or textarea.
    pub typing: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum ShortcutAction {
    FocusSearch,
    Blur,
    SubmitForm,
    TogglePreview,
}

pub(crate) fn resolve_shortcut(press: &KeyPress) -> Option<ShortcutAction> {
    let key = press.key.to_lowercase();

    if key == "escape" {
        return Some(ShortcutAction::Blur);
    }

    if press.command {
        return match key.as_str() {
            "k" => Some(ShortcutAction::FocusSearch),
            "enter" if press.typing => Some(ShortcutAction::SubmitForm),
            "p" if press.shift => Some(ShortcutAction::TogglePreview),
            _ => None,
        };
    }

    // Avoid hijacking plain keys while typing in inputs.
    if press.typing {
        return None;
    }

    match key.as_str() {
        "/" => Some(ShortcutAction::FocusSearch),
        _ => None,
    }
}

fn is_text_entry(el: &web_sys::Element) -> bool {
    let tag = el.tag_name().to_lowercase();
    tag == "input" || tag == "textarea"
}

/// Installs the page-wide keydown handler.
pub(crate) fn attach_shortcuts(document: &web_sys::Document) {
    let document = document.clone();
    // Lives for the page; dropping the handle does not detach the listener.
    let _key_handle = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
        let target = ev
            .target()
            .and_then(|t| t.dyn_into::<web_sys::Element>().ok());

        let press = KeyPress {
            key: ev.key(),
            command: ev.meta_key() || ev.ctrl_key(),
            shift: ev.shift_key(),
            typing: target.as_ref().map(is_text_entry).unwrap_or(false),
        };
        let Some(action) = resolve_shortcut(&press) else {
            return;
        };

        match action {
            ShortcutAction::FocusSearch => {
                let search = query_one::<web_sys::HtmlElement>(&document, SUGGEST_INPUT_SELECTOR)
                    .or_else(|| query_one(&document, "input[type=\"search\"]"));
                if let Some(input) = search {
                    ev.prevent_default();
                    let _ = input.focus();
                }
            }
            ShortcutAction::Blur => {
                if let Some(el) = document
                    .active_element()
                    .and_then(|el| el.dyn_into::<web_sys::HtmlElement>().ok())
                {
                    let _ = el.blur();
                }
            }
            ShortcutAction::SubmitForm => {
                // requestSubmit fires the submit event, so draft clearing and
                // confirmation prompts still run.
                if let Some(form) = target
                    .and_then(|el| el.closest("form").ok().flatten())
                    .and_then(|el| el.dyn_into::<web_sys::HtmlFormElement>().ok())
                {
                    ev.prevent_default();
                    let _ = form.request_submit();
                }
            }
            ShortcutAction::TogglePreview => {
                if let Some(trigger) =
                    query_one::<web_sys::HtmlElement>(&document, PREVIEW_TRIGGER_SELECTOR)
                {
                    ev.prevent_default();
                    trigger.click();
                }
            }
        }
    });
}
