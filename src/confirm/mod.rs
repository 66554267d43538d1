use crate::util::{event_element, listen_with_capture};

pub(crate) const CONFIRM_ATTR: &str = "data-confirm";
pub(crate) const DEFAULT_PROMPT: &str = "Are you sure?";

/// Prompt text for an element's `data-confirm` attribute; `None` means no gate.
pub(crate) fn confirm_prompt(attr: Option<&str>) -> Option<String> {
    let attr = attr?;
    let msg = attr.trim();
    if msg.is_empty() {
        Some(DEFAULT_PROMPT.to_string())
    } else {
        Some(msg.to_string())
    }
}

fn gate(ev: &web_sys::Event, el: &web_sys::Element) {
    let Some(msg) = confirm_prompt(el.get_attribute(CONFIRM_ATTR).as_deref()) else {
        return;
    };

    let accepted = web_sys::window()
        .map(|w| w.confirm_with_message(&msg).unwrap_or(false))
        .unwrap_or(false);
    if !accepted {
        ev.prevent_default();
        ev.stop_immediate_propagation();
    }
}

/// Gates clicks and submits on `[data-confirm]` behind a native confirm dialog.
///
/// Listeners run in the capture phase on the document, ahead of any listener on the form
/// itself, so a declined submit never reaches the draft controller.
pub(crate) fn attach_confirmations(document: &web_sys::Document) {
    let selector = format!("[{CONFIRM_ATTR}]");

    listen_with_capture(document, "click", true, move |ev| {
        let Some(el) = event_element(&ev).and_then(|t| t.closest(&selector).ok().flatten()) else {
            return;
        };
        // Forms are gated on submit, not on clicks inside them.
        if el.tag_name().eq_ignore_ascii_case("form") {
            return;
        }
        gate(&ev, &el);
    });

    listen_with_capture(document, "submit", true, move |ev| {
        let Some(form) = event_element(&ev) else {
            return;
        };
        if form.has_attribute(CONFIRM_ATTR) {
            gate(&ev, &form);
        }
    });
}
