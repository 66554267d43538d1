use super::{PreviewController, PreviewView};
use crate::api::ApiClient;
use crate::util::{listen, non_empty_attr, query_all, query_in, query_one};
use leptos::logging::debug_warn;
use leptos::task::spawn_local;
use web_sys::{HtmlElement, HtmlTextAreaElement};

pub(crate) const PREVIEW_TRIGGER_SELECTOR: &str = "[data-preview-target]";
const DEFAULT_SHOW_LABEL: &str = "Preview";
const HIDE_LABEL: &str = "Hide preview";

struct DomPreviewView {
    container: HtmlElement,
    trigger: HtmlElement,
    show_label: String,
}

impl PreviewView for DomPreviewView {
    fn reveal(&self, html: &str) {
        self.container.set_inner_html(html);
        self.container.set_hidden(false);
        self.trigger.set_text_content(Some(HIDE_LABEL));
    }

    fn conceal(&self) {
        self.container.set_hidden(true);
        self.trigger.set_text_content(Some(&self.show_label));
    }
}

/// Wires every preview trigger on the page. Returns how many were attached.
pub(crate) fn attach_preview_triggers(document: &web_sys::Document, client: &ApiClient) -> usize {
    query_all::<HtmlElement>(document, PREVIEW_TRIGGER_SELECTOR)
        .into_iter()
        .filter(|trigger| attach(document, trigger.clone(), client))
        .count()
}

fn attach(document: &web_sys::Document, trigger: HtmlElement, client: &ApiClient) -> bool {
    let Some(container) = non_empty_attr(&trigger, "data-preview-target")
        .and_then(|sel| query_one::<HtmlElement>(document, &sel))
    else {
        debug_warn!("preview: trigger without a matching container, skipping");
        return false;
    };

    let Some(body) = trigger
        .closest("form")
        .ok()
        .flatten()
        .and_then(|form| query_in::<HtmlTextAreaElement>(&form, "textarea[name=\"body\"]"))
    else {
        debug_warn!("preview: trigger outside a form with a body field, skipping");
        return false;
    };

    let show_label = trigger
        .text_content()
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_SHOW_LABEL.to_string());

    container.set_hidden(true);
    let controller = PreviewController::new(
        client.clone(),
        DomPreviewView {
            container,
            trigger: trigger.clone(),
            show_label,
        },
    );

    listen(&trigger, "click", move |ev| {
        ev.prevent_default();
        spawn_local(controller.toggle(body.value()));
    });

    true
}
