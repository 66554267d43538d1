use super::{SuggestionController, SuggestionView};
use crate::api::ApiClient;
use crate::util::{event_element, listen, non_empty_attr, query_all, query_one};
use leptos::logging::debug_warn;
use leptos::task::spawn_local;
use web_sys::{Element, HtmlInputElement};

pub(crate) const SUGGEST_INPUT_SELECTOR: &str = "input[data-suggest-target]";
const ENTRY_ATTR: &str = "data-suggestion";

/// Renders into a `<datalist>` as options, or into any other container as `<li>` entries.
struct DomSuggestionView {
    document: web_sys::Document,
    list: Element,
}

impl DomSuggestionView {
    fn is_datalist(&self) -> bool {
        self.list.tag_name().eq_ignore_ascii_case("datalist")
    }

    fn entry(&self, title: &str) -> Option<Element> {
        if self.is_datalist() {
            let option = self.document.create_element("option").ok()?;
            option.set_attribute("value", title).ok()?;
            return Some(option);
        }

        let li = self.document.create_element("li").ok()?;
        li.set_attribute(ENTRY_ATTR, title).ok()?;
        li.set_attribute("tabindex", "0").ok()?;
        li.set_attribute("class", "suggestion").ok()?;
        li.set_text_content(Some(title));
        Some(li)
    }
}

impl SuggestionView for DomSuggestionView {
    fn render(&self, titles: &[String]) {
        self.clear();
        for title in titles {
            if let Some(entry) = self.entry(title) {
                let _ = self.list.append_child(&entry);
            }
        }
    }

    fn clear(&self) {
        self.list.set_text_content(None);
    }
}

/// Wires every suggestion input on the page. Returns how many were attached.
pub(crate) fn attach_suggestion_inputs(document: &web_sys::Document, client: &ApiClient) -> usize {
    query_all::<HtmlInputElement>(document, SUGGEST_INPUT_SELECTOR)
        .into_iter()
        .filter(|input| attach(document, input.clone(), client))
        .count()
}

fn attach(document: &web_sys::Document, input: HtmlInputElement, client: &ApiClient) -> bool {
    let Some(list) = non_empty_attr(&input, "data-suggest-target")
        .and_then(|sel| query_one::<Element>(document, &sel))
    else {
        debug_warn!("suggest: input without a matching list, skipping");
        return false;
    };

    let view = DomSuggestionView {
        document: document.clone(),
        list: list.clone(),
    };
    let controller = SuggestionController::new(client.clone(), view);

    {
        let controller = controller.clone();
        let source = input.clone();
        listen(&input, "input", move |_| {
            spawn_local(controller.on_input(&source.value()));
        });
    }

    // Clicking an entry copies it into the input and closes the list.
    listen(&list, "click", move |ev| {
        let Some(title) = event_element(&ev)
            .and_then(|el| el.closest(&format!("[{ENTRY_ATTR}]")).ok().flatten())
            .and_then(|el| el.get_attribute(ENTRY_ATTR))
        else {
            return;
        };
        input.set_value(&title);
        spawn_local(controller.on_input(""));
    });

    true
}
