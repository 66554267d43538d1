use super::{FilteredItem, ListFilter, Segment};
use crate::util::{listen, non_empty_attr, query_all, query_in};
use leptos::logging::debug_warn;
use web_sys::{Element, HtmlElement, HtmlInputElement};

pub(crate) const FILTER_INPUT_SELECTOR: &str = "input[data-filter]";
const TEXT_SLOT_SELECTOR: &str = "[data-filter-text]";

/// One filterable item. Highlighting only rewrites a dedicated `[data-filter-text]` slot;
/// an item without one is shown or hidden but its markup is left alone.
struct FilterTarget {
    item: HtmlElement,
    text_slot: Option<Element>,
}

impl FilterTarget {
    fn text(&self) -> String {
        match &self.text_slot {
            Some(slot) => slot.text_content(),
            None => self.item.text_content(),
        }
        .unwrap_or_default()
    }
}

/// Wires every list filter input on the page. Returns how many were attached.
pub(crate) fn attach_list_filters(document: &web_sys::Document) -> usize {
    query_all::<HtmlInputElement>(document, FILTER_INPUT_SELECTOR)
        .into_iter()
        .filter(|input| attach(document, input.clone()))
        .count()
}

fn attach(document: &web_sys::Document, input: HtmlInputElement) -> bool {
    let Some(selector) = non_empty_attr(&input, "data-filter") else {
        return false;
    };

    let targets: Vec<FilterTarget> = query_all::<HtmlElement>(document, &selector)
        .into_iter()
        .map(|item| {
            let text_slot = query_in::<Element>(&item, TEXT_SLOT_SELECTOR);
            FilterTarget { item, text_slot }
        })
        .collect();
    if targets.is_empty() {
        debug_warn!("filter: `{selector}` matched no items, skipping");
        return false;
    }

    let filter = ListFilter::new(targets.iter().map(FilterTarget::text).collect());

    let document = document.clone();
    let source = input.clone();
    listen(&input, "input", move |_| {
        let results = filter.apply(&source.value());
        for (target, result) in targets.iter().zip(results.iter()) {
            render(&document, target, result);
        }
    });

    true
}

fn render(document: &web_sys::Document, target: &FilterTarget, result: &FilteredItem) {
    target.item.set_hidden(!result.visible);
    let Some(slot) = &target.text_slot else {
        return;
    };
    slot.set_text_content(None);

    for segment in &result.segments {
        let node: Option<web_sys::Node> = match segment {
            Segment::Text(text) => Some(document.create_text_node(text).into()),
            Segment::Mark(text) => document.create_element("mark").ok().map(|mark| {
                mark.set_text_content(Some(text));
                mark.into()
            }),
        };
        if let Some(node) = node {
            let _ = slot.append_child(&node);
        }
    }
}
