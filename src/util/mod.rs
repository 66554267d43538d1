use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

/// All elements under `root` matching `selector`, cast to `T`. Invalid selectors and
/// non-matching element types are skipped.
pub(crate) fn query_all<T: JsCast>(root: &web_sys::Document, selector: &str) -> Vec<T> {
    let Ok(list) = root.query_selector_all(selector) else {
        return vec![];
    };

    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<T>().ok())
        .collect()
}

pub(crate) fn query_in<T: JsCast>(root: &web_sys::Element, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

pub(crate) fn query_one<T: JsCast>(root: &web_sys::Document, selector: &str) -> Option<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
}

/// Attribute value, trimmed; `None` when missing or blank.
pub(crate) fn non_empty_attr(el: &web_sys::Element, name: &str) -> Option<String> {
    el.get_attribute(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Attach a listener for the lifetime of the page.
pub(crate) fn listen(
    target: &web_sys::EventTarget,
    event: &str,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    listen_with_capture(target, event, false, handler);
}

pub(crate) fn listen_with_capture(
    target: &web_sys::EventTarget,
    event: &str,
    capture: bool,
    handler: impl FnMut(web_sys::Event) + 'static,
) {
    let cb = Closure::wrap(Box::new(handler) as Box<dyn FnMut(web_sys::Event)>);
    let _ = target.add_event_listener_with_callback_and_bool(
        event,
        cb.as_ref().unchecked_ref(),
        capture,
    );

    // Page-lifetime listener; no cleanup path.
    cb.forget();
}

/// The element an event was dispatched to, if it is one.
pub(crate) fn event_element(ev: &web_sys::Event) -> Option<web_sys::Element> {
    ev.target()
        .and_then(|t| t.dyn_into::<web_sys::Element>().ok())
}

pub(crate) fn set_class(el: &web_sys::Element, class: &str, on: bool) {
    let list = el.class_list();
    let _ = if on {
        list.add_1(class)
    } else {
        list.remove_1(class)
    };
}
