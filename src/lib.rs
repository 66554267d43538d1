//! Form enhancements for the OpenBBS web UI: draft autosave with an unload guard, markup
//! preview, type-ahead suggestions, list filtering, keyboard shortcuts, confirmation
//! prompts and the persisted theme switch.
//!
//! The module attaches itself to server-rendered markup once the document is parsed.

mod api;
mod app;
mod confirm;
mod drafts;
mod filter;
mod models;
mod preview;
mod request;
mod shortcuts;
mod storage;
mod suggest;
mod theme;
mod util;

// Needed for `#[wasm_bindgen(start)]` on the wasm entrypoint.
#[cfg(all(target_arch = "wasm32", not(test)))]
use wasm_bindgen::prelude::wasm_bindgen;

// Only register the WASM start function for normal builds (not for tests),
// otherwise wasm-bindgen-test will end up with multiple entry symbols.
#[cfg_attr(all(target_arch = "wasm32", not(test)), wasm_bindgen(start))]
pub fn main() {
    console_error_panic_hook::set_once();
    // No view is mounted, so the executor `mount_to_body` would set up is started here.
    let _ = any_spawner::Executor::init_wasm_bindgen();
    app::boot();
}

// WASM-only tests (run with `cargo test --target wasm32-unknown-unknown` + wasm-bindgen-test-runner)
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use crate::api::{ApiResult, PreviewSource};
    use crate::drafts::{attach_autosave_forms, DraftStore};
    use crate::filter::attach_list_filters;
    use crate::models::{DraftRecord, PreviewResponse};
    use crate::preview::{PreviewController, PreviewState, PreviewView};
    use crate::storage::{KeyValueStore, LocalStorage, THEME_KEY};
    use crate::theme::{apply_stored_theme, load_theme, save_theme, Theme};
    use futures::channel::oneshot;
    use futures::future::{FutureExt, LocalBoxFuture};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::JsCast;
    use wasm_bindgen_test::*;
    use web_sys::{HtmlElement, HtmlFormElement, HtmlInputElement, HtmlTextAreaElement};

    wasm_bindgen_test_configure!(run_in_browser);

    fn document() -> web_sys::Document {
        web_sys::window()
            .and_then(|w| w.document())
            .expect("test page should have a document")
    }

    fn mount(html: &str) -> HtmlElement {
        let doc = document();
        let host: HtmlElement = doc
            .create_element("div")
            .expect("create div")
            .unchecked_into();
        host.set_inner_html(html);
        doc.body()
            .expect("test page should have a body")
            .append_child(&host)
            .expect("append host");
        host
    }

    fn find<T: JsCast>(root: &HtmlElement, selector: &str) -> T {
        root.query_selector(selector)
            .ok()
            .flatten()
            .unwrap_or_else(|| panic!("missing {selector}"))
            .unchecked_into()
    }

    /// Dispatches a cancelable event; returns false when a listener cancelled it.
    fn fire(target: &web_sys::EventTarget, name: &str) -> bool {
        let init = web_sys::EventInit::new();
        init.set_cancelable(true);
        let event = web_sys::Event::new_with_event_init_dict(name, &init).expect("create event");
        target.dispatch_event(&event).expect("dispatch")
    }

    struct EchoPreview;

    impl PreviewSource for EchoPreview {
        fn render(&self, text: String) -> LocalBoxFuture<'static, ApiResult<PreviewResponse>> {
            futures::future::ready(Ok(PreviewResponse {
                html: format!("<p>{text}</p>"),
            }))
            .boxed_local()
        }
    }

    #[derive(Clone, Default)]
    struct SharedView(Rc<RefCell<Option<String>>>);

    impl PreviewView for SharedView {
        fn reveal(&self, html: &str) {
            *self.0.borrow_mut() = Some(html.to_string());
        }

        fn conceal(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    #[wasm_bindgen_test]
    async fn test_spawned_preview_toggle_runs_after_start() {
        crate::main();

        let view = SharedView::default();
        let preview = PreviewController::new(EchoPreview, view.clone());
        let (tx, rx) = oneshot::channel();
        let toggle = preview.toggle("hi".to_string());
        leptos::task::spawn_local(async move {
            toggle.await;
            let _ = tx.send(());
        });

        rx.await.expect("spawned toggle should complete");
        assert_eq!(preview.state(), PreviewState::Shown);
        assert_eq!(view.0.borrow().as_deref(), Some("<p>hi</p>"));
    }

    #[wasm_bindgen_test]
    fn test_filter_leaves_item_markup_intact() {
        let host = mount(
            r#"<input id="wasm-filter" data-filter="li.wasm-post">
            <ul>
              <li class="wasm-post"><a href="/t/1">Radio net</a></li>
              <li class="wasm-post"><span data-filter-text>Rules</span> <a href="/t/2">open</a></li>
            </ul>"#,
        );
        attach_list_filters(&document());
        let input: HtmlInputElement = find(&host, "#wasm-filter");
        let plain: HtmlElement = find(&host, "li.wasm-post:nth-child(1)");
        let slotted: HtmlElement = find(&host, "li.wasm-post:nth-child(2)");

        input.set_value("ru");
        fire(&input, "input");
        assert!(plain.hidden());
        assert!(!slotted.hidden());
        assert!(slotted
            .query_selector("[data-filter-text] mark")
            .ok()
            .flatten()
            .is_some());

        input.set_value("radio");
        fire(&input, "input");
        assert!(!plain.hidden());
        assert!(slotted.hidden());
        assert!(plain.query_selector("mark").ok().flatten().is_none());

        input.set_value("");
        fire(&input, "input");
        assert!(!plain.hidden());
        assert!(!slotted.hidden());
        assert_eq!(plain.inner_html(), r#"<a href="/t/1">Radio net</a>"#);
        assert!(slotted.query_selector("a[href='/t/2']").ok().flatten().is_some());

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_unload_guard_arms_on_input_and_detaches_on_submit() {
        let _ = LocalStorage.remove_item("wasm-guard-topic");
        let host = mount(
            r#"<form class="autosave" data-key="wasm-guard-topic">
              <textarea name="body"></textarea>
            </form>"#,
        );
        attach_autosave_forms(&document());
        let window = web_sys::window().expect("window");
        let form: HtmlFormElement = find(&host, "form");
        let body: HtmlTextAreaElement = find(&host, "textarea");

        assert!(fire(&window, "beforeunload"));

        body.set_value("unsent");
        fire(&body, "input");
        assert!(form.class_list().contains("draft-exists"));
        assert!(!fire(&window, "beforeunload"));

        fire(&form, "submit");
        assert!(fire(&window, "beforeunload"));
        assert!(DraftStore::new(LocalStorage).get("wasm-guard-topic").is_none());

        host.remove();
    }

    #[wasm_bindgen_test]
    fn test_stored_theme_applies_without_toggle() {
        save_theme(&LocalStorage, Theme::Dark);
        assert_eq!(apply_stored_theme(&document()), Theme::Dark);
        let root = document().document_element().expect("html element");
        assert_eq!(root.get_attribute("data-bs-theme").as_deref(), Some("dark"));
        let _ = LocalStorage.remove_item(THEME_KEY);
    }

    #[wasm_bindgen_test]
    fn test_local_storage_draft_roundtrip() {
        let store = DraftStore::new(LocalStorage);
        store.remove("wasm-test-topic");
        assert!(store.get("wasm-test-topic").is_none());

        let record = DraftRecord {
            title: "t".to_string(),
            body: "Hello world".to_string(),
        };
        store.put("wasm-test-topic", &record);
        assert_eq!(store.get("wasm-test-topic"), Some(record));

        store.remove("wasm-test-topic");
        assert!(store.get("wasm-test-topic").is_none());
    }

    #[wasm_bindgen_test]
    fn test_local_storage_malformed_draft_is_absent() {
        LocalStorage
            .set_item("wasm-test-bad", "{oops")
            .expect("localStorage should accept writes");
        assert!(DraftStore::new(LocalStorage).get("wasm-test-bad").is_none());
        let _ = LocalStorage.remove_item("wasm-test-bad");
    }

    #[wasm_bindgen_test]
    fn test_local_storage_theme_roundtrip() {
        save_theme(&LocalStorage, Theme::Dark);
        assert_eq!(load_theme(&LocalStorage), Theme::Dark);
        let _ = LocalStorage.remove_item(THEME_KEY);
        assert_eq!(load_theme(&LocalStorage), Theme::Light);
    }
}
