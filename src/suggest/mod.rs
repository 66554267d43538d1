mod dom;

pub(crate) use dom::{attach_suggestion_inputs, SUGGEST_INPUT_SELECTOR};

use crate::api::SuggestionSource;
use crate::request::RequestSlot;
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging::debug_warn;
use std::rc::Rc;

pub(crate) trait SuggestionView {
    /// Replace the list with one selectable entry per title.
    fn render(&self, titles: &[String]);
    fn clear(&self);
}

/// Type-ahead over the suggestion endpoint. Each keystroke supersedes the previous
/// lookup through the request slot, so ordering is by causality rather than by timer.
pub(crate) struct SuggestionController<S, V> {
    source: Rc<S>,
    view: Rc<V>,
    slot: RequestSlot,
}

impl<S, V> Clone for SuggestionController<S, V> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            view: self.view.clone(),
            slot: self.slot.clone(),
        }
    }
}

impl<S, V> SuggestionController<S, V>
where
    S: SuggestionSource + 'static,
    V: SuggestionView + 'static,
{
    pub fn new(source: S, view: V) -> Self {
        Self {
            source: Rc::new(source),
            view: Rc::new(view),
            slot: RequestSlot::new(),
        }
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// Handle an input change. An empty query clears the list immediately and drops
    /// whatever lookup is still in flight, so a late response cannot refill it.
    pub fn on_input(&self, raw: &str) -> LocalBoxFuture<'static, ()> {
        let query = raw.trim();
        if query.is_empty() {
            self.slot.cancel();
            self.view.clear();
            return futures::future::ready(()).boxed_local();
        }

        let pending = self.slot.issue(self.source.suggest(query.to_string()));
        let view = self.view.clone();
        async move {
            match pending.await {
                Some(Ok(resp)) => view.render(&resp.titles()),
                Some(Err(e)) => {
                    debug_warn!("suggest: request failed: {e}");
                }
                None => {}
            }
        }
        .boxed_local()
    }
}
