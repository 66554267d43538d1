mod dom;

pub(crate) use dom::{attach_preview_triggers, PREVIEW_TRIGGER_SELECTOR};

use crate::api::PreviewSource;
use crate::request::RequestSlot;
use futures::future::{FutureExt, LocalBoxFuture};
use leptos::logging::debug_warn;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, strum::Display, strum::AsRefStr)]
#[strum(serialize_all = "lowercase")]
pub(crate) enum PreviewState {
    #[default]
    Hidden,
    Shown,
}

/// The preview container and its trigger.
pub(crate) trait PreviewView {
    /// Inject `html`, reveal the container and relabel the trigger to "hide".
    fn reveal(&self, html: &str);
    /// Hide the container and restore the trigger label.
    fn conceal(&self);
}

/// Hidden/Shown toggle over the preview endpoint.
///
/// Only an explicit toggle changes state. A completed request moves Hidden to Shown; going
/// back to Hidden is local and never touches the network.
pub(crate) struct PreviewController<P, V> {
    source: Rc<P>,
    view: Rc<V>,
    slot: RequestSlot,
    state: Rc<Cell<PreviewState>>,
}

impl<P, V> Clone for PreviewController<P, V> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            view: self.view.clone(),
            slot: self.slot.clone(),
            state: self.state.clone(),
        }
    }
}

impl<P, V> PreviewController<P, V>
where
    P: PreviewSource + 'static,
    V: PreviewView + 'static,
{
    pub fn new(source: P, view: V) -> Self {
        Self {
            source: Rc::new(source),
            view: Rc::new(view),
            slot: RequestSlot::new(),
            state: Rc::new(Cell::new(PreviewState::Hidden)),
        }
    }

    pub fn state(&self) -> PreviewState {
        self.state.get()
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.slot.is_pending()
    }

    /// Handle a click on the trigger. The hide path completes synchronously; the show path
    /// returns the request, which the caller spawns.
    pub fn toggle(&self, body: String) -> LocalBoxFuture<'static, ()> {
        if self.state.get() == PreviewState::Shown {
            self.state.set(PreviewState::Hidden);
            self.view.conceal();
            return futures::future::ready(()).boxed_local();
        }

        let pending = self.slot.issue(self.source.render(body));
        let view = self.view.clone();
        let state = self.state.clone();
        async move {
            match pending.await {
                Some(Ok(resp)) => {
                    view.reveal(&resp.html);
                    state.set(PreviewState::Shown);
                }
                Some(Err(e)) => {
                    debug_warn!("preview: request failed: {e}");
                }
                None => {}
            }
        }
        .boxed_local()
    }
}
