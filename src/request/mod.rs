use futures::future::{AbortHandle, Abortable};
use std::cell::RefCell;
use std::future::Future;
use std::rc::Rc;

/// Single-occupancy holder for one outstanding async operation.
///
/// `issue` aborts whatever the slot is currently holding before it hands out the new
/// operation, and every operation carries the generation it was issued under. An operation
/// only yields its output if its generation is still current when it settles, so the last
/// issued request wins regardless of completion order. Aborting the transport and checking
/// the generation are independent: a transport that ignores the abort still cannot publish.
///
/// Cloning shares the slot.
#[derive(Clone, Default)]
pub(crate) struct RequestSlot {
    inner: Rc<RefCell<SlotState>>,
}

#[derive(Default)]
struct SlotState {
    generation: u64,
    in_flight: Option<AbortHandle>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cancels the previous operation (if any) and starts tracking `op`.
    ///
    /// The cancellation happens here, synchronously, not when the returned future is first
    /// polled. The future resolves to `None` when the operation was superseded or cancelled.
    pub fn issue<Fut>(&self, op: Fut) -> impl Future<Output = Option<Fut::Output>> + 'static
    where
        Fut: Future + 'static,
    {
        let (handle, registration) = AbortHandle::new_pair();
        let generation = {
            let mut st = self.inner.borrow_mut();
            if let Some(prev) = st.in_flight.take() {
                prev.abort();
            }
            st.generation = st.generation.wrapping_add(1);
            st.in_flight = Some(handle);
            st.generation
        };

        let slot = self.clone();
        async move {
            let output = Abortable::new(op, registration).await.ok();
            slot.settle(generation, output)
        }
    }

    /// Invalidates the outstanding operation without starting a new one.
    pub fn cancel(&self) {
        let mut st = self.inner.borrow_mut();
        if let Some(prev) = st.in_flight.take() {
            prev.abort();
        }
        st.generation = st.generation.wrapping_add(1);
    }

    #[cfg(test)]
    pub fn is_pending(&self) -> bool {
        self.inner.borrow().in_flight.is_some()
    }

    #[cfg(test)]
    pub fn generation(&self) -> u64 {
        self.inner.borrow().generation
    }

    fn settle<T>(&self, generation: u64, output: Option<T>) -> Option<T> {
        let mut st = self.inner.borrow_mut();
        if st.generation != generation {
            return None;
        }
        st.in_flight = None;
        output
    }
}
