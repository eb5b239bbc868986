use super::*;

struct DebounceState<A> {
    wait_ms: i64,
    func: Box<dyn Fn(&mut Page, A) -> Result<()>>,
    pending: Cell<Option<TimerId>>,
}

/// Handle returned by [`debounce`]. Clones share the same pending call.
pub struct Debounced<A> {
    state: Rc<DebounceState<A>>,
}

/// Wraps `func` so that it runs once no further call arrived for `wait_ms`.
///
/// Every [`Debounced::call`] cancels the call still waiting and restarts the
/// window with the newest arguments.
pub fn debounce<A, F>(func: F, wait_ms: i64) -> Debounced<A>
where
    A: 'static,
    F: Fn(&mut Page, A) -> Result<()> + 'static,
{
    Debounced {
        state: Rc::new(DebounceState {
            wait_ms: wait_ms.max(0),
            func: Box::new(func),
            pending: Cell::new(None),
        }),
    }
}

impl<A: 'static> Debounced<A> {
    pub fn call(&self, page: &mut Page, args: A) -> TimerId {
        if let Some(previous) = self.state.pending.take() {
            page.clear_timeout(previous);
        }
        let state = Rc::clone(&self.state);
        let id = page.set_timeout(self.state.wait_ms, "debounce", move |page| {
            state.pending.set(None);
            (state.func)(page, args)
        });
        self.state.pending.set(Some(id));
        id
    }

    /// Drops the waiting call, if any. Returns whether one was waiting.
    pub fn cancel(&self, page: &mut Page) -> bool {
        match self.state.pending.take() {
            Some(id) => page.clear_timeout(id),
            None => false,
        }
    }

    pub fn is_pending(&self) -> bool {
        self.state.pending.get().is_some()
    }

    pub fn wait_ms(&self) -> i64 {
        self.state.wait_ms
    }
}

impl<A> Clone for Debounced<A> {
    fn clone(&self) -> Self {
        Self {
            state: Rc::clone(&self.state),
        }
    }
}

impl<A> fmt::Debug for Debounced<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Debounced")
            .field("wait_ms", &self.state.wait_ms)
            .field("pending", &self.state.pending.get())
            .finish()
    }
}
