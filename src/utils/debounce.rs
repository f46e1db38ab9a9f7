/// A scheduled callback that can be called off before it fires.
pub trait Cancel {
    fn cancel(self);
}

#[cfg(feature = "web")]
impl Cancel for gloo_timers::callback::Timeout {
    fn cancel(self) {
        let _ = gloo_timers::callback::Timeout::cancel(self);
    }
}

/// Holds at most one pending callback; scheduling a new one cancels the
/// previous, so only the last one can fire.
#[derive(Debug)]
pub struct Debouncer<H: Cancel> {
    pending: Option<H>,
}

impl<H: Cancel> Default for Debouncer<H> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<H: Cancel> Debouncer<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, handle: H) {
        if let Some(prev) = self.pending.replace(handle) {
            prev.cancel();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(prev) = self.pending.take() {
            prev.cancel();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{Column, Record, TableOptions, TableState};
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Timer stand-in: a query that either fires or gets cancelled.
    struct FakeTimer {
        query: String,
        cancelled: Rc<RefCell<Vec<String>>>,
    }

    impl Cancel for FakeTimer {
        fn cancel(self) {
            self.cancelled.borrow_mut().push(self.query);
        }
    }

    fn timer(query: &str, log: &Rc<RefCell<Vec<String>>>) -> FakeTimer {
        FakeTimer {
            query: query.to_string(),
            cancelled: Rc::clone(log),
        }
    }

    #[test]
    fn rescheduling_cancels_the_previous_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut debouncer = Debouncer::new();
        assert!(debouncer.pending.is_none());

        debouncer.schedule(timer("a", &log));
        assert!(log.borrow().is_empty());
        debouncer.schedule(timer("ab", &log));
        assert_eq!(*log.borrow(), ["a"]);
        assert!(debouncer.pending.is_some());
    }

    #[test]
    fn cancel_drops_the_pending_callback() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut debouncer = Debouncer::new();
        debouncer.schedule(timer("x", &log));
        debouncer.cancel();
        assert_eq!(*log.borrow(), ["x"]);
        assert!(debouncer.pending.is_none());

        debouncer.cancel();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn only_the_last_keystroke_reaches_the_table() {
        let log = Rc::new(RefCell::new(Vec::new()));
        let mut debouncer = Debouncer::new();
        for query in ["a", "al", "alp"] {
            debouncer.schedule(timer(query, &log));
        }
        assert_eq!(*log.borrow(), ["a", "al"]);

        // the surviving timer fires
        let fired = debouncer.pending.take().map(|t| t.query);
        assert_eq!(fired.as_deref(), Some("alp"));

        let mut table = TableState::new(
            vec![Column::new("Team", "name")],
            vec![
                Record::new().with("name", "Alpha"),
                Record::new().with("name", "Almond"),
            ],
            TableOptions::default(),
        );
        if let Some(query) = fired {
            table.search(&query);
        }
        assert_eq!(table.visible_len(), 1);
        assert_eq!(table.page_rows()[0][0], "Alpha");
    }
}
