use std::cell::Cell;

/// Visible x-axis window, in milliseconds since the epoch.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisRange {
    pub min: f64,
    pub max: f64,
}

impl AxisRange {
    /// Orders the bounds; `None` for an empty selection.
    pub fn new(a: f64, b: f64) -> Option<Self> {
        if a == b || !a.is_finite() || !b.is_finite() {
            return None;
        }
        Some(Self {
            min: a.min(b),
            max: a.max(b),
        })
    }

    pub fn contains(&self, x: f64) -> bool {
        x >= self.min && x <= self.max
    }
}

/// Anything whose x axis can be driven by another chart.
pub trait ZoomTarget {
    /// `None` restores the default (full) extent.
    fn set_extremes(&self, range: Option<AxisRange>);
    fn reset_zoom_shown(&self) -> bool;
    fn show_reset_zoom(&self);
    fn hide_reset_zoom(&self);
}

/// Keeps a group of charts on the same x window.
///
/// Only one chart may propagate at a time. While chart `i` pushes its window
/// to the others, extremes events they raise in turn are dropped, so a zoom
/// never bounces back to its origin.
#[derive(Debug, Default)]
pub struct ZoomSync {
    zoomed_on: Cell<Option<usize>>,
}

impl ZoomSync {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_locked(&self) -> bool {
        self.zoomed_on.get().is_some()
    }

    /// Chart `source` changed its window to `range` (`None` = reset). Returns
    /// `false` when the event was swallowed by the lock.
    pub fn propagate<T: ZoomTarget>(
        &self,
        source: usize,
        range: Option<AxisRange>,
        charts: &[T],
    ) -> bool {
        if let Some(owner) = self.zoomed_on.get() {
            if owner != source {
                return false;
            }
        }
        self.zoomed_on.set(Some(source));

        let show_reset = range.is_some();
        for (j, chart) in charts.iter().enumerate() {
            if j == source {
                continue;
            }
            chart.set_extremes(range);
            if show_reset && !chart.reset_zoom_shown() {
                chart.show_reset_zoom();
            } else if !show_reset && chart.reset_zoom_shown() {
                chart.hide_reset_zoom();
            }
        }

        self.zoomed_on.set(None);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[derive(Default)]
    struct FakeChart {
        extremes: RefCell<Vec<Option<AxisRange>>>,
        reset_shown: Cell<bool>,
    }

    impl ZoomTarget for FakeChart {
        fn set_extremes(&self, range: Option<AxisRange>) {
            self.extremes.borrow_mut().push(range);
        }
        fn reset_zoom_shown(&self) -> bool {
            self.reset_shown.get()
        }
        fn show_reset_zoom(&self) {
            self.reset_shown.set(true);
        }
        fn hide_reset_zoom(&self) {
            self.reset_shown.set(false);
        }
    }

    /// Re-raises an extremes event on the shared sync, like a chart whose
    /// axis fires its own after-set-extremes callback.
    struct EchoChart<'a> {
        index: usize,
        sync: &'a ZoomSync,
        inner: FakeChart,
        echoes: RefCell<Vec<bool>>,
    }

    impl ZoomTarget for EchoChart<'_> {
        fn set_extremes(&self, range: Option<AxisRange>) {
            self.inner.set_extremes(range);
            let accepted = self.sync.propagate::<FakeChart>(self.index, range, &[]);
            self.echoes.borrow_mut().push(accepted);
        }
        fn reset_zoom_shown(&self) -> bool {
            self.inner.reset_zoom_shown()
        }
        fn show_reset_zoom(&self) {
            self.inner.show_reset_zoom()
        }
        fn hide_reset_zoom(&self) {
            self.inner.hide_reset_zoom()
        }
    }

    #[test]
    fn propagates_to_others_only() {
        let sync = ZoomSync::new();
        let charts = [FakeChart::default(), FakeChart::default(), FakeChart::default()];
        let range = AxisRange::new(100.0, 200.0);

        assert!(sync.propagate(0, range, &charts));
        assert!(charts[0].extremes.borrow().is_empty());
        assert_eq!(*charts[1].extremes.borrow(), vec![range]);
        assert_eq!(*charts[2].extremes.borrow(), vec![range]);
        assert!(charts[1].reset_shown.get());
        assert!(!charts[0].reset_shown.get());
        assert!(!sync.is_locked());
    }

    #[test]
    fn reset_hides_reset_button() {
        let sync = ZoomSync::new();
        let charts = [FakeChart::default(), FakeChart::default()];
        sync.propagate(0, AxisRange::new(1.0, 2.0), &charts);
        assert!(charts[1].reset_shown.get());

        sync.propagate(0, None, &charts);
        assert_eq!(charts[1].extremes.borrow().last(), Some(&None));
        assert!(!charts[1].reset_shown.get());
    }

    #[test]
    fn echoed_events_are_swallowed() {
        let sync = ZoomSync::new();
        let charts: Vec<EchoChart> = (0..2)
            .map(|index| EchoChart {
                index,
                sync: &sync,
                inner: FakeChart::default(),
                echoes: RefCell::new(Vec::new()),
            })
            .collect();
        let range = AxisRange::new(10.0, 20.0);

        assert!(sync.propagate(0, range, &charts));
        // chart B got A's window and its own echo was dropped
        assert_eq!(*charts[1].inner.extremes.borrow(), vec![range]);
        assert_eq!(*charts[1].echoes.borrow(), vec![false]);
        // chart A was never driven
        assert!(charts[0].inner.extremes.borrow().is_empty());
        assert!(!sync.is_locked());
    }

    #[test]
    fn range_orders_bounds() {
        let r = AxisRange::new(5.0, 1.0).unwrap();
        assert_eq!((r.min, r.max), (1.0, 5.0));
        assert!(r.contains(3.0));
        assert!(AxisRange::new(2.0, 2.0).is_none());
    }
}
