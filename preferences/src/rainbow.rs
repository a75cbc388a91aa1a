use std::cell::Cell;
use std::time::Duration;

use crate::{Document, Effect, Preferences, Storage};

/// Degrees the hue advances on every rainbow tick.
pub const HUE_STEP: u16 = 3;

pub fn next_hue(hue: u16) -> u16 {
    ((u32::from(hue) + u32::from(HUE_STEP)) % 360) as u16
}

/// A host facility for repeating callbacks.
pub trait Interval {
    type Handle;

    /// Run `tick` every `period` until cleared. `None` means the host refused
    /// to schedule it.
    fn start(&mut self, period: Duration, tick: Box<dyn Fn()>) -> Option<Self::Handle>;

    fn clear(&mut self, handle: Self::Handle);
}

/// Owner of the single repeating timer that cycles the accent hue.
///
/// Ticks only touch the rendered hue; the stored hue is never changed.
pub struct Rainbow<I: Interval> {
    interval: I,
    active: Option<I::Handle>,
}

impl<I: Interval> Rainbow<I> {
    pub fn new(interval: I) -> Self {
        Self {
            interval,
            active: None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    /// Start cycling from the stored hue at the stored speed. Does nothing if
    /// already running.
    pub fn start<S, D>(&mut self, prefs: &Preferences<S>, document: &D)
    where
        S: Storage,
        D: Document + Clone + 'static,
    {
        if self.active.is_some() {
            return;
        }

        let hue = Cell::new(prefs.hue());
        let period = Duration::from_millis(u64::from(prefs.rainbow_speed()));
        let document = document.clone();
        self.active = self.interval.start(
            period,
            Box::new(move || {
                let next = next_hue(hue.get());
                hue.set(next);
                document.apply(&Effect::Hue(next));
            }),
        );
    }

    /// Stop cycling and put the stored hue back on the page.
    pub fn stop<S, D>(&mut self, prefs: &Preferences<S>, document: &D)
    where
        S: Storage,
        D: Document,
    {
        if let Some(handle) = self.active.take() {
            self.interval.clear(handle);
            document.apply(&Effect::Hue(prefs.hue()));
        }
    }

    /// Restart a running timer so it picks up the stored speed.
    pub fn update_speed<S, D>(&mut self, prefs: &Preferences<S>, document: &D)
    where
        S: Storage,
        D: Document + Clone + 'static,
    {
        if self.active.is_some() {
            self.stop(prefs, document);
            self.start(prefs, document);
        }
    }
}
