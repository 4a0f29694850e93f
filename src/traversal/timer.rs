//! Browser-backed [`Scheduler`].

use std::cell::RefCell;
use std::time::Duration;

use leptos::prelude::{IntervalHandle, set_interval_with_handle};
use log::warn;

use super::playback::{Scheduler, TimerHandle};

/// Schedules playback ticks with the browser's `setInterval`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntervalScheduler;

/// A running `setInterval`, cleared on cancel.
pub struct IntervalTimer(IntervalHandle);

impl TimerHandle for IntervalTimer {
	fn cancel(&mut self) {
		self.0.clear();
	}
}

impl Scheduler for IntervalScheduler {
	type Handle = IntervalTimer;

	fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Option<IntervalTimer> {
		let tick = RefCell::new(tick);
		match set_interval_with_handle(move || (tick.borrow_mut())(), period) {
			Ok(handle) => Some(IntervalTimer(handle)),
			Err(err) => {
				warn!("setInterval failed: {err:?}");
				None
			}
		}
	}
}
