//! A scheduler whose timers only fire when told to.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use std::time::Duration;

use super::playback::{Scheduler, TimerHandle};

type Tick = Rc<RefCell<Box<dyn FnMut()>>>;

struct Slot {
	active: Rc<Cell<bool>>,
	period: Duration,
	tick: Tick,
}

#[derive(Clone, Default)]
pub struct ManualScheduler {
	slots: Rc<RefCell<Vec<Slot>>>,
	refuse: Rc<Cell<bool>>,
}

pub struct ManualHandle {
	active: Rc<Cell<bool>>,
}

impl TimerHandle for ManualHandle {
	fn cancel(&mut self) {
		self.active.set(false);
	}
}

impl Scheduler for ManualScheduler {
	type Handle = ManualHandle;

	fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Option<ManualHandle> {
		if self.refuse.get() {
			return None;
		}
		let active = Rc::new(Cell::new(true));
		self.slots.borrow_mut().push(Slot {
			active: active.clone(),
			period,
			tick: Rc::new(RefCell::new(tick)),
		});
		Some(ManualHandle { active })
	}
}

impl ManualScheduler {
	/// Fires every active timer once.
	pub fn fire(&self) {
		let live: Vec<(Rc<Cell<bool>>, Tick)> = self
			.slots
			.borrow()
			.iter()
			.filter(|slot| slot.active.get())
			.map(|slot| (slot.active.clone(), slot.tick.clone()))
			.collect();
		for (active, tick) in live {
			if active.get() {
				(tick.borrow_mut())();
			}
		}
	}

	pub fn fire_n(&self, n: usize) {
		for _ in 0..n {
			self.fire();
		}
	}

	pub fn active_count(&self) -> usize {
		self.slots
			.borrow()
			.iter()
			.filter(|slot| slot.active.get())
			.count()
	}

	/// Timers installed so far, cancelled ones included.
	pub fn installed_count(&self) -> usize {
		self.slots.borrow().len()
	}

	/// Period of the most recently installed timer.
	pub fn last_period(&self) -> Option<Duration> {
		self.slots.borrow().last().map(|slot| slot.period)
	}

	/// Makes subsequent `every` calls fail.
	pub fn refuse(&self, refuse: bool) {
		self.refuse.set(refuse);
	}
}
