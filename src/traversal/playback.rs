//! Timer-driven replay of a [`TraversalPlan`].
//!
//! The controller owns at most one repeating timer, obtained from a
//! [`Scheduler`]. Each tick publishes the next step to every subscriber; the
//! tick after the last step stops the timer and clears the current node while
//! leaving the final visited/frontier sets in place.

use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

use log::{debug, info, warn};

use super::adjacency::Adjacency;
use super::plan::{Algorithm, TraversalPlan};
use crate::graph::GraphData;

/// A cancellable repeating timer.
pub trait TimerHandle {
	/// Stops further ticks. Cancelling twice is harmless.
	fn cancel(&mut self);
}

/// Source of repeating timers.
pub trait Scheduler {
	/// Handle to a timer installed by [`every`](Self::every).
	type Handle: TimerHandle + 'static;

	/// Calls `tick` every `period` until the returned handle is cancelled.
	/// `None` means no timer could be installed.
	fn every(&self, period: Duration, tick: Box<dyn FnMut()>) -> Option<Self::Handle>;
}

/// Lifecycle of a controller.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PlaybackStatus {
	/// No traversal, or the last one finished.
	#[default]
	Idle,
	/// A timer is publishing steps.
	Running,
	/// Position kept, no timer.
	Paused,
}

/// What a renderer needs to draw the current frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PlaybackSnapshot {
	/// Node of the latest step; cleared once the traversal completes.
	pub current_node: Option<String>,
	/// Visited nodes in visitation order.
	pub visited_nodes: Vec<String>,
	/// Queue or stack contents of the latest step.
	pub frontier_nodes: Vec<String>,
	/// Steps published so far.
	pub step_index: usize,
	/// Length of the plan.
	pub total_steps: usize,
	/// True while a timer is publishing steps.
	pub is_running: bool,
	/// True between `pause` and `resume`.
	pub is_paused: bool,
}

type Observer = Box<dyn Fn(&PlaybackSnapshot)>;

struct Playback<H> {
	plan: TraversalPlan,
	index: usize,
	status: PlaybackStatus,
	current_node: Option<String>,
	visited_nodes: Vec<String>,
	frontier_nodes: Vec<String>,
	timer: Option<H>,
}

impl<H: TimerHandle> Playback<H> {
	fn cancel_timer(&mut self) {
		if let Some(mut timer) = self.timer.take() {
			timer.cancel();
		}
	}

	fn clear(&mut self) {
		self.cancel_timer();
		self.plan = TraversalPlan::default();
		self.index = 0;
		self.status = PlaybackStatus::Idle;
		self.current_node = None;
		self.visited_nodes.clear();
		self.frontier_nodes.clear();
	}

	/// One timer fire: publish the step at `index`, or finish.
	fn advance(&mut self) {
		match self.plan.get(self.index) {
			Some(step) => {
				self.current_node = Some(step.current_node.clone());
				self.visited_nodes = step.visited_nodes.clone();
				self.frontier_nodes = step.frontier_nodes.clone();
				self.index += 1;
				debug!("step {}/{}: {}", self.index, self.plan.len(), step.current_node);
			}
			None => {
				self.cancel_timer();
				self.status = PlaybackStatus::Idle;
				self.current_node = None;
				info!(
					"{} traversal from {} complete after {} steps",
					self.plan.algorithm(),
					self.plan.start(),
					self.plan.len()
				);
			}
		}
	}

	fn snapshot(&self) -> PlaybackSnapshot {
		PlaybackSnapshot {
			current_node: self.current_node.clone(),
			visited_nodes: self.visited_nodes.clone(),
			frontier_nodes: self.frontier_nodes.clone(),
			step_index: self.index,
			total_steps: self.plan.len(),
			is_running: self.status == PlaybackStatus::Running,
			is_paused: self.status == PlaybackStatus::Paused,
		}
	}
}

impl<H> Default for Playback<H> {
	fn default() -> Self {
		Self {
			plan: TraversalPlan::default(),
			index: 0,
			status: PlaybackStatus::Idle,
			current_node: None,
			visited_nodes: Vec::new(),
			frontier_nodes: Vec::new(),
			timer: None,
		}
	}
}

/// Replays a [`TraversalPlan`] on a timer and tells subscribers about every
/// change.
pub struct PlaybackController<S: Scheduler> {
	scheduler: S,
	state: Rc<RefCell<Playback<S::Handle>>>,
	observers: Rc<RefCell<Vec<Observer>>>,
}

impl<S: Scheduler> PlaybackController<S> {
	/// An idle controller drawing timers from `scheduler`.
	pub fn new(scheduler: S) -> Self {
		Self {
			scheduler,
			state: Rc::new(RefCell::new(Playback::default())),
			observers: Rc::new(RefCell::new(Vec::new())),
		}
	}

	/// Registers a callback that receives a snapshot after every transition
	/// and every tick.
	pub fn subscribe(&self, observer: impl Fn(&PlaybackSnapshot) + 'static) {
		self.observers.borrow_mut().push(Box::new(observer));
	}

	/// The frame currently on screen.
	pub fn snapshot(&self) -> PlaybackSnapshot {
		self.state.borrow().snapshot()
	}

	/// Current lifecycle state.
	pub fn status(&self) -> PlaybackStatus {
		self.state.borrow().status
	}

	/// A copy of the plan being replayed.
	pub fn plan(&self) -> TraversalPlan {
		self.state.borrow().plan.clone()
	}

	/// Plans a traversal of `graph` from `start_node` and begins replaying it,
	/// replacing any plan and timer already in place.
	pub fn start(&self, graph: &GraphData, algorithm: Algorithm, start_node: &str, tempo: Duration) {
		let adjacency = Adjacency::build(&graph.nodes, &graph.edges, graph.directed);
		let plan = TraversalPlan::generate(algorithm, start_node, &adjacency);
		if plan.is_empty() {
			warn!("start node {start_node} is not in the graph; nothing to traverse");
		}
		{
			let mut state = self.state.borrow_mut();
			state.clear();
			state.plan = plan;
			state.status = PlaybackStatus::Running;
		}
		info!("{algorithm} traversal started from {start_node}");
		self.install_timer(tempo);
		self.publish();
	}

	/// Stops ticking but keeps the plan and position. Returns false, changing
	/// nothing, unless a traversal was running.
	pub fn pause(&self) -> bool {
		{
			let mut state = self.state.borrow_mut();
			if state.status != PlaybackStatus::Running {
				return false;
			}
			state.cancel_timer();
			state.status = PlaybackStatus::Paused;
		}
		info!("traversal paused");
		self.publish();
		true
	}

	/// Continues from the retained position, possibly at a new tempo.
	pub fn resume(&self, tempo: Duration) {
		{
			let mut state = self.state.borrow_mut();
			if state.status != PlaybackStatus::Paused {
				return;
			}
			state.status = PlaybackStatus::Running;
		}
		info!("traversal resumed");
		self.install_timer(tempo);
		self.publish();
	}

	/// Re-arms the timer of a running traversal at `tempo`, keeping its
	/// position. Idle and paused controllers are left alone; a paused one picks
	/// the tempo up on `resume`.
	pub fn set_tempo(&self, tempo: Duration) -> bool {
		if self.status() != PlaybackStatus::Running {
			return false;
		}
		debug!("traversal tempo set to {tempo:?}");
		self.install_timer(tempo);
		true
	}

	/// Discards the plan and every published value.
	pub fn stop(&self) {
		self.state.borrow_mut().clear();
		info!("traversal stopped");
		self.publish();
	}

	/// Same as [`stop`](Self::stop); clearing the graph itself is up to the caller.
	pub fn reset(&self) {
		self.stop();
	}

	fn install_timer(&self, tempo: Duration) {
		let state = Rc::downgrade(&self.state);
		let observers = Rc::downgrade(&self.observers);
		let timer = self
			.scheduler
			.every(tempo, Box::new(move || tick(&state, &observers)));

		let mut state = self.state.borrow_mut();
		state.cancel_timer();
		match timer {
			Some(timer) => state.timer = Some(timer),
			None => {
				warn!("could not schedule traversal timer");
				state.status = PlaybackStatus::Idle;
			}
		}
	}

	fn publish(&self) {
		let snapshot = self.snapshot();
		notify(&self.observers, &snapshot);
	}
}

impl<S: Scheduler> Drop for PlaybackController<S> {
	fn drop(&mut self) {
		if let Ok(mut state) = self.state.try_borrow_mut() {
			state.cancel_timer();
		}
	}
}

fn tick<H: TimerHandle>(
	state: &Weak<RefCell<Playback<H>>>,
	observers: &Weak<RefCell<Vec<Observer>>>,
) {
	// Ticks arriving after teardown find nothing to mutate.
	let (Some(state), Some(observers)) = (state.upgrade(), observers.upgrade()) else {
		return;
	};
	let snapshot = {
		let mut state = state.borrow_mut();
		if state.status != PlaybackStatus::Running {
			return;
		}
		state.advance();
		state.snapshot()
	};
	notify(&observers, &snapshot);
}

fn notify(observers: &RefCell<Vec<Observer>>, snapshot: &PlaybackSnapshot) {
	for observer in observers.borrow().iter() {
		observer(snapshot);
	}
}
