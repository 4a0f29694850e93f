//! Undo and redo over whole snapshots.

use std::collections::VecDeque;

/// Bounded undo/redo stacks of whole-value snapshots.
///
/// Callers `record` the state they are about to replace; `undo` and `redo`
/// take the state currently displayed and hand back the one to restore.
#[derive(Clone, Debug)]
pub struct History<T> {
	undo: VecDeque<T>,
	redo: Vec<T>,
	capacity: usize,
}

impl<T: Clone> History<T> {
	/// Keeps at most `capacity` undo snapshots, never fewer than one.
	pub fn new(capacity: usize) -> Self {
		Self {
			undo: VecDeque::new(),
			redo: Vec::new(),
			capacity: capacity.max(1),
		}
	}

	/// Pushes the pre-mutation snapshot and invalidates the redo stack.
	pub fn record(&mut self, snapshot: T) {
		if self.undo.len() == self.capacity {
			self.undo.pop_front();
		}
		self.undo.push_back(snapshot);
		self.redo.clear();
	}

	/// Swaps `current` for the latest undo snapshot, if any.
	pub fn undo(&mut self, current: T) -> Option<T> {
		let previous = self.undo.pop_back()?;
		self.redo.push(current);
		Some(previous)
	}

	/// Swaps `current` for the latest redo snapshot, if any.
	pub fn redo(&mut self, current: T) -> Option<T> {
		let next = self.redo.pop()?;
		if self.undo.len() == self.capacity {
			self.undo.pop_front();
		}
		self.undo.push_back(current);
		Some(next)
	}

	/// True when [`undo`](Self::undo) has a snapshot to return.
	pub fn can_undo(&self) -> bool {
		!self.undo.is_empty()
	}

	/// True when [`redo`](Self::redo) has a snapshot to return.
	pub fn can_redo(&self) -> bool {
		!self.redo.is_empty()
	}
}

impl<T: Clone + PartialEq> History<T> {
	/// Records `previous` only when `next` differs from it, so a no-op edit
	/// leaves both stacks alone. Returns whether anything was recorded.
	pub fn record_if_changed(&mut self, previous: T, next: &T) -> bool {
		if previous == *next {
			return false;
		}
		self.record(previous);
		true
	}
}
