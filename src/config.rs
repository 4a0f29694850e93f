//! Tunables shared by the page and its panels, provided through context.

use std::time::Duration;

/// Tempo bounds, history depth and the default graph direction.
#[derive(Clone, Debug, PartialEq)]
pub struct VisualizerConfig {
	/// Interval between traversal steps when the page loads.
	pub default_tempo_ms: u32,
	/// Fastest selectable step interval.
	pub min_tempo_ms: u32,
	/// Slowest selectable step interval.
	pub max_tempo_ms: u32,
	/// Slider increment.
	pub tempo_step_ms: u32,
	/// Undo snapshots kept before the oldest is dropped.
	pub history_capacity: usize,
	/// Whether new graphs are interpreted as directed.
	pub directed: bool,
}

impl Default for VisualizerConfig {
	fn default() -> Self {
		Self {
			default_tempo_ms: 1000,
			min_tempo_ms: 100,
			max_tempo_ms: 2000,
			tempo_step_ms: 100,
			history_capacity: 50,
			directed: false,
		}
	}
}

impl VisualizerConfig {
	/// Pulls `ms` into the selectable range.
	pub fn clamp_tempo(&self, ms: u32) -> u32 {
		ms.clamp(self.min_tempo_ms, self.max_tempo_ms)
	}

	/// The clamped interval as a [`Duration`].
	pub fn tempo(&self, ms: u32) -> Duration {
		Duration::from_millis(self.clamp_tempo(ms) as u64)
	}
}
