use std::time::{Duration, Instant};

/// Paces the main loop and measures the time between ticks.
#[derive(Debug)]
pub struct Clock {
	last_tick: Instant,
	interval: Duration,
}

impl Clock {
	pub fn new(tick_rate: u32) -> Self {
		let interval = if tick_rate == 0 {
			Duration::ZERO
		} else {
			Duration::from_secs_f64(1.0 / tick_rate as f64)
		};
		Self {
			last_tick: Instant::now(),
			interval,
		}
	}

	/// Earliest instant at which the next tick should run.
	pub fn deadline(&self) -> Instant {
		self.last_tick + self.interval
	}

	pub fn is_due(&self, now: Instant) -> bool {
		now >= self.deadline()
	}

	/// Seconds since the previous tick. Advances the clock.
	pub fn tick(&mut self) -> f32 {
		let now = Instant::now();
		let delta = now.duration_since(self.last_tick).as_secs_f32();
		self.last_tick = now;
		delta
	}
}
