use crate::error::{Error, Result};

#[derive(Debug, Clone)]
pub struct Config {
	/// Requested window size. Zero means the monitor's native resolution.
	pub width: u32,
	pub height: u32,
	/// Seconds between spawns.
	pub spawn_interval: f32,
	/// Target ticks per second. Zero runs unpaced.
	pub tick_rate: u32,
	/// Live count above which a warning is logged after reaping.
	pub crowd_warning: usize,
	pub title: String,
}

impl Default for Config {
	fn default() -> Self {
		Self {
			width: 0,
			height: 0,
			spawn_interval: 1.0,
			tick_rate: 30,
			crowd_warning: 10,
			title: "Fireworks!".to_owned(),
		}
	}
}

impl Config {
	pub fn validate(&self) -> Result<()> {
		if !self.spawn_interval.is_finite() || self.spawn_interval <= 0.0 {
			return Err(Error::InvalidConfig("spawn interval must be a positive number of seconds"));
		}
		Ok(())
	}

	pub fn requested_size(&self) -> Option<winit::dpi::PhysicalSize<u32>> {
		(self.width > 0 && self.height > 0)
			.then(|| winit::dpi::PhysicalSize::new(self.width, self.height))
	}
}
