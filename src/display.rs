use std::collections::VecDeque;
use std::time::Instant;

use glam::UVec2;
use log::{debug, info, warn};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
	canvas::{Canvas, BLACK},
	clock::Clock,
	config::Config,
	error::Result,
	event::Event,
	firework::Firework,
	lease::DisplayLease,
};

/// Owns the drawing surface and every live firework.
///
/// Only one display can exist per process. Dropping it tears down the canvas and then
/// frees the slot for a new one.
pub struct Display<C: Canvas> {
	canvas: C,
	bounds: UVec2,
	fireworks: Vec<Firework>,
	spawn_interval: f32,
	spawn_accumulator: f32,
	crowd_warning: usize,
	clock: Clock,
	events: VecDeque<Event>,
	running: bool,
	rng: StdRng,
	// Declared last so it is released after the canvas.
	_lease: DisplayLease,
}

impl<C: Canvas> Display<C> {
	/// Claims the display slot, then opens the canvas with `open`.
	pub fn create(config: &Config, open: impl FnOnce() -> Result<C>) -> Result<Self> {
		config.validate()?;
		let lease = DisplayLease::acquire()?;
		let canvas = open()?;
		let bounds = canvas.size();
		info!("display ready at {}x{}", bounds.x, bounds.y);

		Ok(Self {
			canvas,
			bounds,
			fireworks: vec![],
			spawn_interval: config.spawn_interval,
			spawn_accumulator: 0.0,
			crowd_warning: config.crowd_warning,
			clock: Clock::new(config.tick_rate),
			events: VecDeque::new(),
			running: true,
			rng: StdRng::from_os_rng(),
			_lease: lease,
		})
	}

	pub fn is_running(&self) -> bool {
		self.running
	}

	pub fn fireworks(&self) -> &[Firework] {
		&self.fireworks
	}

	pub fn is_due(&self, now: Instant) -> bool {
		self.clock.is_due(now)
	}

	pub fn deadline(&self) -> Instant {
		self.clock.deadline()
	}

	pub fn resize(&mut self, size: UVec2) {
		self.canvas.resize(size);
		self.bounds = self.canvas.size();
		debug!("display resized to {}x{}", self.bounds.x, self.bounds.y);
	}

	pub fn push_event(&mut self, event: Event) {
		self.events.push_back(event);
	}

	/// Runs one tick using the wall time since the previous one.
	pub fn frame(&mut self) -> Result<()> {
		let elapsed = self.clock.tick();
		self.step(elapsed)
	}

	pub fn step(&mut self, elapsed: f32) -> Result<()> {
		self.poll_events();
		self.spawn_due(elapsed);
		self.advance_all();
		self.reap_finished();
		self.render_frame();
		self.present()
	}

	/// Consumes queued input until the first quit or key press.
	pub fn poll_events(&mut self) {
		while let Some(event) = self.events.pop_front() {
			if event.stops_display() {
				info!("stopping on {event:?}");
				self.running = false;
				break;
			}
		}
	}

	pub fn spawn_due(&mut self, elapsed: f32) {
		self.spawn_accumulator += elapsed;
		while self.spawn_accumulator >= self.spawn_interval {
			let firework = Firework::new(&mut self.rng, self.bounds);
			debug!(
				"spawned firework at {} with {} rays of width {}",
				firework.position(),
				firework.rays(),
				firework.dot_width()
			);
			self.fireworks.push(firework);
			self.spawn_accumulator -= self.spawn_interval;
		}
	}

	pub fn advance_all(&mut self) {
		for firework in &mut self.fireworks {
			firework.tick();
		}
	}

	pub fn reap_finished(&mut self) {
		self.fireworks.retain(|firework| !firework.is_finished());
		if self.fireworks.len() > self.crowd_warning {
			warn!(
				"{} fireworks alive at once, rendering load is climbing",
				self.fireworks.len()
			);
		}
	}

	pub fn render_frame(&mut self) {
		self.canvas.clear(BLACK);
		for firework in &self.fireworks {
			firework.render(&mut self.canvas);
		}
	}

	pub fn present(&mut self) -> Result<()> {
		self.canvas.present()
	}
}

impl<C: Canvas> Drop for Display<C> {
	fn drop(&mut self) {
		info!("closing display");
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		canvas::testing::{Op, RecordingCanvas},
		error::Error,
		lease::tests::serial,
	};

	fn display() -> Display<RecordingCanvas> {
		Display::create(&Config::default(), || Ok(RecordingCanvas::new(640, 480))).unwrap()
	}

	fn finished(display: &mut Display<RecordingCanvas>) -> Firework {
		let mut firework = Firework::new(&mut display.rng, display.bounds);
		while !firework.is_finished() {
			firework.tick();
		}
		firework
	}

	#[test]
	fn create_takes_the_canvas_size() {
		let _serial = serial();
		let display = display();
		assert_eq!(display.bounds, UVec2::new(640, 480));
		assert!(display.is_running());
		assert!(display.fireworks().is_empty());
	}

	#[test]
	fn only_one_display_at_a_time() {
		let _serial = serial();
		let first = display();
		let second = Display::create(&Config::default(), || Ok(RecordingCanvas::new(1, 1)));
		assert!(matches!(second, Err(Error::AlreadyRunning)));
		drop(first);
		assert!(Display::create(&Config::default(), || Ok(RecordingCanvas::new(1, 1))).is_ok());
	}

	#[test]
	fn refused_display_never_opens_a_canvas() {
		let _serial = serial();
		let _first = display();
		let mut opened = false;
		let second = Display::create(&Config::default(), || {
			opened = true;
			Ok(RecordingCanvas::new(1, 1))
		});
		assert!(second.is_err());
		assert!(!opened);
	}

	#[test]
	fn failed_open_frees_the_slot() {
		let _serial = serial();
		let failed = Display::<RecordingCanvas>::create(&Config::default(), || {
			Err(Error::InvalidConfig("no surface"))
		});
		assert!(failed.is_err());
		assert!(Display::create(&Config::default(), || Ok(RecordingCanvas::new(1, 1))).is_ok());
	}

	#[test]
	fn invalid_config_is_rejected() {
		let _serial = serial();
		let config = Config {
			spawn_interval: 0.0,
			..Default::default()
		};
		let display = Display::create(&config, || Ok(RecordingCanvas::new(1, 1)));
		assert!(matches!(display, Err(Error::InvalidConfig(_))));
	}

	#[test]
	fn long_frame_catches_up_on_spawns() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(2.5);
		assert_eq!(display.fireworks().len(), 2);
		assert_eq!(display.spawn_accumulator, 0.5);
	}

	#[test]
	fn short_frames_accumulate() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(0.25);
		display.spawn_due(0.5);
		assert!(display.fireworks().is_empty());
		display.spawn_due(0.25);
		assert_eq!(display.fireworks().len(), 1);
		assert_eq!(display.spawn_accumulator, 0.0);
	}

	#[test]
	fn spawns_land_inside_the_canvas() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(50.0);
		assert_eq!(display.fireworks().len(), 50);
		assert!(display
			.fireworks()
			.iter()
			.all(|f| f.position().x <= 640 && f.position().y <= 480));
	}

	#[test]
	fn advance_ticks_every_firework() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(3.0);
		let before = display.fireworks.clone();
		display.advance_all();
		for (old, new) in before.iter().zip(display.fireworks()) {
			let mut expected = old.clone();
			expected.tick();
			assert_eq!(*new, expected);
		}
	}

	#[test]
	fn reap_keeps_survivors_in_order() {
		let _serial = serial();
		let mut display = display();
		let a = finished(&mut display);
		let b = Firework::new(&mut display.rng, display.bounds);
		let c = Firework::new(&mut display.rng, display.bounds);
		display.fireworks = vec![a.clone(), b.clone(), a, c.clone()];
		display.reap_finished();
		assert_eq!(display.fireworks(), &[b, c]);
	}

	#[test]
	fn crowd_warning_does_not_cap_fireworks() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(15.0);
		display.reap_finished();
		assert_eq!(display.fireworks().len(), 15);
	}

	#[test]
	fn first_stopping_event_ends_the_run() {
		let _serial = serial();
		let mut display = display();
		display.push_event(Event::Other);
		display.poll_events();
		assert!(display.is_running());

		display.push_event(Event::Other);
		display.push_event(Event::KeyPress);
		display.push_event(Event::Other);
		display.poll_events();
		assert!(!display.is_running());
		assert_eq!(display.events.len(), 1);
	}

	#[test]
	fn frame_clears_then_draws_in_spawn_order() {
		let _serial = serial();
		let mut display = display();
		display.spawn_due(2.0);
		display.render_frame();
		display.present().unwrap();

		let ops = &display.canvas.ops;
		assert_eq!(ops.first(), Some(&Op::Clear(BLACK)));
		assert_eq!(ops.last(), Some(&Op::Present));

		let mut expected = RecordingCanvas::new(640, 480);
		for firework in display.fireworks() {
			firework.render(&mut expected);
		}
		assert_eq!(&ops[1..ops.len() - 1], expected.ops.as_slice());
	}

	#[test]
	fn step_runs_a_full_tick() {
		let _serial = serial();
		let mut display = display();
		display.push_event(Event::Quit);
		display.step(1.0).unwrap();

		assert!(!display.is_running());
		assert_eq!(display.fireworks().len(), 1);
		assert_eq!(display.fireworks()[0].scale(), 2);
		let circles = display.canvas.circles().count() as u32;
		assert_eq!(circles, 5 * display.fireworks()[0].rays());
		assert_eq!(display.canvas.ops.last(), Some(&Op::Present));
	}

	#[test]
	fn resize_moves_spawn_bounds() {
		let _serial = serial();
		let mut display = display();
		display.resize(UVec2::new(10, 20));
		assert_eq!(display.bounds, UVec2::new(10, 20));
		display.spawn_due(20.0);
		assert!(display
			.fireworks()
			.iter()
			.all(|f| f.position().x <= 10 && f.position().y <= 20));
	}
}
