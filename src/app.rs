use std::{sync::Arc, time::Instant};

use glam::UVec2;
use log::info;
use winit::{
	application::ApplicationHandler,
	event::WindowEvent,
	event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
	window::{Fullscreen, Window, WindowId},
};

use crate::{
	config::Config,
	display::Display,
	error::{Error, Result},
	event::Event,
	renderer::Renderer,
};

/// Opens the fullscreen display and animates until a key press or close request.
pub fn run(config: Config) -> Result<()> {
	let event_loop = EventLoop::new()?;
	event_loop.set_control_flow(ControlFlow::Poll);

	let mut app = App::new(config);
	event_loop.run_app(&mut app)?;
	app.error.take().map_or(Ok(()), Err)
}

pub struct App {
	config: Config,
	display: Option<Display<Renderer>>,
	error: Option<Error>,
}

impl App {
	pub fn new(config: Config) -> Self {
		Self {
			config,
			display: None,
			error: None,
		}
	}

	fn open(&self, event_loop: &ActiveEventLoop) -> Result<Display<Renderer>> {
		Display::create(&self.config, || {
			let mut attributes = Window::default_attributes()
				.with_title(self.config.title.clone())
				.with_fullscreen(Some(Fullscreen::Borderless(None)));
			if let Some(size) = self.config.requested_size() {
				attributes = attributes.with_inner_size(size);
			}
			let window = Arc::new(event_loop.create_window(attributes)?);
			window.set_cursor_visible(false);
			pollster::block_on(Renderer::new(window))
		})
	}

	fn fail(&mut self, event_loop: &ActiveEventLoop, err: Error) {
		self.error = Some(err);
		event_loop.exit();
	}
}

impl ApplicationHandler for App {
	fn resumed(&mut self, event_loop: &ActiveEventLoop) {
		if self.display.is_some() {
			return;
		}
		match self.open(event_loop) {
			Ok(display) => self.display = Some(display),
			Err(err) => self.fail(event_loop, err),
		}
	}

	fn window_event(&mut self, _event_loop: &ActiveEventLoop, _id: WindowId, event: WindowEvent) {
		let Some(display) = self.display.as_mut() else {
			return;
		};
		match event {
			WindowEvent::Resized(size) => display.resize(UVec2::new(size.width, size.height)),
			event => display.push_event(Event::from(&event)),
		}
	}

	fn about_to_wait(&mut self, event_loop: &ActiveEventLoop) {
		let Some(display) = self.display.as_mut() else {
			return;
		};
		if display.is_due(Instant::now()) {
			if let Err(err) = display.frame() {
				self.fail(event_loop, err);
				return;
			}
			if !display.is_running() {
				event_loop.exit();
				return;
			}
		}
		event_loop.set_control_flow(ControlFlow::WaitUntil(display.deadline()));
	}

	fn exiting(&mut self, _event_loop: &ActiveEventLoop) {
		if let Some(display) = self.display.take() {
			info!("{} fireworks still in flight", display.fireworks().len());
			drop(display);
		}
	}
}
