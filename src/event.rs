use winit::event::WindowEvent;

/// Platform input, reduced to what the display loop reacts to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
	Quit,
	KeyPress,
	Other,
}

impl Event {
	pub fn stops_display(self) -> bool {
		matches!(self, Event::Quit | Event::KeyPress)
	}
}

impl From<&WindowEvent> for Event {
	fn from(event: &WindowEvent) -> Self {
		match event {
			WindowEvent::CloseRequested | WindowEvent::Destroyed => Event::Quit,
			WindowEvent::KeyboardInput { event, .. } if event.state.is_pressed() && !event.repeat => {
				Event::KeyPress
			}
			_ => Event::Other,
		}
	}
}
