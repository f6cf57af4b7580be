use config::Config;

mod app;
mod canvas;
mod clock;
mod config;
mod display;
mod dots;
mod error;
mod event;
mod firework;
mod lease;
mod renderer;
mod screen;

fn main() {
	env_logger::init();

	if let Err(err) = app::run(Config::default()) {
		log::error!("{err}");
		std::process::exit(1);
	}
}
