use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
	#[error("a display is already running in this process")]
	AlreadyRunning,
	#[error("invalid configuration: {0}")]
	InvalidConfig(&'static str),
	#[error("failed to create event loop: {0}")]
	EventLoop(#[from] winit::error::EventLoopError),
	#[error("failed to create window: {0}")]
	Window(#[from] winit::error::OsError),
	#[error("failed to create GPU surface: {0}")]
	Surface(#[from] wgpu::CreateSurfaceError),
	#[error("no compatible GPU adapter found: {0}")]
	Adapter(#[from] wgpu::RequestAdapterError),
	#[error("failed to create GPU device: {0}")]
	Device(#[from] wgpu::RequestDeviceError),
	#[error("surface supports no texture formats on this adapter")]
	UnsupportedSurface,
	#[error("failed to acquire frame: {0}")]
	Frame(#[from] wgpu::SurfaceError),
}
