use std::sync::Arc;

use glam::{IVec2, UVec2};
use log::{info, warn};
use winit::window::Window;

use crate::{
	canvas::{Canvas, Rgb},
	dots::{srgb_to_linear, Dot, DotBuffer},
	error::{Error, Result},
	screen::ScreenBinding,
};

/// Room for a handful of full-size fireworks before the first resize.
const INITIAL_DOTS: usize = 512;

/// GPU canvas that batches circles and draws them as instanced quads on present.
pub struct Renderer {
	window: Arc<Window>,
	device: wgpu::Device,
	queue: wgpu::Queue,
	size: UVec2,
	surface: wgpu::Surface<'static>,
	surface_format: wgpu::TextureFormat,
	pipeline: wgpu::RenderPipeline,
	screen: ScreenBinding,
	dot_buffer: DotBuffer,
	dots: Vec<Dot>,
	clear_color: wgpu::Color,
}

fn window_size(window: &Window) -> UVec2 {
	let size = window.inner_size();
	UVec2::new(size.width, size.height)
}

impl Renderer {
	pub async fn new(window: Arc<Window>) -> Result<Renderer> {
		let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor::default());
		let surface = instance.create_surface(window.clone())?;
		let adapter = instance
			.request_adapter(&wgpu::RequestAdapterOptions {
				power_preference: wgpu::PowerPreference::default(),
				force_fallback_adapter: false,
				compatible_surface: Some(&surface),
			})
			.await?;
		let (device, queue) = adapter
			.request_device(&wgpu::DeviceDescriptor::default())
			.await?;
		info!("rendering on {}", adapter.get_info().name);

		let size = window_size(&window);
		let surface_format = *surface
			.get_capabilities(&adapter)
			.formats
			.first()
			.ok_or(Error::UnsupportedSurface)?;

		let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
			label: Some("Dots Shader"),
			source: wgpu::ShaderSource::Wgsl(include_str!("shader.wgsl").into()),
		});

		let screen = ScreenBinding::new(&device, size);

		let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
			label: Some("Dots Pipeline Layout"),
			bind_group_layouts: &[&screen.layout],
			push_constant_ranges: &[],
		});

		let pipeline = device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
			label: Some("Dots Pipeline"),
			layout: Some(&pipeline_layout),
			vertex: wgpu::VertexState {
				module: &shader,
				entry_point: Some("vs_main"),
				compilation_options: Default::default(),
				buffers: &[Dot::layout()],
			},
			fragment: Some(wgpu::FragmentState {
				module: &shader,
				entry_point: Some("fs_main"),
				compilation_options: Default::default(),
				targets: &[Some(wgpu::ColorTargetState {
					format: surface_format.add_srgb_suffix(),
					blend: Some(wgpu::BlendState::REPLACE),
					write_mask: wgpu::ColorWrites::ALL,
				})],
			}),
			primitive: Default::default(),
			multisample: Default::default(),
			depth_stencil: Default::default(),
			multiview: Default::default(),
			cache: Default::default(),
		});

		let dot_buffer = DotBuffer::new(&device, INITIAL_DOTS);

		let renderer = Renderer {
			window,
			device,
			queue,
			size,
			surface,
			surface_format,
			pipeline,
			screen,
			dot_buffer,
			dots: vec![],
			clear_color: wgpu::Color::BLACK,
		};

		renderer.configure_surface();

		Ok(renderer)
	}

	fn has_area(&self) -> bool {
		self.size.x > 0 && self.size.y > 0
	}

	fn configure_surface(&self) {
		if !self.has_area() {
			return;
		}
		let surface_config = wgpu::SurfaceConfiguration {
			usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
			format: self.surface_format,
			view_formats: vec![self.surface_format.add_srgb_suffix()],
			alpha_mode: wgpu::CompositeAlphaMode::Auto,
			width: self.size.x,
			height: self.size.y,
			desired_maximum_frame_latency: 2,
			present_mode: wgpu::PresentMode::Fifo,
		};
		self.surface.configure(&self.device, &surface_config);
	}

	fn acquire(&mut self) -> Result<Option<wgpu::SurfaceTexture>> {
		match self.surface.get_current_texture() {
			Ok(texture) => Ok(Some(texture)),
			Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
				warn!("surface out of date, reconfiguring");
				self.configure_surface();
				Ok(None)
			}
			Err(wgpu::SurfaceError::Timeout) => {
				warn!("timed out waiting for a frame");
				Ok(None)
			}
			Err(err) => Err(err.into()),
		}
	}
}

impl Canvas for Renderer {
	fn size(&self) -> UVec2 {
		self.size
	}

	fn resize(&mut self, size: UVec2) {
		self.size = size;
		self.configure_surface();
		self.screen.write(&self.queue, size);
	}

	fn clear(&mut self, color: Rgb) {
		let [r, g, b] = color.map(|c| srgb_to_linear(c) as f64);
		self.clear_color = wgpu::Color { r, g, b, a: 1.0 };
		self.dots.clear();
	}

	fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb) {
		self.dots.push(Dot::new(center, radius, color));
	}

	fn present(&mut self) -> Result<()> {
		if !self.has_area() {
			return Ok(());
		}
		let Some(surface_texture) = self.acquire()? else {
			return Ok(());
		};

		let texture_view = surface_texture
			.texture
			.create_view(&wgpu::TextureViewDescriptor {
				format: Some(self.surface_format.add_srgb_suffix()),
				..Default::default()
			});

		self.dot_buffer.upload(&self.device, &self.queue, &self.dots);

		let mut encoder = self.device.create_command_encoder(&Default::default());
		{
			let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
				label: Some("Fireworks Pass"),
				color_attachments: &[Some(wgpu::RenderPassColorAttachment {
					view: &texture_view,
					resolve_target: None,
					ops: wgpu::Operations {
						load: wgpu::LoadOp::Clear(self.clear_color),
						store: wgpu::StoreOp::Store,
					},
				})],
				depth_stencil_attachment: None,
				timestamp_writes: None,
				occlusion_query_set: None,
			});

			if !self.dots.is_empty() {
				pass.set_pipeline(&self.pipeline);
				pass.set_bind_group(0, &self.screen.bind_group, &[]);
				pass.set_vertex_buffer(0, self.dot_buffer.buffer().slice(..));
				pass.draw(0..6, 0..self.dots.len() as u32);
			}
		}

		self.queue.submit([encoder.finish()]);
		self.window.pre_present_notify();
		surface_texture.present();
		Ok(())
	}
}
