use glam::IVec2;

use crate::canvas::Rgb;

/// One filled circle, in pixels, as fed to the vertex shader per instance.
#[repr(C)]
#[derive(Debug, Default, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Dot {
	center: [f32; 2],
	radius: f32,
	color: [f32; 3],
}

/// Converts an 8-bit sRGB channel to linear light.
pub fn srgb_to_linear(channel: u8) -> f32 {
	let c = channel as f32 / 255.0;
	if c <= 0.04045 {
		c / 12.92
	} else {
		((c + 0.055) / 1.055).powf(2.4)
	}
}

impl Dot {
	const ATTRIBUTES: [wgpu::VertexAttribute; 3] =
		wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32, 2 => Float32x3];

	pub fn new(center: IVec2, radius: u32, color: Rgb) -> Self {
		// Centre on the middle of the pixel.
		let center = center.as_vec2() + 0.5;
		Self {
			center: center.to_array(),
			radius: radius as f32,
			color: color.map(srgb_to_linear),
		}
	}

	pub fn layout() -> wgpu::VertexBufferLayout<'static> {
		wgpu::VertexBufferLayout {
			array_stride: std::mem::size_of::<Dot>() as wgpu::BufferAddress,
			step_mode: wgpu::VertexStepMode::Instance,
			attributes: &Self::ATTRIBUTES,
		}
	}
}

/// Instance buffer that grows to fit the busiest frame seen so far.
pub struct DotBuffer {
	buffer: wgpu::Buffer,
	capacity: usize,
}

fn create_buffer(device: &wgpu::Device, capacity: usize) -> wgpu::Buffer {
	device.create_buffer(&wgpu::BufferDescriptor {
		label: Some("Dots Buffer"),
		size: (capacity * std::mem::size_of::<Dot>()) as wgpu::BufferAddress,
		usage: wgpu::BufferUsages::VERTEX | wgpu::BufferUsages::COPY_DST,
		mapped_at_creation: false,
	})
}

impl DotBuffer {
	pub fn new(device: &wgpu::Device, capacity: usize) -> Self {
		let capacity = capacity.max(1);
		Self {
			buffer: create_buffer(device, capacity),
			capacity,
		}
	}

	pub fn upload(&mut self, device: &wgpu::Device, queue: &wgpu::Queue, dots: &[Dot]) {
		if dots.len() > self.capacity {
			self.capacity = dots.len().next_power_of_two();
			log::debug!("growing dot buffer to {} instances", self.capacity);
			self.buffer = create_buffer(device, self.capacity);
		}
		if !dots.is_empty() {
			queue.write_buffer(&self.buffer, 0, bytemuck::cast_slice(dots));
		}
	}

	pub fn buffer(&self) -> &wgpu::Buffer {
		&self.buffer
	}
}
