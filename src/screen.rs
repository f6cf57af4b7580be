use glam::UVec2;
use wgpu::util::DeviceExt;

#[repr(C)]
#[derive(Debug, Default, Copy, Clone, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ScreenUniform {
	size: [f32; 2],
}

impl ScreenUniform {
	pub fn new(size: UVec2) -> Self {
		Self {
			size: size.as_vec2().to_array(),
		}
	}
	pub fn bytes(&self) -> &[u8] {
		bytemuck::bytes_of(self)
	}
}

/// Screen size as seen by the vertex shader, used to map pixels to clip space.
pub struct ScreenBinding {
	buffer: wgpu::Buffer,
	pub layout: wgpu::BindGroupLayout,
	pub bind_group: wgpu::BindGroup,
}

impl ScreenBinding {
	pub fn new(device: &wgpu::Device, size: UVec2) -> Self {
		let buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
			label: Some("Screen Buffer"),
			contents: ScreenUniform::new(size).bytes(),
			usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
		});

		let layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
			label: Some("Screen Bind Group Layout"),
			entries: &[wgpu::BindGroupLayoutEntry {
				binding: 0,
				visibility: wgpu::ShaderStages::VERTEX,
				ty: wgpu::BindingType::Buffer {
					ty: wgpu::BufferBindingType::Uniform,
					has_dynamic_offset: false,
					min_binding_size: None,
				},
				count: None,
			}],
		});

		let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
			label: Some("Screen Bind Group"),
			layout: &layout,
			entries: &[wgpu::BindGroupEntry {
				binding: 0,
				resource: buffer.as_entire_binding(),
			}],
		});

		Self {
			buffer,
			layout,
			bind_group,
		}
	}

	pub fn write(&self, queue: &wgpu::Queue, size: UVec2) {
		queue.write_buffer(&self.buffer, 0, ScreenUniform::new(size).bytes());
	}
}
