use std::f32::consts::TAU;

use glam::{IVec2, UVec2, Vec2};
use rand::Rng;

use crate::canvas::{Canvas, Rgb};

pub const LAYERS: u32 = 5;
const MIN_WIDTH: i32 = 1;
const MAX_WIDTH: i32 = 5;
const MIN_RAYS: u32 = 5;
const MAX_RAYS: u32 = 10;
const SCALE_STEP: u32 = 2;
/// Ticks between two dot width decrements.
const WIDTH_CYCLE: u32 = 50;

/// A single burst: rings of dots flying out from a fixed point.
#[derive(Debug, Clone, PartialEq)]
pub struct Firework {
	position: UVec2,
	dot_width: i32,
	rays: u32,
	angle_step: f32,
	color: Rgb,
	scale: u32,
}

impl Firework {
	/// Random burst somewhere inside `[0, bounds.x] x [0, bounds.y]`.
	pub fn new<R: Rng>(rng: &mut R, bounds: UVec2) -> Self {
		let rays = rng.random_range(MIN_RAYS..=MAX_RAYS);
		Self {
			position: UVec2::new(rng.random_range(0..=bounds.x), rng.random_range(0..=bounds.y)),
			dot_width: rng.random_range(MIN_WIDTH..=MAX_WIDTH),
			rays,
			angle_step: TAU / rays as f32,
			color: [rng.random(), rng.random(), rng.random()],
			scale: 0,
		}
	}

	pub fn position(&self) -> UVec2 {
		self.position
	}
	pub fn dot_width(&self) -> i32 {
		self.dot_width
	}
	pub fn rays(&self) -> u32 {
		self.rays
	}
	#[cfg(test)]
	pub fn scale(&self) -> u32 {
		self.scale
	}

	pub fn is_finished(&self) -> bool {
		self.dot_width <= 0
	}

	pub fn tick(&mut self) {
		self.scale += SCALE_STEP;
		if self.scale % (SCALE_STEP * WIDTH_CYCLE) == 0 {
			self.dot_width -= 1;
		}
	}

	/// Angle of `ray` within `layer`. Odd layers sit half a ray step off the even ones.
	fn ray_angle(&self, ray: u32, layer: u32) -> f32 {
		self.angle_step * (ray as f32 + (layer % 2) as f32 * 0.5)
	}

	fn dot_center(&self, angle: f32, layer: u32) -> IVec2 {
		let coefficient = (layer * self.scale) as f32 / LAYERS as f32;
		let (sin, cos) = angle.sin_cos();
		let center = self.position.as_vec2() + Vec2::new(cos, sin) * coefficient;
		center.as_ivec2()
	}

	pub fn render(&self, canvas: &mut impl Canvas) {
		if self.is_finished() {
			return;
		}
		let radius = self.dot_width as u32;
		for layer in 1..=LAYERS {
			for ray in 0..self.rays {
				let center = self.dot_center(self.ray_angle(ray, layer), layer);
				canvas.fill_circle(center, radius, self.color);
			}
		}
	}
}
