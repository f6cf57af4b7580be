use glam::{IVec2, UVec2};

use crate::error::Result;

pub type Rgb = [u8; 3];

pub const BLACK: Rgb = [0, 0, 0];

/// Drawing target for a frame.
pub trait Canvas {
	/// Drawable area in pixels.
	fn size(&self) -> UVec2;
	fn resize(&mut self, size: UVec2);
	fn clear(&mut self, color: Rgb);
	fn fill_circle(&mut self, center: IVec2, radius: u32, color: Rgb);
	/// Publish everything drawn since the last clear.
	fn present(&mut self) -> Result<()>;
}
