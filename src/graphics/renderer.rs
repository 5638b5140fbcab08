use crate::engine::geometry::Rect;
use crate::graphics::primitives;

pub struct Renderer {
  width: usize,
  height: usize,
  buffer: Vec<u32>,
}

impl Renderer {
  pub fn new(width: usize, height: usize) -> Self {
    Self {
      width,
      height,
      buffer: vec![0; width * height],
    }
  }

  pub fn resize(&mut self, width: usize, height: usize) {
    if self.width != width || self.height != height {
      self.width = width;
      self.height = height;
      self.buffer.resize(width * height, 0);
    }
  }

  pub fn clear(&mut self) {
    self.buffer.fill(0x001A1A1A);
  }

  /// Rasterize a float rect from the geometry pass. Degenerate rects are
  /// skipped; the integer rect clips at the buffer edge.
  pub fn fill_rect(&mut self, rect: Rect, color: u32) {
    if rect.w <= 0.0 || rect.h <= 0.0 {
      return;
    }
    let x0 = rect.x.max(0.0).round() as usize;
    let y0 = rect.y.max(0.0).round() as usize;
    let x1 = (rect.x + rect.w).max(0.0).round() as usize;
    let y1 = (rect.y + rect.h).max(0.0).round() as usize;
    if x1 <= x0 || y1 <= y0 {
      return;
    }
    primitives::draw_rect(
      &mut self.buffer,
      self.width,
      self.height,
      (x0, y0),
      x1 - x0,
      y1 - y0,
      color,
    );
  }

  pub fn buffer(&self) -> &[u32] {
    &self.buffer
  }

  pub fn dimensions(&self) -> (usize, usize) {
    (self.width, self.height)
  }
}
