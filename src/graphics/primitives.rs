pub fn draw_rect(
  buffer: &mut [u32],
  width: usize,
  height: usize,
  (x, y): (usize, usize),
  w: usize,
  h: usize,
  color: u32,
) {
  for dy in 0..h {
    for dx in 0..w {
      let px = x + dx;
      let py = y + dy;
      if px < width && py < height {
        buffer[py * width + px] = color;
      }
    }
  }
}
