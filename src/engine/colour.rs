//! 0xRRGGBB colour helpers for the bar and peak paints.

/// Lightness added to the bar colour to derive the peak colour.
const PEAK_LIGHTEN: f32 = 0.15;

/// Derive the peak paint colour: same hue/saturation, lightness bumped
/// by a fixed delta and clamped at white.
pub fn lighter(colour: u32) -> u32 {
  let (h, s, l) = rgb_to_hsl(colour);
  hsl_to_rgb(h, s, (l + PEAK_LIGHTEN).min(1.0))
}

pub fn rgb_to_hsl(colour: u32) -> (f32, f32, f32) {
  let r = ((colour >> 16) & 0xFF) as f32 / 255.0;
  let g = ((colour >> 8) & 0xFF) as f32 / 255.0;
  let b = (colour & 0xFF) as f32 / 255.0;

  let max = r.max(g).max(b);
  let min = r.min(g).min(b);
  let l = (max + min) / 2.0;

  if max == min {
    // achromatic
    return (0.0, 0.0, l);
  }

  let d = max - min;
  let s = if l > 0.5 {
    d / (2.0 - max - min)
  } else {
    d / (max + min)
  };

  // hue as a fraction of a full turn
  let h = if max == r {
    ((g - b) / d).rem_euclid(6.0)
  } else if max == g {
    (b - r) / d + 2.0
  } else {
    (r - g) / d + 4.0
  } / 6.0;

  (h, s, l)
}

pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> u32 {
  let (r, g, b) = if s == 0.0 {
    (l, l, l)
  } else {
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    (
      hue_channel(p, q, h + 1.0 / 3.0),
      hue_channel(p, q, h),
      hue_channel(p, q, h - 1.0 / 3.0),
    )
  };

  let r = (r * 255.0).round() as u32;
  let g = (g * 255.0).round() as u32;
  let b = (b * 255.0).round() as u32;
  (r << 16) | (g << 8) | b
}

fn hue_channel(p: f32, q: f32, t: f32) -> f32 {
  let t = t.rem_euclid(1.0);
  if t < 1.0 / 6.0 {
    p + (q - p) * 6.0 * t
  } else if t < 1.0 / 2.0 {
    q
  } else if t < 2.0 / 3.0 {
    p + (q - p) * (2.0 / 3.0 - t) * 6.0
  } else {
    p
  }
}
