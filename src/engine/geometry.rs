//! Screen-rectangle layout for bars and peak bands.
//!
//! Pure functions over the 2x2x2x2 space of orientation, draw direction
//! and the two mirror flags. Applied at render time only; the animation
//! tick never touches geometry.

use crate::engine::{DrawDirection, Orientation, VizConfig};

/// Thickness of the trailing peak marker band.
pub const PEAK_BAND_PX: f32 = 4.0;

/// Fraction of a slot's thickness given up to the gap, split evenly
/// between both sides.
const BAR_PADDING_FRAC: f32 = 0.1;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rect {
  pub x: f32,
  pub y: f32,
  pub w: f32,
  pub h: f32,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BarGeometry {
  pub bar: Rect,
  pub peak: Rect,
}

/// Pixel extent along the growth axis: view height for vertical bars,
/// view width for horizontal ones.
pub fn max_extent(orientation: Orientation, view_w: f32, view_h: f32) -> f32 {
  match orientation {
    Orientation::Vertical => view_h,
    Orientation::Horizontal => view_w,
  }
}

/// Which frequency bin the physical slot draws. A horizontal mirror flips
/// the array axis without touching the underlying data.
pub fn bin_for_slot(bar_count: usize, mirror_horiz: bool, slot: usize) -> usize {
  if mirror_horiz { bar_count - 1 - slot } else { slot }
}

/// Rectangles for one physical slot given its animated bar and peak
/// heights. Heights are already bounded to the view extent by the mapper.
pub fn slot_geometry(
  config: &VizConfig,
  view_w: f32,
  view_h: f32,
  slot: usize,
  bar_h: f32,
  peak_h: f32,
) -> BarGeometry {
  let bar_count = config.bar_count as f32;

  match config.orientation {
    Orientation::Vertical => {
      let thickness = view_w / bar_count;
      let padding = thickness * BAR_PADDING_FRAC;
      let x = slot as f32 * thickness + padding / 2.0;
      let w = thickness - padding;

      let (bar, peak) = if config.mirror_vert {
        // grow from the top edge down
        let bar = Rect { x, y: 0.0, w, h: bar_h };
        let peak_top = (peak_h - PEAK_BAND_PX).max(0.0);
        let peak = Rect {
          x,
          y: peak_top,
          w,
          h: peak_h - peak_top,
        };
        (bar, peak)
      } else {
        // grow from the bottom edge up
        let bar = Rect {
          x,
          y: view_h - bar_h,
          w,
          h: bar_h,
        };
        let peak_top = view_h - peak_h;
        let peak_bottom = (peak_top + PEAK_BAND_PX).min(view_h);
        let peak = Rect {
          x,
          y: peak_top,
          w,
          h: peak_bottom - peak_top,
        };
        (bar, peak)
      };
      BarGeometry { bar, peak }
    }
    Orientation::Horizontal => {
      let thickness = view_h / bar_count;
      let padding = thickness * BAR_PADDING_FRAC;
      let y = slot as f32 * thickness + padding / 2.0;
      let h = thickness - padding;

      // once the frame is rotated, the vertical mirror flips the sweep
      let direction = if config.mirror_vert {
        config.draw_direction.flipped()
      } else {
        config.draw_direction
      };

      let (bar, peak) = match direction {
        DrawDirection::LeftToRight => {
          let bar = Rect { x: 0.0, y, w: bar_h, h };
          let peak_left = (peak_h - PEAK_BAND_PX).max(0.0);
          let peak = Rect {
            x: peak_left,
            y,
            w: peak_h - peak_left,
            h,
          };
          (bar, peak)
        }
        DrawDirection::RightToLeft => {
          let bar = Rect {
            x: view_w - bar_h,
            y,
            w: bar_h,
            h,
          };
          let peak_left = view_w - peak_h;
          let peak_right = (peak_left + PEAK_BAND_PX).min(view_w);
          let peak = Rect {
            x: peak_left,
            y,
            w: peak_right - peak_left,
            h,
          };
          (bar, peak)
        }
      };
      BarGeometry { bar, peak }
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn config(orientation: Orientation, direction: DrawDirection) -> VizConfig {
    let mut config = VizConfig::new(10, 0x0026A269, 2.0);
    config.orientation = orientation;
    config.draw_direction = direction;
    config
  }

  #[test]
  fn extent_follows_orientation() {
    assert_eq!(max_extent(Orientation::Vertical, 800.0, 48.0), 48.0);
    assert_eq!(max_extent(Orientation::Horizontal, 48.0, 800.0), 48.0);
  }

  #[test]
  fn mirror_flips_the_bin_index() {
    for slot in 0..10 {
      assert_eq!(bin_for_slot(10, false, slot), slot);
      assert_eq!(bin_for_slot(10, true, slot), 9 - slot);
    }
  }

  #[test]
  fn vertical_bars_grow_from_the_bottom() {
    let config = config(Orientation::Vertical, DrawDirection::LeftToRight);
    let geo = slot_geometry(&config, 100.0, 50.0, 0, 20.0, 30.0);

    // slot thickness 10, 10% padding split on both sides
    assert_eq!(geo.bar.x, 0.5);
    assert_eq!(geo.bar.w, 9.0);
    assert_eq!(geo.bar.y, 30.0);
    assert_eq!(geo.bar.h, 20.0);
    // peak band sits at the peak height on the growing side
    assert_eq!(geo.peak.y, 20.0);
    assert_eq!(geo.peak.h, PEAK_BAND_PX);
  }

  #[test]
  fn vertical_mirror_grows_from_the_top() {
    let mut config = config(Orientation::Vertical, DrawDirection::LeftToRight);
    config.mirror_vert = true;
    let geo = slot_geometry(&config, 100.0, 50.0, 3, 20.0, 30.0);

    assert_eq!(geo.bar.y, 0.0);
    assert_eq!(geo.bar.h, 20.0);
    assert_eq!(geo.peak.y, 26.0);
    assert_eq!(geo.peak.h, PEAK_BAND_PX);
  }

  #[test]
  fn peak_band_clips_at_the_view_edge() {
    let config_plain = config(Orientation::Vertical, DrawDirection::LeftToRight);
    // peak lower than the band thickness: the band clips at the bottom
    let geo = slot_geometry(&config_plain, 100.0, 50.0, 0, 0.0, 2.0);
    assert_eq!(geo.peak.y, 48.0);
    assert_eq!(geo.peak.h, 2.0);

    let mut config_mirrored = config_plain.clone();
    config_mirrored.mirror_vert = true;
    let geo = slot_geometry(&config_mirrored, 100.0, 50.0, 0, 0.0, 2.0);
    assert_eq!(geo.peak.y, 0.0);
    assert_eq!(geo.peak.h, 2.0);
  }

  #[test]
  fn horizontal_bars_sweep_left_to_right() {
    let config = config(Orientation::Horizontal, DrawDirection::LeftToRight);
    let geo = slot_geometry(&config, 50.0, 100.0, 2, 20.0, 30.0);

    assert_eq!(geo.bar.x, 0.0);
    assert_eq!(geo.bar.w, 20.0);
    assert_eq!(geo.bar.y, 20.5);
    assert_eq!(geo.bar.h, 9.0);
    assert_eq!(geo.peak.x, 26.0);
    assert_eq!(geo.peak.w, PEAK_BAND_PX);
  }

  #[test]
  fn horizontal_bars_sweep_right_to_left() {
    let config = config(Orientation::Horizontal, DrawDirection::RightToLeft);
    let geo = slot_geometry(&config, 50.0, 100.0, 2, 20.0, 30.0);

    assert_eq!(geo.bar.x, 30.0);
    assert_eq!(geo.bar.w, 20.0);
    assert_eq!(geo.peak.x, 20.0);
    assert_eq!(geo.peak.w, PEAK_BAND_PX);
  }

  #[test]
  fn vertical_mirror_flips_the_horizontal_sweep() {
    let mut ltr = config(Orientation::Horizontal, DrawDirection::LeftToRight);
    ltr.mirror_vert = true;
    let rtl = config(Orientation::Horizontal, DrawDirection::RightToLeft);

    let a = slot_geometry(&ltr, 50.0, 100.0, 2, 20.0, 30.0);
    let b = slot_geometry(&rtl, 50.0, 100.0, 2, 20.0, 30.0);
    assert_eq!(a, b);
  }
}
