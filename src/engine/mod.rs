pub mod animation;
pub mod colour;
pub mod geometry;
pub mod spectrum;

pub const MIN_BAR_COUNT: u32 = 6;
pub const MAX_BAR_COUNT: u32 = 100;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Orientation {
  Vertical,
  Horizontal,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DrawDirection {
  LeftToRight,
  RightToLeft,
}

impl DrawDirection {
  pub fn flipped(self) -> Self {
    match self {
      DrawDirection::LeftToRight => DrawDirection::RightToLeft,
      DrawDirection::RightToLeft => DrawDirection::LeftToRight,
    }
  }
}

/// Screen edge the overlay strip sits on. Placement is a pure function of
/// the edge; switching edges only changes geometry inputs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Edge {
  Bottom,
  Right,
  Top,
  Left,
}

impl Edge {
  pub fn placement(self) -> (Orientation, DrawDirection) {
    match self {
      Edge::Top | Edge::Bottom => (Orientation::Vertical, DrawDirection::LeftToRight),
      Edge::Left => (Orientation::Horizontal, DrawDirection::LeftToRight),
      Edge::Right => (Orientation::Horizontal, DrawDirection::RightToLeft),
    }
  }

  /// The right edge reads bottom-to-top once rotated, so it carries a base
  /// horizontal mirror that the user preference is xor'd against.
  pub fn base_mirror_horiz(self) -> bool {
    matches!(self, Edge::Right)
  }

  pub fn effective_mirror_horiz(self, user_pref: bool) -> bool {
    self.base_mirror_horiz() ^ user_pref
  }

  pub fn next(self) -> Self {
    match self {
      Edge::Bottom => Edge::Right,
      Edge::Right => Edge::Top,
      Edge::Top => Edge::Left,
      Edge::Left => Edge::Bottom,
    }
  }
}

/// Immutable per-session configuration, replaced as a whole on change.
#[derive(Clone, Debug)]
pub struct VizConfig {
  pub bar_count: u32,
  pub orientation: Orientation,
  pub draw_direction: DrawDirection,
  pub mirror_vert: bool,
  pub mirror_horiz: bool,
  pub colour: u32,
  // always derived from colour, never set directly
  pub peak_colour: u32,
  pub sensitivity: f32,
}

impl VizConfig {
  pub fn new(bar_count: u32, colour: u32, sensitivity: f32) -> Self {
    Self {
      bar_count: bar_count.clamp(MIN_BAR_COUNT, MAX_BAR_COUNT),
      orientation: Orientation::Vertical,
      draw_direction: DrawDirection::LeftToRight,
      mirror_vert: false,
      mirror_horiz: false,
      colour,
      peak_colour: colour::lighter(colour),
      sensitivity,
    }
  }

  pub fn with_colour(&self, colour: u32) -> Self {
    Self {
      colour,
      peak_colour: colour::lighter(colour),
      ..self.clone()
    }
  }

  pub fn with_mirror(&self, vert: bool, horiz: bool) -> Self {
    Self {
      mirror_vert: vert,
      mirror_horiz: horiz,
      ..self.clone()
    }
  }

  pub fn with_bar_count(&self, bar_count: u32) -> Self {
    Self {
      bar_count: bar_count.clamp(MIN_BAR_COUNT, MAX_BAR_COUNT),
      ..self.clone()
    }
  }

  pub fn with_orientation(&self, orientation: Orientation) -> Self {
    Self {
      orientation,
      ..self.clone()
    }
  }

  pub fn with_direction(&self, draw_direction: DrawDirection) -> Self {
    Self {
      draw_direction,
      ..self.clone()
    }
  }
}

/// Commands delivered to the engine; last-write-wins per field, applied
/// between ticks on the owning task.
#[derive(Clone, Debug)]
pub enum Command {
  SetColour(u32),
  SetMirror { vert: bool, horiz: bool },
  SetBarCount(u32),
  SetOrientation(Orientation),
  SetDirection(DrawDirection),
  PushFft(Vec<u8>),
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn bar_count_is_clamped() {
    assert_eq!(VizConfig::new(2, 0, 2.0).bar_count, MIN_BAR_COUNT);
    assert_eq!(VizConfig::new(400, 0, 2.0).bar_count, MAX_BAR_COUNT);
    let config = VizConfig::new(32, 0, 2.0);
    assert_eq!(config.with_bar_count(3).bar_count, MIN_BAR_COUNT);
    assert_eq!(config.with_bar_count(64).bar_count, 64);
  }

  #[test]
  fn peak_colour_tracks_colour() {
    let config = VizConfig::new(32, 0x0026A269, 2.0);
    assert_eq!(config.peak_colour, colour::lighter(0x0026A269));
    let recoloured = config.with_colour(0x003584E4);
    assert_eq!(recoloured.peak_colour, colour::lighter(0x003584E4));
  }

  #[test]
  fn edge_placement_mapping() {
    assert_eq!(
      Edge::Bottom.placement(),
      (Orientation::Vertical, DrawDirection::LeftToRight)
    );
    assert_eq!(
      Edge::Top.placement(),
      (Orientation::Vertical, DrawDirection::LeftToRight)
    );
    assert_eq!(
      Edge::Left.placement(),
      (Orientation::Horizontal, DrawDirection::LeftToRight)
    );
    assert_eq!(
      Edge::Right.placement(),
      (Orientation::Horizontal, DrawDirection::RightToLeft)
    );
  }

  #[test]
  fn right_edge_mirror_xor() {
    // base mirror only on the right edge, user preference flips it
    assert!(Edge::Right.effective_mirror_horiz(false));
    assert!(!Edge::Right.effective_mirror_horiz(true));
    assert!(!Edge::Bottom.effective_mirror_horiz(false));
    assert!(Edge::Bottom.effective_mirror_horiz(true));
  }

  #[test]
  fn edge_cycle_visits_all_edges() {
    let mut edge = Edge::Bottom;
    let mut seen = Vec::new();
    for _ in 0..4 {
      seen.push(edge);
      edge = edge.next();
    }
    assert_eq!(edge, Edge::Bottom);
    assert_eq!(seen.len(), 4);
  }
}
