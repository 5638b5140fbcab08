//! Frame-driven bar animation.
//!
//! Targets jump whenever new FFT data lands; current heights chase them at
//! fixed px/ms rates and peak markers trail behind with a much slower
//! decay. The engine is owned by a single task and advanced from a frame
//! clock carrying monotonic nanosecond timestamps; dt is always derived
//! from timestamp deltas, never assumed fixed.

use crate::engine::geometry;
use crate::engine::spectrum::SpectrumMapper;
use crate::engine::{Command, VizConfig};

/// Animation speeds in pixels per millisecond. The peak must fall
/// markedly slower than the bar; that lag is the defining visual.
#[derive(Clone, Copy, Debug)]
pub struct AnimRates {
  pub rise: f32,
  pub fall: f32,
  pub peak_fall: f32,
}

impl Default for AnimRates {
  fn default() -> Self {
    Self {
      rise: 0.9,
      fall: 0.9,
      peak_fall: 0.2,
    }
  }
}

/// The three per-bar arrays bundled together so "exists and consistent"
/// is a single checkable condition. All three always share one length.
pub struct BarState {
  target: Vec<f32>,
  current: Vec<f32>,
  peak: Vec<f32>,
}

impl BarState {
  fn zeroed(len: usize) -> Self {
    Self {
      target: vec![0.0; len],
      current: vec![0.0; len],
      peak: vec![0.0; len],
    }
  }

  pub fn len(&self) -> usize {
    self.current.len()
  }

  pub fn current(&self) -> &[f32] {
    &self.current
  }

  pub fn peak(&self) -> &[f32] {
    &self.peak
  }
}

pub struct AnimationEngine {
  config: VizConfig,
  mapper: SpectrumMapper,
  rates: AnimRates,
  // lazily created on first data, reset on any length mismatch
  bars: Option<BarState>,
  last_tick_nanos: Option<u64>,
  view: (f32, f32),
}

impl AnimationEngine {
  pub fn new(config: VizConfig, rates: AnimRates) -> Self {
    let mapper = SpectrumMapper::new(config.bar_count, config.sensitivity);
    Self {
      config,
      mapper,
      rates,
      bars: None,
      last_tick_nanos: None,
      view: (0.0, 0.0),
    }
  }

  pub fn config(&self) -> &VizConfig {
    &self.config
  }

  pub fn bars(&self) -> Option<&BarState> {
    self.bars.as_ref()
  }

  pub fn set_view(&mut self, width: f32, height: f32) {
    self.view = (width, height);
  }

  /// Apply one command. Configuration is replaced as a whole; a bar-count
  /// change leaves the state arrays to be reset by the next tick or feed.
  pub fn apply(&mut self, cmd: Command) {
    match cmd {
      Command::SetColour(colour) => self.config = self.config.with_colour(colour),
      Command::SetMirror { vert, horiz } => {
        self.config = self.config.with_mirror(vert, horiz);
      }
      Command::SetBarCount(count) => {
        self.config = self.config.with_bar_count(count);
        self.mapper = SpectrumMapper::new(self.config.bar_count, self.config.sensitivity);
      }
      Command::SetOrientation(orientation) => {
        self.config = self.config.with_orientation(orientation);
      }
      Command::SetDirection(direction) => {
        self.config = self.config.with_direction(direction);
      }
      Command::PushFft(fft) => self.feed_fft(&fft),
    }
  }

  /// Absorb one capture buffer as the new target vector. An empty buffer
  /// is the silence signal and zeroes every target.
  pub fn feed_fft(&mut self, fft: &[u8]) {
    let bar_count = self.config.bar_count as usize;
    let stale = self.bars.as_ref().is_none_or(|b| b.len() != bar_count);
    if stale {
      self.bars = Some(BarState::zeroed(bar_count));
    }

    let extent = geometry::max_extent(self.config.orientation, self.view.0, self.view.1);
    if let Some(bars) = self.bars.as_mut() {
      self.mapper.map(fft, &mut bars.target, extent);
    }
  }

  /// Advance one frame. Returns true when any height moved and a repaint
  /// is warranted; the caller keeps ticking either way, since new data
  /// may arrive at any time.
  pub fn tick(&mut self, now_nanos: u64) -> bool {
    let dt_ms = match self.last_tick_nanos {
      Some(prev) => now_nanos.saturating_sub(prev) as f32 / 1_000_000.0,
      None => 0.0,
    };
    self.last_tick_nanos = Some(now_nanos);

    // no data has ever arrived
    let bar_count = self.config.bar_count as usize;
    let Some(bars) = self.bars.as_mut() else {
      return false;
    };

    // bar count changed under us: drop everything to zero before moving
    if bars.len() != bar_count {
      *bars = BarState::zeroed(bar_count);
      return true;
    }

    let mut dirty = false;
    for i in 0..bar_count {
      let target = bars.target[i];

      // bar chases the target, clamped so it never overshoots
      let current = bars.current[i];
      if current < target {
        let next = (current + self.rates.rise * dt_ms).min(target);
        if next != current {
          bars.current[i] = next;
          dirty = true;
        }
      } else if current > target {
        let next = (current - self.rates.fall * dt_ms).max(target);
        if next != current {
          bars.current[i] = next;
          dirty = true;
        }
      }

      let peak = bars.peak[i];
      if target > peak {
        // peak sticks to the bar while it is rising above it
        let next = bars.current[i];
        if next != peak {
          bars.peak[i] = next;
          dirty = true;
        }
      } else {
        // slow decay toward the target, floored at the bar itself
        let next = (peak - self.rates.peak_fall * dt_ms)
          .max(target)
          .max(bars.current[i]);
        if next != peak {
          bars.peak[i] = next;
          dirty = true;
        }
      }
    }

    dirty
  }
}
