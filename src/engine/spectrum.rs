//! Raw FFT bytes to per-bar target heights.
//!
//! The capture feed hands over interleaved signed-byte (real, imaginary)
//! pairs in ascending frequency order, bin 0 being DC. Bars sit on a
//! log10 frequency axis so low/mid content does not crowd into the first
//! few slots, and an index-dependent gain compensates the natural
//! high-frequency magnitude rolloff.

/// Empirical calibration ceiling for a per-bin squared magnitude.
const MAX_MAGNITUDE: f32 = 25000.0;

pub struct SpectrumMapper {
  bar_count: usize,
  sensitivity: f32,
}

impl SpectrumMapper {
  pub fn new(bar_count: u32, sensitivity: f32) -> Self {
    Self {
      bar_count: bar_count as usize,
      sensitivity,
    }
  }

  /// Fill `targets` from one capture buffer. An empty buffer is the
  /// silence signal and zeroes every target; a buffer too short to hold a
  /// usable bin leaves the previous targets untouched (dropped sample).
  pub fn map(&self, fft: &[u8], targets: &mut [f32], max_extent: f32) {
    debug_assert_eq!(targets.len(), self.bar_count);

    if fft.is_empty() {
      targets.fill(0.0);
      return;
    }

    // drop DC and the mirrored half
    let usable_bins = (fft.len() / 2).saturating_sub(1);
    if usable_bins == 0 {
      return;
    }

    let log_min = 0.0f64; // log10(1)
    let log_max = (usable_bins as f64).log10();
    let log_range = log_max - log_min;
    let bar_count = self.bar_count;

    for (i, target) in targets.iter_mut().enumerate() {
      let log_start = log_min + (log_range / bar_count as f64) * i as f64;
      let log_end = log_min + (log_range / bar_count as f64) * (i + 1) as f64;

      // back to linear bin indices, clamped into [1, usable_bins]
      let start = (10f64.powf(log_start) as usize).max(1);
      let end = (10f64.powf(log_end) as usize).min(usable_bins);

      let avg = average_magnitude(fft, start, end);
      let gain = 1.0 + (i as f32 / bar_count as f32) * self.sensitivity;
      *target = (avg * gain / MAX_MAGNITUDE).min(1.0) * max_extent;
    }
  }
}

/// Mean squared magnitude over the inclusive bin range, truncated at the
/// end of the buffer. An empty range averages to zero.
fn average_magnitude(fft: &[u8], start: usize, end: usize) -> f32 {
  let mut sum = 0.0f64;
  let mut count = 0u32;

  for bin in start..=end {
    let lo = bin * 2;
    let hi = lo + 1;
    if hi >= fft.len() {
      break;
    }
    let re = fft[lo] as i8 as i32;
    let im = fft[hi] as i8 as i32;
    sum += (re * re + im * im) as f64;
    count += 1;
  }

  if count > 0 { (sum / count as f64) as f32 } else { 0.0 }
}
