//! Synthetic capture feed.
//!
//! Platform audio capture is a collaborator behind the `FftFeed` trait;
//! this feed stands in for it so the overlay runs anywhere: a slowly
//! sweeping sine over a small noise floor, hann-windowed, through a real
//! FFT and quantized to the interleaved signed-byte wire format. It also
//! rests for a few hundred ms now and then, which is what lets the
//! silence watchdog show its decay-to-rest behaviour live.

use std::f32::consts::TAU;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use apodize::hanning_iter;

use num_complex::Complex;

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use realfft::RealFftPlanner;

use tokio::time;

use tracing::info;

use triple_buffer::Input;

use crate::audio::FeedConfig;
use crate::audio::feed::{FftFeed, FftPacket};

// sweep bounds, log-spaced like the bars themselves
const SWEEP_LOW_HZ: f32 = 60.0;
const SWEEP_HIGH_HZ: f32 = 8_000.0;
// full up-and-down sweep every ~20s at 50 updates/s
const SWEEP_STEP: f32 = 0.001;

const TONE_AMPLITUDE: f32 = 0.6;
const NOISE_AMPLITUDE: f32 = 0.02;

pub struct SynthFeed {
  config: FeedConfig,
  stop: Arc<AtomicBool>,
}

impl SynthFeed {
  pub fn new(config: FeedConfig, stop: Arc<AtomicBool>) -> Self {
    Self { config, stop }
  }
}

impl FftFeed for SynthFeed {
  type Error = anyhow::Error;

  async fn run(self, mut tx: Input<FftPacket>) -> Result<(), Self::Error> {
    let fft_size = self.config.fft_size;

    let mut planner = RealFftPlanner::<f32>::new();
    let r2c = planner.plan_fft_forward(fft_size);
    let window: Vec<f32> = hanning_iter(fft_size).map(|v| v as f32).collect();

    // allocate fft buffers once
    let mut input = r2c.make_input_vec();
    let mut output = r2c.make_output_vec();
    let mut scratch = r2c.make_scratch_vec();

    let mut interval = time::interval(Duration::from_millis(
      1000 / self.config.update_hz.max(1) as u64,
    ));

    // the thread-local rng is !Send and this future crosses threads
    let mut rng = SmallRng::from_os_rng();
    let mut phase = 0.0f32;
    let mut sweep = 0.0f32;
    let mut seq = 0u64;
    let mut rest_frames = 0u32;

    info!("synthetic fft feed started...");

    while !self.stop.load(Ordering::Relaxed) {
      interval.tick().await;

      // resting: deliver nothing and let the watchdog clear the bars
      if rest_frames > 0 {
        rest_frames -= 1;
        continue;
      }
      if rng.random_range(0..600) == 0 {
        rest_frames = self.config.update_hz / 2;
        continue;
      }

      // log-sweep the tone up and back down
      sweep = (sweep + SWEEP_STEP) % 1.0;
      let frac = triangle(sweep);
      let freq = SWEEP_LOW_HZ * (SWEEP_HIGH_HZ / SWEEP_LOW_HZ).powf(frac);
      let step = freq * TAU / self.config.sample_rate;

      for (sample, w) in input.iter_mut().zip(&window) {
        phase = (phase + step) % TAU;
        let noise: f32 = rng.random_range(-NOISE_AMPLITUDE..NOISE_AMPLITUDE);
        *sample = (phase.sin() * TONE_AMPLITUDE + noise) * w;
      }

      r2c
        .process_with_scratch(&mut input, &mut output, &mut scratch)
        .map_err(|e| anyhow::anyhow!("fft forward failed: {e}"))?;

      seq += 1;
      tx.write(FftPacket {
        fft: quantize(&output[..fft_size / 2], fft_size),
        seq,
      });
    }

    info!("synthetic fft feed stopped...");
    Ok(())
  }
}

/// Symmetric ramp 0 -> 1 -> 0 over the unit interval.
fn triangle(t: f32) -> f32 {
  1.0 - (2.0 * t - 1.0).abs()
}

/// Pack complex bins into interleaved signed bytes. The scale keeps a
/// full-scale windowed tone just inside the byte range for a 1024-point
/// transform; larger components saturate instead of wrapping.
fn quantize(bins: &[Complex<f32>], fft_size: usize) -> Vec<u8> {
  let scale = 820.0 / fft_size as f32;
  let mut bytes = Vec::with_capacity(bins.len() * 2);
  for bin in bins {
    bytes.push((bin.re * scale).clamp(-128.0, 127.0) as i8 as u8);
    bytes.push((bin.im * scale).clamp(-128.0, 127.0) as i8 as u8);
  }
  bytes
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn quantize_interleaves_and_saturates() {
    let bins = [
      Complex { re: 0.0, im: 0.0 },
      Complex { re: 100.0, im: -100.0 },
      Complex { re: 1.0e6, im: -1.0e6 },
    ];
    let bytes = quantize(&bins, 1024);
    assert_eq!(bytes.len(), 6);
    assert_eq!(bytes[0], 0);
    assert_eq!(bytes[1], 0);
    // 100 * 820/1024 = 80.07
    assert_eq!(bytes[2] as i8, 80);
    assert_eq!(bytes[3] as i8, -80);
    // saturation, no wraparound
    assert_eq!(bytes[4] as i8, 127);
    assert_eq!(bytes[5] as i8, -128);
  }

  #[test]
  fn run_future_can_cross_threads() {
    // the feed is spawned onto the runtime, so its future must be Send
    fn assert_send<T: Send>(_: &T) {}

    let config = FeedConfig {
      fft_size: 1024,
      sample_rate: 48_000.0,
      update_hz: 50,
    };
    let feed = SynthFeed::new(config, Arc::new(AtomicBool::new(true)));
    let (tx, _rx) = triple_buffer::triple_buffer(&FftPacket::default());
    assert_send(&feed.run(tx));
  }

  #[test]
  fn triangle_sweep_is_symmetric() {
    assert_eq!(triangle(0.0), 0.0);
    assert_eq!(triangle(0.5), 1.0);
    assert!((triangle(0.25) - 0.5).abs() < 1e-6);
    assert!((triangle(0.75) - 0.5).abs() < 1e-6);
  }
}
