pub mod feed;
pub mod synth;

#[derive(Clone)]
pub struct FeedConfig {
  pub fft_size: usize,
  pub sample_rate: f32,
  // capture frames delivered per second
  pub update_hz: u32,
}
