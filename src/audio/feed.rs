use triple_buffer::Input;

/// One capture frame: interleaved signed-byte (real, imaginary) FFT pairs
/// in ascending frequency order, bin 0 being DC. `seq` advances with every
/// write so a last-write-wins reader can tell fresh data from stale.
#[derive(Clone, Default)]
pub struct FftPacket {
  pub fft: Vec<u8>,
  pub seq: u64,
}

pub trait FftFeed: Send {
  type Error;

  async fn run(self, tx: Input<FftPacket>) -> Result<(), Self::Error>;
}
