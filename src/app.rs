use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant};

use minifb::{Key, KeyRepeat, Scale, ScaleMode, Window, WindowOptions};

use tokio::sync::mpsc;
use tokio::task::{self, JoinHandle};

use tracing::{error, info, warn};

use triple_buffer::Output;

use crate::audio::FeedConfig;
use crate::audio::feed::{FftFeed, FftPacket};
use crate::audio::synth::SynthFeed;

use crate::engine::animation::{AnimRates, AnimationEngine};
use crate::engine::{Command, Edge, VizConfig, geometry};

use crate::graphics::renderer::Renderer;

const DEFAULT_WIDTH: usize = 1280;
const DEFAULT_HEIGHT: usize = 160;

/// If the feed stalls for this long, one empty buffer is pushed so the
/// bars decay to rest instead of freezing at their last value.
const FFT_TIMEOUT: Duration = Duration::from_millis(150);

const PALETTE: [u32; 4] = [0x0026A269, 0x003584E4, 0x00E01B24, 0x00F5C211];

pub struct App {
  window: Window,
  renderer: Renderer,
  engine: AnimationEngine,
  fft_rx: Output<FftPacket>,
  cmd_tx: mpsc::Sender<Command>,
  cmd_rx: mpsc::Receiver<Command>,
  feed_handle: Option<JoinHandle<()>>,
  stop: Arc<AtomicBool>,
  // watchdog
  last_seq: u64,
  last_fft: Option<Instant>,
  silenced: bool,
  // user-facing placement state, folded into commands
  edge: Edge,
  user_mirror_vert: bool,
  user_mirror_horiz: bool,
  palette_index: usize,
}

impl App {
  pub fn new(feed_config: FeedConfig, viz_config: VizConfig) -> Result<Self, anyhow::Error> {
    // create window
    let window_options = WindowOptions {
      resize: true,
      scale: Scale::X1,
      scale_mode: ScaleMode::Stretch,
      ..Default::default()
    };
    let window = Window::new("a verge", DEFAULT_WIDTH, DEFAULT_HEIGHT, window_options)?;

    // spawn the capture feed...
    let stop = Arc::new(AtomicBool::new(false));
    let feed = SynthFeed::new(feed_config, Arc::clone(&stop));
    let (fft_tx, fft_rx) = triple_buffer::triple_buffer(&FftPacket::default());
    let feed_handle = tokio::spawn(async move {
      if let Err(e) = feed.run(fft_tx).await {
        error!("fft feed error - {}", e);
      }
    });

    let (cmd_tx, cmd_rx) = mpsc::channel(64);
    let renderer = Renderer::new(DEFAULT_WIDTH, DEFAULT_HEIGHT);
    let engine = AnimationEngine::new(viz_config, AnimRates::default());

    Ok(Self {
      window,
      renderer,
      engine,
      fft_rx,
      cmd_tx,
      cmd_rx,
      feed_handle: Some(feed_handle),
      stop,
      last_seq: 0,
      last_fft: None,
      silenced: false,
      edge: Edge::Bottom,
      user_mirror_vert: false,
      user_mirror_horiz: false,
      palette_index: 0,
    })
  }

  pub async fn run(&mut self) -> Result<(), anyhow::Error> {
    self.window.set_target_fps(60);
    let start = Instant::now();

    info!("c: colour  v/h: mirrors  up/down: bars  e: edge");

    while self.window.is_open() && !self.window.is_key_down(Key::Escape) {
      // observe current window size...
      let (width, height) = self.window.get_size();
      let resized = (width, height) != self.renderer.dimensions();
      self.renderer.resize(width, height);
      self.engine.set_view(width as f32, height as f32);

      // translate key presses into commands...
      self.handle_input();

      // apply queued commands between ticks, on this task only
      while let Ok(cmd) = self.cmd_rx.try_recv() {
        self.engine.apply(cmd);
      }

      // absorb the newest capture frame, if one arrived
      self.pump_fft();

      // advance the animation on the frame clock
      let now_nanos = start.elapsed().as_nanos() as u64;
      if self.engine.tick(now_nanos) || resized {
        self.render_frame();
      }

      self
        .window
        .update_with_buffer(self.renderer.buffer(), width, height)?;
      // yield to the feed task
      task::yield_now().await;
    }

    Ok(())
  }

  fn pump_fft(&mut self) {
    let packet = self.fft_rx.read();
    if packet.seq != self.last_seq {
      self.last_seq = packet.seq;
      self.engine.apply(Command::PushFft(packet.fft.clone()));
      self.last_fft = Some(Instant::now());
      self.silenced = false;
    } else if !self.silenced && self.last_fft.is_some_and(|t| t.elapsed() > FFT_TIMEOUT) {
      // watchdog: decay to rest, once per stall
      self.engine.apply(Command::PushFft(Vec::new()));
      self.silenced = true;
    }
  }

  fn render_frame(&mut self) {
    self.renderer.clear();

    let Some(bars) = self.engine.bars() else {
      return;
    };
    let config = self.engine.config();
    let (width, height) = self.renderer.dimensions();
    let (w, h) = (width as f32, height as f32);

    for slot in 0..bars.len() {
      let bin = geometry::bin_for_slot(bars.len(), config.mirror_horiz, slot);
      let geo =
        geometry::slot_geometry(config, w, h, slot, bars.current()[bin], bars.peak()[bin]);
      self.renderer.fill_rect(geo.bar, config.colour);
      self.renderer.fill_rect(geo.peak, config.peak_colour);
    }
  }

  fn handle_input(&mut self) {
    let mut commands = Vec::new();

    if self.window.is_key_pressed(Key::C, KeyRepeat::No) {
      self.palette_index = (self.palette_index + 1) % PALETTE.len();
      commands.push(Command::SetColour(PALETTE[self.palette_index]));
    }
    if self.window.is_key_pressed(Key::V, KeyRepeat::No) {
      self.user_mirror_vert = !self.user_mirror_vert;
      commands.push(self.mirror_command());
    }
    if self.window.is_key_pressed(Key::H, KeyRepeat::No) {
      self.user_mirror_horiz = !self.user_mirror_horiz;
      commands.push(self.mirror_command());
    }
    if self.window.is_key_pressed(Key::Up, KeyRepeat::Yes) {
      let count = self.engine.config().bar_count + 4;
      commands.push(Command::SetBarCount(count));
    }
    if self.window.is_key_pressed(Key::Down, KeyRepeat::Yes) {
      let count = self.engine.config().bar_count.saturating_sub(4);
      commands.push(Command::SetBarCount(count));
    }
    if self.window.is_key_pressed(Key::E, KeyRepeat::No) {
      self.edge = self.edge.next();
      let (orientation, direction) = self.edge.placement();
      info!("overlay edge - {:?}", self.edge);
      commands.push(Command::SetOrientation(orientation));
      commands.push(Command::SetDirection(direction));
      // the right edge carries a base horizontal mirror
      commands.push(self.mirror_command());
    }

    for cmd in commands {
      if self.cmd_tx.try_send(cmd).is_err() {
        warn!("command channel full, dropping input");
      }
    }
  }

  fn mirror_command(&self) -> Command {
    Command::SetMirror {
      vert: self.user_mirror_vert,
      horiz: self.edge.effective_mirror_horiz(self.user_mirror_horiz),
    }
  }
}

impl Drop for App {
  fn drop(&mut self) {
    self.stop.store(true, Ordering::Relaxed);
    if let Some(handle) = self.feed_handle.take() {
      handle.abort();
    }
  }
}
