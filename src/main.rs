#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

use tracing::info;

use tracing_subscriber::filter::LevelFilter;

mod app;
mod audio;
mod engine;
mod graphics;

use app::App;
use audio::FeedConfig;
use engine::VizConfig;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), anyhow::Error> {
  tracing_subscriber::fmt()
    .with_max_level(LevelFilter::INFO)
    .with_target(false)
    .init();

  // default config...
  let feed_config = FeedConfig {
    fft_size: 1024,
    sample_rate: 48_000.0,
    update_hz: 50,
  };
  let viz_config = VizConfig::new(32, 0x0026A269, 2.0);

  info!("edge overlay visualizer spinning up...");

  let mut app = App::new(feed_config, viz_config)?;
  app.run().await?;

  info!("edge overlay visualizer spinning down...");
  Ok(())
}
