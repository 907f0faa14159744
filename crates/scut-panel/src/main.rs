//! Silence cutter bridge binary.
//!
//! Reads one `function("<json>")` expression per stdin line and writes one
//! JSON reply per stdout line. Logs go to stderr.

use std::io::{self, BufRead, Write};

use anyhow::Context;
use tracing::{debug, info};

use scut_panel::logging::init_tracing;
use scut_panel::{Bridge, BridgeConfig, SimulatedTimeline};

fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = BridgeConfig::from_env();
    init_tracing(config.log_json);

    info!("Starting scut-bridge");
    info!("Bridge config: {:?}", config);

    let timeline = SimulatedTimeline::new(config.demo.duration_secs, config.demo.fps)
        .with_audio_tracks(&vec![1; config.demo.audio_tracks]);
    let mut bridge = Bridge::new(timeline, config.detection);
    info!(methods = ?bridge.methods(), "Bridge ready");

    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();
    let mut handled = 0usize;

    for line in stdin.lock().lines() {
        let line = line.context("failed to read from stdin")?;
        if line.trim().is_empty() {
            continue;
        }

        let reply = bridge.evaluate(&line);
        writeln!(stdout, "{}", reply).context("failed to write reply")?;
        stdout.flush().context("failed to flush stdout")?;
        handled += 1;
        debug!(
            remaining_secs = bridge.host().duration(),
            edits = bridge.host().edits().len(),
            "Timeline state"
        );
    }

    info!(handled, "Input closed, shutting down");
    Ok(())
}
