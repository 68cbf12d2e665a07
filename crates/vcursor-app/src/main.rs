//! VCURSOR simulation entry point.
//!
//! Runs two gamepad cursors on a simulated 1920x1080 desktop split between
//! two players and prints one JSON line per player every few frames.
//! Player one drives with the left stick, player two with the right stick.
//! Pass a TOML config path as the first argument or in `VCURSOR_CONFIG`.

mod scenario;

use std::io::Write;
use std::path::Path;

use anyhow::Result;
use vcursor_core::config::VirtualCursorConfig;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    // Resolve config from CLI arg or VCURSOR_CONFIG env var.
    let config = match std::env::args()
        .nth(1)
        .or_else(|| std::env::var("VCURSOR_CONFIG").ok())
    {
        Some(path) => VirtualCursorConfig::from_file(Path::new(&path))?,
        None => {
            log::info!("No config given, using built-in defaults");
            VirtualCursorConfig::default()
        },
    };

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let frames = scenario::run(config, |record| {
        serde_json::to_writer(&mut out, record)?;
        writeln!(out)?;
        Ok(())
    })?;
    out.flush()?;
    log::info!("Simulated {frames} frames");
    Ok(())
}
