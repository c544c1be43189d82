//! pb-sim: line-oriented satellite simulator.

use std::io::{self, BufRead};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use pb_sim::{logging, Flow, SimConfig, Simulator};

#[derive(Parser, Debug)]
#[command(name = "pb-sim")]
#[command(about = "Satellite simulator with concurrent telemetry monitors or a blocking sequential mode")]
struct Args {
    /// Number of telemetry monitor threads
    #[arg(short, long, default_value_t = 1)]
    monitors: usize,

    /// Base pause between telemetry ticks, in milliseconds
    #[arg(long, default_value_t = 3000)]
    tick_ms: u64,

    /// Maximum extra random pause per tick, in milliseconds
    #[arg(long, default_value_t = 2000)]
    jitter_ms: u64,

    /// Orbit maneuver duration, in seconds
    #[arg(long, default_value_t = 30)]
    maneuver_secs: u64,

    /// Pause before each downlink packet, in milliseconds
    #[arg(long, default_value_t = 2000)]
    downlink_step_ms: u64,

    /// Run ORBIT and DOWNLINK in the foreground, without monitor threads
    #[arg(long)]
    sequential: bool,

    /// Length of one simulated second in sequential mode, in milliseconds
    #[arg(long, default_value_t = 1000)]
    blocking_tick_ms: u64,
}

impl Args {
    fn config(&self) -> SimConfig {
        SimConfig {
            tick: Duration::from_millis(self.tick_ms),
            tick_jitter: Duration::from_millis(self.jitter_ms),
            maneuver: Duration::from_secs(self.maneuver_secs),
            downlink_step: Duration::from_millis(self.downlink_step_ms),
            sequential: self.sequential,
            blocking_tick: Duration::from_millis(self.blocking_tick_ms),
            ..SimConfig::default()
        }
        .with_monitors(self.monitors)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init()?;

    let mut sim = Simulator::start(args.config(), io::stdout())?;
    for line in io::stdin().lock().lines() {
        let line = line.context("failed to read command")?;
        if sim.handle_line(&line)? == Flow::Quit {
            break;
        }
    }

    info!("command loop finished");
    sim.shutdown()?;
    Ok(())
}
