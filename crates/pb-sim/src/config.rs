use std::time::Duration;

/// Timing and sizing for a simulator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// Number of telemetry monitor threads (at least one).
    pub monitors: usize,
    /// Minimum pause between telemetry ticks.
    pub tick: Duration,
    /// Extra random pause added to each tick, uniformly in `[0, tick_jitter)`.
    pub tick_jitter: Duration,
    /// How long an orbit maneuver keeps the thrusters on.
    pub maneuver: Duration,
    /// Pause before each downlink packet.
    pub downlink_step: Duration,
    /// Run ORBIT and DOWNLINK on the command loop, without monitor threads.
    pub sequential: bool,
    /// Real time per simulated second of blocking work in sequential mode.
    pub blocking_tick: Duration,
}

impl SimConfig {
    /// Clamp the monitor count to at least one.
    pub fn with_monitors(mut self, monitors: usize) -> Self {
        self.monitors = monitors.max(1);
        self
    }

    /// Title line of the status panel.
    pub fn banner(&self) -> &'static str {
        if self.sequential {
            "SATELLITE CONTROL - SEQUENTIAL"
        } else {
            "SATELLITE CONTROL - MULTITASK"
        }
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            monitors: 1,
            tick: Duration::from_secs(3),
            tick_jitter: Duration::from_secs(2),
            maneuver: Duration::from_secs(30),
            downlink_step: Duration::from_secs(2),
            sequential: false,
            blocking_tick: Duration::from_secs(1),
        }
    }
}
