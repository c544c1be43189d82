// Bodies of the simulator's background threads.
//
// Every task talks to the console only through the output channel and
// stops at its next wait once the shutdown channel disconnects. The
// `*_blocking` variants run on the command loop itself in sequential mode.

use std::time::Duration;

use crossbeam::channel::{Receiver, RecvTimeoutError, Sender};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::event::{assess, Event, Level, Output, Source};
use crate::state::{SharedState, Transition};

#[derive(Debug, Clone)]
pub(crate) struct TaskContext {
    pub(crate) state: SharedState,
    pub(crate) out: Sender<Output>,
    pub(crate) shutdown: Receiver<()>,
}

impl TaskContext {
    /// Sleep for `d` unless shutdown is signalled first. Returns true on shutdown.
    fn wait(&self, d: Duration) -> bool {
        !matches!(self.shutdown.recv_timeout(d), Err(RecvTimeoutError::Timeout))
    }

    fn notice(&self, text: String) -> bool {
        self.out.send(Output::Notice(text)).is_ok()
    }

    /// Returns false once the writer is gone.
    fn emit(&self, source: Source, level: Level, message: impl Into<String>) -> bool {
        self.out
            .send(Output::Event(Event::new(source, level, message)))
            .is_ok()
    }
}

pub(crate) fn monitor(ctx: TaskContext, id: usize, tick: Duration, jitter: Duration) {
    let mut rng = StdRng::from_entropy();
    loop {
        let transition = Transition::Telemetry {
            drain: rng.gen_ratio(1, 5),
            heat: rng.gen_bool(0.5),
        };
        let snap = ctx.state.apply(transition);
        if let Some(event) = assess(id, &snap) {
            if ctx.out.send(Output::Event(event)).is_err() {
                break;
            }
        }

        let extra = jitter_pause(&mut rng, jitter);
        if ctx.wait(tick.saturating_add(extra)) {
            break;
        }
    }
    debug!(monitor = id, "monitor stopped");
}

/// Uniform extra pause in `[0, jitter)`.
fn jitter_pause<R: Rng>(rng: &mut R, jitter: Duration) -> Duration {
    if jitter.is_zero() {
        Duration::ZERO
    } else {
        rng.gen_range(Duration::ZERO..jitter)
    }
}

pub(crate) fn maneuver(ctx: TaskContext, duration: Duration) {
    let secs = duration.as_secs();
    ctx.state.apply(Transition::BeginManeuver { secs });
    ctx.emit(
        Source::System,
        Level::Info,
        format!("Main thrusters engaged. Duration: {}s", secs),
    );

    if ctx.wait(duration) {
        debug!("maneuver interrupted by shutdown");
        return;
    }

    let snap = ctx.state.apply(Transition::EndManeuver);
    if snap.has_power() {
        ctx.emit(
            Source::System,
            Level::Info,
            "Orbit maneuver completed successfully.",
        );
    } else {
        ctx.emit(
            Source::System,
            Level::Alert,
            "BATTERY DEPLETED DURING OPERATION!",
        );
    }
}

pub(crate) fn downlink(ctx: TaskContext, step: Duration) {
    ctx.emit(
        Source::Radio,
        Level::Info,
        "Starting data transmission to ground station...",
    );

    for pct in (20..=100).step_by(20) {
        if ctx.wait(step) {
            debug!(pct, "downlink interrupted by shutdown");
            return;
        }
        let snap = ctx.state.apply(Transition::DownlinkPacket);
        if !snap.has_power() {
            ctx.emit(Source::Radio, Level::Alert, "Transmission failed (dead battery).");
            return;
        }
        if !ctx.emit(
            Source::Radio,
            Level::Info,
            format!("Sending telemetry packets... [{}%]", pct),
        ) {
            return;
        }
    }

    ctx.emit(Source::Radio, Level::Info, "Data transmission complete.");
}

/// Number of whole `tick`s in `total`, at least one.
pub(crate) fn ticks_in(total: Duration, tick: Duration) -> u32 {
    if tick.is_zero() {
        return 1;
    }
    u32::try_from(total.as_nanos() / tick.as_nanos())
        .unwrap_or(u32::MAX)
        .max(1)
}

/// Block for `ticks` simulated seconds of `activity`, printing progress after
/// each one. Returns false if the battery died or shutdown arrived first.
fn busy(ctx: &TaskContext, activity: &str, ticks: u32, tick: Duration, thrusting: bool) -> bool {
    for i in 1..=ticks {
        if ctx.wait(tick) {
            return false;
        }
        let snap = ctx.state.apply(Transition::BusyTick { thrusting });
        ctx.notice(format!(
            "[SEQUENTIAL] Processing {}... ({}/{}) Temp: {}C Bat: {}%",
            activity, i, ticks, snap.temperature, snap.battery
        ));
        if !snap.has_power() {
            ctx.emit(
                Source::System,
                Level::Alert,
                "BATTERY DEPLETED DURING OPERATION!",
            );
            return false;
        }
    }
    true
}

pub(crate) fn maneuver_blocking(ctx: &TaskContext, duration: Duration, tick: Duration) {
    let secs = duration.as_secs();
    ctx.state.apply(Transition::BeginManeuver { secs });
    ctx.emit(
        Source::System,
        Level::Info,
        format!("Main thrusters engaged. Duration: {}s", secs),
    );

    if busy(ctx, "ORBIT MANEUVER", ticks_in(duration, tick), tick, true) {
        ctx.state.apply(Transition::EndManeuver);
        ctx.emit(
            Source::System,
            Level::Info,
            "Orbit maneuver completed successfully.",
        );
    }
}

pub(crate) fn downlink_blocking(ctx: &TaskContext, step: Duration, tick: Duration) {
    ctx.emit(
        Source::Radio,
        Level::Info,
        "Starting data transmission to ground station...",
    );

    let ticks = ticks_in(step, tick);
    for pct in (20..=100).step_by(20) {
        if !busy(ctx, "DOWNLINK", ticks, tick, false) {
            if !ctx.state.snapshot().has_power() {
                ctx.emit(Source::Radio, Level::Alert, "Transmission failed (dead battery).");
            }
            return;
        }
        ctx.emit(
            Source::Radio,
            Level::Info,
            format!("Sending telemetry packets... [{}%]", pct),
        );
    }

    ctx.emit(Source::Radio, Level::Info, "Data transmission complete.");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossbeam::channel::{bounded, unbounded};

    fn context() -> (TaskContext, Receiver<Output>, Sender<()>) {
        let (out, rx) = unbounded();
        let (shutdown_tx, shutdown) = bounded(0);
        let ctx = TaskContext {
            state: SharedState::default(),
            out,
            shutdown,
        };
        (ctx, rx, shutdown_tx)
    }

    #[test]
    fn test_downlink_drains_five_packets() {
        let (ctx, rx, _shutdown) = context();
        let state = ctx.state.clone();
        downlink(ctx, Duration::from_millis(1));

        let messages: Vec<Output> = rx.try_iter().collect();
        assert_eq!(messages.len(), 7);
        assert_eq!(state.snapshot().battery, 95);
        match messages.last() {
            Some(Output::Event(e)) => assert_eq!(e.message, "Data transmission complete."),
            other => panic!("unexpected last message {other:?}"),
        }
    }

    #[test]
    fn test_maneuver_sets_and_clears_status() {
        let (ctx, rx, _shutdown) = context();
        let state = ctx.state.clone();
        maneuver(ctx, Duration::from_millis(5));

        assert_eq!(state.snapshot().status, crate::state::Status::ManeuverComplete);
        assert_eq!(rx.try_iter().count(), 2);
    }

    #[test]
    fn test_maneuver_stops_on_shutdown() {
        let (ctx, rx, shutdown) = context();
        let state = ctx.state.clone();
        drop(shutdown);
        maneuver(ctx, Duration::from_secs(60));

        assert!(state.snapshot().status.is_maneuvering());
        assert_eq!(rx.try_iter().count(), 1);
    }

    fn drain_to(state: &SharedState, battery: u8) {
        while state.snapshot().battery > battery {
            state.apply(Transition::DownlinkPacket);
        }
    }

    fn last_event(rx: &Receiver<Output>) -> Event {
        match rx.try_iter().filter(|m| matches!(m, Output::Event(_))).last() {
            Some(Output::Event(e)) => e,
            other => panic!("no event, got {other:?}"),
        }
    }

    #[test]
    fn test_downlink_fails_when_battery_dies() {
        let (ctx, rx, _shutdown) = context();
        let state = ctx.state.clone();
        drain_to(&state, 2);
        downlink(ctx, Duration::from_millis(1));

        let e = last_event(&rx);
        assert_eq!(e.level, Level::Alert);
        assert_eq!(e.message, "Transmission failed (dead battery).");
        assert_eq!(state.snapshot().status, crate::state::Status::NoPower);
    }

    #[test]
    fn test_jitter_pause_bounds() {
        let mut rng = StdRng::seed_from_u64(3);
        assert_eq!(jitter_pause(&mut rng, Duration::ZERO), Duration::ZERO);
        for _ in 0..100 {
            assert!(jitter_pause(&mut rng, Duration::from_millis(5)) < Duration::from_millis(5));
        }
        // Far beyond u64 milliseconds; must not wrap to a tiny pause.
        let huge = Duration::from_secs(u64::MAX);
        let pauses: Vec<Duration> = (0..8).map(|_| jitter_pause(&mut rng, huge)).collect();
        assert!(pauses.iter().all(|p| *p < huge));
        assert!(pauses.iter().any(|p| *p > Duration::from_secs(u64::MAX / 1000)));
    }

    #[test]
    fn test_ticks_in() {
        assert_eq!(ticks_in(Duration::from_secs(15), Duration::from_secs(1)), 15);
        assert_eq!(ticks_in(Duration::from_millis(2), Duration::from_secs(1)), 1);
        assert_eq!(ticks_in(Duration::from_secs(3), Duration::ZERO), 1);
    }

    #[test]
    fn test_maneuver_blocking() {
        let (ctx, rx, _shutdown) = context();
        maneuver_blocking(&ctx, Duration::from_millis(5), Duration::from_millis(1));

        let snap = ctx.state.snapshot();
        assert_eq!(snap.battery, 95);
        assert_eq!(snap.temperature, 35);
        assert_eq!(snap.status, crate::state::Status::ManeuverComplete);
        let progress = rx
            .try_iter()
            .filter(|m| matches!(m, Output::Notice(t) if t.starts_with("[SEQUENTIAL]")))
            .count();
        assert_eq!(progress, 5);
    }

    #[test]
    fn test_downlink_blocking_aborts_without_power() {
        let (ctx, rx, _shutdown) = context();
        drain_to(&ctx.state, 3);
        downlink_blocking(&ctx, Duration::from_millis(2), Duration::from_millis(1));

        // Two ticks per packet: the first packet goes out, the second dies.
        let events: Vec<Event> = rx
            .try_iter()
            .filter_map(|m| match m {
                Output::Event(e) => Some(e),
                _ => None,
            })
            .collect();
        assert!(events.iter().any(|e| e.message == "Sending telemetry packets... [20%]"));
        assert!(!events.iter().any(|e| e.message == "Sending telemetry packets... [40%]"));
        assert_eq!(
            events.last().map(|e| e.message.as_str()),
            Some("Transmission failed (dead battery).")
        );
        assert_eq!(ctx.state.snapshot().status, crate::state::Status::NoPower);
    }

    #[test]
    fn test_monitor_exits_on_shutdown() {
        let (ctx, _rx, shutdown) = context();
        let handle = std::thread::spawn(move || {
            monitor(ctx, 0, Duration::from_millis(1), Duration::from_millis(2))
        });
        std::thread::sleep(Duration::from_millis(20));
        drop(shutdown);
        handle.join().unwrap();
    }
}
