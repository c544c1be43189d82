use std::io::{self, Write};
use std::thread::{self, JoinHandle};

use crossbeam::channel::{bounded, unbounded, Receiver, Sender};
use tracing::{debug, info, warn};

use crate::command::{Command, UnknownCommand};
use crate::config::SimConfig;
use crate::error::{Result, SimError};
use crate::event::{Event, Level, Output, Source};
use crate::state::{SharedState, Transition};
use crate::tasks::{self, TaskContext};
use crate::writer;

/// What the command loop should do after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// A running simulator: monitor threads, command-spawned jobs and the
/// output writer.
///
/// Dropping the shutdown sender (done by [`Simulator::shutdown`]) is the
/// stop signal for every task. In sequential mode there are no monitors and
/// ORBIT/DOWNLINK block the caller of [`Simulator::dispatch`].
pub struct Simulator<W> {
    config: SimConfig,
    state: SharedState,
    out: Sender<Output>,
    shutdown_tx: Sender<()>,
    shutdown_rx: Receiver<()>,
    monitors: Vec<JoinHandle<()>>,
    jobs: Vec<JoinHandle<()>>,
    writer: JoinHandle<std::io::Result<W>>,
}

impl<W: Write + Send + 'static> Simulator<W> {
    /// Start the writer and the monitor threads, then print the status panel.
    pub fn start(config: SimConfig, sink: W) -> Result<Self> {
        Self::start_with(config, sink, |name| Ok(thread::Builder::new().name(name)))
    }

    /// [`Simulator::start`] with monitor threads built by `builder`. If a
    /// monitor cannot be spawned, everything already started is shut down
    /// before the error is returned.
    fn start_with<B>(config: SimConfig, sink: W, builder: B) -> Result<Self>
    where
        B: Fn(String) -> io::Result<thread::Builder>,
    {
        let (out, rx) = unbounded();
        let writer = writer::spawn(rx, sink, config.banner())?;
        let (shutdown_tx, shutdown_rx) = bounded(0);

        let mut sim = Simulator {
            config,
            state: SharedState::default(),
            out,
            shutdown_tx,
            shutdown_rx,
            monitors: Vec::new(),
            jobs: Vec::new(),
            writer,
        };

        let monitors = if sim.config.sequential {
            0
        } else {
            sim.config.monitors.max(1)
        };
        info!(monitors, sequential = sim.config.sequential, "starting simulator");
        sim.send(Output::Notice(if sim.config.sequential {
            "Starting system (sequential mode)...".to_string()
        } else {
            format!("Starting {} monitor thread(s)...", monitors)
        }));
        for id in 0..monitors {
            let (tick, jitter) = (sim.config.tick, sim.config.tick_jitter);
            let spawned = builder(format!("pb-sim-monitor-{id}"))
                .map_err(|source| SimError::Spawn {
                    task: "monitor",
                    source,
                })
                .and_then(|b| {
                    sim.spawn_task(b, "monitor", move |ctx| {
                        tasks::monitor(ctx, id, tick, jitter)
                    })
                });
            match spawned {
                Ok(handle) => sim.monitors.push(handle),
                Err(err) => {
                    warn!(monitor = id, "monitor spawn failed, stopping simulator");
                    if let Err(stop) = sim.shutdown() {
                        warn!(error = %stop, "shutdown after failed start");
                    }
                    return Err(err);
                }
            }
        }

        sim.send(Output::Panel(sim.state.snapshot()));
        sim.send(Output::Prompt);
        Ok(sim)
    }

    pub fn state(&self) -> &SharedState {
        &self.state
    }

    fn context(&self) -> TaskContext {
        TaskContext {
            state: self.state.clone(),
            out: self.out.clone(),
            shutdown: self.shutdown_rx.clone(),
        }
    }

    fn spawn_task<F>(
        &self,
        builder: thread::Builder,
        task: &'static str,
        f: F,
    ) -> Result<JoinHandle<()>>
    where
        F: FnOnce(TaskContext) + Send + 'static,
    {
        let ctx = self.context();
        builder
            .spawn(move || f(ctx))
            .map_err(|source| SimError::Spawn { task, source })
    }

    fn send(&self, msg: Output) {
        if self.out.send(msg).is_err() {
            debug!("output writer gone, dropping message");
        }
    }

    /// Execute one command. Without power, everything but RECHARGE and QUIT
    /// is refused.
    pub fn dispatch(&mut self, command: Command) -> Result<Flow> {
        debug!(?command, "dispatch");
        self.jobs.retain(|job| !job.is_finished());

        let powered = self.state.snapshot().has_power();
        if !powered && !matches!(command, Command::Recharge | Command::Quit) {
            debug!(?command, "refused without power");
            self.send(Output::Event(Event::new(
                Source::System,
                Level::Alert,
                "SYSTEM WITHOUT POWER. RECHARGE IMMEDIATELY.",
            )));
            self.send(Output::Prompt);
            return Ok(Flow::Continue);
        }

        let tick = self.config.blocking_tick;
        match command {
            Command::Orbit if self.config.sequential => {
                tasks::maneuver_blocking(&self.context(), self.config.maneuver, tick);
            }
            Command::Orbit => {
                let duration = self.config.maneuver;
                let builder = thread::Builder::new().name("pb-sim-maneuver".to_string());
                let job = self.spawn_task(builder, "maneuver", move |ctx| {
                    tasks::maneuver(ctx, duration)
                })?;
                self.jobs.push(job);
            }
            Command::Downlink if self.config.sequential => {
                tasks::downlink_blocking(&self.context(), self.config.downlink_step, tick);
            }
            Command::Downlink => {
                let step = self.config.downlink_step;
                let builder = thread::Builder::new().name("pb-sim-downlink".to_string());
                let job = self.spawn_task(builder, "downlink", move |ctx| {
                    tasks::downlink(ctx, step)
                })?;
                self.jobs.push(job);
            }
            Command::Recharge => {
                self.state.apply(Transition::Recharge);
                self.send(Output::Event(Event::new(
                    Source::System,
                    Level::Info,
                    "Batteries recharged.",
                )));
            }
            Command::Status => self.send(Output::Panel(self.state.snapshot())),
            Command::Quit => return Ok(Flow::Quit),
        }

        self.send(Output::Prompt);
        Ok(Flow::Continue)
    }

    /// Handle one line of operator input. Blank lines just re-prompt.
    pub fn handle_line(&mut self, line: &str) -> Result<Flow> {
        if line.trim().is_empty() {
            self.send(Output::Prompt);
            return Ok(Flow::Continue);
        }
        match line.parse::<Command>() {
            Ok(command) => self.dispatch(command),
            Err(UnknownCommand(text)) => {
                debug!(%text, "unknown command");
                self.send(Output::Notice("[ERROR] Unknown command.".to_string()));
                self.send(Output::Prompt);
                Ok(Flow::Continue)
            }
        }
    }

    /// Block until every command-spawned job (maneuver, downlink) finishes.
    pub fn wait_for_jobs(&mut self) {
        for job in self.jobs.drain(..) {
            if job.join().is_err() {
                warn!("simulator job panicked");
            }
        }
    }

    /// Signal shutdown, join every thread and return the output sink.
    pub fn shutdown(self) -> Result<W> {
        let Simulator {
            out,
            shutdown_tx,
            shutdown_rx,
            monitors,
            jobs,
            writer,
            ..
        } = self;

        info!("shutting down simulator");
        drop(shutdown_tx);
        drop(shutdown_rx);
        for handle in monitors.into_iter().chain(jobs) {
            if handle.join().is_err() {
                warn!("simulator task panicked");
            }
        }

        drop(out);
        writer
            .join()
            .map_err(|_| SimError::WriterPanicked)?
            .map_err(SimError::Writer)
    }
}
