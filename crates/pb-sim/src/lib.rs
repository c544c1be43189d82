//! `pb-sim` - Interactive satellite simulator.
//!
//! Monitor, maneuver and downlink threads mutate one `SharedState` through
//! atomic transitions and report through a single ordered channel to a
//! dedicated output writer thread. A sequential mode runs the same commands
//! in the foreground, with battery exhaustion gating every command but
//! RECHARGE and QUIT.

pub mod command;
pub mod config;
pub mod error;
pub mod event;
pub mod logging;
pub mod sim;
pub mod state;
mod tasks;
pub mod writer;

pub use command::Command;
pub use config::SimConfig;
pub use error::{Result, SimError};
pub use sim::{Flow, Simulator};
pub use state::{SharedState, Snapshot, Status, Transition};
