use std::io::Write;
use std::thread::{self, JoinHandle};

use crossbeam::channel::Receiver;
use tracing::debug;

use crate::error::{Result, SimError};
use crate::event::Output;
use crate::state::Snapshot;

pub const PROMPT: &str = "COMMAND > ";
const RULE: &str = "-------------------------------------------------";

/// Print messages in arrival order until every sender is dropped, then
/// return the sink.
///
/// This is the only code that touches the output sink.
pub fn run<W: Write>(rx: Receiver<Output>, mut out: W, banner: &str) -> std::io::Result<W> {
    for msg in rx {
        match msg {
            Output::Event(event) => writeln!(out, "{event}")?,
            Output::Notice(text) => writeln!(out, "{text}")?,
            Output::Panel(snap) => write_panel(&mut out, banner, &snap)?,
            Output::Prompt => write!(out, "{PROMPT}")?,
        }
        out.flush()?;
    }
    debug!("output channel closed");
    Ok(out)
}

fn write_panel<W: Write>(out: &mut W, banner: &str, snap: &Snapshot) -> std::io::Result<()> {
    writeln!(out, "{RULE}")?;
    writeln!(out, "   {banner}")?;
    writeln!(out, "{RULE}")?;
    writeln!(
        out,
        " BATTERY: {}%  |  TEMP: {} C  |  STATUS: {}",
        snap.battery, snap.temperature, snap.status
    )?;
    writeln!(out, "{RULE}")?;
    writeln!(out, "COMMANDS: [ORBIT] [DOWNLINK] [RECHARGE] [STATUS] [QUIT]")
}

/// Start the writer on its own thread.
pub fn spawn<W>(
    rx: Receiver<Output>,
    out: W,
    banner: &'static str,
) -> Result<JoinHandle<std::io::Result<W>>>
where
    W: Write + Send + 'static,
{
    thread::Builder::new()
        .name("pb-sim-writer".to_string())
        .spawn(move || run(rx, out, banner))
        .map_err(|source| SimError::Spawn {
            task: "writer",
            source,
        })
}
