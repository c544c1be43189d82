use std::fmt;

use crate::state::{Snapshot, LOW_BATTERY_THRESHOLD, OVERHEAT_THRESHOLD};

/// Who produced an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// Telemetry monitor with its index.
    Monitor(usize),
    System,
    Radio,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Level {
    Info,
    Warning,
    Alert,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event {
    pub source: Source,
    pub level: Level,
    pub message: String,
}

impl Event {
    pub fn new(source: Source, level: Level, message: impl Into<String>) -> Self {
        Event {
            source,
            level,
            message: message.into(),
        }
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.source {
            Source::Monitor(id) => write!(f, "[MONITOR {}]", id)?,
            Source::System => write!(f, "[SYSTEM]")?,
            Source::Radio => write!(f, "[RADIO]")?,
        }
        match self.level {
            Level::Info => {}
            Level::Warning => write!(f, " WARNING:")?,
            Level::Alert => write!(f, " ALERT:")?,
        }
        write!(f, " {}", self.message)
    }
}

/// Everything the output writer can be asked to print, in arrival order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    Event(Event),
    /// Full status panel for a snapshot.
    Panel(Snapshot),
    /// Reply to the operator (unknown command, acknowledgements).
    Notice(String),
    /// Command prompt.
    Prompt,
}

/// Decide what a monitor reports after a telemetry tick.
///
/// Maneuver monitoring takes precedence over overheating, which takes
/// precedence over a low battery.
pub fn assess(monitor: usize, snap: &Snapshot) -> Option<Event> {
    let source = Source::Monitor(monitor);
    if snap.status.is_maneuvering() {
        Some(Event::new(
            source,
            Level::Info,
            format!("Monitoring propulsion... Temp: {}C", snap.temperature),
        ))
    } else if snap.temperature > OVERHEAT_THRESHOLD {
        Some(Event::new(
            source,
            Level::Alert,
            format!("OVERHEATING ({} C)!", snap.temperature),
        ))
    } else if snap.battery < LOW_BATTERY_THRESHOLD {
        Some(Event::new(
            source,
            Level::Warning,
            format!("BATTERY CRITICAL ({}%)!", snap.battery),
        ))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::Status;

    fn snap(battery: u8, temperature: i32, status: Status) -> Snapshot {
        Snapshot {
            battery,
            temperature,
            status,
        }
    }

    #[test]
    fn test_nominal_is_quiet() {
        assert_eq!(assess(0, &snap(100, 25, Status::Standby)), None);
        assert_eq!(assess(0, &snap(10, 80, Status::Standby)), None);
    }

    #[test]
    fn test_maneuver_takes_precedence() {
        let e = assess(2, &snap(5, 90, Status::Maneuvering { secs: 30 })).unwrap();
        assert_eq!(e.level, Level::Info);
        assert_eq!(e.source, Source::Monitor(2));
        assert!(e.message.contains("90C"));
    }

    #[test]
    fn test_overheat_before_low_battery() {
        let e = assess(0, &snap(5, 81, Status::Standby)).unwrap();
        assert_eq!(e.level, Level::Alert);
    }

    #[test]
    fn test_low_battery() {
        let e = assess(1, &snap(9, 25, Status::Recharged)).unwrap();
        assert_eq!(e.level, Level::Warning);
        assert_eq!(e.to_string(), "[MONITOR 1] WARNING: BATTERY CRITICAL (9%)!");
    }
}
