use std::fmt;
use std::sync::Arc;

use parking_lot::Mutex;

pub const FULL_BATTERY: u8 = 100;
pub const NOMINAL_TEMPERATURE: i32 = 25;
pub const OVERHEAT_THRESHOLD: i32 = 80;
pub const LOW_BATTERY_THRESHOLD: u8 = 10;

/// Mission phase shown on the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Standby,
    Maneuvering { secs: u64 },
    ManeuverComplete,
    Recharged,
    /// Battery exhausted; only a recharge brings the system back.
    NoPower,
}

impl Status {
    pub fn is_maneuvering(&self) -> bool {
        matches!(self, Status::Maneuvering { .. })
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::Standby => write!(f, "IN ORBIT (STANDBY)"),
            Status::Maneuvering { secs } => write!(f, "EXECUTING ORBIT MANEUVER ({}s)...", secs),
            Status::ManeuverComplete => write!(f, "THRUSTERS OFF. ORBIT STABLE."),
            Status::Recharged => write!(f, "SYSTEM RECHARGED."),
            Status::NoPower => write!(f, "SYSTEM OFF (NO POWER)"),
        }
    }
}

/// A change to the satellite state, applied atomically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// One monitor tick. The random draws are made by the caller.
    Telemetry { drain: bool, heat: bool },
    /// One simulated second of blocking work: always drains, heats while
    /// thrusting and otherwise cools by one degree.
    BusyTick { thrusting: bool },
    BeginManeuver { secs: u64 },
    EndManeuver,
    DownlinkPacket,
    Recharge,
}

/// Point-in-time copy of the satellite state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Snapshot {
    pub battery: u8,
    pub temperature: i32,
    pub status: Status,
}

impl Snapshot {
    pub fn has_power(&self) -> bool {
        self.battery > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SatelliteState {
    battery: u8,
    temperature: i32,
    status: Status,
}

impl SatelliteState {
    pub fn new() -> Self {
        SatelliteState {
            battery: FULL_BATTERY,
            temperature: NOMINAL_TEMPERATURE,
            status: Status::Standby,
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            battery: self.battery,
            temperature: self.temperature,
            status: self.status,
        }
    }

    /// Apply one transition. A battery at zero always leaves the status at
    /// [`Status::NoPower`].
    pub fn apply(&mut self, transition: Transition) {
        match transition {
            Transition::Telemetry { drain, heat } => {
                if drain {
                    self.battery = self.battery.saturating_sub(1);
                }
                if self.status.is_maneuvering() {
                    if heat {
                        self.temperature += 2;
                    }
                } else if self.temperature > NOMINAL_TEMPERATURE {
                    self.temperature -= 2;
                }
            }
            Transition::BusyTick { thrusting } => {
                self.battery = self.battery.saturating_sub(1);
                if thrusting {
                    self.temperature += 2;
                } else if self.temperature > NOMINAL_TEMPERATURE {
                    self.temperature -= 1;
                }
            }
            Transition::BeginManeuver { secs } => self.status = Status::Maneuvering { secs },
            Transition::EndManeuver => self.status = Status::ManeuverComplete,
            Transition::DownlinkPacket => self.battery = self.battery.saturating_sub(1),
            Transition::Recharge => {
                self.battery = FULL_BATTERY;
                self.status = Status::Recharged;
            }
        }
        if self.battery == 0 {
            self.status = Status::NoPower;
        }
    }
}

impl Default for SatelliteState {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to the state shared by every simulator task.
///
/// Each method takes the lock exactly once, so a transition and the
/// snapshot it returns are always consistent.
#[derive(Debug, Clone, Default)]
pub struct SharedState {
    inner: Arc<Mutex<SatelliteState>>,
}

impl SharedState {
    pub fn new(state: SatelliteState) -> Self {
        SharedState {
            inner: Arc::new(Mutex::new(state)),
        }
    }

    pub fn snapshot(&self) -> Snapshot {
        self.inner.lock().snapshot()
    }

    /// Apply `transition` and return the resulting state.
    pub fn apply(&self, transition: Transition) -> Snapshot {
        let mut state = self.inner.lock();
        state.apply(transition);
        state.snapshot()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state() {
        let s = SatelliteState::new().snapshot();
        assert_eq!(s.battery, 100);
        assert_eq!(s.temperature, 25);
        assert_eq!(s.status, Status::Standby);
    }

    #[test]
    fn test_telemetry_drain_stops_at_zero() {
        let mut s = SatelliteState::new();
        for _ in 0..150 {
            s.apply(Transition::Telemetry {
                drain: true,
                heat: false,
            });
        }
        assert_eq!(s.snapshot().battery, 0);
        assert_eq!(s.snapshot().status, Status::NoPower);
        assert!(!s.snapshot().has_power());
    }

    #[test]
    fn test_no_power_survives_maneuver_and_recharge_revives() {
        let mut s = SatelliteState::new();
        for _ in 0..100 {
            s.apply(Transition::DownlinkPacket);
        }
        s.apply(Transition::BeginManeuver { secs: 15 });
        assert_eq!(s.snapshot().status, Status::NoPower);
        s.apply(Transition::EndManeuver);
        assert_eq!(s.snapshot().status, Status::NoPower);

        s.apply(Transition::Recharge);
        assert_eq!(s.snapshot().battery, 100);
        assert_eq!(s.snapshot().status, Status::Recharged);
    }

    #[test]
    fn test_busy_tick() {
        let mut s = SatelliteState::new();
        s.apply(Transition::BusyTick { thrusting: true });
        s.apply(Transition::BusyTick { thrusting: true });
        assert_eq!(s.snapshot().temperature, 29);
        assert_eq!(s.snapshot().battery, 98);

        for _ in 0..6 {
            s.apply(Transition::BusyTick { thrusting: false });
        }
        assert_eq!(s.snapshot().temperature, 25);
        assert_eq!(s.snapshot().battery, 92);
    }

    #[test]
    fn test_heating_only_while_maneuvering() {
        let mut s = SatelliteState::new();
        s.apply(Transition::Telemetry {
            drain: false,
            heat: true,
        });
        assert_eq!(s.snapshot().temperature, 25);

        s.apply(Transition::BeginManeuver { secs: 30 });
        s.apply(Transition::Telemetry {
            drain: false,
            heat: true,
        });
        s.apply(Transition::Telemetry {
            drain: false,
            heat: false,
        });
        assert_eq!(s.snapshot().temperature, 27);
    }

    #[test]
    fn test_cooling_back_to_nominal() {
        let mut s = SatelliteState::new();
        s.apply(Transition::BeginManeuver { secs: 1 });
        for _ in 0..3 {
            s.apply(Transition::Telemetry {
                drain: false,
                heat: true,
            });
        }
        s.apply(Transition::EndManeuver);
        assert_eq!(s.snapshot().temperature, 31);
        for _ in 0..10 {
            s.apply(Transition::Telemetry {
                drain: false,
                heat: true,
            });
        }
        assert_eq!(s.snapshot().temperature, 25);
        assert_eq!(s.snapshot().status, Status::ManeuverComplete);
    }

    #[test]
    fn test_recharge() {
        let shared = SharedState::new(SatelliteState::new());
        shared.apply(Transition::DownlinkPacket);
        assert_eq!(shared.snapshot().battery, 99);
        let snap = shared.apply(Transition::Recharge);
        assert_eq!(snap.battery, 100);
        assert_eq!(snap.status, Status::Recharged);
    }

    #[test]
    fn test_shared_state_concurrent_drain() {
        let shared = SharedState::default();
        std::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|| {
                    for _ in 0..10 {
                        shared.apply(Transition::DownlinkPacket);
                    }
                });
            }
        });
        assert_eq!(shared.snapshot().battery, 60);
    }

    #[test]
    fn test_status_display() {
        assert_eq!(
            Status::Maneuvering { secs: 30 }.to_string(),
            "EXECUTING ORBIT MANEUVER (30s)..."
        );
        assert_eq!(Status::NoPower.to_string(), "SYSTEM OFF (NO POWER)");
    }
}
