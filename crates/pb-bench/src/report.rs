use std::fmt;
use std::time::Duration;

/// Which kernel a report describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Dot,
    Matmul,
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Dot => write!(f, "dot"),
            Kind::Matmul => write!(f, "matmul"),
        }
    }
}

/// The reported value: a full dot-product result or a matrix checksum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    Result(f64),
    Checksum(f64),
}

/// One benchmark run, rendered as a single `;`-delimited line.
///
/// ```text
/// RESULT; host: local; kind: dot; size: 100; threads: 4; cpus: 8; result: 1.234567890123; tp: 0.000120; ts: 0.000090; speedup: 0.750;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub label: String,
    pub kind: Kind,
    pub size: usize,
    pub workers: usize,
    pub cpus: usize,
    pub outcome: Outcome,
    pub parallel: Option<Duration>,
    pub sequential: Option<Duration>,
}

impl Report {
    /// Sequential time divided by parallel time, when both were measured.
    pub fn speedup(&self) -> Option<f64> {
        match (self.sequential, self.parallel) {
            (Some(ts), Some(tp)) if !tp.is_zero() => Some(ts.as_secs_f64() / tp.as_secs_f64()),
            _ => None,
        }
    }
}

fn secs(d: Option<Duration>) -> f64 {
    d.map(|d| d.as_secs_f64()).unwrap_or(0.0)
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "RESULT; host: {}; kind: {}; size: {}; threads: {}; cpus: {};",
            self.label, self.kind, self.size, self.workers, self.cpus
        )?;
        match self.outcome {
            Outcome::Result(v) => write!(f, " result: {:.12};", v)?,
            Outcome::Checksum(v) => write!(f, " checksum: {:.2};", v)?,
        }
        write!(
            f,
            " tp: {:.6}; ts: {:.6};",
            secs(self.parallel),
            secs(self.sequential)
        )?;
        if let Some(s) = self.speedup() {
            write!(f, " speedup: {:.3};", s)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Report {
        Report {
            label: "local".to_string(),
            kind: Kind::Dot,
            size: 100,
            workers: 4,
            cpus: 8,
            outcome: Outcome::Result(0.5),
            parallel: Some(Duration::from_millis(250)),
            sequential: None,
        }
    }

    #[test]
    fn test_dot_line() {
        assert_eq!(
            report().to_string(),
            "RESULT; host: local; kind: dot; size: 100; threads: 4; cpus: 8; \
             result: 0.500000000000; tp: 0.250000; ts: 0.000000;"
        );
    }

    #[test]
    fn test_checksum_with_speedup() {
        let r = Report {
            kind: Kind::Matmul,
            outcome: Outcome::Checksum(1234.5678),
            sequential: Some(Duration::from_millis(1000)),
            ..report()
        };
        assert_eq!(r.speedup(), Some(4.0));
        assert_eq!(
            r.to_string(),
            "RESULT; host: local; kind: matmul; size: 100; threads: 4; cpus: 8; \
             checksum: 1234.57; tp: 0.250000; ts: 1.000000; speedup: 4.000;"
        );
    }

    #[test]
    fn test_no_speedup_without_both_times() {
        assert_eq!(report().speedup(), None);
    }
}
