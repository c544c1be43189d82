use std::time::Duration;

use tracing::{info, warn};

use pb_kernel::{ComputeBackend, SequentialBackend, ThreadedBackend};

use crate::config::{DotConfig, MatmulConfig, RunConfig};
use crate::error::Result;
use crate::generate;
use crate::report::{Kind, Outcome, Report};
use crate::timing::timed;

/// Relative tolerance used when comparing sequential and threaded results.
pub const RELATIVE_TOLERANCE: f64 = 1e-9;

/// Whether two results agree within `RELATIVE_TOLERANCE` of their magnitude.
pub fn agrees(a: f64, b: f64) -> bool {
    let scale = a.abs().max(b.abs()).max(1.0);
    (a - b).abs() <= RELATIVE_TOLERANCE * scale
}

struct Measured<T> {
    parallel: Option<(T, Duration)>,
    sequential: Option<(T, Duration)>,
}

impl<T> Measured<T> {
    fn value(&self) -> Option<&T> {
        self.parallel
            .as_ref()
            .or(self.sequential.as_ref())
            .map(|(v, _)| v)
    }
}

fn measure<T>(
    run: &RunConfig,
    op: impl Fn(&dyn ComputeBackend) -> pb_kernel::Result<T>,
) -> Result<Measured<T>> {
    let sequential = if run.mode.runs_sequential() {
        let (value, elapsed) = timed(|| op(&SequentialBackend::new()));
        Some((value?, elapsed))
    } else {
        None
    };

    let parallel = if run.mode.runs_parallel() {
        let backend = ThreadedBackend::new(run.workers)?;
        let (value, elapsed) = timed(|| op(&backend));
        Some((value?, elapsed))
    } else {
        None
    };

    Ok(Measured {
        parallel,
        sequential,
    })
}

fn report(run: &RunConfig, kind: Kind, outcome: Outcome, m: &Measured<impl Sized>) -> Report {
    Report {
        label: run.label.clone(),
        kind,
        size: run.size,
        workers: if run.mode.runs_parallel() { run.workers } else { 1 },
        cpus: num_cpus::get(),
        outcome,
        parallel: m.parallel.as_ref().map(|(_, d)| *d),
        sequential: m.sequential.as_ref().map(|(_, d)| *d),
    }
}

/// Generate both vectors and time the dot product per `config.run.mode`.
pub fn run_dot(config: &DotConfig) -> Result<Report> {
    let run = &config.run;
    info!(n = run.size, threads = run.workers, mode = ?run.mode, "dot: generating inputs");
    let a = generate::vector(run.size, config.seed_a)?;
    let b = generate::vector(run.size, config.seed_b)?;

    let m = measure(run, |backend| backend.dot(&a, &b))?;
    if let (Some((p, _)), Some((s, _))) = (&m.parallel, &m.sequential) {
        if !agrees(*p, *s) {
            warn!(parallel = *p, sequential = *s, "dot: results disagree");
        }
    }

    let value = m.value().copied().unwrap_or_default();
    Ok(report(run, Kind::Dot, Outcome::Result(value), &m))
}

/// Generate both matrices and time the product per `config.run.mode`.
///
/// The report carries the checksum of the product rather than the matrix.
pub fn run_matmul(config: &MatmulConfig) -> Result<Report> {
    let run = &config.run;
    info!(n = run.size, threads = run.workers, mode = ?run.mode, "matmul: generating inputs");
    let a = generate::matrix(run.size, config.seed)?;
    let b = generate::matrix(run.size, config.seed.wrapping_add(1))?;

    let m = measure(run, |backend| backend.matmul(&a, &b).map(|c| c.checksum()))?;
    if let (Some((p, _)), Some((s, _))) = (&m.parallel, &m.sequential) {
        if !agrees(*p, *s) {
            warn!(parallel = *p, sequential = *s, "matmul: checksums disagree");
        }
    }

    let value = m.value().copied().unwrap_or_default();
    Ok(report(run, Kind::Matmul, Outcome::Checksum(value), &m))
}
