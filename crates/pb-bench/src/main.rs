//! pb-bench: time sequential vs. threaded dot product and matrix multiply.

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};

use pb_bench::{logging, run_dot, run_matmul, DotConfig, MatmulConfig, Mode, RunConfig};
use pb_bench::generate::{DEFAULT_MATRIX_SEED, DEFAULT_SEED_A, DEFAULT_SEED_B};

/// Sequential vs. threaded kernel benchmarks.
#[derive(Parser, Debug)]
#[command(name = "pb-bench")]
#[command(about = "Compare sequential and partitioned-parallel numeric kernels")]
struct Cli {
    /// Machine label written into the report line
    #[arg(long, global = true, default_value = "local")]
    label: String,

    /// Default log level when RUST_LOG is unset
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Dot product of two seeded random vectors
    Dot {
        #[command(flatten)]
        common: CommonArgs,

        /// Seed for the first vector
        #[arg(long, default_value_t = DEFAULT_SEED_A)]
        seed_a: u64,

        /// Seed for the second vector
        #[arg(long, default_value_t = DEFAULT_SEED_B)]
        seed_b: u64,
    },
    /// Product of two seeded random square matrices
    Matmul {
        #[command(flatten)]
        common: CommonArgs,

        /// Seed for the left operand (the right one uses seed + 1)
        #[arg(long, default_value_t = DEFAULT_MATRIX_SEED)]
        seed: u64,
    },
}

#[derive(Args, Debug)]
struct CommonArgs {
    /// Vector length or matrix dimension
    #[arg(short = 'n', long)]
    size: usize,

    /// Worker threads (defaults to the number of online CPUs)
    #[arg(short, long)]
    threads: Option<usize>,

    /// Which implementations to run
    #[arg(short, long, value_enum, default_value_t = Mode::Both)]
    mode: Mode,
}

impl CommonArgs {
    fn into_run(self, label: String) -> pb_bench::Result<RunConfig> {
        let threads = self.threads.unwrap_or_else(num_cpus::get);
        RunConfig::new(label, self.size, threads, self.mode)
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    let report = match cli.command {
        Command::Dot {
            common,
            seed_a,
            seed_b,
        } => {
            let config = DotConfig {
                seed_a,
                seed_b,
                ..DotConfig::new(common.into_run(cli.label)?)
            };
            run_dot(&config).context("dot product benchmark failed")?
        }
        Command::Matmul { common, seed } => {
            let config = MatmulConfig {
                seed,
                ..MatmulConfig::new(common.into_run(cli.label)?)
            };
            run_matmul(&config).context("matrix multiply benchmark failed")?
        }
    };

    println!("{report}");
    Ok(())
}
