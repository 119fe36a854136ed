//! Command-line entry point for the energy-aware EDF scheduling
//! simulator.

use std::process::ExitCode;

use clap::Parser;

use rts_energy_sim::driver;

/// Simulate an energy-aware EDF schedule from a task set and an
/// actual-execution-times trace.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Task-set file (`id period deadline wcet` per line).
    #[arg(long, default_value = "input_task_set.txt")]
    task_set: std::path::PathBuf,

    /// Actual-execution-times file (`task_id instance_id exec_time` per
    /// line).
    #[arg(long, default_value = "input_execution_times.txt")]
    execution_times: std::path::PathBuf,

    /// Tick-by-tick trace output file.
    #[arg(long, default_value = "output.txt")]
    trace: std::path::PathBuf,

    /// Summary analysis output file.
    #[arg(long, default_value = "analysis.txt")]
    analysis: std::path::PathBuf,

    /// Simulation horizon, as a multiple of the largest task period.
    #[arg(long, default_value_t = rts_energy_sim::config::DEFAULT_N_PERIODS)]
    n_periods: u32,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    match driver::run(
        &cli.task_set,
        &cli.execution_times,
        &cli.trace,
        &cli.analysis,
        cli.n_periods,
    ) {
        Ok(stats) => {
            log::info!(
                "simulation complete: {} ticks, {:.4} energy units",
                stats.total_execution_time,
                stats.energy_consumption
            );
            ExitCode::SUCCESS
        }
        Err(err) => {
            log::error!("simulation failed: {err}");
            ExitCode::FAILURE
        }
    }
}
