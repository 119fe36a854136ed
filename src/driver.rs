//! # Simulation Driver
//!
//! Wires the EDF scheduler, power controller, and statistics accumulator
//! together into the tick loop described in spec.md §4.3:
//! release -> select -> decide -> apply -> observe -> emit -> advance -> reap.
//!
//! Grounded in `original_source/main.c`'s `mainSchedulerLoop`.

use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use crate::error::SimError;
use crate::power::{self, PowerState};
use crate::scheduler;
use crate::stats::SchedulerStats;
use crate::task::Tick;
use crate::trace::TraceWriter;
use crate::{analysis, parser};

/// Run a complete simulation: load inputs, simulate every tick through
/// `max_period * n_periods`, write the trace as it goes, then write the
/// final analysis report. Returns the accumulated statistics.
pub fn run(
    task_set_path: impl AsRef<Path>,
    exec_times_path: impl AsRef<Path>,
    trace_path: impl AsRef<Path>,
    analysis_path: impl AsRef<Path>,
    n_periods: u32,
) -> Result<SchedulerStats, SimError> {
    let mut tasks = parser::parse_task_set(&task_set_path)?;
    parser::parse_execution_times(&exec_times_path, &mut tasks)?;

    let trace_path = trace_path.as_ref();
    let trace_file = File::create(trace_path).map_err(|e| SimError::io(trace_path, e))?;
    let mut trace = TraceWriter::new(BufWriter::new(trace_file))
        .map_err(|e| SimError::io(trace_path, e))?;

    let t_end = tasks.max_period() * n_periods;
    log::info!(
        "simulating {} task(s) for {t_end} ticks ({n_periods} x max period)",
        tasks.len()
    );

    let mut state = PowerState::default();
    let mut stats = SchedulerStats::new();
    let mut now: Tick = 0;

    while now < t_end {
        scheduler::release_arrivals(&mut tasks, now);
        let winner_id = scheduler::select_highest_priority(&mut tasks);
        let slack = scheduler::compute_system_slack(&tasks, now);

        let decision = match winner_id {
            Some(id) => {
                let task = tasks.find_mut(id).expect("winner_id came from this set");
                power::dvfs_decision(task, now, &state)
            }
            None => power::dpm_decision(slack, &state),
        };
        power::apply_decision(decision, &mut state);
        stats.observe_decision(decision);
        stats.observe_tick(&state);

        match winner_id {
            Some(id) => {
                let task = tasks.find_mut(id).expect("winner_id came from this set");
                trace
                    .write_record(now, Some(task), &state, slack, decision)
                    .map_err(|e| SimError::io(trace_path, e))?;
            }
            None => {
                trace
                    .write_record(now, None, &state, slack, decision)
                    .map_err(|e| SimError::io(trace_path, e))?;
            }
        }

        if let Some(id) = winner_id {
            if !state.dpm_active {
                let task = tasks.find_mut(id).expect("winner_id came from this set");
                scheduler::execute_tick(task, state.frequency.tenths());
            }
        }

        now += 1;
        scheduler::reap_completions(&mut tasks, now);
    }

    let analysis_path = analysis_path.as_ref();
    let mut analysis_file =
        File::create(analysis_path).map_err(|e| SimError::io(analysis_path, e))?;
    analysis::write_analysis(&mut analysis_file, &tasks, &stats)
        .map_err(|e| SimError::io(analysis_path, e))?;

    Ok(stats)
}
