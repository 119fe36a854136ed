//! # Analysis Printer
//!
//! Renders the end-of-run summary described in spec.md §6, grounded in
//! `original_source/main.c`'s `analyzeResults`: system-wide totals first,
//! then one line per task.

use std::io::{self, Write};

use crate::power::FrequencyLevel;
use crate::stats::SchedulerStats;
use crate::task::TaskSet;

/// Write the full analysis report to `out`.
pub fn write_analysis(out: &mut impl Write, tasks: &TaskSet, stats: &SchedulerStats) -> io::Result<()> {
    writeln!(out, "=== Simulation Summary ===")?;
    writeln!(out, "Total ticks simulated   : {}", stats.total_execution_time)?;
    writeln!(out, "Estimated energy        : {:.4}", stats.energy_consumption)?;
    writeln!(out, "DVFS transitions        : {}", stats.dvfs_transitions)?;
    writeln!(out, "DPM transitions         : {}", stats.dpm_transitions)?;
    writeln!(out)?;
    writeln!(out, "Time at frequency:")?;
    for level in FrequencyLevel::ALL {
        writeln!(
            out,
            "  {level} : {:6.2}% ({} ticks)",
            stats.percent_at_frequency(level),
            stats.time_at_frequency[level.index()]
        )?;
    }
    writeln!(
        out,
        "  power-down : {:6.2}% ({} ticks)",
        stats.percent_in_power_down(),
        stats.time_in_power_down
    )?;

    writeln!(out)?;
    writeln!(out, "=== Per-Task Summary ===")?;
    for task in tasks.iter() {
        writeln!(
            out,
            "Task {:2} : instances={:4} misses={:4} mean_response_time={:.2}",
            task.id,
            task.instances_completed,
            task.deadline_misses,
            task.mean_response_time()
        )?;
    }

    Ok(())
}
