//! End-to-end scenario tests, driving the public `driver::run` API against
//! the literal fixtures from spec.md §8 (S1-S6).

use std::fs;
use std::io::Write;

use rts_energy_sim::driver;

fn write_temp(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "{contents}").unwrap();
    file
}

struct RunOutputs {
    stats: rts_energy_sim::stats::SchedulerStats,
    trace: String,
    analysis: String,
}

fn run_scenario(task_set: &str, exec_times: &str, n_periods: u32) -> RunOutputs {
    let task_set_file = write_temp(task_set);
    let exec_times_file = write_temp(exec_times);
    let trace_file = tempfile::NamedTempFile::new().unwrap();
    let analysis_file = tempfile::NamedTempFile::new().unwrap();

    let stats = driver::run(
        task_set_file.path(),
        exec_times_file.path(),
        trace_file.path(),
        analysis_file.path(),
        n_periods,
    )
    .expect("scenario run should succeed");

    RunOutputs {
        stats,
        trace: fs::read_to_string(trace_file.path()).unwrap(),
        analysis: fs::read_to_string(analysis_file.path()).unwrap(),
    }
}

/// Trace record count excludes the two header lines.
fn record_count(trace: &str) -> usize {
    trace.lines().count() - 2
}

// S1 - single task, no slack: f = 1.0 throughout, zero DPM ticks, zero
// misses, 30 trace records (N_periods = 3, P_max = 10).
#[test]
fn s1_single_task_no_slack_runs_at_max_frequency() {
    let out = run_scenario(
        "id period deadline wcet\n1 10 10 10\n",
        "task instance time\n1 0 10\n",
        3,
    );

    assert_eq!(record_count(&out.trace), 30);
    assert_eq!(out.stats.time_at_frequency[3], 30);
    assert_eq!(out.stats.time_in_power_down, 0);
    assert!(out.analysis.contains("misses=   0"));
    for line in out.trace.lines().skip(2) {
        assert!(line.contains("1.0"), "expected max frequency every tick: {line}");
    }
}

// S2 - CCEDF downscales: actual exec = 5 on a {P=10, D=10, C=10} task
// triggers "DVFS -> 0.6" at release, and the instance finishes in 9 ticks.
#[test]
fn s2_ccedf_downscales_to_point_six() {
    let out = run_scenario(
        "id period deadline wcet\n1 10 10 10\n",
        "task instance time\n1 0 5\n",
        3,
    );

    let first_record = out.trace.lines().nth(2).unwrap();
    assert!(first_record.contains("0.6"), "first record: {first_record}");
    assert!(first_record.contains("DVFS -> 0.6"), "first record: {first_record}");

    // Completion is recorded at t=9 (9 ticks of execution at f=0.6).
    let completion_record = out.trace.lines().nth(2 + 9).unwrap();
    assert!(
        completion_record.contains("None") || !completion_record.contains("Task  1"),
        "expected task 1 to have completed by t=9: {completion_record}"
    );
    assert!(out.analysis.contains("misses=   0"));
}

// S3 - DPM after completion: a single long-period task completes early at
// f=0.4, the system enters DPM, and wakes up again as the next arrival
// becomes imminent.
#[test]
fn s3_dpm_engages_after_completion_and_wakes_before_next_arrival() {
    let out = run_scenario(
        "id period deadline wcet\n1 100 100 10\n",
        "task instance time\n1 0 10\n",
        1,
    );

    assert!(out.trace.contains("DPM -> ON"));
    assert!(out.trace.contains("DPM -> OFF"));
    assert!(out.trace.contains("Power-down"));
    assert_eq!(out.stats.dpm_transitions, 2);

    let on_idx = out.trace.find("DPM -> ON").unwrap();
    let off_idx = out.trace.find("DPM -> OFF").unwrap();
    assert!(on_idx < off_idx, "DPM must turn on before it turns off");
}

// S4 - deadline miss: actual exec (12) exceeds relative deadline (10), so
// the task runs at f=1.0 throughout, completes at t=12, and the simulation
// continues with one recorded deadline miss.
#[test]
fn s4_overrun_instance_misses_deadline_but_simulation_continues() {
    let out = run_scenario(
        "id period deadline wcet\n1 10 10 10\n",
        "task instance time\n1 0 12\n",
        3,
    );

    assert!(out.analysis.contains("misses=   1"));
    for line in out.trace.lines().skip(2).take(12) {
        assert!(line.contains("1.0"), "expected max frequency while late: {line}");
    }
    // The run must not abort: later instances still get scheduled.
    assert!(out.analysis.contains("instances="));
}

// S5 - EDF tie-break: two identical tasks releasing simultaneously with
// equal deadlines; the first task in the array runs to completion before
// the second starts, and both meet their deadlines.
#[test]
fn s5_ties_broken_by_array_order_and_both_meet_deadlines() {
    let out = run_scenario(
        "id period deadline wcet\n1 10 10 2\n2 10 10 2\n",
        "task instance time\n1 0 2\n2 0 2\n",
        3,
    );

    let first_record = out.trace.lines().nth(2).unwrap();
    assert!(first_record.contains("Task  1"), "task 1 must win the tie: {first_record}");

    assert!(out.analysis.contains("misses=   0"));
    // Both tasks complete at least one instance with zero misses.
    let task_lines: Vec<&str> = out
        .analysis
        .lines()
        .filter(|l| l.starts_with("Task"))
        .collect();
    assert_eq!(task_lines.len(), 2);
    for line in task_lines {
        assert!(line.contains("misses=   0"), "{line}");
    }
}

// S6 - DPM wake-up has no false negatives: once slack drops to the
// break-even threshold, DPM turns off in time for the next release to be
// serviced normally.
#[test]
fn s6_dpm_wakes_in_time_for_next_release() {
    let out = run_scenario(
        "id period deadline wcet\n1 50 50 5\n",
        "task instance time\n1 0 5\n",
        3,
    );

    assert!(out.trace.contains("DPM -> OFF"));
    // Two full periods (150 ticks / 50-tick period) should each complete
    // cleanly with no missed deadlines.
    assert!(out.analysis.contains("instances=   3") || out.analysis.contains("instances=   2"));
    assert!(out.analysis.contains("misses=   0"));
}

// P6: per-level occupancy plus power-down time exactly partitions total
// execution time, across a run that exercises both DVFS and DPM.
#[test]
fn p6_frequency_and_dpm_occupancy_partition_total_execution_time() {
    let out = run_scenario(
        "id period deadline wcet\n1 50 50 5\n",
        "task instance time\n1 0 5\n",
        2,
    );

    let sum: u32 = out.stats.time_at_frequency.iter().sum::<u32>() + out.stats.time_in_power_down;
    assert_eq!(sum, out.stats.total_execution_time);
}

// P7: trace record count equals total_execution_time.
#[test]
fn p7_trace_record_count_matches_total_execution_time() {
    let out = run_scenario(
        "id period deadline wcet\n1 10 10 10\n",
        "task instance time\n1 0 10\n",
        3,
    );
    assert_eq!(record_count(&out.trace) as u32, out.stats.total_execution_time);
}

// P8: determinism - identical inputs produce byte-identical trace and
// analysis output across two independent runs.
#[test]
fn p8_identical_inputs_produce_identical_output() {
    let task_set = "id period deadline wcet\n1 10 10 10\n2 20 20 5\n";
    let exec_times = "task instance time\n1 0 6\n2 0 5\n";

    let first = run_scenario(task_set, exec_times, 3);
    let second = run_scenario(task_set, exec_times, 3);

    assert_eq!(first.trace, second.trace);
    assert_eq!(first.analysis, second.analysis);
}
