//! Compile-time constants governing the simulator's capacity and policy
//! thresholds.

/// Maximum number of tasks a single run can hold.
///
/// Mirrors `MAX_TASKS` in the original FreeRTOS prototype's `task_set.h`.
pub const MAX_TASKS: usize = 50;

/// Maximum number of tracked instances per task. `currentInstance` wraps
/// modulo this value, reusing stored actual-execution-time entries for
/// long simulations (intentional — see `original_source/task_set.c`).
pub const MAX_INSTANCES: usize = 100;

/// DPM break-even threshold, in ticks. Entering power-down is only
/// worthwhile if the idle slack exceeds this many ticks.
pub const DPM_THRESHOLD_TICKS: u32 = 20;

/// Default simulation horizon, expressed as a multiple of the largest
/// task period. Not a true hyperperiod (no LCM computation) — see
/// spec.md §9.
pub const DEFAULT_N_PERIODS: u32 = 3;

/// Static leakage energy charged for a tick spent in power-down mode.
pub const ENERGY_LEAK: f64 = 0.05;

/// Number of tenths-of-a-tick in one whole tick. `remainingExecutionTime`
/// and system slack are represented in this fixed-point unit so that
/// ticking down by a frequency level (0.4, 0.6, 0.8, 1.0 — each an exact
/// multiple of a tenth) is always exact integer arithmetic.
pub const TENTHS_PER_TICK: u32 = 10;
