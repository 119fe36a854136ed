//! # Power Controller
//!
//! Pure decision functions for Dynamic Voltage and Frequency Scaling
//! (Cycle-Conserving EDF) and Dynamic Power Management. Everything here
//! borrows its inputs and returns a [`PowerDecision`] by value — no
//! component mutates a [`PowerState`] except [`apply_decision`].
//!
//! ## CCEDF
//!
//! At every tick with a selected task, the required frequency is the
//! smallest level that lets the task's *remaining* work finish by its
//! deadline measured from the current time (`d - t`, not the source
//! prototype's `d - (a + W - r)` — see spec.md §9, adopted here as the
//! more defensible wall-clock form). Comparisons are done with integer
//! fixed-point arithmetic (tenths of a tick) so the decision is exact —
//! no floating-point division ever runs on the hot path.
//!
//! ## DPM
//!
//! Independent of DVFS: when no task is selected, slack beyond the
//! break-even threshold powers the system down; slack dropping back to
//! or below the threshold wakes it up.

use crate::config::DPM_THRESHOLD_TICKS;
use crate::task::{Task, Tick};

// ---------------------------------------------------------------------------
// Frequency levels
// ---------------------------------------------------------------------------

/// The four discrete DVFS operating points, ascending.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum FrequencyLevel {
    L04,
    L06,
    L08,
    L10,
}

impl FrequencyLevel {
    /// All levels, ascending.
    pub const ALL: [FrequencyLevel; 4] = [
        FrequencyLevel::L04,
        FrequencyLevel::L06,
        FrequencyLevel::L08,
        FrequencyLevel::L10,
    ];

    /// The level's value in tenths of a tick per tick (4, 6, 8, or 10).
    /// Execution progress and tick decrements use this directly, which is
    /// why the fixed-point representation is exact.
    pub fn tenths(self) -> u32 {
        match self {
            FrequencyLevel::L04 => 4,
            FrequencyLevel::L06 => 6,
            FrequencyLevel::L08 => 8,
            FrequencyLevel::L10 => 10,
        }
    }

    /// The level's real value (0.4, 0.6, 0.8, 1.0), for display and the
    /// cubic energy proxy.
    pub fn value(self) -> f64 {
        self.tenths() as f64 / 10.0
    }

    /// Index into `[0.4, 0.6, 0.8, 1.0]`, used to bucket per-level
    /// occupancy statistics.
    pub fn index(self) -> usize {
        match self {
            FrequencyLevel::L04 => 0,
            FrequencyLevel::L06 => 1,
            FrequencyLevel::L08 => 2,
            FrequencyLevel::L10 => 3,
        }
    }
}

impl std::fmt::Display for FrequencyLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:.1}", self.value())
    }
}

// ---------------------------------------------------------------------------
// Power state & decision
// ---------------------------------------------------------------------------

/// The processor's current operating point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PowerState {
    /// Current DVFS level.
    pub frequency: FrequencyLevel,
    /// Whether the processor is in a low-power sleep state. When `true`,
    /// no task may be `Running` during that tick.
    pub dpm_active: bool,
}

impl Default for PowerState {
    fn default() -> Self {
        Self {
            frequency: FrequencyLevel::L10,
            dpm_active: false,
        }
    }
}

/// A power-management action to apply this tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PowerDecision {
    NoChange,
    DvfsChange(FrequencyLevel),
    DpmOn,
    DpmOff,
}

impl PowerDecision {
    /// Human-readable form matching the spec.md §6 trace grammar.
    pub fn describe(self) -> String {
        match self {
            PowerDecision::NoChange => "No change".to_string(),
            PowerDecision::DvfsChange(level) => format!("DVFS -> {level}"),
            PowerDecision::DpmOn => "DPM -> ON".to_string(),
            PowerDecision::DpmOff => "DPM -> OFF".to_string(),
        }
    }
}

/// Apply a decision to a power state in place, returning which counter
/// (if any) the caller's stats should bump.
pub fn apply_decision(decision: PowerDecision, state: &mut PowerState) {
    match decision {
        PowerDecision::NoChange => {}
        PowerDecision::DvfsChange(level) => state.frequency = level,
        PowerDecision::DpmOn => state.dpm_active = true,
        PowerDecision::DpmOff => state.dpm_active = false,
    }
}

// ---------------------------------------------------------------------------
// System slack
// ---------------------------------------------------------------------------

/// System slack, in tenths of a tick. `None` represents unbounded slack
/// (no task ready, none scheduled to arrive — displayed as `MAX`).
pub type Slack = Option<i64>;

/// Whether slack exceeds the DPM break-even threshold.
fn exceeds_threshold(slack: Slack) -> bool {
    match slack {
        None => true,
        Some(tenths) => tenths > (DPM_THRESHOLD_TICKS as i64) * 10,
    }
}

// ---------------------------------------------------------------------------
// CCEDF (DVFS) decision
// ---------------------------------------------------------------------------

/// Compute the CCEDF decision for the currently selected task.
///
/// If DPM is active, the first order of business is always to wake up —
/// the frequency itself is left untouched until the following tick's
/// decision, per spec.md §4.2.
pub fn dvfs_decision(task: &Task, now: Tick, state: &PowerState) -> PowerDecision {
    if state.dpm_active {
        return PowerDecision::DpmOff;
    }

    let required = required_level(task, now);
    if required == state.frequency {
        PowerDecision::NoChange
    } else {
        PowerDecision::DvfsChange(required)
    }
}

/// The smallest frequency level sufficient to finish `task`'s remaining
/// work by its deadline, measured from `now`.
fn required_level(task: &Task, now: Tick) -> FrequencyLevel {
    let time_to_deadline = task.absolute_deadline as i64 - now as i64;

    if task.remaining_tenths > 0 {
        if time_to_deadline <= 0 {
            // Already late: nothing to be gained by throttling down.
            return FrequencyLevel::L10;
        }
        let r = task.remaining_tenths as i64;
        // Minimal L (in tenths) such that L/10 >= r/(10*ttd), i.e.
        // L * ttd >= r.
        for level in FrequencyLevel::ALL {
            if level.tenths() as i64 * time_to_deadline >= r {
                return level;
            }
        }
        FrequencyLevel::L10
    } else {
        // Release-time baseline: W / (d - a).
        let window = (task.absolute_deadline - task.arrival_time) as i64;
        let w = task.current_actual_execution_time() as i64;
        if window <= 0 {
            return FrequencyLevel::L10;
        }
        for level in FrequencyLevel::ALL {
            if level.tenths() as i64 * window >= w * 10 {
                return level;
            }
        }
        FrequencyLevel::L10
    }
}

// ---------------------------------------------------------------------------
// DPM decision
// ---------------------------------------------------------------------------

/// Compute the DPM decision given system slack and the current state.
/// Only called when no task was selected this tick.
pub fn dpm_decision(slack: Slack, state: &PowerState) -> PowerDecision {
    if !state.dpm_active && exceeds_threshold(slack) {
        PowerDecision::DpmOn
    } else if state.dpm_active && !exceeds_threshold(slack) {
        PowerDecision::DpmOff
    } else {
        PowerDecision::NoChange
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
