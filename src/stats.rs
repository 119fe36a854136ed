//! # Statistics Accumulator
//!
//! Tick-granular counters for per-frequency occupancy, DPM occupancy,
//! energy, and DVFS/DPM transition counts. Per-task completion
//! statistics (instances completed, deadline misses, response time) live
//! on [`crate::task::Task`] instead — this accumulator only tracks
//! system-wide, power-related quantities.

use crate::config::ENERGY_LEAK;
use crate::power::{FrequencyLevel, PowerDecision, PowerState};
use crate::task::Tick;

/// System-wide scheduler/power statistics, accumulated one tick at a
/// time.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchedulerStats {
    /// Total ticks simulated so far.
    pub total_execution_time: Tick,
    /// Cumulative energy estimate (cubic proxy plus DPM leakage).
    pub energy_consumption: f64,
    /// Number of `DvfsChange` decisions applied.
    pub dvfs_transitions: u32,
    /// Number of `DpmOn`/`DpmOff` decisions applied.
    pub dpm_transitions: u32,
    /// Ticks spent active at each of the four frequency levels, indexed
    /// by [`FrequencyLevel::index`].
    pub time_at_frequency: [Tick; 4],
    /// Ticks spent in power-down mode.
    pub time_in_power_down: Tick,
}

impl SchedulerStats {
    /// Fresh, zeroed statistics.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the transition counters implied by an applied decision.
    /// Call this once per tick, immediately after `apply_decision`.
    pub fn observe_decision(&mut self, decision: PowerDecision) {
        match decision {
            PowerDecision::NoChange => {}
            PowerDecision::DvfsChange(_) => self.dvfs_transitions += 1,
            PowerDecision::DpmOn | PowerDecision::DpmOff => self.dpm_transitions += 1,
        }
    }

    /// Record one tick's occupancy and energy, given the (already
    /// updated) power state for this tick.
    pub fn observe_tick(&mut self, state: &PowerState) {
        self.total_execution_time += 1;

        if state.dpm_active {
            self.time_in_power_down += 1;
            self.energy_consumption += ENERGY_LEAK;
        } else {
            self.time_at_frequency[state.frequency.index()] += 1;
            let f = state.frequency.value();
            self.energy_consumption += f * f * f;
        }
    }

    /// Percentage of total execution time spent at the given frequency
    /// level, or `0.0` if no ticks have been simulated yet.
    pub fn percent_at_frequency(&self, level: FrequencyLevel) -> f64 {
        self.percent(self.time_at_frequency[level.index()])
    }

    /// Percentage of total execution time spent in power-down mode.
    pub fn percent_in_power_down(&self) -> f64 {
        self.percent(self.time_in_power_down)
    }

    fn percent(&self, ticks: Tick) -> f64 {
        if self.total_execution_time == 0 {
            0.0
        } else {
            ticks as f64 / self.total_execution_time as f64 * 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::power::FrequencyLevel;

    #[test]
    fn observe_tick_partitions_into_frequency_and_power_down() {
        let mut stats = SchedulerStats::new();
        stats.observe_tick(&PowerState {
            frequency: FrequencyLevel::L10,
            dpm_active: false,
        });
        stats.observe_tick(&PowerState {
            frequency: FrequencyLevel::L10,
            dpm_active: true,
        });
        assert_eq!(stats.total_execution_time, 2);
        assert_eq!(stats.time_at_frequency[3], 1);
        assert_eq!(stats.time_in_power_down, 1);
    }

    #[test]
    fn energy_uses_cubic_proxy_when_active() {
        let mut stats = SchedulerStats::new();
        stats.observe_tick(&PowerState {
            frequency: FrequencyLevel::L04,
            dpm_active: false,
        });
        assert!((stats.energy_consumption - 0.4f64.powi(3)).abs() < 1e-9);
    }

    #[test]
    fn energy_uses_leakage_constant_when_powered_down() {
        let mut stats = SchedulerStats::new();
        stats.observe_tick(&PowerState {
            frequency: FrequencyLevel::L10,
            dpm_active: true,
        });
        assert_eq!(stats.energy_consumption, ENERGY_LEAK);
    }

    #[test]
    fn observe_decision_counts_transitions_by_kind() {
        let mut stats = SchedulerStats::new();
        stats.observe_decision(PowerDecision::DvfsChange(FrequencyLevel::L06));
        stats.observe_decision(PowerDecision::DpmOn);
        stats.observe_decision(PowerDecision::DpmOff);
        stats.observe_decision(PowerDecision::NoChange);
        assert_eq!(stats.dvfs_transitions, 1);
        assert_eq!(stats.dpm_transitions, 2);
    }

    #[test]
    fn percent_helpers_guard_against_zero_ticks() {
        let stats = SchedulerStats::new();
        assert_eq!(stats.percent_at_frequency(FrequencyLevel::L10), 0.0);
        assert_eq!(stats.percent_in_power_down(), 0.0);
    }

    #[test]
    fn frequency_and_power_down_percentages_partition_total() {
        let mut stats = SchedulerStats::new();
        for _ in 0..3 {
            stats.observe_tick(&PowerState {
                frequency: FrequencyLevel::L10,
                dpm_active: false,
            });
        }
        stats.observe_tick(&PowerState {
            frequency: FrequencyLevel::L10,
            dpm_active: true,
        });
        let total: f64 = stats
            .time_at_frequency
            .iter()
            .map(|&t| stats.percent(t))
            .sum::<f64>()
            + stats.percent_in_power_down();
        assert!((total - 100.0).abs() < 1e-9);
    }
}
