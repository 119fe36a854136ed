//! # Task Model
//!
//! Defines the periodic-task value type and the fixed-capacity collection
//! that owns every task in a run.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌──────┐   release()    ┌───────┐   select()    ┌─────────┐
//!   │ Idle │ ─────────────► │ Ready │ ────────────► │ Running │
//!   └──────┘                └───────┘                └─────────┘
//!       ▲                                                 │
//!       └───────────────────  reap() (r == 0)  ───────────┘
//! ```
//!
//! A task holds its own per-instance completion statistics
//! (`instances_completed`, `deadline_misses`, `total_response_time`); the
//! system-wide power/frequency statistics live separately, in
//! [`crate::stats::SchedulerStats`].

use crate::config::{MAX_INSTANCES, MAX_TASKS, TENTHS_PER_TICK};

/// Discrete simulation time, in ticks.
pub type Tick = u32;

// ---------------------------------------------------------------------------
// Task state machine
// ---------------------------------------------------------------------------

/// Execution state of a task's current instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskState {
    /// Not yet released; waiting for `next_arrival`.
    Idle,
    /// Released and eligible to run, but not currently selected.
    Ready,
    /// Currently the EDF-selected task.
    Running,
}

// ---------------------------------------------------------------------------
// Task
// ---------------------------------------------------------------------------

/// A periodic hard-real-time task.
///
/// Static parameters (`period`, `relative_deadline`, `wcet`) are fixed at
/// creation. Everything else is mutated by the scheduler as the
/// simulation progresses.
#[derive(Debug, Clone)]
pub struct Task {
    /// Task identifier, as given in the task-set file.
    pub id: u32,
    /// Period between successive releases.
    pub period: Tick,
    /// Relative deadline, within `(0, period]`.
    pub relative_deadline: Tick,
    /// Worst-case execution time; also the default actual execution time
    /// for any instance not overridden by the execution-times file.
    pub wcet: Tick,

    /// Current lifecycle state.
    pub state: TaskState,
    /// Absolute time of this task's next release.
    pub next_arrival: Tick,
    /// Absolute deadline of the current instance. Only meaningful while
    /// `state != Idle`.
    pub absolute_deadline: Tick,
    /// Release time of the current instance.
    pub arrival_time: Tick,
    /// Remaining execution time of the current instance, in tenths of a
    /// tick. Only meaningful while `state != Idle`.
    pub remaining_tenths: u32,
    /// Index of the current instance, wrapping modulo `MAX_INSTANCES`.
    pub current_instance: usize,
    /// Prescribed actual execution time per instance slot, in ticks.
    /// Defaults to `wcet`, overridable by the execution-times file.
    pub actual_execution_time: Box<[Tick; MAX_INSTANCES]>,

    /// Count of completed instances.
    pub instances_completed: u32,
    /// Count of instances that completed after their absolute deadline.
    pub deadline_misses: u32,
    /// Sum of (completion_time - arrival_time) over completed instances.
    pub total_response_time: u64,
}

impl Task {
    /// Create a new, unreleased task with the given static parameters.
    /// All instance slots default to `wcet`.
    pub fn new(id: u32, period: Tick, relative_deadline: Tick, wcet: Tick) -> Self {
        Self {
            id,
            period,
            relative_deadline,
            wcet,
            state: TaskState::Idle,
            next_arrival: 0,
            absolute_deadline: 0,
            arrival_time: 0,
            remaining_tenths: 0,
            current_instance: 0,
            actual_execution_time: Box::new([wcet; MAX_INSTANCES]),
            instances_completed: 0,
            deadline_misses: 0,
            total_response_time: 0,
        }
    }

    /// The prescribed actual execution time for the current instance, in
    /// ticks.
    pub fn current_actual_execution_time(&self) -> Tick {
        self.actual_execution_time[self.current_instance]
    }

    /// Remaining execution time of the current instance, in whole-tick
    /// units (real-valued, but the tenths representation is exact for
    /// every frequency level).
    pub fn remaining_ticks(&self) -> f64 {
        self.remaining_tenths as f64 / TENTHS_PER_TICK as f64
    }

    /// Whether this task is eligible for EDF selection.
    pub fn is_active(&self) -> bool {
        matches!(self.state, TaskState::Ready | TaskState::Running)
    }

    /// Release the next instance at `now`: `Idle -> Ready`, set up
    /// deadline/arrival bookkeeping, and schedule the following arrival.
    pub(crate) fn release(&mut self, now: Tick) {
        debug_assert_eq!(self.state, TaskState::Idle);
        self.state = TaskState::Ready;
        self.remaining_tenths = self.current_actual_execution_time() * TENTHS_PER_TICK;
        self.arrival_time = now;
        self.absolute_deadline = now + self.relative_deadline;
        self.next_arrival += self.period;
    }

    /// Advance this task's remaining work by one tick at the given
    /// frequency (in tenths — 4, 6, 8, or 10), saturating at zero.
    pub(crate) fn run_one_tick(&mut self, frequency_tenths: u32) {
        debug_assert_eq!(self.state, TaskState::Running);
        self.remaining_tenths = self.remaining_tenths.saturating_sub(frequency_tenths);
    }

    /// Whether the current instance has finished its prescribed work.
    pub(crate) fn is_finished(&self) -> bool {
        self.remaining_tenths == 0
    }

    /// Reap the current instance: `Running -> Idle`, record completion
    /// statistics, and advance to the next instance slot.
    pub(crate) fn complete(&mut self, now: Tick) {
        debug_assert_eq!(self.state, TaskState::Running);
        self.state = TaskState::Idle;
        let response_time = (now - self.arrival_time) as u64;
        self.total_response_time += response_time;
        self.instances_completed += 1;
        if now > self.absolute_deadline {
            self.deadline_misses += 1;
        }
        self.current_instance = (self.current_instance + 1) % MAX_INSTANCES;
    }

    /// Mean response time over all completed instances, or `0.0` if none
    /// have completed.
    pub fn mean_response_time(&self) -> f64 {
        if self.instances_completed == 0 {
            0.0
        } else {
            self.total_response_time as f64 / self.instances_completed as f64
        }
    }
}

// ---------------------------------------------------------------------------
// Task set
// ---------------------------------------------------------------------------

/// Error returned when a task set is already at capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacityExceeded;

/// Fixed-capacity collection of tasks, indexed by identifier.
///
/// Tasks are stored in arrival order (the order they were inserted); EDF
/// ties are broken by this order, matching spec.md §4.1.
#[derive(Debug, Default)]
pub struct TaskSet {
    tasks: Vec<Task>,
}

impl TaskSet {
    /// Create an empty task set.
    pub fn new() -> Self {
        Self { tasks: Vec::new() }
    }

    /// Insert a task, failing if the set is already at `MAX_TASKS`.
    pub fn insert(&mut self, task: Task) -> Result<(), CapacityExceeded> {
        if self.tasks.len() >= MAX_TASKS {
            return Err(CapacityExceeded);
        }
        self.tasks.push(task);
        Ok(())
    }

    /// Number of tasks currently held.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Whether the set holds no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Find a task by identifier.
    pub fn find_mut(&mut self, id: u32) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == id)
    }

    /// Iterate over tasks in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    /// Iterate mutably over tasks in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = &mut Task> {
        self.tasks.iter_mut()
    }

    /// The largest period among all tasks, or `0` if the set is empty.
    pub fn max_period(&self) -> Tick {
        self.tasks.iter().map(|t| t.period).max().unwrap_or(0)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
