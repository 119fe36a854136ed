//! # EDF Scheduler
//!
//! Release/selection/slack/execution/reap logic for Earliest-Deadline-First
//! dispatch over a [`TaskSet`]. Every method here mutates only the task
//! set it is given; power state and statistics are owned and updated
//! elsewhere (see [`crate::power`] and [`crate::stats`]).

use crate::power::Slack;
use crate::task::{Task, TaskSet, TaskState, Tick};

/// Release every task whose next arrival is due at `now`.
///
/// Iterates the task set in insertion order; at most one release per
/// task can happen per tick since `next_arrival` only ever advances.
pub fn release_arrivals(tasks: &mut TaskSet, now: Tick) {
    for task in tasks.iter_mut() {
        if task.state == TaskState::Idle && now >= task.next_arrival {
            task.release(now);
        }
    }
}

/// Select the EDF-highest-priority task: the Ready/Running task with the
/// smallest absolute deadline, ties broken by array order. Promotes the
/// winner to `Running` (a task already `Running` stays `Running`).
///
/// Returns the winning task's identifier, or `None` if no task is
/// currently active.
pub fn select_highest_priority(tasks: &mut TaskSet) -> Option<u32> {
    let winner_id = tasks
        .iter()
        .filter(|t| t.is_active())
        .min_by_key(|t| t.absolute_deadline)
        .map(|t| t.id)?;

    let winner = tasks.find_mut(winner_id).expect("winner_id came from this set");
    winner.state = TaskState::Running;
    Some(winner_id)
}

/// System slack: the minimum per-task slack over Ready/Running tasks, or
/// (if none are active) the time until the soonest future arrival. Both
/// are expressed in tenths of a tick; `None` means unbounded (no active
/// task and no pending arrival).
pub fn compute_system_slack(tasks: &TaskSet, now: Tick) -> Slack {
    let active_slack = tasks
        .iter()
        .filter(|t| t.is_active())
        .map(|t| {
            let deadline_tenths = (t.absolute_deadline as i64 - now as i64) * 10;
            deadline_tenths - t.remaining_tenths as i64
        })
        .min();

    if let Some(slack) = active_slack {
        return Some(slack);
    }

    tasks
        .iter()
        .filter(|t| t.next_arrival > now)
        .map(|t| (t.next_arrival - now) as i64 * 10)
        .min()
}

/// Advance the running task (if any) by one tick at the given frequency.
pub fn execute_tick(task: &mut Task, frequency_tenths: u32) {
    task.run_one_tick(frequency_tenths);
}

/// Reap any task whose current instance has finished, recording
/// completion statistics and rolling over to the next instance.
pub fn reap_completions(tasks: &mut TaskSet, now: Tick) {
    for task in tasks.iter_mut() {
        if task.state == TaskState::Running && task.is_finished() {
            task.complete(now);
        }
    }
}
