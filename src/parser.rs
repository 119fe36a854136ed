//! # Input Parsers
//!
//! Reads the task-set and actual-execution-times files described in
//! spec.md §6. Grounded in `original_source/task_set.c`'s `loadTaskSet`
//! and `loadActualExecutionTimes`: only a failure to open the file is
//! fatal, every malformed or out-of-range line is a logged warning and
//! otherwise ignored, so one bad line in a large file cannot abort a run.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::config::MAX_INSTANCES;
use crate::error::SimError;
use crate::task::{Task, TaskSet};

/// Parse a task-set file (`id period deadline wcet` per line, one header
/// line) into a [`TaskSet`].
///
/// The header line is always discarded, whatever it contains. Blank
/// lines and lines starting with `#` are skipped silently; anything else
/// that fails to parse as four whitespace-separated fields is a logged
/// warning naming the 1-based line number. A task beyond `MAX_TASKS` is
/// logged and discarded rather than truncating the file read.
pub fn parse_task_set(path: impl AsRef<Path>) -> Result<TaskSet, SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SimError::io(path, e))?;
    let reader = BufReader::new(file);

    let mut set = TaskSet::new();
    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line_no = line_no + 1; // 1-based, header already skipped
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("task set line {line_no}: failed to read: {e}");
                continue;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let parsed = match fields.as_slice() {
            [id, period, deadline, wcet] => (
                id.parse::<u32>(),
                period.parse::<u32>(),
                deadline.parse::<u32>(),
                wcet.parse::<u32>(),
            ),
            _ => {
                log::warn!("task set line {line_no}: expected 4 fields, got {}", fields.len());
                continue;
            }
        };

        let (id, period, deadline, wcet) = match parsed {
            (Ok(id), Ok(period), Ok(deadline), Ok(wcet)) => (id, period, deadline, wcet),
            _ => {
                log::warn!("task set line {line_no}: non-numeric field");
                continue;
            }
        };

        if set.insert(Task::new(id, period, deadline, wcet)).is_err() {
            log::warn!("task set line {line_no}: task {id} exceeds task-set capacity, discarded");
        }
    }

    Ok(set)
}

/// Parse an actual-execution-times file (`task_id instance_id exec_time`
/// per line, one header line) and overlay the values onto `tasks`.
///
/// An unknown `task_id` or an `instance_id` at or beyond `MAX_INSTANCES`
/// is a logged warning; the rest of the file is still processed.
pub fn parse_execution_times(path: impl AsRef<Path>, tasks: &mut TaskSet) -> Result<(), SimError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SimError::io(path, e))?;
    let reader = BufReader::new(file);

    for (line_no, line) in reader.lines().enumerate().skip(1) {
        let line_no = line_no + 1;
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                log::warn!("execution times line {line_no}: failed to read: {e}");
                continue;
            }
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let fields: Vec<&str> = line.split_whitespace().collect();
        let parsed = match fields.as_slice() {
            [task_id, instance_id, exec_time] => (
                task_id.parse::<u32>(),
                instance_id.parse::<usize>(),
                exec_time.parse::<u32>(),
            ),
            _ => {
                log::warn!(
                    "execution times line {line_no}: expected 3 fields, got {}",
                    fields.len()
                );
                continue;
            }
        };

        let (task_id, instance_id, exec_time) = match parsed {
            (Ok(t), Ok(i), Ok(e)) => (t, i, e),
            _ => {
                log::warn!("execution times line {line_no}: non-numeric field");
                continue;
            }
        };

        if instance_id >= MAX_INSTANCES {
            log::warn!(
                "execution times line {line_no}: instance {instance_id} >= MAX_INSTANCES, discarded"
            );
            continue;
        }

        match tasks.find_mut(task_id) {
            Some(task) => task.actual_execution_time[instance_id] = exec_time,
            None => log::warn!("execution times line {line_no}: unknown task {task_id}, discarded"),
        }
    }

    Ok(())
}
