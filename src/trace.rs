//! # Trace Emitter
//!
//! Serializes each tick's observable state to the line-oriented record
//! described in spec.md §6. Grounded in
//! `original_source/scheduler.c`'s `logSchedulerState`.

use std::io::{self, Write};

use crate::power::{PowerDecision, PowerState};
use crate::task::{Task, Tick};

/// Writes the trace header once, then one record per tick.
pub struct TraceWriter<W: Write> {
    out: W,
}

impl<W: Write> TraceWriter<W> {
    /// Wrap a writer and emit the two header lines immediately.
    pub fn new(mut out: W) -> io::Result<Self> {
        writeln!(
            out,
            "Time | Running Task       | Freq | Mode       |  Slack | Decision"
        )?;
        writeln!(
            out,
            "---------------------------------------------------------------"
        )?;
        Ok(Self { out })
    }

    /// Emit one tick's record.
    ///
    /// `running` is the task selected this tick (after DPM/DVFS
    /// decisions have been applied), `slack` is in tenths of a tick (see
    /// [`crate::power::Slack`]), `None` rendering as `MAX`.
    pub fn write_record(
        &mut self,
        time: Tick,
        running: Option<&Task>,
        state: &PowerState,
        slack: Option<i64>,
        decision: PowerDecision,
    ) -> io::Result<()> {
        write!(self.out, "{time:5} | ")?;

        match running {
            Some(task) => write!(
                self.out,
                "Task {:2} ({:2}/{:2}) | ",
                task.id,
                task.remaining_tenths / 10,
                task.absolute_deadline
            )?,
            None => write!(self.out, "     None           | ")?,
        }

        write!(self.out, "{:.1}  | ", state.frequency.value())?;
        write!(
            self.out,
            "{} | ",
            if state.dpm_active { "Power-down" } else { "Active    " }
        )?;

        match slack {
            Some(tenths) => write!(self.out, "{:6} | ", tenths / 10)?,
            None => write!(self.out, "   MAX | ")?,
        }

        writeln!(self.out, "{}", decision.describe())
    }

    /// Release the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }
}
