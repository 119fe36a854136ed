//! # Energy-Aware EDF Scheduling Simulator
//!
//! Offline simulator of a uniprocessor real-time scheduler: Earliest
//! Deadline First dispatch, a Cycle-Conserving EDF policy for dynamic
//! voltage and frequency scaling (DVFS), and slack-threshold Dynamic
//! Power Management (DPM).
//!
//! Given a task set (period, relative deadline, worst-case execution
//! time) and a trace of actual per-instance execution times, the
//! simulator steps through the schedule one tick at a time, selects the
//! processor frequency level the current task needs to make its
//! deadline, and powers the processor down whenever idle slack clears a
//! break-even threshold. It emits a tick-by-tick trace and a summary
//! analysis.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   Simulation Driver (driver)               │
//! │   release -> select -> decide -> apply -> observe ->        │
//! │   emit -> advance -> reap, once per tick                    │
//! ├───────────────┬────────────────────┬───────────────────────┤
//! │  EDF Scheduler│   Power Controller │  Statistics           │
//! │  scheduler.rs │   power.rs         │  stats.rs             │
//! │  ─ release()  │   ─ dvfs_decision()│  ─ observe_tick()     │
//! │  ─ select()   │   ─ dpm_decision() │  ─ observe_decision() │
//! │  ─ slack()    │   ─ apply()        │                       │
//! ├───────────────┴────────────────────┴───────────────────────┤
//! │                   Task Model (task.rs)                      │
//! │         Task · TaskState · TaskSet                          │
//! ├──────────────────────────────────────────────────────────┤
//! │        Parsers (parser.rs)   │   Trace/Analysis (trace.rs,  │
//! │                               │   analysis.rs)               │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Every simulation is deterministic: identical inputs always produce a
//! byte-identical trace and analysis, since every scheduling and power
//! decision is made with integer fixed-point arithmetic (see
//! [`config::TENTHS_PER_TICK`]). Floating point is only ever used to
//! accumulate and display the energy estimate.

pub mod analysis;
pub mod config;
pub mod driver;
pub mod error;
pub mod parser;
pub mod power;
pub mod scheduler;
pub mod stats;
pub mod task;
pub mod trace;
