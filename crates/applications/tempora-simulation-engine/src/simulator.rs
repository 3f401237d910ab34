//! Discrete-event CPU scheduling simulator
//!
//! Drives a set of processes through one scheduling policy over a single
//! logical clock. I/O runs "in parallel" only in the modeled sense: every
//! unit the CPU spends on one process also drains one unit from each
//! waiting process's I/O burst.

use std::collections::VecDeque;

use tracing::{debug, info};

use tempora_core::Process;

use crate::policies::DispatchPolicy;
use crate::types::RunReport;

/// Advance every waiting process's I/O burst by `elapsed`.
///
/// Each process's `waiting_time` grows by the amount actually consumed.
/// Processes whose I/O burst completes flip back to a CPU burst and move
/// to the ready-queue tail, in the order the waiting queue was scanned.
/// The queue is drained and rebuilt so removal never invalidates the scan.
pub(crate) fn advance_io(
    waiting: &mut Vec<Process>,
    ready: &mut VecDeque<Process>,
    elapsed: u64,
) {
    if waiting.is_empty() {
        return;
    }

    let mut still_waiting = Vec::with_capacity(waiting.len());

    for mut process in waiting.drain(..) {
        let used = process.consume(elapsed);
        process.waiting_time += used;

        if process.awaits_io() {
            still_waiting.push(process);
        } else {
            debug!(process = %process.name, "I/O complete, moving to ready queue");
            ready.push_back(process);
        }
    }

    *waiting = still_waiting;
}

/// Single-CPU scheduling simulator.
///
/// Repeatedly pops the ready-queue head, executes part or all of the
/// current CPU burst according to the policy's time slice, advances the
/// clock and the utilization counter, and lets I/O progress for the
/// elapsed duration. When only waiting processes remain, the clock
/// advances one idle tick at a time until something becomes ready.
pub struct Simulator {
    policy: Box<dyn DispatchPolicy>,
    clock: u64,
    cpu_time: u64,
}

impl Simulator {
    pub fn new(policy: Box<dyn DispatchPolicy>) -> Self {
        Self::with_counters(policy, 0, 0)
    }

    /// Create a simulator that resumes from carried-over counters.
    ///
    /// The feedback-queue levels use this to chain one level's clock and
    /// utilization into the next.
    pub fn with_counters(policy: Box<dyn DispatchPolicy>, clock: u64, cpu_time: u64) -> Self {
        Simulator {
            policy,
            clock,
            cpu_time,
        }
    }

    pub fn clock(&self) -> u64 {
        self.clock
    }

    pub fn cpu_time(&self) -> u64 {
        self.cpu_time
    }

    /// Run the full population to completion and report.
    pub fn run(mut self, processes: Vec<Process>) -> RunReport {
        let mut ready: VecDeque<Process> = processes.into();
        let mut waiting = Vec::new();
        let mut terminated = Vec::new();

        info!(
            policy = self.policy.name(),
            processes = ready.len(),
            "starting scheduling run"
        );

        self.policy.reorder(&mut ready);
        self.run_to_quiescence(&mut ready, &mut waiting, &mut terminated);

        info!(
            policy = self.policy.name(),
            total_time = self.clock,
            "run complete"
        );

        RunReport {
            policy_name: self.policy.name().to_string(),
            total_time: self.clock,
            cpu_time: self.cpu_time,
            terminated,
        }
    }

    /// Drive the queues until both are empty.
    pub(crate) fn run_to_quiescence(
        &mut self,
        ready: &mut VecDeque<Process>,
        waiting: &mut Vec<Process>,
        terminated: &mut Vec<Process>,
    ) {
        while !ready.is_empty() || !waiting.is_empty() {
            if ready.is_empty() {
                self.idle_tick(ready, waiting);
            } else {
                self.dispatch_next(ready, waiting, terminated);
            }
        }
    }

    /// Dispatch each process in the ready queue exactly once, then stop.
    ///
    /// Quantum-preempted processes and I/O completions land on the ready
    /// tail behind the remaining initial members, so neither is
    /// re-dispatched within the pass. The feedback-queue levels use this
    /// so that leftover work is demoted instead of retried here.
    pub(crate) fn run_single_pass(
        &mut self,
        ready: &mut VecDeque<Process>,
        waiting: &mut Vec<Process>,
        terminated: &mut Vec<Process>,
    ) {
        let pass_len = ready.len();
        for _ in 0..pass_len {
            self.dispatch_next(ready, waiting, terminated);
        }
    }

    /// No process is ready: advance one tick and let I/O drain by one unit.
    /// Idle ticks do not count toward CPU utilization.
    fn idle_tick(&mut self, ready: &mut VecDeque<Process>, waiting: &mut Vec<Process>) {
        self.clock += 1;
        advance_io(waiting, ready, 1);
        self.policy.reorder(ready);
    }

    fn dispatch_next(
        &mut self,
        ready: &mut VecDeque<Process>,
        waiting: &mut Vec<Process>,
        terminated: &mut Vec<Process>,
    ) {
        let Some(mut process) = ready.pop_front() else {
            return;
        };

        process.mark_dispatched(self.clock);
        let remaining = process.current_burst();

        match self.policy.time_slice() {
            Some(quantum) if remaining > quantum => {
                // Cooperative preemption: the burst keeps its cursor and the
                // process rejoins the ready tail with the rest to run later.
                process.consume(quantum);
                self.clock += quantum;
                self.cpu_time += quantum;
                advance_io(waiting, ready, quantum);

                debug!(
                    process = %process.name,
                    clock = self.clock,
                    "quantum expired, requeueing"
                );
                ready.push_back(process);
            }
            _ => {
                process.consume(remaining);
                self.clock += remaining;
                self.cpu_time += remaining;
                advance_io(waiting, ready, remaining);

                if process.is_complete() {
                    process.mark_completed(self.clock);
                    debug!(process = %process.name, clock = self.clock, "terminated");
                    terminated.push(process);
                } else {
                    debug!(process = %process.name, clock = self.clock, "entering I/O");
                    waiting.push(process);
                }
            }
        }

        self.policy.reorder(ready);
    }
}
