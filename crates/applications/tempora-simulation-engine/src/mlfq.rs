//! Multi-level feedback queue composition
//!
//! Cascades three levels over a shared clock: Round Robin with quantum 5,
//! Round Robin with quantum 10, then FCFS. Each round-robin level makes a
//! single pass over the population it receives, so work that a level's
//! quantum preempts is genuinely demoted to the next level rather than
//! retried where it was. The final FCFS level runs the remainder to
//! completion, which guarantees convergence.

use std::collections::VecDeque;

use tracing::info;

use tempora_core::Process;

use crate::policies::{FcfsPolicy, RoundRobinPolicy};
use crate::simulator::Simulator;
use crate::types::RunReport;

pub const LEVEL_ONE_QUANTUM: u64 = 5;
pub const LEVEL_TWO_QUANTUM: u64 = 10;

/// Multi-Level Feedback Queue scheduler.
pub struct MlfqScheduler;

impl MlfqScheduler {
    /// Run the three-level cascade over `processes`.
    ///
    /// Clock and CPU-utilization counters chain across levels; terminated
    /// processes accumulate from every level into one report.
    pub fn run(processes: Vec<Process>) -> RunReport {
        let mut ready: VecDeque<Process> = processes.into();
        let mut waiting = Vec::new();
        let mut terminated = Vec::new();

        info!(processes = ready.len(), "starting multi-level feedback run");

        let mut level_one = Simulator::new(Box::new(RoundRobinPolicy::new(LEVEL_ONE_QUANTUM)));
        level_one.run_single_pass(&mut ready, &mut waiting, &mut terminated);
        info!(
            leftover_ready = ready.len(),
            leftover_waiting = waiting.len(),
            clock = level_one.clock(),
            "level 1 pass complete, demoting leftovers"
        );

        let mut level_two = Simulator::with_counters(
            Box::new(RoundRobinPolicy::new(LEVEL_TWO_QUANTUM)),
            level_one.clock(),
            level_one.cpu_time(),
        );
        level_two.run_single_pass(&mut ready, &mut waiting, &mut terminated);
        info!(
            leftover_ready = ready.len(),
            leftover_waiting = waiting.len(),
            clock = level_two.clock(),
            "level 2 pass complete, demoting leftovers"
        );

        let mut level_three = Simulator::with_counters(
            Box::new(FcfsPolicy),
            level_two.clock(),
            level_two.cpu_time(),
        );
        level_three.run_to_quiescence(&mut ready, &mut waiting, &mut terminated);
        info!(clock = level_three.clock(), "final FCFS level complete");

        RunReport {
            policy_name: "Multi-Level Feedback Queue".to_string(),
            total_time: level_three.clock(),
            cpu_time: level_three.cpu_time(),
            terminated,
        }
    }
}
