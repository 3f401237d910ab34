//! Scheduling policies for CPU dispatch
//!
//! Implements the dispatch-order and preemption rules the simulator is
//! parameterized over:
//! - FCFS: strict arrival order, each CPU burst runs to completion
//! - SJF: shortest next burst first, non-preemptive
//! - Round Robin: preemptive, bounded by a time quantum

use std::collections::VecDeque;

use tempora_core::Process;

/// Dispatch policy trait
pub trait DispatchPolicy {
    /// Maximum CPU time a single dispatch may grant; `None` runs the
    /// current burst to completion.
    fn time_slice(&self) -> Option<u64>;

    /// Restore the policy's ready-queue ordering after a mutation.
    ///
    /// The simulator calls this after the initial population, after every
    /// dispatch, and after every idle tick, so arrivals from I/O are
    /// covered as well. The default keeps insertion order.
    fn reorder(&self, _ready: &mut VecDeque<Process>) {}

    /// Get policy name
    fn name(&self) -> &str;
}

/// First-Come-First-Served: run whatever is at the head, never reorder.
pub struct FcfsPolicy;

impl DispatchPolicy for FcfsPolicy {
    fn time_slice(&self) -> Option<u64> {
        None
    }

    fn name(&self) -> &str {
        "First-Come-First-Served"
    }
}

/// Shortest-Job-First by next CPU burst, non-preemptive.
///
/// The ready queue is re-sorted ascending by `current_burst` after every
/// mutation. The sort is stable, so equal bursts keep insertion order.
pub struct SjfPolicy;

impl DispatchPolicy for SjfPolicy {
    fn time_slice(&self) -> Option<u64> {
        None
    }

    fn reorder(&self, ready: &mut VecDeque<Process>) {
        ready
            .make_contiguous()
            .sort_by_key(|process| process.current_burst());
    }

    fn name(&self) -> &str {
        "Shortest-Job-First"
    }
}

/// Round Robin with a fixed time quantum.
pub struct RoundRobinPolicy {
    quantum: u64,
    name: String,
}

impl RoundRobinPolicy {
    /// Create a Round Robin policy.
    ///
    /// # Panics
    /// If `quantum` is zero; a zero quantum would never make progress.
    pub fn new(quantum: u64) -> Self {
        assert!(quantum > 0, "Round Robin quantum must be positive");

        RoundRobinPolicy {
            quantum,
            name: format!("Round Robin (quantum={})", quantum),
        }
    }

    pub fn quantum(&self) -> u64 {
        self.quantum
    }
}

impl DispatchPolicy for RoundRobinPolicy {
    fn time_slice(&self) -> Option<u64> {
        Some(self.quantum)
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fcfs_keeps_insertion_order() {
        let policy = FcfsPolicy;
        let mut ready: VecDeque<Process> = VecDeque::new();
        ready.push_back(Process::new("slow", vec![9]));
        ready.push_back(Process::new("fast", vec![1]));

        policy.reorder(&mut ready);

        assert_eq!(ready[0].name, "slow");
        assert_eq!(policy.time_slice(), None);
    }

    #[test]
    fn test_sjf_sorts_by_next_burst() {
        let policy = SjfPolicy;
        let mut ready: VecDeque<Process> = VecDeque::new();
        ready.push_back(Process::new("x", vec![6]));
        ready.push_back(Process::new("y", vec![2]));
        ready.push_back(Process::new("z", vec![4]));

        policy.reorder(&mut ready);

        let names: Vec<&str> = ready.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["y", "z", "x"]);
    }

    #[test]
    fn test_sjf_ties_keep_insertion_order() {
        let policy = SjfPolicy;
        let mut ready: VecDeque<Process> = VecDeque::new();
        ready.push_back(Process::new("first", vec![3]));
        ready.push_back(Process::new("second", vec![3]));

        policy.reorder(&mut ready);

        assert_eq!(ready[0].name, "first");
        assert_eq!(ready[1].name, "second");
    }

    #[test]
    fn test_round_robin_grants_quantum() {
        let policy = RoundRobinPolicy::new(5);

        assert_eq!(policy.time_slice(), Some(5));
        assert_eq!(policy.name(), "Round Robin (quantum=5)");
    }

    #[test]
    #[should_panic(expected = "quantum must be positive")]
    fn test_round_robin_rejects_zero_quantum() {
        RoundRobinPolicy::new(0);
    }
}
