//! Run-level result types for the simulation engine

use serde::{Deserialize, Serialize};

use tempora_core::{Process, Result, TemporaError};

/// Result of a single scheduling run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    pub policy_name: String,

    /// Final value of the logical clock.
    pub total_time: u64,

    /// Clock units spent executing CPU bursts; idle ticks are excluded.
    pub cpu_time: u64,

    /// Every input process, carrying its final timing statistics, in
    /// completion order.
    pub terminated: Vec<Process>,
}

impl RunReport {
    /// CPU utilization as a percentage of total simulated time.
    ///
    /// Fails on a zero-length run instead of dividing to NaN.
    pub fn cpu_utilization_percent(&self) -> Result<f64> {
        if self.total_time == 0 {
            return Err(TemporaError::ZeroTotalTime);
        }
        Ok(self.cpu_time as f64 / self.total_time as f64 * 100.0)
    }

    pub fn average_waiting_time(&self) -> Result<f64> {
        let count = self.completed_count()?;
        let total: u64 = self.terminated.iter().map(|p| p.waiting_time).sum();
        Ok(total as f64 / count)
    }

    pub fn average_turnaround_time(&self) -> Result<f64> {
        let count = self.completed_count()?;
        let mut total = 0u64;
        for process in &self.terminated {
            total += process
                .turnaround_time
                .ok_or_else(|| TemporaError::MissingCompletionTime {
                    name: process.name.clone(),
                })?;
        }
        Ok(total as f64 / count)
    }

    pub fn average_response_time(&self) -> Result<f64> {
        let count = self.completed_count()?;
        let mut total = 0u64;
        for process in &self.terminated {
            total += process
                .response_time
                .ok_or_else(|| TemporaError::MissingResponseTime {
                    name: process.name.clone(),
                })?;
        }
        Ok(total as f64 / count)
    }

    fn completed_count(&self) -> Result<f64> {
        if self.terminated.is_empty() {
            return Err(TemporaError::NoCompletedProcesses);
        }
        Ok(self.terminated.len() as f64)
    }
}
