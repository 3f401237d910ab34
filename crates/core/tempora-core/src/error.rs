//! Error types for Tempora

use thiserror::Error;

/// Tempora result type
pub type Result<T> = std::result::Result<T, TemporaError>;

/// Errors that can occur while building workloads or reporting on runs
#[derive(Error, Debug)]
pub enum TemporaError {
    /// Process has no bursts at all
    #[error("process {name} has an empty burst sequence")]
    EmptyBurstSequence { name: String },

    /// Burst sequence ends on an I/O burst, so the run can never converge
    #[error("process {name} ends on an I/O burst and would never complete")]
    TrailingIoBurst { name: String },

    /// Averages requested over an empty terminated set
    #[error("no completed processes to report on")]
    NoCompletedProcesses,

    /// Utilization percentage requested for a zero-length run
    #[error("cannot compute CPU utilization for a zero-length run")]
    ZeroTotalTime,

    /// Terminated process without a recorded first dispatch
    #[error("process {name} terminated without ever being dispatched")]
    MissingResponseTime { name: String },

    /// Terminated process without a recorded completion time
    #[error("process {name} terminated without a recorded completion time")]
    MissingCompletionTime { name: String },
}
