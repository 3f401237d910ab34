//! Workload construction
//!
//! The reference process set used as the default CLI input, a seeded
//! synthetic generator, and input validation.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};

use tempora_core::{Process, Result};

/// The eight-process reference workload.
pub fn sample_processes() -> Vec<Process> {
    vec![
        Process::new("p1", vec![5, 27, 3, 31, 5, 43, 4, 18, 6, 22, 4, 26, 3, 24, 4]),
        Process::new("p2", vec![4, 48, 5, 44, 7, 42, 12, 37, 9, 76, 4, 41, 9, 31, 7, 43, 8]),
        Process::new("p3", vec![8, 33, 12, 41, 18, 65, 14, 21, 4, 61, 15, 18, 14, 26, 5, 31, 6]),
        Process::new("p4", vec![3, 35, 4, 41, 5, 45, 3, 51, 4, 61, 5, 54, 6, 82, 5, 77, 3]),
        Process::new("p5", vec![16, 24, 17, 21, 5, 36, 16, 26, 7, 31, 13, 28, 11, 21, 6, 13, 3, 11, 4]),
        Process::new("p6", vec![11, 22, 4, 8, 5, 10, 6, 12, 7, 14, 9, 18, 12, 24, 15, 30, 8]),
        Process::new("p7", vec![14, 46, 17, 41, 11, 42, 15, 21, 4, 32, 7, 19, 16, 33, 10]),
        Process::new("p8", vec![4, 14, 5, 33, 6, 51, 14, 73, 16, 87, 6]),
    ]
}

/// Validate a whole input sequence, failing on the first offending process.
pub fn validate_workload(processes: &[Process]) -> Result<()> {
    for process in processes {
        process.validate()?;
    }
    Ok(())
}

/// Synthetic workload generator.
///
/// Seeded so a given seed always produces the same workload. CPU bursts
/// are short and uniform; I/O bursts follow a clamped normal distribution
/// shaped after the reference workload. Every emitted sequence is valid:
/// an odd number of bursts, starting and ending with a CPU burst.
pub struct WorkloadGenerator {
    rng: StdRng,
    io_distribution: Normal<f64>,
}

const CPU_BURST_MIN: u64 = 3;
const CPU_BURST_MAX: u64 = 18;
const IO_BURST_MIN: f64 = 5.0;
const IO_BURST_MAX: f64 = 90.0;

impl WorkloadGenerator {
    pub fn new(seed: u64) -> Self {
        WorkloadGenerator {
            rng: StdRng::seed_from_u64(seed),
            io_distribution: Normal::new(35.0, 18.0).unwrap(),
        }
    }

    /// Generate `count` processes named p1..pN.
    pub fn generate(&mut self, count: usize) -> Vec<Process> {
        (0..count)
            .map(|i| {
                let pairs = self.rng.gen_range(3..=8);
                let mut bursts = Vec::with_capacity(pairs * 2 + 1);

                for _ in 0..pairs {
                    bursts.push(self.cpu_burst());
                    bursts.push(self.io_burst());
                }
                bursts.push(self.cpu_burst());

                Process::new(format!("p{}", i + 1), bursts)
            })
            .collect()
    }

    fn cpu_burst(&mut self) -> u64 {
        self.rng.gen_range(CPU_BURST_MIN..=CPU_BURST_MAX)
    }

    fn io_burst(&mut self) -> u64 {
        let sampled = self.io_distribution.sample(&mut self.rng);
        sampled.round().clamp(IO_BURST_MIN, IO_BURST_MAX) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempora_core::TemporaError;

    #[test]
    fn test_sample_workload_is_valid() {
        let processes = sample_processes();

        assert_eq!(processes.len(), 8);
        assert!(validate_workload(&processes).is_ok());
        assert_eq!(processes[0].total_cpu_time(), 34);
        assert_eq!(processes[0].total_io_time(), 191);
    }

    #[test]
    fn test_generated_workload_is_valid() {
        let mut generator = WorkloadGenerator::new(7);
        let processes = generator.generate(20);

        assert_eq!(processes.len(), 20);
        assert!(validate_workload(&processes).is_ok());
        for process in &processes {
            assert!(process.remaining_bursts() % 2 == 1);
            assert!(process.total_cpu_time() > 0);
        }
    }

    #[test]
    fn test_generation_is_reproducible() {
        let first: Vec<u64> = WorkloadGenerator::new(42)
            .generate(5)
            .iter()
            .map(|p| p.total_cpu_time())
            .collect();
        let second: Vec<u64> = WorkloadGenerator::new(42)
            .generate(5)
            .iter()
            .map(|p| p.total_cpu_time())
            .collect();

        assert_eq!(first, second);
    }

    #[test]
    fn test_validation_rejects_bad_input() {
        let workload = vec![
            Process::new("good", vec![4, 8, 2]),
            Process::new("bad", vec![4, 8]),
        ];

        assert!(matches!(
            validate_workload(&workload),
            Err(TemporaError::TrailingIoBurst { .. })
        ));
    }
}
