//! Tempora Simulation Engine CLI
//!
//! Runs the selected scheduling policies over a shared workload and
//! reports per-run and per-process statistics.

use clap::Parser;
use std::fs;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use tempora_core::Process;
use tempora_simulation_engine::{
    mlfq::MlfqScheduler,
    policies::{FcfsPolicy, RoundRobinPolicy, SjfPolicy},
    simulator::Simulator,
    types::RunReport,
    workload::{sample_processes, validate_workload, WorkloadGenerator},
};

#[derive(Parser, Debug)]
#[command(name = "tempora-sim")]
#[command(about = "Simulate CPU scheduling policies", long_about = None)]
struct Args {
    /// Policies to compare (comma-separated: fcfs,sjf,rr,mlfq)
    #[arg(short, long, default_value = "fcfs,sjf,rr,mlfq")]
    policies: String,

    /// Round Robin time quantum
    #[arg(short, long, default_value_t = 5)]
    quantum: u64,

    /// Number of synthetic processes (0 = builtin sample workload)
    #[arg(short = 'n', long, default_value_t = 0)]
    processes: usize,

    /// RNG seed for synthetic workloads
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Show per-process details for each run
    #[arg(long)]
    detailed: bool,

    /// Output JSON file path (optional)
    #[arg(short, long)]
    output: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tempora=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let workload: Vec<Process> = if args.processes > 0 {
        let mut generator = WorkloadGenerator::new(args.seed);
        generator.generate(args.processes)
    } else {
        sample_processes()
    };
    validate_workload(&workload)?;

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Tempora Simulation Engine                               ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    println!("Configuration:");
    println!("  Processes: {}", workload.len());
    println!("  Round Robin quantum: {}", args.quantum);
    if args.processes > 0 {
        println!("  Synthetic workload seed: {}", args.seed);
    } else {
        println!("  Workload: builtin sample set");
    }
    println!();

    let policy_names: Vec<&str> = args.policies.split(',').map(|s| s.trim()).collect();
    let mut reports = Vec::new();

    for policy_name in &policy_names {
        let processes = workload.clone();

        let report = match *policy_name {
            "fcfs" => Simulator::new(Box::new(FcfsPolicy)).run(processes),
            "sjf" => Simulator::new(Box::new(SjfPolicy)).run(processes),
            "rr" => Simulator::new(Box::new(RoundRobinPolicy::new(args.quantum))).run(processes),
            "mlfq" => MlfqScheduler::run(processes),
            _ => {
                eprintln!("Unknown policy: {}", policy_name);
                continue;
            }
        };

        reports.push(report);
    }

    println!(
        "{:<28} {:>10} {:>10} {:>10} {:>10} {:>10}",
        "Policy", "Total", "CPU %", "Avg wait", "Avg TAT", "Avg resp"
    );
    println!("{}", "-".repeat(82));

    for report in &reports {
        println!(
            "{:<28} {:>10} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            report.policy_name,
            report.total_time,
            report.cpu_utilization_percent()?,
            report.average_waiting_time()?,
            report.average_turnaround_time()?,
            report.average_response_time()?,
        );
    }

    if args.detailed {
        for report in &reports {
            print_process_details(report);
        }
    }

    if let Some(output_path) = args.output {
        println!("\nWriting results to {}...", output_path);
        let json = serde_json::to_string_pretty(&reports)?;
        fs::write(&output_path, json)?;
        println!("  Results saved");
    }

    Ok(())
}

fn print_process_details(report: &RunReport) {
    println!("\n{}", report.policy_name);
    println!(
        "  {:<8} {:>10} {:>12} {:>10}",
        "Process", "Waiting", "Turnaround", "Response"
    );

    for process in &report.terminated {
        println!(
            "  {:<8} {:>10} {:>12} {:>10}",
            process.name,
            process.waiting_time,
            process
                .turnaround_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
            process
                .response_time
                .map(|t| t.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
}
