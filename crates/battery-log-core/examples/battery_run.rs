//! Simulated battery-evolution run that records every terminal per iteration.
//!
//! Usage: battery_run [num_terminals] [max_iterations] [output.csv]

use anyhow::{Context, Result};
use battery_log_core::datalog::{CsvLogger, LogOptions, LogReader};
use rand::Rng;
use std::env;
use tracing_subscriber::EnvFilter;

const CHARGE_RATE: f64 = 15.0;
const DEMAND_RATE: f64 = 5.0;
const CONVERGENCE_THRESHOLD: f64 = 1.0;
const INITIAL_BATTERY: f64 = 50.0;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    let num_terminals: usize = match args.get(1) {
        Some(arg) => arg.parse().context("num_terminals must be an integer")?,
        None => 4,
    };
    let max_iterations: i64 = match args.get(2) {
        Some(arg) => arg.parse().context("max_iterations must be an integer")?,
        None => 10,
    };
    let output = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| "battery_training_data.csv".to_string());

    let options = LogOptions::default().with_header(true);
    let mut logger = CsvLogger::open_with(&output, options)
        .with_context(|| format!("Could not open {}", output))?;

    let mut rng = rand::thread_rng();
    let mut batteries = vec![INITIAL_BATTERY; num_terminals];

    for iteration in 0..max_iterations {
        let mut max_change: f64 = 0.0;

        for (terminal, battery) in batteries.iter_mut().enumerate() {
            // Low batteries are more likely to be picked for coverage
            let covered = rng.gen_bool((1.0 - *battery / 100.0).clamp(0.1, 0.9));
            let old = *battery;
            let next = if covered {
                old + CHARGE_RATE
            } else {
                old - DEMAND_RATE
            };
            *battery = next.clamp(0.0, 100.0);
            max_change = max_change.max((*battery - old).abs());

            logger.write(iteration, terminal as i64, *battery, covered as i64)?;
        }

        println!("Iteration {}: max change {:.1}", iteration + 1, max_change);
        if max_change < CONVERGENCE_THRESHOLD {
            println!("Converged after {} iterations", iteration + 1);
            break;
        }
    }

    logger.close()?;

    let reader = LogReader::from_file(&output)?;
    for iteration in reader.iterations() {
        println!(
            "  iter {:>3}: mean battery {:6.1}%, coverage {:5.1}%",
            iteration,
            reader.mean_battery(iteration).unwrap_or_default(),
            reader.coverage_ratio(iteration).unwrap_or_default() * 100.0
        );
    }
    println!("Wrote {} rows to {}", reader.len(), output);

    Ok(())
}
