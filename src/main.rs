//! Mortgage System CLI
//!
//! Reads one mortgage request as JSON (from the argument, or stdin when the
//! argument is `-`) and prints the repayment schedule as JSON.
//!
//! ```text
//! mortgage '{"start_value": 240000, "repayment_period": 300,
//!            "loan_terms": [{"rate": 0.0519, "term": 24}, {"rate": 0.0779, "term": 1}]}'
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use mortgage_system::loan::{SolverConfig, DEFAULT_TOLERANCE};
use mortgage_system::mortgage::{MortgageRequest, MortgageResponse};
use mortgage_system::roots::DEFAULT_MAX_ITERATIONS;

/// Calculate an illustrative mortgage repayment schedule
#[derive(Parser, Debug)]
#[command(name = "mortgage", version, about)]
struct Cli {
    /// Mortgage request as JSON, or `-` to read it from stdin
    string: String,

    /// Bisection tolerance for the flat-payment search
    #[arg(long, default_value_t = DEFAULT_TOLERANCE)]
    tol: f64,

    /// Bisection iteration budget
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    max_iterations: u32,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn read_request(string: &str) -> Result<String> {
    if string != "-" {
        return Ok(string.to_string());
    }
    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("failed to read mortgage request from stdin")?;
    Ok(buffer)
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let json = read_request(&cli.string)?;

    let request = MortgageRequest::from_json(&json)?;
    let mortgage = request.to_mortgage()?;
    let base = SolverConfig::default()
        .with_tolerance(cli.tol)
        .with_max_iterations(cli.max_iterations);
    let config = request.solver_config(base);

    info!(
        "calculating {} term(s) over {} periods on {:.2}",
        mortgage.loan_terms().len(),
        mortgage.repayment_period(),
        mortgage.start_value()
    );
    let result = mortgage
        .run(&config)
        .context("mortgage calculation failed")?;
    let response = MortgageResponse::from(result);

    let output = if cli.pretty {
        serde_json::to_string_pretty(&response)?
    } else {
        serde_json::to_string(&response)?
    };
    println!("{}", output);

    Ok(())
}
