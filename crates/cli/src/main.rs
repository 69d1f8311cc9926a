#![forbid(unsafe_code)]

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use qprs_core::{Parameter, Timer};
use qprs_io::{read_problem, write_report, SolveReport};
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "qprs")]
#[command(version, about = "Sparse QP modelling over the OSQP kernel")]
struct Cli {
    #[arg(long)]
    log_json: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Solve {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long = "param", value_name = "NAME=VALUE")]
        params: Vec<String>,
        #[arg(long)]
        verbose_solver: bool,
        #[arg(long)]
        output: Option<PathBuf>,
        #[arg(long)]
        output_json: bool,
    },
    Check {
        #[arg(long)]
        problem: PathBuf,
        #[arg(long)]
        point: Option<String>,
    },
    Bench {},
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    initialize_tracing(cli.log_json);
    match cli.command {
        Commands::Solve {
            problem,
            params,
            verbose_solver,
            output,
            output_json,
        } => solve_command(problem, params, verbose_solver, output, output_json),
        Commands::Check { problem, point } => check_command(problem, point),
        Commands::Bench {} => {
            println!("Benchmarks are available via `cargo bench -p qprs-benches`.");
            Ok(())
        }
    }
}

fn initialize_tracing(log_json: bool) {
    if log_json {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .json()
            .try_init()
            .ok();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init()
            .ok();
    }
}

fn solve_command(
    path: PathBuf,
    params: Vec<String>,
    verbose_solver: bool,
    output: Option<PathBuf>,
    output_json: bool,
) -> Result<()> {
    let problem = read_problem(&path)?;
    let mut model = problem
        .to_model()
        .with_context(|| format!("problem file {:?} failed validation", path))?;
    for raw in &params {
        let (param, value) = parse_param(raw)?;
        model
            .set_parameter(param, value)
            .with_context(|| format!("applying override '{raw}'"))?;
    }
    model.set_verbose(verbose_solver);

    let timer = Timer::start();
    model.solve()?;
    let report = SolveReport::from_model(&model, timer.elapsed());
    tracing::info!(
        status = %report.status,
        elapsed_ms = report.solve_time_ms,
        "solve finished"
    );
    emit_report(&report, output, output_json)
}

fn parse_param(raw: &str) -> Result<(Parameter, f64)> {
    let (name, value) = raw
        .split_once('=')
        .with_context(|| format!("expected NAME=VALUE, got '{raw}'"))?;
    let param: Parameter = name.parse()?;
    let value: f64 = value
        .parse()
        .with_context(|| format!("invalid numeric value in '{raw}'"))?;
    Ok((param, value))
}

fn emit_report(report: &SolveReport, output: Option<PathBuf>, output_json: bool) -> Result<()> {
    if output_json {
        let stdout = std::io::stdout();
        let mut handle = stdout.lock();
        serde_json::to_writer_pretty(&mut handle, report)?;
        handle.write_all(b"\n")?;
        handle.flush()?;
    } else {
        println!("status: {} ({})", report.status, report.code);
        println!("solve time: {:.3} ms", report.solve_time_ms);
        if let Some(objective) = report.objective {
            println!("objective: {objective:.6}");
        }
        if let Some(optimal) = &report.optimal {
            println!("x: {optimal:?}");
        }
    }
    if let Some(path) = output {
        write_report(path, report)?;
    }
    Ok(())
}

fn check_command(path: PathBuf, point: Option<String>) -> Result<()> {
    let problem = read_problem(&path)?;
    let model = problem
        .to_model()
        .with_context(|| format!("problem file {:?} failed validation", path))?;
    println!(
        "ok: {} variables, {} constraints, {} constraint entries, {} quadratic entries",
        model.num_variables(),
        model.num_constraints(),
        problem.constraint_coefficients.len(),
        problem.quadratic_objective.len()
    );
    if let Some(text) = point {
        let candidate = parse_point(&text)?;
        println!("candidate feasible: {}", model.is_feasible(&candidate)?);
        println!("candidate objective: {:.6}", model.evaluate(&candidate)?);
    }
    Ok(())
}

fn parse_point(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(|item| {
            let item = item.trim();
            item.parse::<f64>()
                .with_context(|| format!("invalid coordinate '{item}'"))
        })
        .collect()
}
