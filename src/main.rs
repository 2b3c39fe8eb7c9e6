//! rdj - Flat job configuration tool for Rundeck.
//!
//! Usage:
//!   rdj validate <jobs-dir>  Validate job configurations
//!   rdj list <jobs-dir>      List all jobs in the directory
//!   rdj render <file>        Print the job definition for a flat YAML file
//!   rdj flatten <file>       Print the flat YAML for a job definition

use clap::{Parser, Subcommand};
use rdjob::{Job, JobConfigBuilder, YamlLoader, config::load_jobs_from_directory, job_to_flat};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// rdj - Flat job configuration tool for Rundeck
#[derive(Parser)]
#[command(name = "rdj")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate job configurations
    Validate {
        /// Path to the directory containing job YAML files
        #[arg(value_name = "JOBS_DIR")]
        jobs_dir: PathBuf,
    },

    /// List all jobs in the directory
    List {
        /// Path to the directory containing job YAML files
        #[arg(value_name = "JOBS_DIR")]
        jobs_dir: PathBuf,
    },

    /// Assemble a flat YAML job into a job definition and print it as JSON
    Render {
        /// Path to the flat job YAML file
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print on a single line
        #[arg(long)]
        compact: bool,
    },

    /// Flatten a JSON job definition and print it as YAML
    Flatten {
        /// Path to the job definition JSON file
        #[arg(value_name = "FILE")]
        file: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Validate { jobs_dir } => validate_jobs(jobs_dir)?,
        Commands::List { jobs_dir } => list_jobs(jobs_dir)?,
        Commands::Render { file, compact } => render_job(file, compact)?,
        Commands::Flatten { file } => flatten_job(file)?,
    }

    Ok(())
}

/// Validate job configurations.
fn validate_jobs(jobs_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    info!("Validating jobs in: {}", jobs_dir.display());

    match load_jobs_from_directory(&jobs_dir) {
        Ok(jobs) => {
            if jobs.is_empty() {
                warn!("No job files found in {}", jobs_dir.display());
                return Ok(());
            }
            info!("All {} job(s) are valid:", jobs.len());
            for job in &jobs {
                info!("  - {} ({}): OK", job.full_name(), job.project_name);
            }
            Ok(())
        }
        Err(e) => {
            error!("Validation failed: {}", e);
            Err(e.into())
        }
    }
}

/// List all jobs in the directory.
fn list_jobs(jobs_dir: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let jobs = load_jobs_from_directory(&jobs_dir)?;

    if jobs.is_empty() {
        println!("No jobs found in {}", jobs_dir.display());
        return Ok(());
    }

    println!("Jobs in {}:", jobs_dir.display());
    println!();

    for job in &jobs {
        println!("Job: {}", job.full_name());
        println!("  Project: {}", job.project_name);
        println!("  Enabled: {}", job.execution_enabled);
        match &job.schedule {
            Some(schedule) => println!("  Schedule: {}", schedule),
            None => println!("  Schedule: manual only"),
        }
        println!("  Steps: {}", job.sequence.commands.len());

        for command in &job.sequence.commands {
            let label = if command.description.is_empty() {
                step_kind(command)
            } else {
                command.description.as_str()
            };
            if command.error_handler.is_some() {
                println!("    - {} (with error handler)", label);
            } else {
                println!("    - {}", label);
            }
        }

        if let Some(options) = &job.options {
            let names: Vec<&str> = options.options.iter().map(|o| o.name.as_str()).collect();
            println!("  Options: {}", names.join(", "));
        }

        println!();
    }

    Ok(())
}

fn step_kind(command: &rdjob::Command) -> &'static str {
    if command.job.is_some() {
        "job reference"
    } else if command.step_plugin.is_some() || command.node_step_plugin.is_some() {
        "plugin"
    } else if !command.script.is_empty() {
        "inline script"
    } else if !command.script_file.is_empty() {
        "script file"
    } else {
        "shell command"
    }
}

/// Print the job definition for a flat YAML file.
fn render_job(file: PathBuf, compact: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = YamlLoader::load_job_config(&file)?;
    let job = JobConfigBuilder::build(&config)?;

    let json = if compact {
        serde_json::to_string(&job)?
    } else {
        serde_json::to_string_pretty(&job)?
    };
    println!("{}", json);
    Ok(())
}

/// Print the flat YAML for a job definition.
fn flatten_job(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let content = std::fs::read_to_string(&file)?;
    let job: Job = serde_json::from_str(&content)?;

    print!("{}", YamlLoader::to_yaml(&job_to_flat(&job))?);
    Ok(())
}
