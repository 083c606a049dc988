//! `warden` — governance coverage audits for the current working tree.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing::error;

use warden_audit::pipeline::AuditPipeline;
use warden_core::config::{CliOverrides, WardenConfig};
use warden_core::errors::WardenErrorCode;
use warden_core::tracing_setup::init_tracing;

#[derive(Parser)]
#[command(name = "warden", about = "Governance enforcement and coverage audits")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a full audit over the working tree and write the coverage
    /// artifacts (the default when no subcommand is given)
    Generate(GenerateArgs),
}

#[derive(Args)]
struct GenerateArgs {
    /// Project root to audit
    #[arg(long, default_value = ".")]
    root: PathBuf,

    /// Output directory for artifacts, relative to the root
    #[arg(long)]
    output_dir: Option<String>,

    /// Number of gaps shown in the human-readable report
    #[arg(long)]
    top_gaps: Option<usize>,

    /// Source roots scanned for governed modules (repeatable)
    #[arg(long = "source-root")]
    source_roots: Vec<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();
    let args = match cli.command {
        Some(Commands::Generate(args)) => args,
        None => cli.generate,
    };

    match generate(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}

async fn generate(args: GenerateArgs) -> Result<(), String> {
    let overrides = CliOverrides {
        output_dir: args.output_dir.clone(),
        top_gaps: args.top_gaps,
        source_roots: args.source_roots.clone(),
    };

    let config = WardenConfig::load(&args.root, Some(&overrides)).map_err(|e| {
        error!(error = %e, "configuration failed to load");
        e.coded_string()
    })?;

    let pipeline = AuditPipeline::new(&args.root, config);
    let outcome = pipeline.run().await.map_err(|e| {
        error!(error = %e, "audit run aborted");
        e.coded_string()
    })?;

    let summary = &outcome.map.summary;
    println!(
        "{} rules: {} enforced, {} partial, {} implementable/declared, {} unknown ({:.1}% executed)",
        summary.rules_total,
        summary.rules_enforced,
        summary.rules_partially_enforced,
        summary.rules_implementable_or_declared_only,
        summary.rules_unknown,
        summary.execution_rate,
    );
    println!(
        "{} findings, {} gaps",
        outcome.findings.len(),
        outcome.gaps.len()
    );
    println!("report: {}", outcome.paths.report.display());
    println!("snapshot: {}", outcome.paths.snapshot.display());
    Ok(())
}
