//! Orphan well risk screening CLI
//!
//! ```text
//! orphan-risk                       # fetch (if needed), score, write outputs
//! orphan-risk --offline analyze     # cached GIS data only
//! orphan-risk dossier --api 3500320743
//! orphan-risk self-check
//! orphan-risk print-config
//! ```

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use orphan_well_risk::config::{defaults, AnalysisConfig};
use orphan_well_risk::pipeline::{self, RunOptions};
use orphan_well_risk::report;

#[derive(Parser, Debug)]
#[command(name = "orphan-risk")]
#[command(about = "Orphan Well Groundwater Risk Screening")]
#[command(version)]
struct CliArgs {
    /// Path to a risk_config.toml (overrides ORPHAN_RISK_CONFIG and ./risk_config.toml)
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Orphan well table (CSV)
    #[arg(long, value_name = "FILE")]
    wells: Option<PathBuf>,

    /// Output directory
    #[arg(short, long, value_name = "DIR")]
    output: Option<PathBuf>,

    /// Seed for synthetic domestic wells (overrides run.random_seed)
    #[arg(long, env = "ORPHAN_RISK_SEED")]
    seed: Option<u64>,

    /// Do not download GIS archives; use the cache only
    #[arg(long)]
    offline: bool,

    /// Emit logs as JSON lines
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Option<SubCommand>,
}

#[derive(clap::Subcommand, Debug)]
enum SubCommand {
    /// Score all wells and write the summary, metrics and dossiers (default)
    Analyze {
        /// Skip per-well dossiers
        #[arg(long)]
        no_dossiers: bool,
    },

    /// Score all wells and write the dossier for one of them
    Dossier {
        /// API well number
        #[arg(long)]
        api: u64,
    },

    /// Check the leak model against the reference well
    SelfCheck,

    /// Print the effective configuration as TOML
    PrintConfig,
}

fn init_logging(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    if json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();
    init_logging(args.json_logs);

    let (mut config, provenance) =
        AnalysisConfig::load(args.config.as_deref()).context("Failed to load configuration")?;
    if let Some(wells) = args.wells {
        config.data.wells_csv = wells;
    }
    if let Some(output) = args.output {
        config.data.output_dir = output;
    }

    if !provenance.explicit_keys.is_empty() {
        info!(keys = ?provenance.overridden_keys(), "Config file overrides");
    }

    let options = RunOptions {
        offline: args.offline,
        seed: args.seed,
        write_dossiers: true,
    };

    match args.command.unwrap_or(SubCommand::Analyze { no_dossiers: false }) {
        SubCommand::Analyze { no_dossiers } => {
            let options = RunOptions {
                write_dossiers: !no_dossiers,
                ..options
            };
            let summary = pipeline::run_full_analysis(&config, &options)
                .await
                .context("Risk analysis failed")?;

            let (high, moderate, low) = summary.output.tier_counts();
            info!(
                wells = summary.output.records.len(),
                high,
                moderate,
                low,
                water_m3_yr = summary.output.total_water_safeguarded_m3(),
                seed = summary.seed,
                "Analysis finished"
            );
            println!();
            println!("  Wells scored:        {}", summary.output.records.len());
            println!("  High / Mod / Low:    {high} / {moderate} / {low}");
            println!(
                "  Water safeguarded:   {:.1} m³/yr",
                summary.output.total_water_safeguarded_m3()
            );
            println!("  Seed:                {}", summary.seed);
            println!("  Output directory:    {}", config.data.output_dir.display());
        }

        SubCommand::Dossier { api } => {
            let (output, _seed) = pipeline::score_from_sources(&config, &options)
                .await
                .context("Risk analysis failed")?;
            let record = output
                .record(api)
                .ok_or(report::ReportError::UnknownWell(api))?;
            std::fs::create_dir_all(&config.data.output_dir).with_context(|| {
                format!("Failed to create {}", config.data.output_dir.display())
            })?;
            let path = report::write_dossier(record, &config.scoring, &config.data.output_dir)?;
            println!("Dossier written to {}", path.display());
        }

        SubCommand::SelfCheck => {
            let report = pipeline::reference_self_check(&config);
            println!(
                "P(leak) = {:.4} (expected {:.2} ± {:.2})",
                report.p_leak,
                report.p_leak_expected,
                defaults::SELF_CHECK_P_LEAK_TOLERANCE
            );
            println!(
                "Water   = {:.1} m³/yr (expected {:.0} ± {:.0})",
                report.water_m3,
                report.water_expected,
                defaults::SELF_CHECK_WATER_TOLERANCE
            );
            if !report.passed() {
                warn!("Self-check failed");
                return Err(anyhow::anyhow!(
                    "Reference self-check out of tolerance (P(leak) {:.4}, water {:.1})",
                    report.p_leak,
                    report.water_m3
                ));
            }
            println!("Self-check passed");
        }

        SubCommand::PrintConfig => {
            print!("{}", config.to_annotated_toml(&provenance)?);
        }
    }

    Ok(())
}
