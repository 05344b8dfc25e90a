// Copyright 2025 Sushanth (https://github.com/sushanthpy)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.


//! adreport CLI
//!
//! Campaign performance reports from ad-delivery event logs.

use adreport_cli::{
    init_logging, run_report, sample_records, write_json_lines, CliConfig, DateRange,
    OutputFormat, SampleSpec,
};
use adreport_core::ReportView;
use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use tracing::info;

#[derive(Parser)]
#[command(name = "adreport")]
#[command(about = "adreport - campaign performance aggregation and ranking", long_about = None)]
struct Cli {
    /// Configuration file (TOML)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose mode
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build report views from an event file
    Report {
        /// Event records (JSON array or JSON lines)
        #[arg(short, long)]
        input: PathBuf,

        /// View to produce; repeat for several (default: all)
        #[arg(long = "view")]
        views: Vec<ReportView>,

        /// First date to include (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last date to include (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,

        /// Keep ranked rows with rank <= N
        #[arg(long)]
        max_rank: Option<u64>,

        /// Output as JSON (machine-readable)
        #[arg(long)]
        json: bool,

        /// Evaluate views and partitions in parallel
        #[arg(long)]
        parallel: bool,
    },

    /// Write random sample events as JSON lines
    Generate {
        /// Output file
        #[arg(short, long)]
        output: PathBuf,

        /// Number of events
        #[arg(long, default_value = "1000")]
        count: usize,

        /// Number of campaigns
        #[arg(long, default_value = "5")]
        campaigns: u32,

        /// First event date (YYYY-MM-DD)
        #[arg(long, default_value = "2024-01-01")]
        start: NaiveDate,

        /// Number of days the events span
        #[arg(long, default_value = "90")]
        days: u32,

        /// Seed for reproducible output
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = CliConfig::load(cli.config.as_deref())?;
    init_logging(&config.logging, cli.verbose);
    if let Some(path) = &cli.config {
        info!("Loaded configuration from {:?}", path);
    }

    match cli.command {
        Commands::Report {
            input,
            views,
            from,
            to,
            max_rank,
            json,
            parallel,
        } => {
            // command-line flags override file and environment
            if !views.is_empty() {
                config.engine.views = views;
            }
            if let Some(max_rank) = max_rank {
                config.engine.max_rank = max_rank;
            }
            if json {
                config.output.format = OutputFormat::Json;
            }
            if parallel {
                config.engine.parallel = true;
            }

            let range = DateRange::new(from, to)?;
            let stdout = std::io::stdout().lock();
            let summary = run_report(&input, range, &config, BufWriter::new(stdout))?;

            if !summary.is_success() {
                anyhow::bail!(
                    "{} of {} views failed",
                    summary.failed.len(),
                    summary.failed.len() + summary.emitted.len()
                );
            }
        }

        Commands::Generate {
            output,
            count,
            campaigns,
            start,
            days,
            seed,
        } => {
            let spec = SampleSpec {
                count,
                campaigns,
                start,
                days,
                seed,
            };
            let records = sample_records(&spec)?;

            let file = File::create(&output)
                .with_context(|| format!("Failed to create {:?}", output))?;
            let mut writer = BufWriter::new(file);
            write_json_lines(&mut writer, &records)
                .with_context(|| format!("Failed to write {:?}", output))?;

            info!(count = records.len(), path = ?output, "Generated sample events");
            println!("✓ Wrote {} events to {:?}", records.len(), output);
        }
    }

    Ok(())
}
