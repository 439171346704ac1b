use anyhow::Context;
use clap::Parser;
use log::{debug, info};
use mainscore::baseline::SampleTable;
use mainscore::export::CsvExporter;
use report::model::RunSummary;
use report::writer::SummaryReporter;
use std::path::PathBuf;
use workflow::config::DatasetConfig;
use workflow::runner::Runner;

mod report;
mod workflow;

#[derive(Parser)]
#[command(author, version, about = "Synthesizes the mains voltage/current CSV dataset")]
struct Args {
    /// Load a dataset config from YAML
    #[arg(long)]
    config: Option<PathBuf>,
    /// CSV destination
    #[arg(long)]
    output: Option<PathBuf>,
    /// Seed for the noise generator
    #[arg(long)]
    seed: Option<u64>,
    /// Dataset length in seconds
    #[arg(long)]
    duration: Option<u32>,
    /// Also write a JSON run summary
    #[arg(long)]
    summary: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match args.config {
        Some(path) => DatasetConfig::load(path)?,
        None => DatasetConfig::default(),
    }
    .with_overrides(args.output, args.seed, args.duration, args.summary);

    let table = SampleTable::embedded();
    let baseline = table.stats().context("computing baseline statistics")?;
    info!(
        "baseline from {} samples: voltage mean {:.6} std {:.6}, current mean {:.6} std {:.6}",
        table.len(),
        baseline.voltage.mean,
        baseline.voltage.std_dev,
        baseline.current.mean,
        baseline.current.std_dev
    );

    let runner = Runner::new(config.synthesis.clone());
    let result = runner.execute(&baseline)?;
    info!(
        "synthesized {} samples, envelope [{:.4}, {:.4}]",
        result.len(),
        result.envelope_bounds.0,
        result.envelope_bounds.1
    );
    for note in &result.notes {
        debug!("stage note: {}", note);
    }

    let exporter = CsvExporter::new(&config.output);
    exporter
        .write(&result.columns())
        .with_context(|| format!("writing dataset {}", config.output.display()))?;
    println!("Generated {}", config.output.display());

    if let Some(path) = config.summary.as_ref() {
        let summary = RunSummary::build(&config, &baseline, &result, exporter.metrics());
        SummaryReporter::publish(&summary);
        SummaryReporter::write(path, &summary)?;
    }

    Ok(())
}
