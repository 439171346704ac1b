use crate::report::model::RunSummary;
use anyhow::Context;
use log::info;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

/// Logs a run summary and optionally persists it as pretty JSON.
pub struct SummaryReporter;

impl SummaryReporter {
    pub fn publish(summary: &RunSummary) {
        for channel in &summary.channels {
            info!(
                "{}: mean {:.6} std {:.6} rms {:.6} peak {:?} Hz",
                channel.name, channel.mean, channel.std_dev, channel.rms, channel.dominant_frequency_hz
            );
        }
        info!(
            "{} rows written to {}, envelope [{:.4}, {:.4}]",
            summary.metrics.rows_written,
            summary.output.display(),
            summary.envelope_bounds.0,
            summary.envelope_bounds.1
        );
    }

    pub fn write<P: AsRef<Path>>(path: P, summary: &RunSummary) -> anyhow::Result<()> {
        let path_ref = path.as_ref();
        if let Some(parent) = path_ref.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("creating summary directory {}", parent.display()))?;
            }
        }
        let file = File::create(path_ref)
            .with_context(|| format!("creating summary {}", path_ref.display()))?;
        let mut writer = BufWriter::new(file);
        serde_json::to_writer_pretty(&mut writer, summary)
            .with_context(|| format!("serializing summary {}", path_ref.display()))?;
        writer
            .flush()
            .with_context(|| format!("flushing summary {}", path_ref.display()))?;
        Ok(())
    }
}
