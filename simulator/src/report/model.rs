use crate::workflow::config::DatasetConfig;
use crate::workflow::runner::WorkflowResult;
use mainscore::baseline::BaselineStats;
use mainscore::math::{FftHelper, StatsHelper};
use mainscore::prelude::Channel;
use mainscore::telemetry::MetricsSnapshot;
use serde::Serialize;
use std::path::PathBuf;

/// Descriptive statistics of one generated column.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelSummary {
    pub name: String,
    pub mean: f64,
    pub std_dev: f64,
    pub rms: f64,
    pub dominant_frequency_hz: Option<f64>,
}

/// Informational record of a dataset run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub output: PathBuf,
    pub seed: u64,
    pub sample_rate_hz: u32,
    pub sample_count: usize,
    pub baseline: BaselineStats,
    pub channels: Vec<ChannelSummary>,
    pub envelope_bounds: (f64, f64),
    pub metrics: MetricsSnapshot,
}

impl RunSummary {
    pub fn build(
        config: &DatasetConfig,
        baseline: &BaselineStats,
        result: &WorkflowResult,
        metrics: MetricsSnapshot,
    ) -> Self {
        let synthesis = &config.synthesis;
        let rate = synthesis.sample_rate_hz as f64;
        let mut fft = FftHelper::new(result.len());

        let channels = Channel::ALL
            .iter()
            .map(|&channel| {
                let samples = result.channel(channel);
                ChannelSummary {
                    name: channel.column_name().to_string(),
                    mean: StatsHelper::mean(samples),
                    std_dev: StatsHelper::std_dev(samples),
                    rms: StatsHelper::rms(samples),
                    dominant_frequency_hz: fft.dominant_frequency(samples, rate),
                }
            })
            .collect();

        Self {
            output: config.output.clone(),
            seed: synthesis.seed,
            sample_rate_hz: synthesis.sample_rate_hz,
            sample_count: result.len(),
            baseline: *baseline,
            channels,
            envelope_bounds: result.envelope_bounds,
            metrics,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::runner::Runner;
    use mainscore::baseline::SampleTable;

    #[test]
    fn summary_reports_fundamental_and_counts() {
        let mut config = DatasetConfig::default();
        config.synthesis.duration_s = 1;
        let baseline = SampleTable::embedded().stats().unwrap();
        let result = Runner::new(config.synthesis.clone())
            .execute(&baseline)
            .unwrap();

        let summary = RunSummary::build(&config, &baseline, &result, MetricsSnapshot::default());
        assert_eq!(summary.sample_count, 2000);
        assert_eq!(summary.channels.len(), 2);
        for channel in &summary.channels {
            let peak = channel.dominant_frequency_hz.unwrap();
            assert!((peak - 50.0).abs() < 1e-9, "{} peak at {}", channel.name, peak);
        }
        assert_eq!(summary.channels[1].name, "Iadc");
    }
}
