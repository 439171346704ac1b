use anyhow::Context;
use mainscore::baseline::BaselineStats;
use mainscore::export::Column;
use mainscore::prelude::{Channel, ProcessingStage, StageInput, SynthConfig};
use mainscore::processing::{EnvelopeStage, HarmonicStage, NoiseStage, TimeBase};

pub struct WorkflowResult {
    pub voltage: Vec<f64>,
    pub current: Vec<f64>,
    pub envelope_bounds: (f64, f64),
    pub notes: Vec<String>,
}

impl WorkflowResult {
    pub fn len(&self) -> usize {
        self.voltage.len()
    }

    pub fn channel(&self, channel: Channel) -> &[f64] {
        match channel {
            Channel::Voltage => &self.voltage,
            Channel::Current => &self.current,
        }
    }

    /// Output columns in `Vadc`, `Iadc` order.
    pub fn columns(&self) -> [Column<'_>; 2] {
        Channel::ALL.map(|channel| Column::new(channel.column_name(), self.channel(channel)))
    }
}

#[derive(Clone)]
pub struct Runner {
    config: SynthConfig,
}

impl Runner {
    pub fn new(config: SynthConfig) -> Self {
        Self { config }
    }

    pub fn execute(&self, baseline: &BaselineStats) -> anyhow::Result<WorkflowResult> {
        let timebase = TimeBase::from_config(&self.config).context("building time base")?;
        let time = timebase.times();

        let mut envelope_stage = EnvelopeStage::new();
        envelope_stage
            .initialize(&self.config)
            .context("initializing envelope stage")?;
        let envelope_output = envelope_stage
            .execute(StageInput {
                time,
                samples: Vec::new(),
                channel: None,
            })
            .context("executing envelope stage")?;
        envelope_stage.cleanup();

        let envelope_bounds = envelope_output
            .metadata
            .envelope_bounds
            .context("envelope stage produced no bounds")?;
        let mut notes = envelope_output.metadata.notes.clone();

        let mut harmonic_stage = HarmonicStage::new(*baseline);
        harmonic_stage
            .initialize(&self.config)
            .context("initializing harmonic stage")?;
        let mut noise_stage = NoiseStage::new();
        noise_stage
            .initialize(&self.config)
            .context("initializing noise stage")?;

        let mut signals = Vec::with_capacity(Channel::ALL.len());
        for channel in Channel::ALL {
            let harmonic_output = harmonic_stage
                .execute(StageInput {
                    time,
                    samples: envelope_output.samples.clone(),
                    channel: Some(channel),
                })
                .with_context(|| format!("executing harmonic stage for {:?}", channel))?;
            let noise_output = noise_stage
                .execute(StageInput {
                    time,
                    samples: harmonic_output.samples,
                    channel: Some(channel),
                })
                .with_context(|| format!("executing noise stage for {:?}", channel))?;

            notes.extend(harmonic_output.metadata.notes);
            notes.extend(noise_output.metadata.notes);
            signals.push(noise_output.samples);
        }
        harmonic_stage.cleanup();
        noise_stage.cleanup();

        let current = signals.pop().context("missing current signal")?;
        let voltage = signals.pop().context("missing voltage signal")?;

        Ok(WorkflowResult {
            voltage,
            current,
            envelope_bounds,
            notes,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mainscore::baseline::SampleTable;
    use mainscore::export::CsvExporter;
    use mainscore::math::StatsHelper;
    use std::fs;
    use std::path::Path;
    use tempfile::tempdir;

    fn short_config(seed: u64) -> SynthConfig {
        SynthConfig {
            duration_s: 2,
            seed,
            ..Default::default()
        }
    }

    fn run(config: SynthConfig) -> WorkflowResult {
        let baseline = SampleTable::embedded().stats().unwrap();
        Runner::new(config).execute(&baseline).unwrap()
    }

    #[test]
    fn runner_produces_rate_times_duration_samples() {
        let result = run(short_config(1));
        assert_eq!(result.len(), 4000);
        assert_eq!(result.current.len(), 4000);
    }

    #[test]
    fn runner_means_track_baseline() {
        let baseline = SampleTable::embedded().stats().unwrap();
        let result = run(short_config(3));
        // Whole cycles of every harmonic, so only the noise moves the mean.
        assert!((StatsHelper::mean(&result.voltage) - baseline.voltage.mean).abs() < 0.005);
        assert!((StatsHelper::mean(&result.current) - baseline.current.mean).abs() < 0.005);
    }

    #[test]
    fn runner_is_reproducible_for_a_seed() {
        let first = run(short_config(11));
        let second = run(short_config(11));
        assert_eq!(first.voltage, second.voltage);
        assert_eq!(first.current, second.current);

        let other = run(short_config(12));
        assert_ne!(first.voltage, other.voltage);
    }

    #[test]
    fn runner_envelope_within_configured_bounds() {
        let config = SynthConfig {
            duration_s: 10,
            ..Default::default()
        };
        let (min, max) = config.envelope.bounds();
        let (lo, hi) = run(config).envelope_bounds;
        assert!(lo >= min - 1e-12);
        assert!(hi <= max + 1e-12);
    }

    #[test]
    fn runner_rejects_invalid_config() {
        let baseline = SampleTable::embedded().stats().unwrap();
        let config = SynthConfig {
            sample_rate_hz: 0,
            ..Default::default()
        };
        assert!(Runner::new(config).execute(&baseline).is_err());
    }

    fn export(config: SynthConfig, path: &Path) -> String {
        let result = run(config);
        let rows = CsvExporter::new(path).write(&result.columns()).unwrap();
        assert_eq!(rows, result.len());
        fs::read_to_string(path).unwrap()
    }

    #[test]
    fn runner_output_writes_expected_csv() {
        let dir = tempdir().unwrap();
        let config = short_config(21);
        let expected_rows = config.sample_count().unwrap();
        let contents = export(config.clone(), &dir.path().join("first.csv"));

        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines[0], "Vadc,Iadc");
        assert_eq!(lines.len(), expected_rows + 1);
        for line in &lines[1..] {
            let fields: Vec<&str> = line.split(',').collect();
            assert_eq!(fields.len(), 2, "row {:?}", line);
            assert!(fields.iter().all(|f| f.parse::<f64>().is_ok()));
        }

        let again = export(config, &dir.path().join("second.csv"));
        assert_eq!(contents.as_bytes(), again.as_bytes());
    }

    #[test]
    fn runner_header_is_fixed_for_tuned_channels() {
        let mut config = short_config(4);
        config.voltage.harmonics.truncate(1);
        config.current.noise_std = 0.0;
        let dir = tempdir().unwrap();
        let contents = export(config, &dir.path().join("tuned.csv"));
        assert_eq!(contents.lines().next(), Some("Vadc,Iadc"));
    }
}
