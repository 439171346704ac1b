use crate::baseline::BaselineStats;
use crate::prelude::{
    Channel, ProcessingStage, StageInput, StageMetadata, StageOutput, SynthConfig, SynthError,
    SynthResult,
};
use crate::telemetry::log::LogManager;
use std::f64::consts::TAU;

/// Adds the channel mean and the envelope-scaled harmonic sum.
///
/// The input samples are the modulation envelope, one value per timestamp.
pub struct HarmonicStage {
    baseline: BaselineStats,
    config: Option<SynthConfig>,
    logger: LogManager,
}

impl HarmonicStage {
    pub fn new(baseline: BaselineStats) -> Self {
        Self {
            baseline,
            config: None,
            logger: LogManager::new("harmonic"),
        }
    }
}

impl ProcessingStage for HarmonicStage {
    fn initialize(&mut self, config: &SynthConfig) -> SynthResult<()> {
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput<'_>) -> SynthResult<StageOutput> {
        let config = self
            .config
            .as_ref()
            .ok_or_else(|| SynthError::Internal("harmonic stage not initialized".into()))?;
        let channel = input
            .channel
            .ok_or_else(|| SynthError::InvalidInput("harmonic stage needs a channel".into()))?;

        if input.samples.len() != input.time.len() {
            return Err(SynthError::InvalidInput(format!(
                "envelope has {} samples for {} timestamps",
                input.samples.len(),
                input.time.len()
            )));
        }

        let offset = self.baseline.channel(channel).mean;
        let harmonics = &config.channel(channel).harmonics;
        let omega = TAU * config.fundamental_hz;

        let mut samples = input.samples;
        for (value, &t) in samples.iter_mut().zip(input.time) {
            let tone: f64 = harmonics
                .iter()
                .map(|h| h.amplitude * (omega * h.order as f64 * t + h.phase).sin())
                .sum();
            *value = offset + *value * tone;
        }

        self.logger.record(&format!(
            "{} offset {:.6} with {} harmonics",
            channel.column_name(),
            offset,
            harmonics.len()
        ));

        let metadata = StageMetadata {
            notes: vec![format!("{:?} harmonics {}", channel, harmonics.len())],
            ..Default::default()
        };

        Ok(StageOutput { samples, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
