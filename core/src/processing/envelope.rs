use crate::math::stats::StatsHelper;
use crate::prelude::{
    EnvelopeConfig, ProcessingStage, StageInput, StageMetadata, StageOutput, SynthConfig,
    SynthError, SynthResult,
};
use crate::telemetry::log::LogManager;
use std::f64::consts::TAU;

/// Builds the slow amplitude-modulation envelope `1 + depth * sin(2π f t)`.
pub struct EnvelopeStage {
    config: Option<EnvelopeConfig>,
    logger: LogManager,
}

impl EnvelopeStage {
    pub fn new() -> Self {
        Self {
            config: None,
            logger: LogManager::new("envelope"),
        }
    }
}

impl Default for EnvelopeStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for EnvelopeStage {
    fn initialize(&mut self, config: &SynthConfig) -> SynthResult<()> {
        self.config = Some(config.envelope);
        Ok(())
    }

    fn execute(&mut self, input: StageInput<'_>) -> SynthResult<StageOutput> {
        let config = self
            .config
            .ok_or_else(|| SynthError::Internal("envelope stage not initialized".into()))?;

        if input.time.is_empty() {
            return Err(SynthError::InvalidInput("no timestamps provided".into()));
        }

        let samples: Vec<f64> = input
            .time
            .iter()
            .map(|&t| 1.0 + config.depth * (TAU * config.frequency_hz * t).sin())
            .collect();

        let bounds = StatsHelper::bounds(&samples);
        if let Some((lo, hi)) = bounds {
            self.logger
                .record(&format!("envelope spans [{:.4}, {:.4}]", lo, hi));
        }

        let metadata = StageMetadata {
            envelope_bounds: bounds,
            notes: vec![format!(
                "envelope {:.3} Hz depth {:.3}",
                config.frequency_hz, config.depth
            )],
        };

        Ok(StageOutput { samples, metadata })
    }

    fn cleanup(&mut self) {
        self.config = None;
    }
}
