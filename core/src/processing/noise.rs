use crate::math::stats::StatsHelper;
use crate::prelude::{
    ProcessingStage, StageInput, StageMetadata, StageOutput, SynthConfig, SynthError, SynthResult,
};
use crate::telemetry::log::LogManager;
use rand::{rngs::StdRng, SeedableRng};
use rand_distr::{Distribution, Normal};

/// Adds zero-mean Gaussian noise to a channel.
///
/// A single random stream backs every channel, so the draw order follows the
/// order in which channels are executed.
pub struct NoiseStage {
    rng: Option<StdRng>,
    config: Option<SynthConfig>,
    logger: LogManager,
}

impl NoiseStage {
    pub fn new() -> Self {
        Self {
            rng: None,
            config: None,
            logger: LogManager::new("noise"),
        }
    }
}

impl Default for NoiseStage {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingStage for NoiseStage {
    fn initialize(&mut self, config: &SynthConfig) -> SynthResult<()> {
        self.rng = Some(StdRng::seed_from_u64(config.seed));
        self.config = Some(config.clone());
        Ok(())
    }

    fn execute(&mut self, input: StageInput<'_>) -> SynthResult<StageOutput> {
        let (config, rng) = match (self.config.as_ref(), self.rng.as_mut()) {
            (Some(config), Some(rng)) => (config, rng),
            _ => return Err(SynthError::Internal("noise stage not initialized".into())),
        };
        let channel = input
            .channel
            .ok_or_else(|| SynthError::InvalidInput("noise stage needs a channel".into()))?;

        let sigma = config.channel(channel).noise_std;
        let dist = Normal::new(0.0, sigma)
            .map_err(|err| SynthError::InvalidConfig(format!("noise std {}: {}", sigma, err)))?;

        let mut samples = input.samples;
        for value in samples.iter_mut() {
            *value += dist.sample(rng);
        }

        let rms = StatsHelper::rms(&samples);
        self.logger.trace(&format!(
            "{} noise sigma {:.4}, output RMS {:.4}",
            channel.column_name(),
            sigma,
            rms
        ));

        let metadata = StageMetadata {
            notes: vec![format!("{:?} noise sigma {:.4}", channel, sigma)],
            ..Default::default()
        };

        Ok(StageOutput { samples, metadata })
    }

    fn cleanup(&mut self) {
        self.rng = None;
        self.config = None;
    }
}
