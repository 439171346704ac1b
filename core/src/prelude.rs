use serde::{Deserialize, Serialize};

/// The two measured channels of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Channel {
    Voltage,
    Current,
}

impl Channel {
    /// Synthesis order. Noise for the voltage channel is drawn first.
    pub const ALL: [Channel; 2] = [Channel::Voltage, Channel::Current];

    /// CSV column name.
    pub fn column_name(self) -> &'static str {
        match self {
            Channel::Voltage => "Vadc",
            Channel::Current => "Iadc",
        }
    }
}

/// One sinusoidal component, expressed as a multiple of the fundamental.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Harmonic {
    pub order: u32,
    pub amplitude: f64,
    /// Phase offset in radians.
    #[serde(default)]
    pub phase: f64,
}

impl Harmonic {
    pub const fn new(order: u32, amplitude: f64, phase: f64) -> Self {
        Self {
            order,
            amplitude,
            phase,
        }
    }
}

/// Per-channel synthesis parameters.
///
/// The CSV column name is fixed by [`Channel::column_name`] and is not part
/// of the configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ChannelConfig {
    pub harmonics: Vec<Harmonic>,
    /// Standard deviation of the additive Gaussian noise.
    pub noise_std: f64,
}

impl ChannelConfig {
    pub fn voltage() -> Self {
        Self {
            harmonics: vec![Harmonic::new(1, 0.2, 0.0), Harmonic::new(3, 0.05, 0.0)],
            noise_std: 0.01,
        }
    }

    pub fn current() -> Self {
        Self {
            harmonics: vec![Harmonic::new(1, 0.15, 0.3), Harmonic::new(5, 0.03, 0.0)],
            noise_std: 0.015,
        }
    }
}

/// Slow amplitude modulation shared by both channels, simulating load changes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EnvelopeConfig {
    pub frequency_hz: f64,
    pub depth: f64,
}

impl Default for EnvelopeConfig {
    fn default() -> Self {
        Self {
            frequency_hz: 0.2,
            depth: 0.1,
        }
    }
}

impl EnvelopeConfig {
    /// Closed interval the envelope may occupy.
    pub fn bounds(&self) -> (f64, f64) {
        (1.0 - self.depth, 1.0 + self.depth)
    }
}

/// Upper bound on dataset rows: twelve hours at 2 kHz. Each row costs several
/// `f64` buffers during synthesis.
pub const MAX_SAMPLE_COUNT: usize = 86_400_000;

/// Shared configuration for every synthesis stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SynthConfig {
    pub sample_rate_hz: u32,
    pub duration_s: u32,
    pub fundamental_hz: f64,
    pub envelope: EnvelopeConfig,
    pub voltage: ChannelConfig,
    pub current: ChannelConfig,
    pub seed: u64,
}

impl Default for SynthConfig {
    fn default() -> Self {
        Self {
            sample_rate_hz: 2000,
            duration_s: 600,
            fundamental_hz: 50.0,
            envelope: EnvelopeConfig::default(),
            voltage: ChannelConfig::voltage(),
            current: ChannelConfig::current(),
            seed: 0,
        }
    }
}

impl SynthConfig {
    pub fn channel(&self, channel: Channel) -> &ChannelConfig {
        match channel {
            Channel::Voltage => &self.voltage,
            Channel::Current => &self.current,
        }
    }

    /// Number of rows the dataset will hold, capped at [`MAX_SAMPLE_COUNT`].
    pub fn sample_count(&self) -> SynthResult<usize> {
        let count = (self.sample_rate_hz as usize)
            .checked_mul(self.duration_s as usize)
            .ok_or_else(|| {
                SynthError::InvalidConfig(format!(
                    "sample count overflows: {} Hz x {} s",
                    self.sample_rate_hz, self.duration_s
                ))
            })?;
        if count > MAX_SAMPLE_COUNT {
            return Err(SynthError::InvalidConfig(format!(
                "{} Hz x {} s gives {} samples, limit is {}",
                self.sample_rate_hz, self.duration_s, count, MAX_SAMPLE_COUNT
            )));
        }
        Ok(count)
    }

    pub fn validate(&self) -> SynthResult<()> {
        if self.sample_rate_hz == 0 {
            return Err(SynthError::InvalidConfig("sample rate must be positive".into()));
        }
        if self.duration_s == 0 {
            return Err(SynthError::InvalidConfig("duration must be positive".into()));
        }
        if !(self.fundamental_hz.is_finite() && self.fundamental_hz > 0.0) {
            return Err(SynthError::InvalidConfig(format!(
                "fundamental must be a positive frequency, got {}",
                self.fundamental_hz
            )));
        }
        if !self.envelope.frequency_hz.is_finite() {
            return Err(SynthError::InvalidConfig(
                "envelope frequency must be finite".into(),
            ));
        }
        if !(0.0..1.0).contains(&self.envelope.depth) {
            return Err(SynthError::InvalidConfig(format!(
                "envelope depth must lie in [0, 1), got {}",
                self.envelope.depth
            )));
        }
        for channel in Channel::ALL {
            let cfg = self.channel(channel);
            if !(cfg.noise_std.is_finite() && cfg.noise_std >= 0.0) {
                return Err(SynthError::InvalidConfig(format!(
                    "{} noise std must be non-negative, got {}",
                    channel.column_name(),
                    cfg.noise_std
                )));
            }
            if let Some(h) = cfg
                .harmonics
                .iter()
                .find(|h| h.order == 0 || !h.amplitude.is_finite() || !h.phase.is_finite())
            {
                return Err(SynthError::InvalidConfig(format!(
                    "{} has an invalid harmonic {:?}",
                    channel.column_name(),
                    h
                )));
            }
        }
        self.sample_count().map(|_| ())
    }
}

/// Input payload for a processing stage.
#[derive(Debug, Clone)]
pub struct StageInput<'a> {
    pub time: &'a [f64],
    pub samples: Vec<f64>,
    pub channel: Option<Channel>,
}

/// Output produced by each stage.
#[derive(Debug, Clone)]
pub struct StageOutput {
    pub samples: Vec<f64>,
    pub metadata: StageMetadata,
}

/// Metadata used for chaining stages and telemetry.
#[derive(Debug, Clone, Default)]
pub struct StageMetadata {
    pub envelope_bounds: Option<(f64, f64)>,
    pub notes: Vec<String>,
}

/// Common error type for the synthesis core.
#[derive(thiserror::Error, Debug)]
pub enum SynthError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("sample table is empty")]
    EmptyTable,
    #[error("column {name} holds {actual} values, expected {expected}")]
    ColumnLength {
        name: String,
        expected: usize,
        actual: usize,
    },
    #[error("internal failure: {0}")]
    Internal(String),
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
}

pub type SynthResult<T> = Result<T, SynthError>;

/// Trait describing the synthesis stages.
pub trait ProcessingStage {
    fn initialize(&mut self, config: &SynthConfig) -> SynthResult<()>;
    fn execute(&mut self, input: StageInput<'_>) -> SynthResult<StageOutput>;
    fn cleanup(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_dataset_constants() {
        let cfg = SynthConfig::default();
        assert_eq!(cfg.sample_count().unwrap(), 1_200_000);
        assert_eq!(cfg.voltage.noise_std, 0.01);
        assert_eq!(cfg.current.harmonics[0].phase, 0.3);
        assert_eq!(cfg.envelope.bounds(), (0.9, 1.1));
        cfg.validate().unwrap();
    }

    #[test]
    fn validate_rejects_zero_rate_and_bad_depth() {
        let cfg = SynthConfig {
            sample_rate_hz: 0,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SynthError::InvalidConfig(_))));

        let mut cfg = SynthConfig::default();
        cfg.envelope.depth = 1.5;
        assert!(cfg.validate().is_err());

        let mut cfg = SynthConfig::default();
        cfg.current.noise_std = -0.1;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn column_names_are_fixed() {
        assert_eq!(Channel::Voltage.column_name(), "Vadc");
        assert_eq!(Channel::Current.column_name(), "Iadc");
    }

    #[test]
    fn validate_rejects_oversized_datasets() {
        let cfg = SynthConfig {
            duration_s: 4_000_000_000,
            ..Default::default()
        };
        assert!(matches!(cfg.validate(), Err(SynthError::InvalidConfig(_))));

        let cfg = SynthConfig {
            duration_s: (MAX_SAMPLE_COUNT / 2000) as u32,
            ..Default::default()
        };
        assert_eq!(cfg.sample_count().unwrap(), MAX_SAMPLE_COUNT);
    }
}
