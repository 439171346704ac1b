use crate::prelude::{SynthConfig, SynthResult};

/// Sample timestamps `n / sample_rate` for every row of the dataset.
#[derive(Debug, Clone)]
pub struct TimeBase {
    times: Vec<f64>,
}

impl TimeBase {
    pub fn from_config(config: &SynthConfig) -> SynthResult<Self> {
        config.validate()?;
        let count = config.sample_count()?;
        let rate = config.sample_rate_hz as f64;
        let times = (0..count).map(|n| n as f64 / rate).collect();
        Ok(Self { times })
    }

    pub fn times(&self) -> &[f64] {
        &self.times
    }
}
