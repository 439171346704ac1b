use anyhow::Context;
use mainscore::prelude::SynthConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_OUTPUT: &str = "synthetic_normal_v_xii_2khz.csv";

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct DatasetConfig {
    pub output: PathBuf,
    pub summary: Option<PathBuf>,
    pub synthesis: SynthConfig,
}

impl Default for DatasetConfig {
    fn default() -> Self {
        Self {
            output: PathBuf::from(DEFAULT_OUTPUT),
            summary: None,
            synthesis: SynthConfig::default(),
        }
    }
}

impl DatasetConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path_ref = path.as_ref();
        let contents = fs::read_to_string(path_ref)
            .with_context(|| format!("reading dataset config {}", path_ref.display()))?;
        let config: DatasetConfig = serde_yaml::from_str(&contents)
            .with_context(|| format!("parsing dataset config {}", path_ref.display()))?;
        Ok(config)
    }

    /// Applies command-line overrides on top of the loaded values.
    pub fn with_overrides(
        mut self,
        output: Option<PathBuf>,
        seed: Option<u64>,
        duration_s: Option<u32>,
        summary: Option<PathBuf>,
    ) -> Self {
        if let Some(output) = output {
            self.output = output;
        }
        if let Some(seed) = seed {
            self.synthesis.seed = seed;
        }
        if let Some(duration_s) = duration_s {
            self.synthesis.duration_s = duration_s;
        }
        if summary.is_some() {
            self.summary = summary;
        }
        self
    }
}
