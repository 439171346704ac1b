use crate::prelude::Channel;
use serde::{Deserialize, Serialize};

/// Mean and population standard deviation of one channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub mean: f64,
    pub std_dev: f64,
}

impl ChannelStats {
    pub fn new(mean: f64, std_dev: f64) -> Self {
        Self { mean, std_dev }
    }
}

/// Statistics learned from the sample table, one entry per channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BaselineStats {
    pub voltage: ChannelStats,
    pub current: ChannelStats,
}

impl BaselineStats {
    pub fn channel(&self, channel: Channel) -> ChannelStats {
        match channel {
            Channel::Voltage => self.voltage,
            Channel::Current => self.current,
        }
    }
}
