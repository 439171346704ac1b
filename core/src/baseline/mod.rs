pub mod stats;
pub mod table;

pub use stats::{BaselineStats, ChannelStats};
pub use table::{SampleTable, SAMPLE_TABLE};
