//! Waveform synthesis core for the mains voltage/current dataset generator.
//!
//! A small table of real samples provides the per-channel offsets, the
//! processing stages build the modulated harmonic signals on top of them, and
//! the export module writes the result as a two-column CSV table.

pub mod baseline;
pub mod export;
pub mod math;
pub mod prelude;
pub mod processing;
pub mod telemetry;

pub use prelude::{
    Channel, ProcessingStage, StageInput, StageOutput, SynthConfig, SynthError, SynthResult,
};
