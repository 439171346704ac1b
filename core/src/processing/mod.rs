pub mod envelope;
pub mod harmonic;
pub mod noise;
pub mod timebase;

pub use envelope::EnvelopeStage;
pub use harmonic::HarmonicStage;
pub use noise::NoiseStage;
pub use timebase::TimeBase;
