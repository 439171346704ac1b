use num_complex::Complex64;
use rustfft::{num_traits::Zero, Fft, FftPlanner, Length};
use std::sync::Arc;

/// Helper that wraps the `rustfft` planner for reuse.
pub struct FftHelper {
    fft: Arc<dyn Fft<f64>>,
    scratch: Vec<Complex64>,
}

impl FftHelper {
    pub fn new(size: usize) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(size);
        let scratch = vec![Complex64::zero(); fft.get_inplace_scratch_len()];
        Self { fft, scratch }
    }

    fn len(&self) -> usize {
        self.fft.len()
    }

    /// Forward transform of a real sequence, zero-padded or truncated to the plan size.
    pub fn forward(&mut self, input: &[f64]) -> Vec<Complex64> {
        let mut buffer: Vec<Complex64> = input
            .iter()
            .take(self.len())
            .map(|&value| Complex64::new(value, 0.0))
            .collect();
        buffer.resize(self.len(), Complex64::zero());

        self.fft.process_with_scratch(&mut buffer, &mut self.scratch);
        buffer
    }

    /// Frequency of the strongest non-DC bin, in Hz.
    pub fn dominant_frequency(&mut self, samples: &[f64], sample_rate_hz: f64) -> Option<f64> {
        let size = self.len();
        if size < 2 || samples.is_empty() {
            return None;
        }
        let offset = samples.iter().sum::<f64>() / samples.len() as f64;
        let centered: Vec<f64> = samples.iter().map(|v| v - offset).collect();
        let spectrum = self.forward(&centered);

        spectrum[1..=size / 2]
            .iter()
            .enumerate()
            .max_by(|(_, a), (_, b)| a.norm_sqr().total_cmp(&b.norm_sqr()))
            .map(|(idx, _)| (idx + 1) as f64 * sample_rate_hz / size as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::TAU;

    #[test]
    fn fft_helper_returns_same_length() {
        let mut helper = FftHelper::new(4);
        let output = helper.forward(&[1.0, 0.0, -1.0, 0.0]);
        assert_eq!(output.len(), 4);
    }

    #[test]
    fn dominant_frequency_finds_tone() {
        let rate = 1000.0;
        let samples: Vec<f64> = (0..1000)
            .map(|n| 3.0 + (TAU * 50.0 * n as f64 / rate).sin())
            .collect();
        let mut helper = FftHelper::new(samples.len());
        let peak = helper.dominant_frequency(&samples, rate).unwrap();
        assert!((peak - 50.0).abs() < 1e-9);
    }

    #[test]
    fn dominant_frequency_needs_samples() {
        let mut helper = FftHelper::new(1);
        assert!(helper.dominant_frequency(&[1.0], 10.0).is_none());
    }
}
