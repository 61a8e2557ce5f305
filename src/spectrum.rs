use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;

use crate::error::TraceError;
use crate::trace::Trace;

/// One-sided amplitude spectrum of a record.
#[derive(Clone, Debug)]
pub struct AmplitudeSpectrum {
    pub frequencies_hz: Vec<f64>,
    pub magnitudes: Vec<f64>,
}

impl AmplitudeSpectrum {
    /// Transform the whole record; bins run from DC to Nyquist at `fs / N`
    /// spacing, magnitudes normalized by the record length.
    pub fn of(trace: &Trace) -> Result<Self, TraceError> {
        if trace.is_empty() {
            return Err(TraceError::EmptySignal);
        }
        let n = trace.len();
        let mut planner = FftPlanner::<f64>::new();
        let fft = planner.plan_fft_forward(n);
        let mut buffer: Vec<Complex64> = trace
            .samples()
            .iter()
            .map(|&v| Complex64::new(v, 0.0))
            .collect();
        fft.process(&mut buffer);

        let df = trace.sample_rate_hz() / n as f64;
        let bins = n / 2 + 1;
        let frequencies_hz = (0..bins).map(|k| k as f64 * df).collect();
        let magnitudes = buffer
            .iter()
            .take(bins)
            .map(|c| c.norm() / n as f64)
            .collect();
        Ok(Self {
            frequencies_hz,
            magnitudes,
        })
    }

    pub fn len(&self) -> usize {
        self.magnitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.magnitudes.is_empty()
    }

    /// Frequency of the strongest bin above DC.
    pub fn dominant_frequency_hz(&self) -> Option<f64> {
        self.magnitudes
            .iter()
            .enumerate()
            .skip(1)
            .max_by(|(_, a), (_, b)| a.total_cmp(b))
            .map(|(idx, _)| self.frequencies_hz[idx])
    }

    /// Magnitude of the bin closest to `frequency_hz`.
    pub fn magnitude_near(&self, frequency_hz: f64) -> Option<f64> {
        self.frequencies_hz
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| {
                (*a - frequency_hz).abs().total_cmp(&(*b - frequency_hz).abs())
            })
            .map(|(idx, _)| self.magnitudes[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn peak_lands_on_the_tone() {
        let sample_rate = 64.0;
        let samples: Vec<f64> = (0..256)
            .map(|i| (2.0 * std::f64::consts::PI * 8.0 * i as f64 / sample_rate).sin())
            .collect();
        let trace = Trace::new("XX.TEST..HHZ", sample_rate, samples).unwrap();
        let spectrum = AmplitudeSpectrum::of(&trace).unwrap();
        assert_eq!(spectrum.len(), 129);
        let peak = spectrum.dominant_frequency_hz().unwrap();
        assert!((peak - 8.0).abs() < sample_rate / 256.0, "peak at {peak} Hz");
    }

    #[test]
    fn rejects_empty_trace() {
        let trace = Trace::new("XX.TEST..HHZ", 64.0, Vec::new()).unwrap();
        assert!(matches!(
            AmplitudeSpectrum::of(&trace),
            Err(TraceError::EmptySignal)
        ));
    }

    #[test]
    fn nearest_bin_lookup_brackets_the_grid() {
        let trace = Trace::new("XX.TEST..HHZ", 10.0, vec![1.0; 10]).unwrap();
        let spectrum = AmplitudeSpectrum::of(&trace).unwrap();
        // DC bin carries the whole constant record.
        assert!((spectrum.magnitude_near(0.0).unwrap() - 1.0).abs() < 1e-12);
        assert!(spectrum.magnitude_near(100.0).is_some());
    }
}
