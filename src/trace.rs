use serde::{Deserialize, Serialize};

use crate::error::TraceError;

/// A single uniformly sampled waveform record.
///
/// Samples are stored in acquisition order at a fixed rate, so the time of
/// sample `i` is `i / sample_rate_hz` relative to the start of the record.
/// Processing steps never mutate a trace in place; they return a new one.
#[derive(Clone, Debug, PartialEq)]
pub struct Trace {
    id: String,
    sample_rate_hz: f64,
    samples: Vec<f64>,
}

impl Trace {
    pub fn new(
        id: impl Into<String>,
        sample_rate_hz: f64,
        samples: Vec<f64>,
    ) -> Result<Self, TraceError> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(TraceError::InvalidSampleRate);
        }
        Ok(Self {
            id: id.into(),
            sample_rate_hz,
            samples,
        })
    }

    /// SEED-style identifier, e.g. `GR.WET..BHZ`.
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sample_rate_hz(&self) -> f64 {
        self.sample_rate_hz
    }

    pub fn samples(&self) -> &[f64] {
        &self.samples
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Sampling interval in seconds.
    pub fn dt(&self) -> f64 {
        1.0 / self.sample_rate_hz
    }

    pub fn duration_seconds(&self) -> f64 {
        self.samples.len() as f64 / self.sample_rate_hz
    }

    /// Highest frequency representable without aliasing.
    pub fn nyquist_hz(&self) -> f64 {
        self.sample_rate_hz / 2.0
    }

    /// Same id and rate, new sample data.
    pub(crate) fn with_samples(&self, samples: Vec<f64>) -> Trace {
        Trace {
            id: self.id.clone(),
            sample_rate_hz: self.sample_rate_hz,
            samples,
        }
    }

    /// Remove a trend from the record, returning the conditioned trace.
    pub fn detrend(&self, method: Detrend) -> Result<Trace, TraceError> {
        if self.samples.is_empty() {
            return Err(TraceError::EmptySignal);
        }
        let n = self.samples.len() as f64;
        let detrended = match method {
            Detrend::Demean => {
                let mean = self.samples.iter().sum::<f64>() / n;
                self.samples.iter().map(|v| v - mean).collect()
            }
            Detrend::Linear => {
                // Least-squares line through (i, sample[i]).
                let sum_x = (n - 1.0) * n / 2.0;
                let sum_xx = (0..self.samples.len()).map(|i| (i * i) as f64).sum::<f64>();
                let sum_y = self.samples.iter().sum::<f64>();
                let sum_xy = self
                    .samples
                    .iter()
                    .enumerate()
                    .map(|(i, v)| i as f64 * v)
                    .sum::<f64>();
                let denom = n * sum_xx - sum_x * sum_x;
                let slope = if denom == 0.0 {
                    0.0
                } else {
                    (n * sum_xy - sum_x * sum_y) / denom
                };
                let intercept = (sum_y - slope * sum_x) / n;
                self.samples
                    .iter()
                    .enumerate()
                    .map(|(i, v)| v - (intercept + slope * i as f64))
                    .collect()
            }
        };
        Ok(self.with_samples(detrended))
    }
}

/// Trend-removal methods applied before filtering.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Detrend {
    /// Subtract the arithmetic mean.
    Demean,
    /// Subtract the least-squares line.
    Linear,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_positive_sample_rate() {
        assert!(matches!(
            Trace::new("XX.TEST..HHZ", 0.0, vec![1.0]),
            Err(TraceError::InvalidSampleRate)
        ));
        assert!(matches!(
            Trace::new("XX.TEST..HHZ", f64::NAN, vec![1.0]),
            Err(TraceError::InvalidSampleRate)
        ));
    }

    #[test]
    fn accessors_report_timing() {
        let trace = Trace::new("GR.WET..BHZ", 20.0, vec![0.0; 100]).unwrap();
        assert_eq!(trace.len(), 100);
        assert!((trace.dt() - 0.05).abs() < 1e-12);
        assert!((trace.duration_seconds() - 5.0).abs() < 1e-12);
        assert!((trace.nyquist_hz() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn demean_zeroes_the_mean() {
        let trace = Trace::new("XX.TEST..HHZ", 10.0, vec![1.0, 2.0, 3.0, 4.0]).unwrap();
        let out = trace.detrend(Detrend::Demean).unwrap();
        let mean: f64 = out.samples().iter().sum::<f64>() / out.len() as f64;
        assert!(mean.abs() < 1e-12);
        assert_eq!(out.len(), trace.len());
    }

    #[test]
    fn linear_detrend_flattens_a_ramp() {
        let samples: Vec<f64> = (0..50).map(|i| 3.0 + 0.25 * i as f64).collect();
        let trace = Trace::new("XX.TEST..HHZ", 10.0, samples).unwrap();
        let out = trace.detrend(Detrend::Linear).unwrap();
        for v in out.samples() {
            assert!(v.abs() < 1e-9, "residual {v} after linear detrend");
        }
    }

    #[test]
    fn detrend_rejects_empty_trace() {
        let trace = Trace::new("XX.TEST..HHZ", 10.0, Vec::new()).unwrap();
        assert!(matches!(
            trace.detrend(Detrend::Demean),
            Err(TraceError::EmptySignal)
        ));
    }
}
