use rustfft::num_complex::Complex64;
use rustfft::FftPlanner;
use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::response;
use crate::trace::Trace;

/// Filter family plus its corner frequency or band edges, in Hz.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterBand {
    Lowpass { corner_hz: f64 },
    Highpass { corner_hz: f64 },
    Bandpass { low_hz: f64, high_hz: f64 },
    Bandstop { low_hz: f64, high_hz: f64 },
}

impl FilterBand {
    fn corners(&self) -> (f64, Option<f64>) {
        match *self {
            FilterBand::Lowpass { corner_hz } | FilterBand::Highpass { corner_hz } => {
                (corner_hz, None)
            }
            FilterBand::Bandpass { low_hz, high_hz } | FilterBand::Bandstop { low_hz, high_hz } => {
                (low_hz, Some(high_hz))
            }
        }
    }
}

/// A validated filter request: family, corner(s), and order.
///
/// Immutable once constructed. The constructors reject everything that can
/// be rejected without knowing the record's sampling rate; the Nyquist
/// constraint is checked again at application time.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FilterSpec {
    band: FilterBand,
    order: u32,
}

impl FilterSpec {
    pub fn new(band: FilterBand, order: u32) -> Result<Self, TraceError> {
        let spec = Self { band, order };
        spec.validate_construction()?;
        Ok(spec)
    }

    pub fn lowpass(corner_hz: f64, order: u32) -> Result<Self, TraceError> {
        Self::new(FilterBand::Lowpass { corner_hz }, order)
    }

    pub fn highpass(corner_hz: f64, order: u32) -> Result<Self, TraceError> {
        Self::new(FilterBand::Highpass { corner_hz }, order)
    }

    pub fn bandpass(low_hz: f64, high_hz: f64, order: u32) -> Result<Self, TraceError> {
        Self::new(FilterBand::Bandpass { low_hz, high_hz }, order)
    }

    pub fn bandstop(low_hz: f64, high_hz: f64, order: u32) -> Result<Self, TraceError> {
        Self::new(FilterBand::Bandstop { low_hz, high_hz }, order)
    }

    pub fn band(&self) -> FilterBand {
        self.band
    }

    pub fn order(&self) -> u32 {
        self.order
    }

    fn validate_construction(&self) -> Result<(), TraceError> {
        if self.order < 1 {
            return Err(TraceError::InvalidParameter(
                "filter order must be at least 1".into(),
            ));
        }
        let (low, high) = self.band.corners();
        for corner in [Some(low), high].into_iter().flatten() {
            if !corner.is_finite() || corner <= 0.0 {
                return Err(TraceError::InvalidParameter(format!(
                    "corner frequency must be finite and positive, got {corner} Hz"
                )));
            }
        }
        if let Some(high) = high {
            if low >= high {
                return Err(TraceError::InvalidParameter(format!(
                    "band corners must satisfy low < high, got {low} Hz >= {high} Hz"
                )));
            }
        }
        Ok(())
    }

    /// Full validation against a record's sampling rate. Re-runs the
    /// construction checks so that deserialized specs are covered too.
    pub fn validate(&self, sample_rate_hz: f64) -> Result<(), TraceError> {
        self.validate_construction()?;
        let nyquist = sample_rate_hz / 2.0;
        let (low, high) = self.band.corners();
        let top = high.unwrap_or(low);
        if top >= nyquist {
            return Err(TraceError::InvalidParameter(format!(
                "corner frequency {top} Hz must lie strictly below Nyquist ({nyquist} Hz)"
            )));
        }
        Ok(())
    }
}

/// Filter a record in the frequency domain.
///
/// Forward FFT, per-bin multiplication with the spec's zero-phase Butterworth
/// response, inverse FFT. The imaginary round-off residue is discarded; the
/// output keeps the input's length, rate, and id.
pub fn apply_filter(trace: &Trace, spec: &FilterSpec) -> Result<Trace, TraceError> {
    spec.validate(trace.sample_rate_hz())?;
    if trace.is_empty() {
        return Err(TraceError::EmptySignal);
    }
    let n = trace.len();
    let mut planner = FftPlanner::<f64>::new();
    let forward = planner.plan_fft_forward(n);
    let inverse = planner.plan_fft_inverse(n);

    let mut buffer: Vec<Complex64> = trace
        .samples()
        .iter()
        .map(|&v| Complex64::new(v, 0.0))
        .collect();
    forward.process(&mut buffer);

    // Bin k sits at k*fs/N up to Nyquist; the upper half mirrors to the
    // negative frequencies, which see the same (even) response.
    let df = trace.sample_rate_hz() / n as f64;
    for (k, bin) in buffer.iter_mut().enumerate() {
        let f = if k <= n / 2 {
            k as f64 * df
        } else {
            (n - k) as f64 * df
        };
        *bin *= response::magnitude(spec.band(), spec.order(), f);
    }

    inverse.process(&mut buffer);
    let scale = 1.0 / n as f64;
    let samples = buffer.iter().map(|c| c.re * scale).collect();
    Ok(trace.with_samples(samples))
}
