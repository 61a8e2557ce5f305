use rustfft::num_complex::Complex64;

use crate::error::TraceError;
use crate::filter::{FilterBand, FilterSpec};

/// Sampled frequency response of a filter.
///
/// Values are zero-phase: the Butterworth magnitude law is evaluated on the
/// frequency grid and stored as real complex amplitudes, so applying the
/// response never shifts arrivals in time.
#[derive(Clone, Debug)]
pub struct FrequencyResponse {
    pub sample_rate_hz: f64,
    pub frequencies_hz: Vec<f64>,
    pub values: Vec<Complex64>,
}

impl FrequencyResponse {
    /// Evaluate `spec` on `num_bins` evenly spaced frequencies from DC to
    /// Nyquist. Usable on its own, e.g. for plotting the theoretical curve.
    pub fn sample(
        spec: &FilterSpec,
        sample_rate_hz: f64,
        num_bins: usize,
    ) -> Result<Self, TraceError> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(TraceError::InvalidSampleRate);
        }
        spec.validate(sample_rate_hz)?;
        if num_bins < 2 {
            return Err(TraceError::InvalidParameter(format!(
                "frequency response needs at least 2 bins, got {num_bins}"
            )));
        }
        let nyquist = sample_rate_hz / 2.0;
        let df = nyquist / (num_bins - 1) as f64;
        let frequencies_hz: Vec<f64> = (0..num_bins).map(|k| k as f64 * df).collect();
        let values = frequencies_hz
            .iter()
            .map(|&f| Complex64::new(magnitude(spec.band(), spec.order(), f), 0.0))
            .collect();
        Ok(Self {
            sample_rate_hz,
            frequencies_hz,
            values,
        })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn magnitudes(&self) -> Vec<f64> {
        self.values.iter().map(|v| v.norm()).collect()
    }
}

/// Butterworth magnitude at `frequency_hz` for the given family and order.
///
/// Lowpass: `1 / sqrt(1 + (f/fc)^(2n))`. Highpass is the complementary
/// shape, bandpass the highpass/lowpass product, bandstop its complement.
pub fn magnitude(band: FilterBand, order: u32, frequency_hz: f64) -> f64 {
    match band {
        FilterBand::Lowpass { corner_hz } => lowpass_gain(frequency_hz, corner_hz, order),
        FilterBand::Highpass { corner_hz } => highpass_gain(frequency_hz, corner_hz, order),
        FilterBand::Bandpass { low_hz, high_hz } => {
            highpass_gain(frequency_hz, low_hz, order) * lowpass_gain(frequency_hz, high_hz, order)
        }
        FilterBand::Bandstop { low_hz, high_hz } => {
            1.0 - highpass_gain(frequency_hz, low_hz, order)
                * lowpass_gain(frequency_hz, high_hz, order)
        }
    }
}

fn lowpass_gain(f: f64, corner_hz: f64, order: u32) -> f64 {
    let ratio_2n = (f / corner_hz).powi(2 * order as i32);
    1.0 / (1.0 + ratio_2n).sqrt()
}

fn highpass_gain(f: f64, corner_hz: f64, order: u32) -> f64 {
    let ratio_2n = (f / corner_hz).powi(2 * order as i32);
    if ratio_2n.is_infinite() {
        return 1.0;
    }
    (ratio_2n / (1.0 + ratio_2n)).sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SQRT_HALF: f64 = std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn corner_gain_is_minus_3db_for_every_order() {
        for order in 1..=8 {
            let lp = magnitude(FilterBand::Lowpass { corner_hz: 2.0 }, order, 2.0);
            let hp = magnitude(FilterBand::Highpass { corner_hz: 2.0 }, order, 2.0);
            assert!(
                (lp - SQRT_HALF).abs() < 1e-3,
                "lowpass order {order}: {lp}"
            );
            assert!(
                (hp - SQRT_HALF).abs() < 1e-3,
                "highpass order {order}: {hp}"
            );
        }
    }

    #[test]
    fn higher_order_attenuates_more_in_the_stop_band() {
        // Two octaves above a 1 Hz lowpass corner.
        let band = FilterBand::Lowpass { corner_hz: 1.0 };
        let g2 = magnitude(band, 2, 4.0);
        let g4 = magnitude(band, 4, 4.0);
        let g6 = magnitude(band, 6, 4.0);
        assert!(g2 > g4 && g4 > g6, "gains {g2} {g4} {g6}");
    }

    #[test]
    fn bandstop_complements_bandpass() {
        let bp = FilterBand::Bandpass {
            low_hz: 1.0,
            high_hz: 5.0,
        };
        let bs = FilterBand::Bandstop {
            low_hz: 1.0,
            high_hz: 5.0,
        };
        for k in 0..200 {
            let f = k as f64 * 0.05;
            let sum = magnitude(bp, 4, f) + magnitude(bs, 4, f);
            assert!((sum - 1.0).abs() < 1e-12, "at {f} Hz: {sum}");
        }
    }

    #[test]
    fn pass_and_stop_bands_sit_where_expected() {
        let lp = FilterBand::Lowpass { corner_hz: 2.0 };
        assert!((magnitude(lp, 4, 0.0) - 1.0).abs() < 1e-12);
        assert!(magnitude(lp, 4, 9.0) < 0.01);
        let hp = FilterBand::Highpass { corner_hz: 2.0 };
        assert_eq!(magnitude(hp, 4, 0.0), 0.0);
        assert!(magnitude(hp, 4, 9.0) > 0.99);
    }

    #[test]
    fn sampled_response_spans_dc_to_nyquist() {
        let spec = FilterSpec::lowpass(2.0, 4).unwrap();
        let response = FrequencyResponse::sample(&spec, 20.0, 101).unwrap();
        assert_eq!(response.len(), 101);
        assert_eq!(response.frequencies_hz[0], 0.0);
        assert!((response.frequencies_hz[100] - 10.0).abs() < 1e-12);
        // Zero-phase: imaginary parts are identically zero.
        assert!(response.values.iter().all(|v| v.im == 0.0));
    }

    #[test]
    fn sampled_response_rejects_degenerate_grids() {
        let spec = FilterSpec::lowpass(2.0, 4).unwrap();
        assert!(matches!(
            FrequencyResponse::sample(&spec, 20.0, 1),
            Err(TraceError::InvalidParameter(_))
        ));
    }
}
