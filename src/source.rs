use std::collections::VecDeque;
use std::time::{Duration, SystemTime};

use rand::Rng;

use crate::error::TraceError;
use crate::trace::Trace;

/// One waveform request: which channel of which station, and when.
#[derive(Clone, Debug)]
pub struct StationQuery {
    pub network: String,
    pub station: String,
    pub location: String,
    pub channel: String,
    pub start: SystemTime,
    pub duration: Duration,
}

impl StationQuery {
    pub fn new(
        network: impl Into<String>,
        station: impl Into<String>,
        location: impl Into<String>,
        channel: impl Into<String>,
        start: SystemTime,
        duration: Duration,
    ) -> Self {
        Self {
            network: network.into(),
            station: station.into(),
            location: location.into(),
            channel: channel.into(),
            start,
            duration,
        }
    }

    /// SEED-style `NET.STA.LOC.CHN` identifier.
    pub fn seed_id(&self) -> String {
        format!(
            "{}.{}.{}.{}",
            self.network, self.station, self.location, self.channel
        )
    }
}

/// Something that can resolve a station query into a waveform record.
///
/// Remote data-center clients live behind this seam; the implementations in
/// this crate are in-memory only.
pub trait WaveformSource {
    fn fetch(&mut self, query: &StationQuery) -> Result<Trace, TraceError>;
}

/// In-memory source useful for tests and deterministic playback.
pub struct ManualSource {
    queue: VecDeque<Trace>,
}

impl ManualSource {
    pub fn new(traces: impl IntoIterator<Item = Trace>) -> Self {
        Self {
            queue: traces.into_iter().collect(),
        }
    }
}

impl WaveformSource for ManualSource {
    fn fetch(&mut self, _query: &StationQuery) -> Result<Trace, TraceError> {
        self.queue.pop_front().ok_or(TraceError::SourceExhausted)
    }
}

/// A single sinusoidal component of a synthetic record.
#[derive(Clone, Copy, Debug)]
pub struct ToneComponent {
    pub frequency_hz: f64,
    pub amplitude: f64,
}

/// Stand-in for a remote data center: synthesizes the queried duration as a
/// sum of sine components plus optional uniform noise.
pub struct SyntheticSource {
    sample_rate_hz: f64,
    components: Vec<ToneComponent>,
    noise_amplitude: f64,
}

impl SyntheticSource {
    pub fn new(
        sample_rate_hz: f64,
        components: Vec<ToneComponent>,
        noise_amplitude: f64,
    ) -> Result<Self, TraceError> {
        if !sample_rate_hz.is_finite() || sample_rate_hz <= 0.0 {
            return Err(TraceError::InvalidSampleRate);
        }
        if !noise_amplitude.is_finite() || noise_amplitude < 0.0 {
            return Err(TraceError::InvalidParameter(format!(
                "noise amplitude must be finite and non-negative, got {noise_amplitude}"
            )));
        }
        Ok(Self {
            sample_rate_hz,
            components,
            noise_amplitude,
        })
    }
}

impl WaveformSource for SyntheticSource {
    fn fetch(&mut self, query: &StationQuery) -> Result<Trace, TraceError> {
        let len = (query.duration.as_secs_f64() * self.sample_rate_hz).round() as usize;
        if len == 0 {
            return Err(TraceError::InvalidParameter(
                "queried duration is shorter than one sampling interval".into(),
            ));
        }
        let mut rng = rand::thread_rng();
        let samples = (0..len)
            .map(|i| {
                let t = i as f64 / self.sample_rate_hz;
                let tones: f64 = self
                    .components
                    .iter()
                    .map(|c| c.amplitude * (2.0 * std::f64::consts::PI * c.frequency_hz * t).sin())
                    .sum();
                if self.noise_amplitude > 0.0 {
                    tones + rng.gen_range(-self.noise_amplitude..self.noise_amplitude)
                } else {
                    tones
                }
            })
            .collect();
        Trace::new(query.seed_id(), self.sample_rate_hz, samples)
    }
}
