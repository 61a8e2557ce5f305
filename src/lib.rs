//! Frequency-domain filtering for seismic waveform records.
//!
//! A record ([`Trace`]) is conditioned ([`Detrend`]) and filtered by
//! multiplying its spectrum with a zero-phase Butterworth response
//! ([`FilterSpec`], [`apply_filter`]). The theoretical curve
//! ([`FrequencyResponse`]) and the record's [`AmplitudeSpectrum`] are
//! available separately, plus PNG renderers for all three.

pub mod error;
pub mod filter;
pub mod pipeline;
pub mod plot;
pub mod response;
pub mod source;
pub mod spectrum;
pub mod trace;

pub use error::TraceError;
pub use filter::{apply_filter, FilterBand, FilterSpec};
pub use pipeline::{PipelineConfig, PipelineOutput, ProcessingPipeline};
pub use plot::{render_response_png, render_spectrum_png, render_trace_png, PlotStyle};
pub use response::FrequencyResponse;
pub use source::{ManualSource, StationQuery, SyntheticSource, ToneComponent, WaveformSource};
pub use spectrum::AmplitudeSpectrum;
pub use trace::{Detrend, Trace};
