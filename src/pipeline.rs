use serde::{Deserialize, Serialize};

use crate::error::TraceError;
use crate::filter::{apply_filter, FilterSpec};
use crate::source::{StationQuery, WaveformSource};
use crate::spectrum::AmplitudeSpectrum;
use crate::trace::{Detrend, Trace};

/// Conditioning and filtering applied to every fetched record.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    #[serde(default)]
    pub detrend: Vec<Detrend>,
    #[serde(default)]
    pub filter: Option<FilterSpec>,
}

impl PipelineConfig {
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        Ok(serde_json::from_str(json)?)
    }
}

/// Result of one pipeline run: the record as fetched, the conditioned and
/// filtered record, and the latter's amplitude spectrum.
#[derive(Clone, Debug)]
pub struct PipelineOutput {
    pub raw: Trace,
    pub processed: Trace,
    pub spectrum: AmplitudeSpectrum,
}

/// High level fetch -> condition -> filter flow, one trace per query.
pub struct ProcessingPipeline<S: WaveformSource> {
    source: S,
    config: PipelineConfig,
}

impl<S: WaveformSource> ProcessingPipeline<S> {
    pub fn new(source: S, config: PipelineConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn run(&mut self, query: &StationQuery) -> Result<PipelineOutput, TraceError> {
        let raw = self.source.fetch(query)?;
        let mut processed = raw.clone();
        for method in &self.config.detrend {
            processed = processed.detrend(*method)?;
        }
        if let Some(spec) = &self.config.filter {
            processed = apply_filter(&processed, spec)?;
        }
        let spectrum = AmplitudeSpectrum::of(&processed)?;
        Ok(PipelineOutput {
            raw,
            processed,
            spectrum,
        })
    }
}
