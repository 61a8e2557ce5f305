use thiserror::Error;

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("invalid filter parameter: {0}")]
    InvalidParameter(String),
    #[error("signal contains no samples")]
    EmptySignal,
    #[error("sample rate must be positive and finite")]
    InvalidSampleRate,
    #[error("waveform source has no more data for this query")]
    SourceExhausted,
    #[error("invalid pipeline config: {0}")]
    Config(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
}

impl<E: std::error::Error + Send + Sync + 'static> From<plotters::drawing::DrawingAreaErrorKind<E>>
    for TraceError
{
    fn from(value: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        TraceError::Plot(format!("{value:?}"))
    }
}

impl From<image::ImageError> for TraceError {
    fn from(value: image::ImageError) -> Self {
        TraceError::Plot(value.to_string())
    }
}

impl From<serde_json::Error> for TraceError {
    fn from(value: serde_json::Error) -> Self {
        TraceError::Config(value.to_string())
    }
}
