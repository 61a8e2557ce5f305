use std::fs;
use std::time::{Duration, SystemTime};

use anyhow::Result;
use log::info;

use seisband::{
    render_response_png, render_spectrum_png, render_trace_png, Detrend, FilterSpec,
    FrequencyResponse, PipelineConfig, PlotStyle, ProcessingPipeline, StationQuery,
    SyntheticSource, ToneComponent,
};

const SAMPLE_RATE_HZ: f64 = 20.0;

/// Offline stand-in for a broadband vertical-channel record: a slow 1 Hz
/// arrival under 9 Hz contamination, with a little noise.
fn demo_source() -> Result<SyntheticSource> {
    Ok(SyntheticSource::new(
        SAMPLE_RATE_HZ,
        vec![
            ToneComponent {
                frequency_hz: 1.0,
                amplitude: 1.0,
            },
            ToneComponent {
                frequency_hz: 9.0,
                amplitude: 0.5,
            },
        ],
        0.05,
    )?)
}

fn demo_filters() -> Result<Vec<(&'static str, FilterSpec)>> {
    Ok(vec![
        ("lowpass", FilterSpec::lowpass(2.0, 4)?),
        ("highpass", FilterSpec::highpass(2.0, 4)?),
        ("bandpass", FilterSpec::bandpass(0.5, 2.0, 4)?),
        ("bandstop", FilterSpec::bandstop(8.0, 10.0, 4)?),
    ])
}

fn main() -> Result<()> {
    env_logger::init();

    let query = StationQuery::new(
        "GR",
        "WET",
        "",
        "BHZ",
        SystemTime::now(),
        Duration::from_secs(180),
    );
    let style = PlotStyle::default();

    for (name, spec) in demo_filters()? {
        let config = PipelineConfig {
            detrend: vec![Detrend::Linear, Detrend::Demean],
            filter: Some(spec),
        };
        let mut pipeline = ProcessingPipeline::new(demo_source()?, config);
        let output = pipeline.run(&query)?;

        if let Some(peak_hz) = output.spectrum.dominant_frequency_hz() {
            info!(
                "{name}: {} samples at {} Hz, dominant peak {peak_hz:.2} Hz",
                output.processed.len(),
                output.processed.sample_rate_hz(),
            );
        }

        let response = FrequencyResponse::sample(&spec, SAMPLE_RATE_HZ, 512)?;
        let label = format!("{} ({} corners)", name, spec.order());
        fs::write(
            format!("{name}_trace.png"),
            render_trace_png(&output.processed, &style)?,
        )?;
        fs::write(
            format!("{name}_spectrum.png"),
            render_spectrum_png(&output.spectrum, &label, &style)?,
        )?;
        fs::write(
            format!("{name}_response.png"),
            render_response_png(&response, &label, &style)?,
        )?;
        info!("{name}: wrote trace, spectrum, and response plots");
    }
    Ok(())
}
