use std::io::Cursor;

use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::*;

use crate::error::TraceError;
use crate::response::FrequencyResponse;
use crate::spectrum::AmplitudeSpectrum;
use crate::trace::Trace;

/// Presentation options passed explicitly to each renderer; nothing here is
/// process-global.
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
}

impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            // Wide and short, the usual aspect for long waveform records.
            width: 1200,
            height: 320,
            background: RGBColor(234, 234, 242),
            line: RGBColor(31, 119, 180),
        }
    }
}

/// Render a record as a PNG line plot, time in seconds on the x axis.
pub fn render_trace_png(trace: &Trace, style: &PlotStyle) -> Result<Vec<u8>, TraceError> {
    if trace.is_empty() {
        return Err(TraceError::Plot("trace has no samples".into()));
    }
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    for &v in trace.samples() {
        min = min.min(v);
        max = max.max(v);
    }
    let pad = ((max - min) * 0.05).max(1e-12);
    let dt = trace.dt();
    let series = trace
        .samples()
        .iter()
        .enumerate()
        .map(move |(i, &v)| (i as f64 * dt, v));
    draw_line_png(
        trace.id(),
        "time [s]",
        series,
        0.0..trace.duration_seconds(),
        (min - pad)..(max + pad),
        style,
    )
}

/// Render a one-sided amplitude spectrum as a PNG line plot.
pub fn render_spectrum_png(
    spectrum: &AmplitudeSpectrum,
    label: &str,
    style: &PlotStyle,
) -> Result<Vec<u8>, TraceError> {
    if spectrum.is_empty() {
        return Err(TraceError::Plot("spectrum has no magnitudes".into()));
    }
    let f_max = spectrum.frequencies_hz.last().copied().unwrap_or(0.0);
    let peak = spectrum
        .magnitudes
        .iter()
        .fold(0.0f64, |acc, &v| acc.max(v))
        .max(1e-12);
    let series = spectrum
        .frequencies_hz
        .iter()
        .copied()
        .zip(spectrum.magnitudes.iter().copied());
    draw_line_png(
        label,
        "frequency [Hz]",
        series,
        0.0..f_max,
        0.0..peak * 1.05,
        style,
    )
}

/// Render a filter's theoretical magnitude curve as a PNG line plot.
pub fn render_response_png(
    response: &FrequencyResponse,
    label: &str,
    style: &PlotStyle,
) -> Result<Vec<u8>, TraceError> {
    if response.is_empty() {
        return Err(TraceError::Plot("frequency response has no bins".into()));
    }
    let f_max = response.frequencies_hz.last().copied().unwrap_or(0.0);
    let series = response
        .frequencies_hz
        .iter()
        .copied()
        .zip(response.magnitudes());
    draw_line_png(label, "frequency [Hz]", series, 0.0..f_max, 0.0..1.05, style)
}

fn draw_line_png(
    caption: &str,
    x_desc: &str,
    series: impl Iterator<Item = (f64, f64)>,
    x_range: std::ops::Range<f64>,
    y_range: std::ops::Range<f64>,
    style: &PlotStyle,
) -> Result<Vec<u8>, TraceError> {
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(caption, ("sans-serif", 20).into_font())
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range, y_range)?;
        chart
            .configure_mesh()
            .x_desc(x_desc)
            .light_line_style(&WHITE.mix(0.6))
            .draw()?;
        chart.draw_series(LineSeries::new(series, &style.line))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}

fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, TraceError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| TraceError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
