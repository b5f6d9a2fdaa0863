//! Line charts of simulated charge data.

use std::path::Path;

use plotters::prelude::*;

use crate::{Error, TimeSeries};

/// Legend entry of the plotted charge series.
pub const SERIES_LABEL: &str = "q(t)";

/// Describes how a chart is drawn.
#[derive(Clone, Debug)]
pub struct PlotDescriptor<'a> {
    /// Caption above the chart.
    pub title: &'a str,
    /// Image size in pixels.
    pub size: (u32, u32),
}

impl Default for PlotDescriptor<'_> {
    fn default() -> Self {
        Self {
            title: "Electric Circuit Simulation",
            size: (560, 367),
        }
    }
}

/// Renders charge over time as an SVG line chart.
pub fn plot_svg<P: AsRef<Path>>(
    series: &TimeSeries,
    filename: P,
    desc: PlotDescriptor,
) -> Result<(), Error> {
    if series.is_empty() {
        return Err(Error::Plot("no samples to plot".to_string()));
    }

    let (t_min, t_max) = bounds(series.times().iter().copied());
    let (q_min, q_max) = bounds(series.charges().iter().copied());
    let t_max = if t_max > t_min { t_max } else { t_min + 1.0 };
    let (q_min, q_max) = pad(q_min, q_max);

    let root = SVGBackend::new(filename.as_ref(), desc.size).into_drawing_area();
    root.fill(&WHITE).map_err(plot_error)?;

    let mut chart = ChartBuilder::on(&root)
        .caption(desc.title, ("sans-serif", 20))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(70)
        .build_cartesian_2d(t_min..t_max, q_min..q_max)
        .map_err(plot_error)?;

    chart
        .configure_mesh()
        .x_desc("Time")
        .y_desc("Charge")
        .x_label_formatter(&|t| format!("{}", t))
        .y_label_formatter(&|q| format!("{:.2e}", q))
        .draw()
        .map_err(plot_error)?;

    chart
        .draw_series(LineSeries::new(series.iter(), &RED))
        .map_err(plot_error)?
        .label(SERIES_LABEL)
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], &RED));

    chart
        .configure_series_labels()
        .background_style(&WHITE.mix(0.8))
        .border_style(&BLACK)
        .draw()
        .map_err(plot_error)?;

    root.present().map_err(plot_error)?;
    tracing::info!(path = %filename.as_ref().display(), "plotted charge data");

    Ok(())
}

fn plot_error<E: std::error::Error>(err: E) -> Error {
    Error::Plot(err.to_string())
}

fn bounds(values: impl Iterator<Item = f64>) -> (f64, f64) {
    values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)))
}

// a flat series still needs a non-empty axis
fn pad(lo: f64, hi: f64) -> (f64, f64) {
    let span = hi - lo;
    let margin = if span > 0.0 {
        0.05 * span
    } else if lo != 0.0 {
        0.1 * lo.abs()
    } else {
        1.0
    };

    (lo - margin, hi + margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_labelled_svg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("charge.svg");
        let series = crate::simulate(10.0, 1e-8, 1e-2, 7.5, 1e-4, 1e-6).unwrap();

        plot_svg(&series, &path, PlotDescriptor::default()).unwrap();

        let svg = std::fs::read_to_string(&path).unwrap();
        assert!(svg.contains("<svg"));
        assert!(svg.contains("Electric Circuit Simulation"));
        assert!(svg.contains("Time"));
        assert!(svg.contains("Charge"));
        assert!(svg.contains(SERIES_LABEL));
    }

    #[test]
    fn empty_series_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let series = TimeSeries::new(ndarray::Array1::zeros(0), ndarray::Array1::zeros(0)).unwrap();

        let result = plot_svg(&series, dir.path().join("empty.svg"), PlotDescriptor::default());

        assert!(matches!(result, Err(Error::Plot(_))));
    }

    #[test]
    fn flat_series_gets_padded_axis() {
        assert_eq!(pad(0.0, 0.0), (-1.0, 1.0));
        let (lo, hi) = pad(2.0, 2.0);
        assert!(lo < 2.0 && hi > 2.0);
    }
}
