use std::path::Path;

use plotters::prelude::*;

use crate::constants::PLOT_SIZE;
use crate::simulation::{Trajectory, Variable};
use crate::sweep::FrequencyReport;

pub fn comparison_title(report: &FrequencyReport, dataset_label: &str) -> String {
    format!(
        "Frequency: {} Hz SSE is {} vs {}",
        report.frequency,
        report.sse.round(),
        dataset_label
    )
}

pub fn comparison_file_name(frequency: u32) -> String {
    format!("FF {} Hz.png", frequency)
}

fn value_range<'a>(series: impl IntoIterator<Item = &'a f64>) -> (f64, f64) {
    let (min, max) = series
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::MAX, f64::MIN), |(lo, hi), &v| (lo.min(v), hi.max(v)));
    if min > max {
        return (0.0, 1.0);
    }
    let pad = ((max - min) * 0.05).max(1e-6);
    (min - pad, max + pad)
}

/// Simulated vs recorded % of first pulse, one point per pulse.
pub fn plot_comparison(
    report: &FrequencyReport,
    dataset_label: &str,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;

    let pulses = report.simulated.len().max(report.reference.len()).max(2);
    let (y_min, y_max) = value_range(report.simulated.iter().chain(&report.reference));

    let mut chart = ChartBuilder::on(&root)
        .caption(
            comparison_title(report, dataset_label),
            ("sans-serif", 30).into_font(),
        )
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..(pulses - 1) as f64, y_min..y_max)?;

    chart
        .configure_mesh()
        .x_desc("Pulse number")
        .y_desc("% first pulse")
        .draw()?;

    chart
        .draw_series(LineSeries::new(
            report.simulated.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &RED,
        ))?
        .label("Simulated Values")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], RED));
    chart
        .draw_series(LineSeries::new(
            report.reference.iter().enumerate().map(|(i, &v)| (i as f64, v)),
            &BLUE,
        ))?
        .label("Real Values")
        .legend(|(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], BLUE));

    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .draw()?;

    root.present()?;
    Ok(())
}

/// The internal state variables over time, one panel each.
pub fn plot_trajectory(
    trajectory: &Trajectory,
    frequency: u32,
    step_ms: f64,
    path: &Path,
) -> Result<(), Box<dyn std::error::Error>> {
    let root = BitMapBackend::new(path, PLOT_SIZE).into_drawing_area();
    root.fill(&WHITE)?;
    let root = root.titled(
        &format!("State variables at {} Hz", frequency),
        ("sans-serif", 30).into_font(),
    )?;

    let variables = [Variable::Cai, Variable::Prel, Variable::Rrel, Variable::Krecov];
    let panels = root.split_evenly((2, 2));
    let t_max = (trajectory.len().max(2) - 1) as f64 * step_ms;

    for (panel, variable) in panels.iter().zip(variables) {
        let series = trajectory.series(variable);
        let (y_min, y_max) = value_range(series);
        let mut chart = ChartBuilder::on(panel)
            .caption(variable.name(), ("sans-serif", 20).into_font())
            .margin(5)
            .x_label_area_size(30)
            .y_label_area_size(50)
            .build_cartesian_2d(0f64..t_max, y_min..y_max)?;
        chart.configure_mesh().x_desc("Time (ms)").draw()?;
        chart.draw_series(LineSeries::new(
            series.iter().enumerate().map(|(i, &v)| (i as f64 * step_ms, v)),
            &RED,
        ))?;
    }

    root.present()?;
    Ok(())
}
