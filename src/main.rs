use std::fs;
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;

use facilitation::constants::*;
use facilitation::report::RunReport;
use facilitation::visualization::{comparison_file_name, plot_comparison, plot_trajectory};
use facilitation::{
    load_reference_data, run_at_multiple_frequencies, Parameters, SimulationConfig, SweepOptions,
};

/// Simulate frequency facilitation and compare it with recorded data
#[derive(Parser, Debug)]
#[command(name = "frequency-facilitation")]
struct Args {
    /// CSV of recordings: header of frequencies (Hz), one row per pulse
    #[arg(short, long, default_value = "CA1.csv")]
    data: PathBuf,

    /// Directory for the comparison plots
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// Write a JSON summary of the run
    #[arg(long)]
    report: Option<PathBuf>,

    #[arg(long)]
    no_plots: bool,

    /// Also plot Cai, Prel, Rrel and krecov over time for each frequency
    #[arg(long)]
    plot_trajectories: bool,

    /// Run frequencies one after another instead of in parallel
    #[arg(long)]
    sequential: bool,

    #[arg(long, default_value_t = TOTAL_DURATION_MS)]
    duration_ms: f64,

    #[arg(long, default_value_t = SPIKES_PER_TRAIN)]
    spikes: usize,

    /// Resting calcium (uM)
    #[arg(long, default_value_t = DEFAULT_CAI0)]
    cai0: f64,

    /// Calcium influx per stimulus (uM/ms)
    #[arg(long, default_value_t = DEFAULT_KCA)]
    kca: f64,

    /// Initial pool recovery rate (1/ms)
    #[arg(long, default_value_t = DEFAULT_KRECOV0)]
    krecov0: f64,

    /// Maximum pool recovery rate (1/ms)
    #[arg(long, default_value_t = DEFAULT_KRECOVMAX)]
    krecovmax: f64,

    /// Calcium sensitivity of release (uM)
    #[arg(long, default_value_t = DEFAULT_KREL)]
    krel: f64,

    #[arg(long, default_value_t = DEFAULT_PREL_MAX)]
    prel_max: f64,

    #[arg(long, default_value_t = DEFAULT_PREL0)]
    prel0: f64,

    /// Calcium clearance time constant (ms)
    #[arg(long, default_value_t = DEFAULT_TAU_CAI)]
    tau_cai: f64,
}

impl Args {
    fn parameters(&self) -> Parameters {
        Parameters {
            cai0: self.cai0,
            k_ca: self.kca,
            krecov0: self.krecov0,
            krecovmax: self.krecovmax,
            k_rel: self.krel,
            prel_max: self.prel_max,
            prel0: self.prel0,
            tau_cai: self.tau_cai,
        }
    }

    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            duration_ms: self.duration_ms,
            spikes_per_train: self.spikes,
            ..SimulationConfig::default()
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    log::info!("--- Frequency Facilitation Model ---");
    let reference = load_reference_data(&args.data)
        .with_context(|| format!("loading reference data from {}", args.data.display()))?;
    let params = args.parameters();
    let config = args.config();
    for (name, value) in params.entries() {
        log::info!("  {:<10} = {}", name, value);
    }

    let options = SweepOptions {
        sequential: args.sequential,
        keep_trajectories: args.plot_trajectories,
        show_progress: true,
    };
    let results = run_at_multiple_frequencies(&params, &config, &reference, options)
        .context("invalid model configuration")?;

    if !args.no_plots {
        fs::create_dir_all(&args.output_dir)
            .with_context(|| format!("creating {}", args.output_dir.display()))?;
        for report in results.reports.values() {
            let path = args.output_dir.join(comparison_file_name(report.frequency));
            plot_comparison(report, &reference.label, &path)
                .map_err(|e| anyhow!("plotting {}: {}", path.display(), e))?;
            if let Some(trajectory) = &report.trajectory {
                let path = args
                    .output_dir
                    .join(format!("State {} Hz.png", report.frequency));
                plot_trajectory(trajectory, report.frequency, config.step_ms, &path)
                    .map_err(|e| anyhow!("plotting {}: {}", path.display(), e))?;
            }
        }
        log::info!(
            "Wrote {} comparison plots to {}",
            results.reports.len(),
            args.output_dir.display()
        );
    }

    if let Some(path) = &args.report {
        RunReport::new(&reference.label, &params, &config, &results)
            .write_json(path)
            .with_context(|| format!("writing report to {}", path.display()))?;
        log::info!("Report written to {}", path.display());
    }

    log::info!("--- Results ---");
    for report in results.reports.values() {
        log::info!("{:>5} Hz  SSE {:>10.2}", report.frequency, report.sse);
    }
    log::info!("Total SSE: {:.2}", results.total_sse());

    if !results.is_complete() {
        bail!(
            "{} of {} frequencies failed",
            results.failures.len(),
            reference.len()
        );
    }
    Ok(())
}
