use std::collections::BTreeMap;
use std::time::Instant;

use indicatif::{ProgressBar, ProgressStyle};
use rayon::prelude::*;

use crate::comparison::compare;
use crate::data::ReferenceData;
use crate::error::SimError;
use crate::params::{Parameters, SimulationConfig};
use crate::simulation::{Simulation, Trajectory};

/// Comparison of model and recording at one frequency.
#[derive(Clone, Debug, PartialEq)]
pub struct FrequencyReport {
    pub frequency: u32,
    pub sse: f64,
    /// Simulated % of first pulse at each detected pulse.
    pub simulated: Vec<f64>,
    pub reference: Vec<f64>,
    pub spike_indices: Vec<usize>,
    pub trajectory: Option<Trajectory>,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SweepOptions {
    pub sequential: bool,
    pub keep_trajectories: bool,
    pub show_progress: bool,
}

#[derive(Debug, Default)]
pub struct SweepResults {
    pub reports: BTreeMap<u32, FrequencyReport>,
    pub failures: BTreeMap<u32, SimError>,
}

impl SweepResults {
    pub fn total_sse(&self) -> f64 {
        self.reports.values().map(|r| r.sse).sum()
    }

    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

pub fn run_frequency(
    simulation: &Simulation,
    frequency: u32,
    reference: &[f64],
    keep_trajectory: bool,
) -> Result<FrequencyReport, SimError> {
    let run = simulation.run(frequency as f64)?;
    let comparison = compare(&run.trajectory.glu, &run.spike_indices, reference)?;
    log::debug!(
        "{} Hz: {} pulses detected, SSE {:.2}",
        frequency,
        run.spike_indices.len(),
        comparison.sse
    );
    Ok(FrequencyReport {
        frequency,
        sse: comparison.sse,
        simulated: comparison.sampled,
        reference: reference.to_vec(),
        spike_indices: run.spike_indices,
        trajectory: keep_trajectory.then_some(run.trajectory),
    })
}

/// Simulates every frequency in `reference` and scores each against its column.
/// A failing frequency is recorded in `failures` without affecting the others.
pub fn run_at_multiple_frequencies(
    params: &Parameters,
    config: &SimulationConfig,
    reference: &ReferenceData,
    options: SweepOptions,
) -> Result<SweepResults, SimError> {
    let simulation = Simulation::new(*params, *config)?;
    let started = Instant::now();
    let frequencies: Vec<u32> = reference.frequencies().collect();
    log::info!(
        "Simulating {} frequencies ({} steps of {} ms each)",
        frequencies.len(),
        config.num_steps(),
        config.step_ms
    );

    let pb = if options.show_progress {
        ProgressBar::new(frequencies.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} frequencies - {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("##-"),
    );

    let run_one = |&frequency: &u32| {
        let column = reference.get(frequency).unwrap_or_default();
        let outcome = run_frequency(&simulation, frequency, column, options.keep_trajectories);
        pb.inc(1);
        (frequency, outcome)
    };
    let outcomes: Vec<(u32, Result<FrequencyReport, SimError>)> = if options.sequential {
        frequencies.iter().map(run_one).collect()
    } else {
        frequencies.par_iter().map(run_one).collect()
    };
    pb.finish_with_message("Simulation complete");

    let mut results = SweepResults::default();
    for (frequency, outcome) in outcomes {
        match outcome {
            Ok(report) => {
                log::info!("{} Hz: SSE {:.2}", frequency, report.sse);
                results.reports.insert(frequency, report);
            }
            Err(err) => {
                log::error!("{} Hz: {}", frequency, err);
                results.failures.insert(frequency, err);
            }
        }
    }
    log::info!(
        "Sweep finished in {:.2?}: total SSE {:.2} over {} frequencies, {} failed",
        started.elapsed(),
        results.total_sse(),
        results.reports.len(),
        results.failures.len()
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::parse_reference_data;

    fn reference() -> ReferenceData {
        let mut table = String::from("5,20,50\n");
        for _ in 0..10 {
            table.push_str("100,100,100\n");
        }
        parse_reference_data(table.as_bytes(), "test".into()).unwrap()
    }

    #[test]
    fn failure_is_isolated_to_its_frequency() {
        let results = run_at_multiple_frequencies(
            &Parameters::default(),
            &SimulationConfig::default(),
            &reference(),
            SweepOptions::default(),
        )
        .unwrap();
        assert_eq!(results.reports.keys().copied().collect::<Vec<_>>(), vec![20, 50]);
        assert_eq!(
            results.failures.get(&5),
            Some(&SimError::LengthMismatch {
                expected: 10,
                actual: 5
            })
        );
        assert!(!results.is_complete());
        let report = &results.reports[&20];
        assert_eq!(report.simulated.len(), 10);
        assert_eq!(report.simulated[0], 100.0);
        assert!(report.trajectory.is_none());
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let data = reference();
        let params = Parameters::default();
        let config = SimulationConfig::default();
        let parallel =
            run_at_multiple_frequencies(&params, &config, &data, SweepOptions::default()).unwrap();
        let sequential = run_at_multiple_frequencies(
            &params,
            &config,
            &data,
            SweepOptions {
                sequential: true,
                keep_trajectories: true,
                ..SweepOptions::default()
            },
        )
        .unwrap();
        for (frequency, report) in &parallel.reports {
            let other = &sequential.reports[frequency];
            assert_eq!(report.sse, other.sse);
            assert_eq!(report.simulated, other.simulated);
            assert_eq!(other.trajectory.as_ref().map(Trajectory::len), Some(1001));
        }
        assert_eq!(parallel.total_sse(), sequential.total_sse());
    }

    #[test]
    fn invalid_parameters_abort_the_sweep() {
        let params = Parameters {
            k_ca: 0.0,
            ..Parameters::default()
        };
        assert!(run_at_multiple_frequencies(
            &params,
            &SimulationConfig::default(),
            &reference(),
            SweepOptions::default()
        )
        .is_err());
    }
}
