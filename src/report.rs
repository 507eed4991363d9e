use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::params::{Parameters, SimulationConfig};
use crate::sweep::SweepResults;

#[derive(Debug, Serialize)]
pub struct FrequencySummary {
    pub frequency: u32,
    pub sse: f64,
    pub simulated: Vec<f64>,
    pub reference: Vec<f64>,
}

#[derive(Debug, Serialize)]
pub struct FailureSummary {
    pub frequency: u32,
    pub error: String,
}

/// JSON summary of one sweep.
#[derive(Debug, Serialize)]
pub struct RunReport {
    pub dataset: String,
    pub parameters: Parameters,
    pub config: SimulationConfig,
    pub total_sse: f64,
    pub frequencies: Vec<FrequencySummary>,
    pub failures: Vec<FailureSummary>,
}

impl RunReport {
    pub fn new(
        dataset: &str,
        parameters: &Parameters,
        config: &SimulationConfig,
        results: &SweepResults,
    ) -> Self {
        RunReport {
            dataset: dataset.to_string(),
            parameters: *parameters,
            config: *config,
            total_sse: results.total_sse(),
            frequencies: results
                .reports
                .values()
                .map(|r| FrequencySummary {
                    frequency: r.frequency,
                    sse: r.sse,
                    simulated: r.simulated.clone(),
                    reference: r.reference.clone(),
                })
                .collect(),
            failures: results
                .failures
                .iter()
                .map(|(&frequency, err)| FailureSummary {
                    frequency,
                    error: err.to_string(),
                })
                .collect(),
        }
    }

    pub fn write_json(&self, path: &Path) -> std::io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.write_all(b"\n")?;
        writer.flush()
    }
}
