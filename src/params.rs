use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::SimError;

/// Kinetic constants of the facilitation model. Fixed for the whole run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    #[serde(rename = "Cai0")]
    pub cai0: f64,
    #[serde(rename = "KCa")]
    pub k_ca: f64,
    pub krecov0: f64,
    pub krecovmax: f64,
    #[serde(rename = "Krel")]
    pub k_rel: f64,
    #[serde(rename = "Prel_max")]
    pub prel_max: f64,
    #[serde(rename = "Prel0")]
    pub prel0: f64,
    #[serde(rename = "tauCai")]
    pub tau_cai: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Parameters {
            cai0: DEFAULT_CAI0,
            k_ca: DEFAULT_KCA,
            krecov0: DEFAULT_KRECOV0,
            krecovmax: DEFAULT_KRECOVMAX,
            k_rel: DEFAULT_KREL,
            prel_max: DEFAULT_PREL_MAX,
            prel0: DEFAULT_PREL0,
            tau_cai: DEFAULT_TAU_CAI,
        }
    }
}

impl Parameters {
    /// Named values, in the order they are usually reported.
    pub fn entries(&self) -> [(&'static str, f64); 8] {
        [
            ("Cai0", self.cai0),
            ("KCa", self.k_ca),
            ("krecov0", self.krecov0),
            ("krecovmax", self.krecovmax),
            ("Krel", self.k_rel),
            ("Prel_max", self.prel_max),
            ("Prel0", self.prel0),
            ("tauCai", self.tau_cai),
        ]
    }

    pub fn validate(&self) -> Result<(), SimError> {
        for (name, value) in self.entries() {
            ensure_positive(name, value)?;
        }
        Ok(())
    }
}

/// Fixed-step integration settings. Defaults reproduce the 1 ms / 1 s protocol.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    pub step_ms: f64,
    pub duration_ms: f64,
    pub spikes_per_train: usize,
    pub quantal_content: f64,
    pub release_sites: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        SimulationConfig {
            step_ms: STEP_SIZE_MS,
            duration_ms: TOTAL_DURATION_MS,
            spikes_per_train: SPIKES_PER_TRAIN,
            quantal_content: QUANTAL_CONTENT,
            release_sites: RELEASE_SITES,
        }
    }
}

impl SimulationConfig {
    pub fn validate(&self) -> Result<(), SimError> {
        ensure_positive("step_ms", self.step_ms)?;
        ensure_positive("duration_ms", self.duration_ms)?;
        ensure_positive("quantal_content", self.quantal_content)?;
        ensure_positive("release_sites", self.release_sites)?;
        if self.spikes_per_train == 0 || self.spikes_per_train > MAX_SPIKES_PER_TRAIN {
            return Err(SimError::InvalidParameter {
                name: "spikes_per_train",
                value: self.spikes_per_train as f64,
            });
        }
        let steps = (self.duration_ms / self.step_ms).round();
        if !(1.0..=MAX_STEPS as f64).contains(&steps) {
            return Err(SimError::InvalidParameter {
                name: "duration_ms",
                value: self.duration_ms,
            });
        }
        Ok(())
    }

    /// Number of Euler steps covering `duration_ms`. Bounded by `MAX_STEPS` once validated.
    pub fn num_steps(&self) -> usize {
        (self.duration_ms / self.step_ms).round().min(MAX_STEPS as f64) as usize
    }
}

pub(crate) fn ensure_positive(name: &'static str, value: f64) -> Result<(), SimError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(SimError::InvalidParameter { name, value })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Parameters::default().validate().is_ok());
        assert!(SimulationConfig::default().validate().is_ok());
        assert_eq!(SimulationConfig::default().num_steps(), 1000);
    }

    #[test]
    fn non_positive_time_constant_is_rejected() {
        let params = Parameters {
            tau_cai: 0.0,
            ..Parameters::default()
        };
        assert_eq!(
            params.validate(),
            Err(SimError::InvalidParameter {
                name: "tauCai",
                value: 0.0
            })
        );
    }

    #[test]
    fn nan_is_rejected() {
        let params = Parameters {
            k_rel: f64::NAN,
            ..Parameters::default()
        };
        assert!(matches!(
            params.validate(),
            Err(SimError::InvalidParameter { name: "Krel", .. })
        ));
    }

    #[test]
    fn empty_train_is_rejected() {
        let config = SimulationConfig {
            spikes_per_train: 0,
            ..SimulationConfig::default()
        };
        assert!(config.validate().is_err());
        let config = SimulationConfig {
            spikes_per_train: MAX_SPIKES_PER_TRAIN + 1,
            ..SimulationConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(SimError::InvalidParameter { name: "spikes_per_train", .. })
        ));
    }

    #[test]
    fn oversized_window_is_rejected() {
        for duration_ms in [1e12, 1e20, f64::MAX] {
            let config = SimulationConfig {
                duration_ms,
                ..SimulationConfig::default()
            };
            assert_eq!(
                config.validate(),
                Err(SimError::InvalidParameter {
                    name: "duration_ms",
                    value: duration_ms
                })
            );
        }
        let tiny_step = SimulationConfig {
            step_ms: 1e-300,
            ..SimulationConfig::default()
        };
        assert!(tiny_step.validate().is_err());
        let sub_step = SimulationConfig {
            duration_ms: 0.1,
            ..SimulationConfig::default()
        };
        assert!(sub_step.validate().is_err());
        let largest = SimulationConfig {
            duration_ms: MAX_STEPS as f64,
            ..SimulationConfig::default()
        };
        assert!(largest.validate().is_ok());
        assert_eq!(largest.num_steps(), MAX_STEPS);
    }

    #[test]
    fn serializes_with_model_names() {
        let json = serde_json::to_string(&Parameters::default()).unwrap();
        assert!(json.contains("\"Cai0\":32.0"));
        assert!(json.contains("\"tauCai\":25.0"));
        assert!(json.contains("\"krecovmax\":0.028"));
    }
}
