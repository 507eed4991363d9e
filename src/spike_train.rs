use crate::constants::{MAX_SPIKES_PER_TRAIN, MS_PER_SECOND};
use crate::error::SimError;

/// Regular stimulation train: `count` pulses, one every `1000 / frequency` ms, starting at 0.
#[derive(Debug, Clone, PartialEq)]
pub struct SpikeTrain {
    pub frequency: f64,
    pub times: Vec<f64>,
}

impl SpikeTrain {
    pub fn generate(frequency: f64, count: usize) -> Result<Self, SimError> {
        if !(frequency.is_finite() && frequency > 0.0) {
            return Err(SimError::InvalidParameter {
                name: "frequency",
                value: frequency,
            });
        }
        if count > MAX_SPIKES_PER_TRAIN {
            return Err(SimError::InvalidParameter {
                name: "spike_count",
                value: count as f64,
            });
        }
        let interval = MS_PER_SECOND / frequency;
        let times = (0..count).map(|i| i as f64 * interval).collect();
        Ok(SpikeTrain { frequency, times })
    }

    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// True if any pulse falls in `[previous_time, current_time)`.
    pub fn spike_in(&self, previous_time: f64, current_time: f64) -> bool {
        self.times
            .iter()
            .any(|&s| s >= previous_time && s < current_time)
    }
}
