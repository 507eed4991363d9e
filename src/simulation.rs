use std::fmt;

use crate::error::SimError;
use crate::params::{Parameters, SimulationConfig};
use crate::spike_train::SpikeTrain;
use crate::synapse::{FacilitatingSynapse, SynapseDynamics, SynapseState};

/// State variables recorded at every step.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Variable {
    Glu,
    Cai,
    Prel,
    Rrel,
    Krecov,
    ICa,
}

impl Variable {
    pub const ALL: [Variable; 6] = [
        Variable::Glu,
        Variable::Cai,
        Variable::Prel,
        Variable::Rrel,
        Variable::Krecov,
        Variable::ICa,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Variable::Glu => "glu",
            Variable::Cai => "Cai",
            Variable::Prel => "Prel",
            Variable::Rrel => "Rrel",
            Variable::Krecov => "krecov",
            Variable::ICa => "ICa",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Variable::ALL.into_iter().find(|v| v.name() == name)
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Append-only record of every state the synapse passed through, initial state first.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Trajectory {
    pub glu: Vec<f64>,
    pub cai: Vec<f64>,
    pub prel: Vec<f64>,
    pub rrel: Vec<f64>,
    pub krecov: Vec<f64>,
    pub i_ca: Vec<f64>,
}

impl Trajectory {
    pub fn with_capacity(capacity: usize) -> Self {
        Trajectory {
            glu: Vec::with_capacity(capacity),
            cai: Vec::with_capacity(capacity),
            prel: Vec::with_capacity(capacity),
            rrel: Vec::with_capacity(capacity),
            krecov: Vec::with_capacity(capacity),
            i_ca: Vec::with_capacity(capacity),
        }
    }

    pub fn observe(&mut self, state: &SynapseState) {
        self.glu.push(state.glu);
        self.cai.push(state.cai);
        self.prel.push(state.prel);
        self.rrel.push(state.rrel);
        self.krecov.push(state.krecov);
        self.i_ca.push(state.i_ca);
    }

    pub fn series(&self, variable: Variable) -> &[f64] {
        match variable {
            Variable::Glu => &self.glu,
            Variable::Cai => &self.cai,
            Variable::Prel => &self.prel,
            Variable::Rrel => &self.rrel,
            Variable::Krecov => &self.krecov,
            Variable::ICa => &self.i_ca,
        }
    }

    pub fn get(&self, name: &str) -> Option<&[f64]> {
        Variable::from_name(name).map(|v| self.series(v))
    }

    pub fn len(&self) -> usize {
        self.glu.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glu.is_empty()
    }
}

/// Output of one frequency's run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimulationRun {
    pub frequency: f64,
    pub trajectory: Trajectory,
    /// Step indices (into the trajectory) at which a pulse was detected.
    pub spike_indices: Vec<usize>,
}

pub struct Simulation {
    synapse: FacilitatingSynapse,
    config: SimulationConfig,
}

impl Simulation {
    pub fn new(params: Parameters, config: SimulationConfig) -> Result<Self, SimError> {
        params.validate()?;
        config.validate()?;
        Ok(Simulation {
            synapse: FacilitatingSynapse::new(params, &config),
            config,
        })
    }

    pub fn run(&self, frequency: f64) -> Result<SimulationRun, SimError> {
        let spike_train = SpikeTrain::generate(frequency, self.config.spikes_per_train)?;
        let num_steps = self.config.num_steps();
        let last_spike = spike_train.times.last().copied().unwrap_or(0.0);
        if last_spike >= num_steps as f64 * self.config.step_ms {
            log::debug!(
                "{} Hz: last pulse at {:.1} ms lies outside the {} ms window",
                frequency,
                last_spike,
                self.config.duration_ms
            );
        }

        let mut state = self.synapse.initial_state();
        let samples = num_steps.checked_add(1).ok_or(SimError::InvalidParameter {
            name: "duration_ms",
            value: self.config.duration_ms,
        })?;
        let mut trajectory = Trajectory::with_capacity(samples);
        let mut spike_indices = Vec::with_capacity(spike_train.len());
        trajectory.observe(&state);

        for step in 1..=num_steps {
            let previous_time = (step - 1) as f64 * self.config.step_ms;
            let current_time = step as f64 * self.config.step_ms;
            let (next, spiked) =
                self.synapse
                    .step(&state, &spike_train, current_time, previous_time)?;
            if spiked {
                spike_indices.push(step);
            }
            state = next;
            trajectory.observe(&state);
        }

        Ok(SimulationRun {
            frequency,
            trajectory,
            spike_indices,
        })
    }
}

/// Runs the model for one frequency with the default integration settings.
pub fn run(params: &Parameters, frequency: f64) -> Result<SimulationRun, SimError> {
    Simulation::new(*params, SimulationConfig::default())?.run(frequency)
}
