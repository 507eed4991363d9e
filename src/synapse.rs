use crate::constants::HILL_COEFFICIENT;
use crate::error::SimError;
use crate::params::{Parameters, SimulationConfig};
use crate::spike_train::SpikeTrain;

/// Instantaneous state of the presynaptic terminal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SynapseState {
    pub glu: f64,    // glutamate released in the last step
    pub cai: f64,    // intracellular calcium, uM
    pub prel: f64,   // release probability
    pub rrel: f64,   // fraction of the releasable pool available
    pub krecov: f64, // pool recovery rate, 1/ms
    pub i_ca: f64,   // calcium influx of the last step
}

impl SynapseState {
    pub fn resting(params: &Parameters) -> Self {
        SynapseState {
            glu: 0.0,
            cai: 0.0,
            prel: params.prel0,
            rrel: 1.0,
            krecov: params.krecov0,
            i_ca: 0.0,
        }
    }
}

pub trait SynapseDynamics {
    fn initial_state(&self) -> SynapseState;

    /// Advances `state` across `[previous_time, current_time)`.
    /// Returns the new state and whether a pulse arrived in that interval.
    fn step(
        &self,
        state: &SynapseState,
        spike_train: &SpikeTrain,
        current_time: f64,
        previous_time: f64,
    ) -> Result<(SynapseState, bool), SimError>;
}

/// Calcium-driven facilitation with a self-referential pool recovery rate
/// (Lee, Anton, Poon & McRae 2009), integrated with explicit Euler.
#[derive(Clone, Copy, Debug)]
pub struct FacilitatingSynapse {
    pub params: Parameters,
    pub quantal_content: f64,
    pub release_sites: f64,
}

impl FacilitatingSynapse {
    pub fn new(params: Parameters, config: &SimulationConfig) -> Self {
        FacilitatingSynapse {
            params,
            quantal_content: config.quantal_content,
            release_sites: config.release_sites,
        }
    }
}

impl SynapseDynamics for FacilitatingSynapse {
    fn initial_state(&self) -> SynapseState {
        SynapseState::resting(&self.params)
    }

    fn step(
        &self,
        state: &SynapseState,
        spike_train: &SpikeTrain,
        current_time: f64,
        previous_time: f64,
    ) -> Result<(SynapseState, bool), SimError> {
        let p = &self.params;
        let spiked = spike_train.spike_in(previous_time, current_time);
        let input = if spiked { 1.0 } else { 0.0 };

        let i_ca = p.k_ca * input;
        // Relaxation toward rest plus the full influx on the stimulated step.
        let d_cai = (p.cai0 - state.cai) / p.tau_cai + i_ca;

        let denom = state.cai + state.krecov;
        if denom == 0.0 {
            return Err(SimError::DivisionByZero {
                context: "recovery rate (Cai + krecov)",
            });
        }
        let krecov = p.krecov0 + (p.krecovmax - p.krecov0) * state.cai / denom;

        // Depletion is scaled by Prel as well as Rrel.
        let d_rrel = state.krecov * (1.0 - state.rrel) - state.prel * state.rrel * input;
        let prel = release_probability(state.cai, p);
        let glu = self.quantal_content * self.release_sites * state.rrel * state.prel * input;

        let next = SynapseState {
            glu,
            cai: state.cai + d_cai,
            prel,
            rrel: state.rrel + d_rrel,
            krecov,
            i_ca,
        };
        Ok((next, spiked))
    }
}

/// Hill-type calcium sensitivity of release, cooperativity 4.
/// Written as `1 / (1 + (Krel/Cai)^4)` so large calcium levels cannot overflow.
pub fn release_probability(cai: f64, params: &Parameters) -> f64 {
    if cai == 0.0 {
        return 0.0;
    }
    params.prel_max / (1.0 + (params.k_rel / cai).powi(HILL_COEFFICIENT))
}
