//! Calcium-dependent short-term facilitation at a single synapse, simulated
//! per stimulation frequency and scored against recorded facilitation.

pub mod comparison;
pub mod constants;
pub mod data;
pub mod error;
pub mod params;
pub mod report;
pub mod simulation;
pub mod spike_train;
pub mod sweep;
pub mod synapse;
pub mod visualization;

pub use comparison::{compare, Comparison};
pub use data::{load_reference_data, ReferenceData};
pub use error::{DataError, SimError};
pub use params::{Parameters, SimulationConfig};
pub use simulation::{Simulation, SimulationRun, Trajectory, Variable};
pub use spike_train::SpikeTrain;
pub use sweep::{run_at_multiple_frequencies, FrequencyReport, SweepOptions, SweepResults};
pub use synapse::{FacilitatingSynapse, SynapseDynamics, SynapseState};
