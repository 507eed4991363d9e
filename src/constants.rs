pub const STEP_SIZE_MS: f64 = 1.0; // Euler step in ms
pub const TOTAL_DURATION_MS: f64 = 1000.0; // Simulated window per frequency
pub const SPIKES_PER_TRAIN: usize = 10; // Pulses per stimulation train
pub const MAX_STEPS: usize = 1_000_000; // Upper bound on steps per run
pub const MAX_SPIKES_PER_TRAIN: usize = 100_000;
pub const MS_PER_SECOND: f64 = 1000.0;

pub const QUANTAL_CONTENT: f64 = 4.0; // n, vesicles released per site
pub const RELEASE_SITES: f64 = 1.0; // nTot
pub const HILL_COEFFICIENT: i32 = 4; // Calcium cooperativity of release

// Defaults fitted to the CA1 recordings
pub const DEFAULT_CAI0: f64 = 32.0; // uM resting calcium
pub const DEFAULT_KCA: f64 = 64.0; // uM/ms calcium influx per stimulus
pub const DEFAULT_KRECOV0: f64 = 7.5e-3; // 1/ms initial pool recovery rate
pub const DEFAULT_KRECOVMAX: f64 = 2.8e-2; // 1/ms maximum pool recovery rate
pub const DEFAULT_KREL: f64 = 32.0; // uM calcium sensitivity of release
pub const DEFAULT_PREL_MAX: f64 = 1.0;
pub const DEFAULT_PREL0: f64 = 0.29;
pub const DEFAULT_TAU_CAI: f64 = 25.0; // ms calcium clearance

pub const NORMALIZED_FIRST_PULSE: f64 = 100.0; // % of first pulse
pub const PLOT_SIZE: (u32, u32) = (1024, 768);
