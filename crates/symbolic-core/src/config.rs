//! The `Config` surface: every recognized mode, toggle, and seed. Populating
//! one of these from JSON is the job of the `symbolic-config` crate; this
//! module only defines the shape the core consumes.

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

use crate::rational::Rational;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PsiMode {
    MStep,
    RhoOnly,
    MStepRho,
    InhibitRho,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KoppaMode {
    Dump,
    Pop,
    Accumulate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TrackMode {
    Add,
    Multi,
    Slide,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineMode {
    Add,
    Multi,
    Slide,
    DeltaAdd,
}

impl EngineMode {
    /// `map(ADD|MULTI|SLIDE) = same track mode`; `DELTA_ADD` has no direct
    /// track-mode image and is handled by the delta-add path instead.
    pub fn as_track_mode(self) -> Option<TrackMode> {
        match self {
            EngineMode::Add => Some(TrackMode::Add),
            EngineMode::Multi => Some(TrackMode::Multi),
            EngineMode::Slide => Some(TrackMode::Slide),
            EngineMode::DeltaAdd => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum KoppaTrigger {
    OnPsi,
    OnMuAfterPsi,
    OnAllMu,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PrimeTarget {
    PrimeOnMemory,
    PrimeOnNewUpsilon,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mt10Behavior {
    ForcedEmissionOnly,
    ForcedPsi,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RatioTriggerMode {
    None,
    Golden,
    Sqrt2,
    Plastic,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SignFlipMode {
    None,
    Always,
    Alternate,
}

/// Every recognized mode, toggle, and seed, gathered in one struct. All
/// booleans default to `false` and all modes default to their
/// first-listed variant except where noted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub psi_mode: PsiMode,
    pub koppa_mode: KoppaMode,
    pub engine_mode: EngineMode,
    pub engine_upsilon: TrackMode,
    pub engine_beta: TrackMode,
    pub koppa_trigger: KoppaTrigger,
    pub prime_target: PrimeTarget,
    pub mt10_behavior: Mt10Behavior,
    pub ratio_trigger_mode: RatioTriggerMode,
    pub sign_flip_mode: SignFlipMode,

    // Feature toggles.
    pub dual_track: bool,
    pub triple_psi: bool,
    pub multi_level_koppa: bool,
    pub asymmetric_cascade: bool,
    pub conditional_triple_psi: bool,
    pub koppa_gated_engine: bool,
    pub delta_cross_propagation: bool,
    pub delta_koppa_offset: bool,
    pub ratio_threshold_psi: bool,
    pub stack_depth_modes: bool,
    pub epsilon_phi_triangle: bool,
    pub modular_wrap: bool,
    pub psi_strength_parameter: bool,
    pub ratio_snapshot_logging: bool,
    pub feedback_oscillator: bool,
    pub fibonacci_gate: bool,
    pub ratio_custom_range: bool,
    pub twin_prime_trigger: bool,
    pub fibonacci_trigger: bool,
    pub perfect_power_trigger: bool,

    // Numerics.
    pub ticks: u64,
    pub initial_upsilon: Rational,
    pub initial_beta: Rational,
    pub initial_koppa: Rational,
    pub ratio_custom_lower: Rational,
    pub ratio_custom_upper: Rational,
    pub koppa_wrap_threshold: u64,
    /// Reserved by the external Config contract; no algorithm in this
    /// crate reads it. Carried through unused rather than invented.
    pub modulus_bound: BigInt,
}

impl Config {
    /// `sign_flip` is derived from `sign_flip_mode != NONE`.
    pub fn sign_flip_enabled(&self) -> bool {
        self.sign_flip_mode != SignFlipMode::None
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            psi_mode: PsiMode::MStep,
            koppa_mode: KoppaMode::Dump,
            engine_mode: EngineMode::Add,
            engine_upsilon: TrackMode::Add,
            engine_beta: TrackMode::Add,
            koppa_trigger: KoppaTrigger::OnPsi,
            prime_target: PrimeTarget::PrimeOnMemory,
            mt10_behavior: Mt10Behavior::ForcedEmissionOnly,
            ratio_trigger_mode: RatioTriggerMode::None,
            sign_flip_mode: SignFlipMode::None,

            dual_track: false,
            triple_psi: false,
            multi_level_koppa: false,
            asymmetric_cascade: false,
            conditional_triple_psi: false,
            koppa_gated_engine: false,
            delta_cross_propagation: false,
            delta_koppa_offset: false,
            ratio_threshold_psi: false,
            stack_depth_modes: false,
            epsilon_phi_triangle: false,
            modular_wrap: false,
            psi_strength_parameter: false,
            ratio_snapshot_logging: false,
            feedback_oscillator: false,
            fibonacci_gate: false,
            ratio_custom_range: false,
            twin_prime_trigger: false,
            fibonacci_trigger: false,
            perfect_power_trigger: false,

            ticks: 1,
            initial_upsilon: Rational::zero(),
            initial_beta: Rational::zero(),
            initial_koppa: Rational::zero(),
            ratio_custom_lower: Rational::zero(),
            ratio_custom_upper: Rational::zero(),
            koppa_wrap_threshold: 0,
            modulus_bound: BigInt::from(0),
        }
    }
}
