//! The on-disk JSON shape (spec §6 "Config I/O") and its resolution into a
//! [`symbolic_core::config::Config`]. Grounded on the teacher's
//! `factorial-data::schema` module: a serde-derived wire struct kept
//! separate from the engine type, with mode strings resolved by hand rather
//! than relying on serde's enum representation to match the wire format.

use serde::Deserialize;
use symbolic_core::config::{
    Config, EngineMode, KoppaMode, KoppaTrigger, Mt10Behavior, PrimeTarget, PsiMode,
    RatioTriggerMode, SignFlipMode, TrackMode,
};
use symbolic_core::rational::Rational;

use crate::ConfigError;

/// The raw JSON document. Every field is optional; absent fields fall back
/// to [`Config::default`]'s value. Field names match spec §6's key list
/// verbatim ("upsilon_track", "tick_count", the "enable_*" family, etc.)
/// rather than the core's internal field names.
#[derive(Debug, Deserialize, Default)]
pub struct RawConfig {
    pub psi_mode: Option<String>,
    pub koppa_mode: Option<String>,
    pub engine_mode: Option<String>,
    pub upsilon_track: Option<String>,
    pub beta_track: Option<String>,
    pub dual_track_symmetry: Option<bool>,
    pub koppa_trigger: Option<String>,
    pub prime_target: Option<String>,
    pub mt10_behavior: Option<String>,
    pub ratio_trigger_mode: Option<String>,
    pub sign_flip_mode: Option<String>,

    pub triple_psi: Option<bool>,
    pub multi_level_koppa: Option<bool>,
    pub enable_asymmetric_cascade: Option<bool>,
    pub enable_conditional_triple_psi: Option<bool>,
    pub enable_koppa_gated_engine: Option<bool>,
    pub enable_delta_cross_propagation: Option<bool>,
    pub enable_delta_koppa_offset: Option<bool>,
    pub enable_ratio_threshold_psi: Option<bool>,
    pub enable_stack_depth_modes: Option<bool>,
    pub enable_epsilon_phi_triangle: Option<bool>,
    pub enable_modular_wrap: Option<bool>,
    pub enable_psi_strength_parameter: Option<bool>,
    pub enable_ratio_snapshot_logging: Option<bool>,
    pub enable_feedback_oscillator: Option<bool>,
    pub enable_fibonacci_gate: Option<bool>,
    pub enable_ratio_custom_range: Option<bool>,
    pub enable_twin_prime_trigger: Option<bool>,
    pub enable_fibonacci_trigger: Option<bool>,
    pub enable_perfect_power_trigger: Option<bool>,

    pub tick_count: Option<u64>,
    pub koppa_wrap_threshold: Option<u64>,
    pub upsilon_seed: Option<String>,
    pub beta_seed: Option<String>,
    pub koppa_seed: Option<String>,
    pub ratio_custom_lower: Option<String>,
    pub ratio_custom_upper: Option<String>,
    pub modulus_bound: Option<String>,
}

fn parse_psi_mode(s: &str) -> Result<PsiMode, ConfigError> {
    match s {
        "MSTEP" => Ok(PsiMode::MStep),
        "RHO_ONLY" => Ok(PsiMode::RhoOnly),
        "MSTEP_RHO" => Ok(PsiMode::MStepRho),
        "INHIBIT_RHO" => Ok(PsiMode::InhibitRho),
        other => Err(ConfigError::unknown_enum("psi_mode", other)),
    }
}

fn parse_koppa_mode(s: &str) -> Result<KoppaMode, ConfigError> {
    match s {
        "DUMP" => Ok(KoppaMode::Dump),
        "POP" => Ok(KoppaMode::Pop),
        "ACCUMULATE" => Ok(KoppaMode::Accumulate),
        other => Err(ConfigError::unknown_enum("koppa_mode", other)),
    }
}

fn parse_engine_mode(s: &str) -> Result<EngineMode, ConfigError> {
    match s {
        "ADD" => Ok(EngineMode::Add),
        "MULTI" => Ok(EngineMode::Multi),
        "SLIDE" => Ok(EngineMode::Slide),
        "DELTA_ADD" => Ok(EngineMode::DeltaAdd),
        other => Err(ConfigError::unknown_enum("engine_mode", other)),
    }
}

fn parse_track_mode(field: &'static str, s: &str) -> Result<TrackMode, ConfigError> {
    match s {
        "ADD" => Ok(TrackMode::Add),
        "MULTI" => Ok(TrackMode::Multi),
        "SLIDE" => Ok(TrackMode::Slide),
        other => Err(ConfigError::unknown_enum(field, other)),
    }
}

fn parse_koppa_trigger(s: &str) -> Result<KoppaTrigger, ConfigError> {
    match s {
        "ON_PSI" => Ok(KoppaTrigger::OnPsi),
        "ON_MU_AFTER_PSI" => Ok(KoppaTrigger::OnMuAfterPsi),
        "ON_ALL_MU" => Ok(KoppaTrigger::OnAllMu),
        other => Err(ConfigError::unknown_enum("koppa_trigger", other)),
    }
}

fn parse_prime_target(s: &str) -> Result<PrimeTarget, ConfigError> {
    match s {
        "PRIME_ON_MEMORY" => Ok(PrimeTarget::PrimeOnMemory),
        "PRIME_ON_NEW_UPSILON" => Ok(PrimeTarget::PrimeOnNewUpsilon),
        other => Err(ConfigError::unknown_enum("prime_target", other)),
    }
}

fn parse_mt10_behavior(s: &str) -> Result<Mt10Behavior, ConfigError> {
    match s {
        "FORCED_EMISSION_ONLY" => Ok(Mt10Behavior::ForcedEmissionOnly),
        "FORCED_PSI" => Ok(Mt10Behavior::ForcedPsi),
        other => Err(ConfigError::unknown_enum("mt10_behavior", other)),
    }
}

fn parse_ratio_trigger_mode(s: &str) -> Result<RatioTriggerMode, ConfigError> {
    match s {
        "NONE" => Ok(RatioTriggerMode::None),
        "GOLDEN" => Ok(RatioTriggerMode::Golden),
        "SQRT2" => Ok(RatioTriggerMode::Sqrt2),
        "PLASTIC" => Ok(RatioTriggerMode::Plastic),
        "CUSTOM" => Ok(RatioTriggerMode::Custom),
        other => Err(ConfigError::unknown_enum("ratio_trigger_mode", other)),
    }
}

fn parse_sign_flip_mode(s: &str) -> Result<SignFlipMode, ConfigError> {
    match s {
        "NONE" => Ok(SignFlipMode::None),
        "ALWAYS" => Ok(SignFlipMode::Always),
        "ALTERNATE" => Ok(SignFlipMode::Alternate),
        other => Err(ConfigError::unknown_enum("sign_flip_mode", other)),
    }
}

fn parse_seed(field: &'static str, s: &str) -> Result<Rational, ConfigError> {
    s.parse::<Rational>()
        .map_err(|_| ConfigError::bad_seed(field, s))
}

impl RawConfig {
    /// Resolves this wire document into a [`Config`], starting from
    /// [`Config::default`] and overriding only the fields present in the
    /// JSON. Unknown enum strings and unparseable seeds are reported here,
    /// never inside `symbolic-core` (spec §7: "the core is never entered").
    pub fn resolve(self) -> Result<Config, ConfigError> {
        let mut cfg = Config::default();

        if let Some(s) = &self.psi_mode {
            cfg.psi_mode = parse_psi_mode(s)?;
        }
        if let Some(s) = &self.koppa_mode {
            cfg.koppa_mode = parse_koppa_mode(s)?;
        }
        if let Some(s) = &self.engine_mode {
            cfg.engine_mode = parse_engine_mode(s)?;
        }
        if let Some(s) = &self.upsilon_track {
            cfg.engine_upsilon = parse_track_mode("upsilon_track", s)?;
        }
        if let Some(s) = &self.beta_track {
            cfg.engine_beta = parse_track_mode("beta_track", s)?;
        }
        if let Some(b) = self.dual_track_symmetry {
            cfg.dual_track = b;
        }
        if let Some(s) = &self.koppa_trigger {
            cfg.koppa_trigger = parse_koppa_trigger(s)?;
        }
        if let Some(s) = &self.prime_target {
            cfg.prime_target = parse_prime_target(s)?;
        }
        if let Some(s) = &self.mt10_behavior {
            cfg.mt10_behavior = parse_mt10_behavior(s)?;
        }
        if let Some(s) = &self.ratio_trigger_mode {
            cfg.ratio_trigger_mode = parse_ratio_trigger_mode(s)?;
        }
        if let Some(s) = &self.sign_flip_mode {
            cfg.sign_flip_mode = parse_sign_flip_mode(s)?;
        }

        if let Some(b) = self.triple_psi {
            cfg.triple_psi = b;
        }
        if let Some(b) = self.multi_level_koppa {
            cfg.multi_level_koppa = b;
        }
        if let Some(b) = self.enable_asymmetric_cascade {
            cfg.asymmetric_cascade = b;
        }
        if let Some(b) = self.enable_conditional_triple_psi {
            cfg.conditional_triple_psi = b;
        }
        if let Some(b) = self.enable_koppa_gated_engine {
            cfg.koppa_gated_engine = b;
        }
        if let Some(b) = self.enable_delta_cross_propagation {
            cfg.delta_cross_propagation = b;
        }
        if let Some(b) = self.enable_delta_koppa_offset {
            cfg.delta_koppa_offset = b;
        }
        if let Some(b) = self.enable_ratio_threshold_psi {
            cfg.ratio_threshold_psi = b;
        }
        if let Some(b) = self.enable_stack_depth_modes {
            cfg.stack_depth_modes = b;
        }
        if let Some(b) = self.enable_epsilon_phi_triangle {
            cfg.epsilon_phi_triangle = b;
        }
        if let Some(b) = self.enable_modular_wrap {
            cfg.modular_wrap = b;
        }
        if let Some(b) = self.enable_psi_strength_parameter {
            cfg.psi_strength_parameter = b;
        }
        if let Some(b) = self.enable_ratio_snapshot_logging {
            cfg.ratio_snapshot_logging = b;
        }
        if let Some(b) = self.enable_feedback_oscillator {
            cfg.feedback_oscillator = b;
        }
        if let Some(b) = self.enable_fibonacci_gate {
            cfg.fibonacci_gate = b;
        }
        if let Some(b) = self.enable_ratio_custom_range {
            cfg.ratio_custom_range = b;
        }
        if let Some(b) = self.enable_twin_prime_trigger {
            cfg.twin_prime_trigger = b;
        }
        if let Some(b) = self.enable_fibonacci_trigger {
            cfg.fibonacci_trigger = b;
        }
        if let Some(b) = self.enable_perfect_power_trigger {
            cfg.perfect_power_trigger = b;
        }

        if let Some(n) = self.tick_count {
            cfg.ticks = n;
        }
        if let Some(n) = self.koppa_wrap_threshold {
            cfg.koppa_wrap_threshold = n;
        }
        if let Some(s) = &self.upsilon_seed {
            cfg.initial_upsilon = parse_seed("upsilon_seed", s)?;
        }
        if let Some(s) = &self.beta_seed {
            cfg.initial_beta = parse_seed("beta_seed", s)?;
        }
        if let Some(s) = &self.koppa_seed {
            cfg.initial_koppa = parse_seed("koppa_seed", s)?;
        }
        if let Some(s) = &self.ratio_custom_lower {
            cfg.ratio_custom_lower = parse_seed("ratio_custom_lower", s)?;
        }
        if let Some(s) = &self.ratio_custom_upper {
            cfg.ratio_custom_upper = parse_seed("ratio_custom_upper", s)?;
        }
        if let Some(s) = &self.modulus_bound {
            cfg.modulus_bound = s
                .parse()
                .map_err(|_| ConfigError::bad_seed("modulus_bound", s))?;
        }

        Ok(cfg)
    }
}
