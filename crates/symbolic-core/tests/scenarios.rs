//! End-to-end scenarios against the full microtick loop (spec §8).

use symbolic_core::config::{
    Config, EngineMode, KoppaMode, KoppaTrigger, PrimeTarget, PsiMode,
};
use symbolic_core::event::{Observation, Observer};
use symbolic_core::psi;
use symbolic_core::rational::Rational;
use symbolic_core::sim;
use symbolic_core::state::State;

struct Capture {
    rows: Vec<(u32, char, bool, bool, Rational, bool)>,
}

impl Observer for Capture {
    fn observe(&mut self, obs: &Observation<'_>) {
        self.rows.push((
            obs.microtick,
            obs.phase.code(),
            obs.flags.rho_event,
            obs.flags.psi_fired,
            obs.state.upsilon.clone(),
            obs.state.rho_pending,
        ));
    }
}

fn base_config() -> Config {
    let mut cfg = Config::default();
    cfg.engine_mode = EngineMode::Add;
    cfg.psi_mode = PsiMode::MStep;
    cfg.koppa_mode = KoppaMode::Dump;
    cfg.koppa_trigger = KoppaTrigger::OnPsi;
    cfg.ticks = 1;
    cfg
}

#[test]
fn scenario_1_plain_add_mstep_dump() {
    let mut cfg = base_config();
    cfg.initial_upsilon = Rational::from_i64(3, 5);
    cfg.initial_beta = Rational::from_i64(5, 7);
    cfg.initial_koppa = Rational::from_i64(1, 1);

    let mut cap = Capture { rows: Vec::new() };
    sim::run(&cfg, &mut cap);

    let mt1 = &cap.rows[0];
    assert_eq!(mt1.0, 1);
    assert_eq!(mt1.1, 'E');
    assert!(!mt1.2, "81/35 has no prime numerator/denominator factor by itself here");
    assert_eq!(mt1.4.num(), &num_bigint::BigInt::from(81));
    assert_eq!(mt1.4.den(), &num_bigint::BigUint::from(35u32));

    // mt=2: psi fires under MSTEP; phi snapshots the pre-psi upsilon (81/35).
    let mt2 = &cap.rows[1];
    assert_eq!(mt2.0, 2);
    assert_eq!(mt2.1, 'M');
    assert!(mt2.3, "MSTEP always requests psi");
}

#[test]
fn scenario_2_slide_with_zero_koppa_is_a_noop_and_continues() {
    let mut cfg = base_config();
    cfg.engine_mode = EngineMode::Slide;
    cfg.initial_upsilon = Rational::from_i64(1, 2);
    cfg.initial_beta = Rational::from_i64(1, 3);
    cfg.initial_koppa = Rational::zero();

    let mut cap = Capture { rows: Vec::new() };
    sim::run(&cfg, &mut cap);

    assert_eq!(cap.rows.len(), 11);
    let mt1 = &cap.rows[0];
    assert!(!mt1.3);
    // State is untouched by the failed engine step.
    assert!(mt1.4.same_representation(&Rational::from_i64(1, 2)));
}

#[test]
fn scenario_3_stack_depth_gating() {
    let mut cfg = base_config();
    cfg.multi_level_koppa = true;
    cfg.stack_depth_modes = true;
    cfg.koppa_trigger = KoppaTrigger::OnAllMu;
    cfg.initial_upsilon = Rational::from_i64(3, 5);
    cfg.initial_beta = Rational::from_i64(5, 7);
    cfg.initial_koppa = Rational::from_i64(1, 1);

    let mut cap = Capture { rows: Vec::new() };
    sim::run(&cfg, &mut cap);

    let m_phases: Vec<&(u32, char, bool, bool, Rational, bool)> =
        cap.rows.iter().filter(|r| r.1 == 'M').collect();
    assert_eq!(m_phases.len(), 4);

    // First two M microticks see stack sizes 0 and 1: psi must not fire.
    assert!(!m_phases[0].3);
    assert!(!m_phases[1].3);
    // Third M microtick sees stack size 2: psi is permitted to fire.
    assert!(m_phases[2].3);
    // Fourth M microtick sees stack size 3: blocked again.
    assert!(!m_phases[3].3);
}

#[test]
fn scenario_4_prime_on_memory_sets_rho() {
    let mut cfg = base_config();
    cfg.prime_target = PrimeTarget::PrimeOnMemory;
    cfg.initial_upsilon = Rational::from_i64(7, 2);

    let mut cap = Capture { rows: Vec::new() };
    sim::run(&cfg, &mut cap);

    let mt1 = &cap.rows[0];
    assert_eq!(mt1.0, 1);
    assert!(mt1.2, "num(epsilon)=7 is prime, rho_event must be true");
    assert!(mt1.5, "rho_pending must be set");
}

#[test]
fn scenario_5_conditional_triple_psi_fires_triple() {
    let mut cfg = Config::default();
    cfg.conditional_triple_psi = true;
    let mut state = State::seeded(&cfg);
    state.upsilon = Rational::from_i64(2, 1);
    state.beta = Rational::from_i64(3, 1);
    state.koppa = Rational::from_i64(5, 1);

    assert!(psi::fire(&cfg, &mut state));
    assert!(state.psi_triple_recent);
}

#[test]
fn scenario_6_csv_shape_emits_eleven_rows() {
    let dir = std::env::temp_dir().join(format!(
        "symbolic_core_scenario6_{}",
        std::process::id()
    ));
    std::fs::create_dir_all(&dir).unwrap();
    let original = std::env::current_dir().unwrap();
    std::env::set_current_dir(&dir).unwrap();

    let mut cfg = base_config();
    cfg.initial_upsilon = Rational::from_i64(3, 5);
    cfg.initial_beta = Rational::from_i64(5, 7);
    cfg.initial_koppa = Rational::from_i64(1, 1);

    symbolic_core::simulate::simulate(&cfg).unwrap();

    let events = std::fs::read_to_string(dir.join("events.csv")).unwrap();
    let values = std::fs::read_to_string(dir.join("values.csv")).unwrap();

    std::env::set_current_dir(&original).unwrap();
    let _ = std::fs::remove_dir_all(&dir);

    // 1 header + 11 data rows each.
    assert_eq!(events.lines().count(), 12);
    assert_eq!(values.lines().count(), 12);
}
