//! Public entry points: `simulate` (writes `events.csv`/`values.csv` to the
//! working directory) and `simulate_stream` (observer-only, no file I/O).
//! Spec §6.

use std::fs::File;

use crate::config::Config;
use crate::error::CoreError;
use crate::event::{Observation, Observer};
use crate::sim;

fn bool_col(b: bool) -> &'static str {
    if b {
        "1"
    } else {
        "0"
    }
}

struct CsvObserver {
    events: csv::Writer<File>,
    values: csv::Writer<File>,
    /// The first row-write failure encountered, if any. A write failure is
    /// not a fault (spec §7 reserves that for zero-denominator/programming
    /// errors) -- it is reported and the run returns, so `observe` (whose
    /// `Observer` signature is infallible) records it here instead of
    /// panicking, and `simulate` checks it once `sim::run` returns.
    write_error: Option<CoreError>,
}

impl CsvObserver {
    fn write_row(&mut self, obs: &Observation<'_>) -> Result<(), CoreError> {
        let state = obs.state;

        self.events.write_record(&[
            obs.tick.to_string(),
            obs.microtick.to_string(),
            obs.phase.code().to_string(),
            bool_col(obs.flags.rho_event).to_string(),
            bool_col(obs.flags.psi_fired).to_string(),
            bool_col(obs.flags.mu_zero).to_string(),
            bool_col(obs.flags.forced_emission).to_string(),
            bool_col(state.ratio_triggered_recent).to_string(),
            bool_col(state.psi_triple_recent).to_string(),
            bool_col(state.dual_engine_last_step).to_string(),
            state.koppa_sample_index.to_string(),
            bool_col(state.ratio_threshold_recent).to_string(),
            bool_col(state.psi_strength_applied).to_string(),
            bool_col(state.sign_flip_polarity).to_string(),
        ])?;

        let mut row: Vec<String> = vec![obs.tick.to_string(), obs.microtick.to_string()];
        for r in [
            &state.upsilon,
            &state.beta,
            &state.koppa,
            &state.koppa_sample,
            &state.previous_upsilon,
            &state.previous_beta,
        ] {
            row.push(r.num().to_string());
            row.push(r.den().to_string());
        }
        for i in 0..4usize {
            match state.koppa_stack.get(i) {
                Some(r) => {
                    row.push(r.num().to_string());
                    row.push(r.den().to_string());
                }
                None => {
                    row.push("0".to_string());
                    row.push("1".to_string());
                }
            }
        }
        row.push(state.koppa_stack.size().to_string());
        for r in [
            &state.delta_upsilon,
            &state.delta_beta,
            &state.triangle.phi_over_epsilon,
            &state.triangle.prev_over_phi,
            &state.triangle.epsilon_over_prev,
        ] {
            row.push(r.num().to_string());
            row.push(r.den().to_string());
        }
        self.values.write_record(&row)?;
        Ok(())
    }
}

impl Observer for CsvObserver {
    fn observe(&mut self, observation: &Observation<'_>) {
        // A zero denominator reaching the writer would already have been a
        // fault at construction time (spec §7). A mid-stream I/O failure is
        // not a fault, though -- report and return, per §7 -- so it is
        // stashed here (the first one only) rather than panicking; `simulate`
        // checks it once the loop finishes and skips further phase work for
        // any row after the first failure.
        if self.write_error.is_some() {
            return;
        }
        if let Err(e) = self.write_row(observation) {
            self.write_error = Some(e);
        }
    }
}

/// Runs the full simulation and writes `events.csv`/`values.csv` to the
/// current working directory with the exact column orders from spec §6.
pub fn simulate(config: &Config) -> Result<(), CoreError> {
    let mut events = csv::Writer::from_path("events.csv").map_err(CoreError::Csv)?;
    events.write_record([
        "tick",
        "mt",
        "phase",
        "rho_event",
        "psi_fired",
        "mu_zero",
        "forced_emission",
        "ratio_triggered",
        "triple_psi",
        "dual_engine",
        "koppa_sample_index",
        "ratio_threshold",
        "psi_strength",
        "sign_flip",
    ])?;

    let mut values = csv::Writer::from_path("values.csv").map_err(CoreError::Csv)?;
    values.write_record([
        "tick",
        "mt",
        "upsilon_num",
        "upsilon_den",
        "beta_num",
        "beta_den",
        "koppa_num",
        "koppa_den",
        "koppa_sample_num",
        "koppa_sample_den",
        "prev_upsilon_num",
        "prev_upsilon_den",
        "prev_beta_num",
        "prev_beta_den",
        "koppa_stack0_num",
        "koppa_stack0_den",
        "koppa_stack1_num",
        "koppa_stack1_den",
        "koppa_stack2_num",
        "koppa_stack2_den",
        "koppa_stack3_num",
        "koppa_stack3_den",
        "koppa_stack_size",
        "delta_upsilon_num",
        "delta_upsilon_den",
        "delta_beta_num",
        "delta_beta_den",
        "triangle_phi_over_epsilon_num",
        "triangle_phi_over_epsilon_den",
        "triangle_prev_over_phi_num",
        "triangle_prev_over_phi_den",
        "triangle_epsilon_over_prev_num",
        "triangle_epsilon_over_prev_den",
    ])?;

    let mut observer = CsvObserver {
        events,
        values,
        write_error: None,
    };
    sim::run(config, &mut observer);

    if let Some(e) = observer.write_error {
        return Err(e);
    }

    observer.events.flush()?;
    observer.values.flush()?;
    Ok(())
}

/// Runs the simulation against a caller-supplied observer, with no file I/O.
/// Spec §6.
pub fn simulate_stream<O: Observer>(config: &Config, observer: &mut O) {
    sim::run(config, observer);
}
