//! Error handling discipline.
//!
//! Two families of failure exist and they are deliberately not unified into
//! one `Result` type:
//!
//! - **Faults** (this module's [`CoreError`]): a zero denominator anywhere,
//!   or file I/O failure from [`crate::simulate::simulate`]. These abort the
//!   operation with a diagnostic.
//! - **Modeled conditions**: division by a zero-numerator divisor inside the
//!   engine or ψ, or "no ψ can fire because numerators are zero". These are
//!   *not* errors -- they are local no-ops surfaced as `false` flags in the
//!   observation stream. They are represented as plain `bool`/`Option`
//!   returns elsewhere in this crate, never as `CoreError`.

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("arithmetic fault: {0}")]
    Arithmetic(#[from] crate::rational::ZeroDenominator),

    #[error("I/O failure writing simulation output: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV writer failure: {0}")]
    Csv(#[from] csv::Error),
}
