//! Symbolic Core -- a deterministic symbolic-dynamics simulator over
//! unbounded rational numbers.
//!
//! Two coupled rationals, υ and β, are carried through an 11-microtick
//! phase schedule per tick. Three phase kinds repeat in a fixed pattern:
//!
//! - **Emission (E)**, microticks 1, 4, 7, 10 -- the engine step advances
//!   υ/β and tests the result for number-theoretic patterns.
//! - **Memory (M)**, microticks 2, 5, 8, 11 -- the ψ transform may fire,
//!   subject to mode, ratio-window, and stack-depth gating.
//! - **Reset (R)**, microticks 3, 6, 9 -- the ϙ accumulator settles.
//!
//! No arithmetic path in this crate ever reduces a fraction to lowest
//! terms: `2/4` and `1/2` are distinct values throughout. See
//! [`rational::Rational`].
//!
//! # Key Types
//!
//! - [`rational::Rational`] -- raw, non-reducing (numerator, denominator)
//!   arithmetic over arbitrary-precision integers.
//! - [`state::State`] -- the mutable simulation state: υ, β, ϙ, the ϙ-stack,
//!   and the per-microtick recency flags.
//! - [`config::Config`] -- every recognized mode/toggle/seed from the
//!   external configuration contract.
//! - [`sim::run`] -- the 11-microtick phase schedule, dispatching one
//!   [`event::Observation`] per microtick to a caller-supplied
//!   [`event::Observer`].
//! - [`simulate::simulate`] / [`simulate::simulate_stream`] -- the two public
//!   entry points: CSV-writing and observer-only, respectively.

pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod koppa;
pub mod numtheory;
pub mod psi;
pub mod ratio;
pub mod rational;
pub mod sim;
pub mod simulate;
pub mod state;
