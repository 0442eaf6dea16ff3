//! Convergence control for nested Newton solves.
//!
//! An elliptic solve runs two loops: an outer nonlinear (Newton-type)
//! iteration, and an inner linear iteration that solves the linearized
//! problem within each outer step. This crate is the small core that keeps
//! those loops honest:
//!
//! - [`IterationId`] names a position in the nested iteration, ordered and
//!   hashable so per-iteration state can be keyed and compared.
//! - [`line_search()`] picks the next trial step length from quadratic or
//!   cubic interpolation of residual samples, globalizing the Newton step.
//! - [`globalize_step`] drives the line search until a trial step reduces
//!   the residual enough, or the attempt budget runs out.
//! - [`criteria_match`] and [`HasConverged`] turn residual magnitudes and
//!   iteration counts into a converged / did-not-converge signal.
//!
//! Residual evaluation, operator assembly and the inner linear solve itself
//! are the caller's business; this crate only consumes scalar merit values,
//! slopes and counters.

pub use crate::convergence::{Criteria, HasConverged, Reason, criteria_match};
pub use crate::error::{LineSearchError, SolverError};
pub use crate::history::IterationHistory;
pub use crate::iteration_id::IterationId;
pub use crate::line_search::{StepSamples, line_search};
pub use crate::solver::{AcceptedStep, Config, globalize_step};

/// Convergence criteria and the converged/did-not-converge signal.
mod convergence;
/// Error types for the line search and the globalization driver.
mod error;
/// Per-iteration records keyed by iteration id.
mod history;
/// Identity of one step in the nested outer/inner iteration.
mod iteration_id;
/// Polynomial-interpolation step length selection.
mod line_search;
/// Globalization driver for a single Newton step.
mod solver;
