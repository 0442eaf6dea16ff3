use std::fmt;

/// Externally configured limits an iterative solve is checked against.
///
/// Plain pass-through data: nothing in this crate invents tolerances, it
/// only compares against them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Criteria {
    /// Stop after this many iterations even if the residual criteria were
    /// never met.
    pub max_iterations: usize,
    /// Converged when the residual magnitude drops to or below this value.
    pub absolute_residual: f64,
    /// Converged when the residual magnitude drops to or below this fraction
    /// of the initial residual magnitude.
    pub relative_residual: f64,
}

/// Which criterion stopped the iteration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Reason {
    /// The residual met the absolute tolerance.
    AbsoluteResidual,
    /// The residual met the tolerance relative to the initial residual.
    RelativeResidual,
    /// The iteration budget ran out without meeting either residual
    /// criterion. This is the did-not-converge signal.
    MaxIterations,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reason::AbsoluteResidual => write!(f, "absolute residual tolerance met"),
            Reason::RelativeResidual => write!(f, "relative residual tolerance met"),
            Reason::MaxIterations => write!(f, "reached the maximum number of iterations"),
        }
    }
}

/// Determine whether any of the `criteria` are met.
///
/// `iteration_id` is the count of the next, not yet performed, iteration:
/// with `max_iterations = 1` the budget is exhausted once `iteration_id`
/// is 1, since the first iteration (id 0) has completed. Accordingly
/// `residual_magnitude` reflects the state after the completed iterations,
/// while `initial_residual_magnitude` is the state before the first one.
///
/// The residual criteria are checked before the iteration budget, so a
/// solve that converges on its last allowed iteration reports convergence
/// rather than budget exhaustion.
pub fn criteria_match(
    criteria: &Criteria,
    iteration_id: usize,
    residual_magnitude: f64,
    initial_residual_magnitude: f64,
) -> Option<Reason> {
    if residual_magnitude <= criteria.absolute_residual {
        return Some(Reason::AbsoluteResidual);
    }
    if residual_magnitude / initial_residual_magnitude <= criteria.relative_residual {
        return Some(Reason::RelativeResidual);
    }
    if iteration_id >= criteria.max_iterations {
        return Some(Reason::MaxIterations);
    }
    None
}

/// Signals completion of an iterative solve.
///
/// Evaluates the criteria once at construction and remembers both the
/// outcome and the quantities it was judged from, so it can be stored,
/// compared and rendered per iteration. `has_converged` is `true` as soon
/// as any criterion matched; [`reason`](Self::reason) distinguishes real
/// convergence from an exhausted iteration budget.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HasConverged {
    reason: Option<Reason>,
    num_iterations: usize,
    residual_magnitude: f64,
    initial_residual_magnitude: f64,
}

impl HasConverged {
    /// Check the `criteria` by means of [`criteria_match`].
    pub fn new(
        criteria: &Criteria,
        iteration_id: usize,
        residual_magnitude: f64,
        initial_residual_magnitude: f64,
    ) -> Self {
        Self {
            reason: criteria_match(
                criteria,
                iteration_id,
                residual_magnitude,
                initial_residual_magnitude,
            ),
            num_iterations: iteration_id,
            residual_magnitude,
            initial_residual_magnitude,
        }
    }

    /// True once any criterion matched and no further iterations should run.
    pub fn has_converged(&self) -> bool {
        self.reason.is_some()
    }

    /// Why the iteration stopped, or `None` while it should keep going.
    pub fn reason(&self) -> Option<Reason> {
        self.reason
    }

    /// How many iterations have completed.
    pub fn num_iterations(&self) -> usize {
        self.num_iterations
    }

    /// Residual magnitude after the last completed iteration.
    pub fn residual_magnitude(&self) -> f64 {
        self.residual_magnitude
    }

    /// Residual magnitude before the first iteration.
    pub fn initial_residual_magnitude(&self) -> f64 {
        self.initial_residual_magnitude
    }
}

impl fmt::Display for HasConverged {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            Some(reason) => write!(
                f,
                "stopped after {} iterations ({}), residual {:e}",
                self.num_iterations, reason, self.residual_magnitude
            ),
            None => write!(
                f,
                "not yet converged after {} iterations, residual {:e}",
                self.num_iterations, self.residual_magnitude
            ),
        }
    }
}
