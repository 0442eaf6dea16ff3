/// Errors from the polynomial step-length selection.
///
/// Both are failures of the current globalization attempt only. The caller
/// decides whether to fall back to something cruder (say, halving the step)
/// or give up on this Newton step; the line search never retries internally.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum LineSearchError {
    /// The residual samples don't pin down a usable polynomial model:
    /// the fitting denominator is zero to within roundoff, so the
    /// interpolation has no well-defined minimum.
    #[error(
        "cannot fit a step-length model to these residual samples: fitting denominator {denominator} is degenerate"
    )]
    InvalidStepModel {
        /// The denominator that came out degenerate.
        denominator: f64,
    },
    /// The cubic model has no real stationary point, which means the samples
    /// contradict the caller's claim that this is a descent direction.
    #[error(
        "search direction is not a descent direction: cubic model discriminant {discriminant} is negative"
    )]
    InvalidDescentDirection {
        /// The negative discriminant `b^2 - 3*a*slope`.
        discriminant: f64,
    },
}

/// Errors from the globalization driver wrapped around the line search.
#[derive(thiserror::Error, Clone, Copy, Debug, PartialEq)]
#[non_exhaustive]
pub enum SolverError {
    /// The line search could not produce a candidate step.
    #[error(transparent)]
    LineSearch(#[from] LineSearchError),
    /// No trial step satisfied the sufficient-decrease condition within the
    /// configured number of globalization attempts.
    #[error("no acceptable step length after {attempts} globalization attempts")]
    StepRejected {
        /// How many trial steps were evaluated and rejected.
        attempts: usize,
    },
}
