use crate::line_search::{StepSamples, line_search};
use crate::{Criteria, SolverError};

/// Configuration for the globalized Newton outer loop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Config {
    /// When to declare the outer iteration finished.
    pub criteria: Criteria,
    /// How many trial steps to reject before giving up on this Newton step.
    pub max_globalization_steps: usize,
    /// Armijo constant: a trial step of length `t` is accepted once the
    /// merit value drops to `residual + sufficient_decrease * t * slope`
    /// or below.
    pub sufficient_decrease: f64,
    /// The relaxation weight applied by the inner linear solve (the
    /// Richardson parameter). Pass-through data: read by the linear-solve
    /// step, not used by the globalization itself.
    pub relaxation: f64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            criteria: Criteria {
                max_iterations: 50,
                absolute_residual: 1e-10,
                relative_residual: 1e-8,
            },
            max_globalization_steps: 10,
            sufficient_decrease: 1e-4,
            relaxation: 1.0,
        }
    }
}

/// A trial step the globalization accepted.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AcceptedStep {
    /// The accepted step length along the Newton direction.
    pub step_length: f64,
    /// Merit value at the accepted step.
    pub residual: f64,
    /// How many trial steps were rejected before this one.
    pub globalization_steps: usize,
}

/// Find a step length along the current Newton direction that sufficiently
/// reduces the residual.
///
/// `merit` evaluates the merit function (residual norm) at a trial step
/// length; `residual` and `residual_slope` are its value and directional
/// derivative at step length zero. The full step is tried first. Each
/// rejected trial feeds [`line_search`], and the interpolated candidate is
/// clamped into `[0.1, 0.5]` of the rejected trial so one bad fit can
/// neither stall the backtracking nor collapse the step to zero.
///
/// # Errors
///
/// [`SolverError::StepRejected`] when the attempt budget runs out, and any
/// [`LineSearchError`](crate::LineSearchError) as soon as the interpolation
/// fails. Both are fatal to this Newton step only; the outer loop decides
/// what to do with the solve.
pub fn globalize_step<F>(
    mut merit: F,
    residual: f64,
    residual_slope: f64,
    config: &Config,
) -> Result<AcceptedStep, SolverError>
where
    F: FnMut(f64) -> f64,
{
    let mut step_length = 1.0;
    let mut prev: Option<(f64, f64)> = None;
    for attempt in 0..=config.max_globalization_steps {
        let next_residual = merit(step_length);
        if next_residual <= residual + config.sufficient_decrease * step_length * residual_slope {
            return Ok(AcceptedStep {
                step_length,
                residual: next_residual,
                globalization_steps: attempt,
            });
        }
        let samples = match prev {
            None => StepSamples::First {
                step_length,
                residual,
                residual_slope,
                next_residual,
            },
            Some((prev_step_length, prev_residual)) => StepSamples::Subsequent {
                step_length,
                prev_step_length,
                residual,
                residual_slope,
                next_residual,
                prev_residual,
            },
        };
        let candidate = line_search(&samples)?;
        prev = Some((step_length, next_residual));
        step_length = candidate.clamp(0.1 * step_length, 0.5 * step_length);
    }
    Err(SolverError::StepRejected {
        attempts: config.max_globalization_steps + 1,
    })
}
